use web_sys::{window, Storage};

fn storage() -> Storage {
    window()
        .and_then(|w| w.local_storage().ok().flatten())
        .expect("localStorage")
}

pub fn get_item(key: &str) -> Option<String> {
    storage().get_item(key).ok().flatten()
}

pub fn set_item(key: &str, value: &str) {
    let _ = storage().set_item(key, value);
}

pub fn remove_item(key: &str) {
    let _ = storage().remove_item(key);
}
