// In-process stand-in for the browser's localStorage, used by the desktop
// build and the test suite. Same key/value surface as web_store.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;

static STORE: Lazy<Mutex<HashMap<String, String>>> = Lazy::new(|| Mutex::new(HashMap::new()));

pub fn get_item(key: &str) -> Option<String> {
    STORE.lock().unwrap().get(key).cloned()
}

pub fn set_item(key: &str, value: &str) {
    STORE.lock().unwrap().insert(key.to_string(), value.to_string());
}

pub fn remove_item(key: &str) {
    STORE.lock().unwrap().remove(key);
}
