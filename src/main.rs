use dioxus::prelude::*;

mod components;
mod db;
mod model;
mod schedule;
mod views;

use components::Navbar;
use views::{Blocks, Rooms, Schedule, Shifts};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Navbar)]
    #[route("/")]
    Shifts {},
    #[route("/blocks")]
    Blocks {},
    #[route("/rooms")]
    Rooms {},
    #[route("/schedule")]
    Schedule {},
}

fn main() {
    #[cfg(target_arch = "wasm32")]
    let _ = console_log::init_with_level(log::Level::Info);
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/tailwind.css") }
        div { class: "min-h-screen bg-white text-slate-900",
            Router::<Route> {}
        }
    }
}
