use crate::Route;
use dioxus::prelude::*;

#[component]
pub fn Navbar() -> Element {
    let nav = navigator();

    rsx! {
        aside { class: "fixed top-0 left-0 z-40 w-64 h-screen transition-transform -translate-x-full sm:translate-x-0",
            div { class: "h-full px-3 py-4 overflow-y-auto bg-gray-50",
                a { class: "flex items-center ps-2.5 mb-5",
                    span { class: "self-center text-xl font-semibold whitespace-nowrap",
                        "Ward Rota"
                    }
                }
                ul { class: "space-y-2 font-medium",
                    li {
                        a { class: "flex items-center p-2 text-gray-900 rounded-lg hover:bg-gray-100 group",
                            onclick: move |_| {
                                nav.push(Route::Shifts {});
                            },
                            span { "🕘" }
                            span { class: "ms-3", "Shifts" }
                        }
                    }
                    li {
                        a { class: "flex items-center p-2 text-gray-900 rounded-lg hover:bg-gray-100 group",
                            onclick: move |_| {
                                nav.push(Route::Blocks {});
                            },
                            span { "🏥" }
                            span { class: "ms-3", "Blocks" }
                        }
                    }
                    li {
                        a { class: "flex items-center p-2 text-gray-900 rounded-lg hover:bg-gray-100 group",
                            onclick: move |_| {
                                nav.push(Route::Rooms {});
                            },
                            span { "🚪" }
                            span { class: "ms-3", "Rooms" }
                        }
                    }
                    li {
                        a { class: "flex items-center p-2 text-gray-900 rounded-lg hover:bg-gray-100 group",
                            onclick: move |_| {
                                nav.push(Route::Schedule {});
                            },
                            span { "📅" }
                            span { class: "ms-3", "Room Schedule" }
                        }
                    }
                }
            }
        }

        div { class: "p-4 sm:ml-64",
            Outlet::<Route> {}
        }
    }
}
