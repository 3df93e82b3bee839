use dioxus::prelude::*;

use crate::db;
use crate::model::{new_id, Block};

const PAGE_SIZE: usize = 10;

#[derive(Clone, Default, PartialEq)]
struct BlockForm {
    id: Option<String>,
    name: String,
}

#[component]
#[allow(unused_mut)]
pub fn Blocks() -> Element {
    let mut list = use_signal(db::list_blocks);
    let mut query = use_signal(String::new);
    let mut current_page = use_signal(|| 0usize);
    let mut modal_open = use_signal(|| false);
    let mut saving = use_signal(|| false);
    let mut form = use_signal(BlockForm::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut toast = use_signal(|| Option::<String>::None);

    let filtered = move || {
        let q = query.read().to_lowercase();
        let items = list.read().clone();
        if q.is_empty() {
            return items;
        }
        items
            .into_iter()
            .filter(|b| b.name.to_lowercase().contains(&q))
            .collect::<Vec<_>>()
    };

    let open_create = move |_| {
        error.set(None);
        form.set(BlockForm::default());
        modal_open.set(true);
    };
    let mut open_edit = {
        let list = list.clone();
        move |id: String| {
            error.set(None);
            if let Some(b) = list.read().iter().find(|x| x.id == id).cloned() {
                form.set(BlockForm { id: Some(b.id), name: b.name });
                modal_open.set(true);
            }
        }
    };

    let mut show_toast = move |msg: String| {
        toast.set(Some(msg));
        #[cfg(target_arch = "wasm32")]
        spawn(async move {
            gloo_timers::future::TimeoutFuture::new(2_500).await;
            toast.set(None);
        });
    };

    let on_submit = move |_| {
        error.set(None);
        let f = form.read().clone();
        if f.name.trim().is_empty() {
            error.set(Some("Block name is required".into()));
            return;
        }
        saving.set(true);
        spawn(async move {
            #[cfg(target_arch = "wasm32")]
            gloo_timers::future::TimeoutFuture::new(1_000).await;
            let updating = f.id.is_some();
            let block = Block { id: f.id.unwrap_or_else(new_id), name: f.name };
            if updating {
                // Renaming does not refresh blockName snapshots on rooms.
                db::update_block(block);
            } else {
                db::add_block(block);
            }
            list.set(db::list_blocks());
            saving.set(false);
            modal_open.set(false);
            show_toast(if updating {
                "Block updated successfully".into()
            } else {
                "Block created successfully".into()
            });
        });
    };

    // Unconditional: rooms assigned to the block are left pointing at it.
    let mut remove = move |id: String| {
        db::delete_block(&id);
        list.set(db::list_blocks());
    };

    rsx! {
        div { class: "min-h-screen flex items-start justify-center",
            div { class: "w-full max-w-2xl mx-auto space-y-5",
                div { class: "flex items-center justify-between",
                    h1 { class: "text-xl sm:text-2xl font-semibold", "Blocks" }
                    button {
                        class: "inline-flex items-center gap-2 h-9 px-3 rounded-md bg-blue-600 hover:bg-blue-500 text-white text-sm font-medium transition",
                        onclick: open_create,
                        span { "➕" }
                        span { class: "hidden sm:inline", "New block" }
                    }
                }
                {toast.read().as_ref().map(|msg| rsx! {
                    div { class: "rounded-md border border-slate-200 bg-white p-3 text-sm text-green-700 shadow-sm",
                        {msg.clone()}
                    }
                })}
                div { class: "rounded-xl border border-slate-200 bg-white shadow-sm p-4 sm:p-5 space-y-4",
                    input {
                        class: "h-10 w-full rounded-md border border-slate-300 bg-white px-3 py-2 text-sm focus:outline-none focus:ring-2",
                        placeholder: "Search blocks…",
                        value: query.read().clone(),
                        oninput: move |e| {
                            query.set(e.value());
                            current_page.set(0);
                        },
                    }
                    {
                        let all_items = filtered();
                        let total = all_items.len();
                        let pages = if total == 0 { 1 } else { ((total - 1) / PAGE_SIZE) + 1 };
                        let page = current_page.read().clone().min(pages - 1);
                        let start = page * PAGE_SIZE;
                        let end = core::cmp::min(start + PAGE_SIZE, total);
                        let page_items = all_items[start..end].to_vec();
                        rsx! {
                            div { class: "flex items-center justify-between text-sm text-slate-600",
                                span {
                                    {format!("{}–{} of {}", if total == 0 { 0 } else { start + 1 }, end, total)}
                                }
                                div { class: "flex items-center gap-1",
                                    button {
                                        class: "h-8 px-2 rounded-md border border-slate-300 disabled:opacity-50",
                                        disabled: page == 0,
                                        onclick: move |_| {
                                            if page > 0 { current_page.set(page - 1); }
                                        },
                                        "Prev"
                                    }
                                    button {
                                        class: "h-8 px-2 rounded-md border border-slate-300 disabled:opacity-50",
                                        disabled: page + 1 >= pages,
                                        onclick: move |_| {
                                            if page + 1 < pages { current_page.set(page + 1); }
                                        },
                                        "Next"
                                    }
                                }
                            }
                            {
                                if page_items.is_empty() {
                                    rsx! {
                                        div { class: "text-sm text-slate-600", "No blocks yet." }
                                    }
                                } else {
                                    rsx! {
                                        ul { class: "divide-y divide-slate-200",
                                            for b in page_items.into_iter() {
                                                {
                                                    let edit_id = b.id.clone();
                                                    let delete_id = b.id.clone();
                                                    rsx! {
                                                        li { class: "py-3 flex items-center justify-between gap-3",
                                                            div {
                                                                class: "min-w-0 flex-1 cursor-pointer hover:bg-slate-100 rounded-md px-3 py-2",
                                                                onclick: move |_| open_edit(edit_id.clone()),
                                                                div { class: "font-medium text-slate-800", "{b.name}" }
                                                            }
                                                            button {
                                                                class: "h-9 px-3 rounded-md border border-slate-300 text-sm hover:bg-slate-100",
                                                                onclick: move |_| remove(delete_id.clone()),
                                                                "🗑️"
                                                            }
                                                        }
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        {modal_open().then(|| rsx! {
            div { class: "fixed inset-0 z-50 flex items-center justify-center bg-black/50 p-4",
                div { class: "w-full max-w-md rounded-xl border border-slate-200 bg-white shadow-lg p-5 space-y-4",
                    h2 { class: "text-lg font-semibold",
                        {if form.read().id.is_some() { "Edit Block" } else { "Add New Block" }}
                    }
                    {error.read().as_ref().map(|err| rsx! {
                        p { class: "text-red-600 text-sm", {err.clone()} }
                    })}
                    div { class: "space-y-2",
                        label { class: "block text-sm font-medium text-slate-700", "Block name" }
                        input {
                            class: "h-10 w-full rounded-md border border-slate-300 bg-white px-3 py-2 text-sm",
                            placeholder: "e.g. Main",
                            value: form.read().name.clone(),
                            oninput: move |e| form.write().name = e.value(),
                        }
                    }
                    div { class: "flex justify-end gap-2",
                        button {
                            class: "h-9 px-3 rounded-md border border-slate-300 text-sm",
                            onclick: move |_| modal_open.set(false),
                            "Cancel"
                        }
                        button {
                            class: "h-9 px-3 rounded-md bg-blue-600 hover:bg-blue-500 text-white text-sm font-medium disabled:opacity-50",
                            disabled: saving(),
                            onclick: on_submit,
                            {if saving() { "Saving…" } else { "Save" }}
                        }
                    }
                }
            }
        })}
    }
}
