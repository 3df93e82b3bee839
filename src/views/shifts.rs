use dioxus::prelude::*;

use crate::db;
use crate::model::{new_id, shift_label, Shift};

const PAGE_SIZE: usize = 10;

#[derive(Clone, PartialEq)]
struct ShiftForm {
    id: Option<String>,
    start_time: String, // "HH:MM"
    end_time: String,
}

impl Default for ShiftForm {
    fn default() -> Self {
        ShiftForm { id: None, start_time: "09:00".into(), end_time: "13:00".into() }
    }
}

#[component]
#[allow(unused_mut)]
pub fn Shifts() -> Element {
    let mut list = use_signal(db::list_shifts);
    let mut query = use_signal(String::new);
    let mut current_page = use_signal(|| 0usize);
    let mut modal_open = use_signal(|| false);
    let mut saving = use_signal(|| false);
    let mut form = use_signal(ShiftForm::default);
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
            .filter(|s| s.name.to_lowercase().contains(&q))
            .collect::<Vec<_>>()
    };

    let open_create = move |_| {
        error.set(None);
        form.set(ShiftForm::default());
        modal_open.set(true);
    };
    let mut open_edit = {
        let list = list.clone();
        move |id: String| {
            error.set(None);
            if let Some(s) = list.read().iter().find(|x| x.id == id).cloned() {
                form.set(ShiftForm { id: Some(s.id), start_time: s.start_time, end_time: s.end_time });
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
        if f.start_time.is_empty() || f.end_time.is_empty() {
            error.set(Some("Start and end time are required".into()));
            return;
        }
        saving.set(true);
        spawn(async move {
            // Save dialogs sit behind a fixed artificial latency.
            #[cfg(target_arch = "wasm32")]
            gloo_timers::future::TimeoutFuture::new(1_000).await;
            let updating = f.id.is_some();
            let shift = Shift {
                id: f.id.unwrap_or_else(new_id),
                name: shift_label(&f.start_time, &f.end_time),
                start_time: f.start_time,
                end_time: f.end_time,
            };
            if updating {
                db::update_shift(shift);
            } else {
                db::add_shift(shift);
            }
            list.set(db::list_shifts());
            saving.set(false);
            modal_open.set(false);
            show_toast(if updating {
                "Shift updated successfully".into()
            } else {
                "Shift created successfully".into()
            });
        });
    };

    // Unconditional: schedule cells referencing the shift keep their
    // name snapshot.
    let mut remove = move |id: String| {
        db::delete_shift(&id);
        list.set(db::list_shifts());
    };

    rsx! {
        div { class: "min-h-screen flex items-start justify-center",
            div { class: "w-full max-w-2xl mx-auto space-y-5",
                div { class: "flex items-center justify-between",
                    h1 { class: "text-xl sm:text-2xl font-semibold", "Shifts" }
                    button {
                        class: "inline-flex items-center gap-2 h-9 px-3 rounded-md bg-blue-600 hover:bg-blue-500 text-white text-sm font-medium transition",
                        onclick: open_create,
                        span { "➕" }
                        span { class: "hidden sm:inline", "New shift" }
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
                        placeholder: "Search shifts…",
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
                                        div { class: "text-sm text-slate-600", "No shifts yet." }
                                    }
                                } else {
                                    rsx! {
                                        ul { class: "divide-y divide-slate-200",
                                            for s in page_items.into_iter() {
                                                {
                                                    let edit_id = s.id.clone();
                                                    let delete_id = s.id.clone();
                                                    rsx! {
                                                        li { class: "py-3 flex items-center justify-between gap-3",
                                                            div {
                                                                class: "min-w-0 flex-1 cursor-pointer hover:bg-slate-100 rounded-md px-3 py-2",
                                                                onclick: move |_| open_edit(edit_id.clone()),
                                                                div { class: "font-medium text-slate-800", "{s.name}" }
                                                                div { class: "text-xs text-slate-500", "{s.start_time} – {s.end_time}" }
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
                        {if form.read().id.is_some() { "Edit Shift" } else { "Add New Shift" }}
                    }
                    {error.read().as_ref().map(|err| rsx! {
                        p { class: "text-red-600 text-sm", {err.clone()} }
                    })}
                    div { class: "space-y-2",
                        label { class: "block text-sm font-medium text-slate-700", "Time range" }
                        div { class: "flex items-center gap-2",
                            input {
                                r#type: "time",
                                class: "h-10 w-full rounded-md border border-slate-300 bg-white px-3 py-2 text-sm",
                                value: form.read().start_time.clone(),
                                oninput: move |e| form.write().start_time = e.value(),
                            }
                            span { class: "text-slate-500", "–" }
                            input {
                                r#type: "time",
                                class: "h-10 w-full rounded-md border border-slate-300 bg-white px-3 py-2 text-sm",
                                value: form.read().end_time.clone(),
                                oninput: move |e| form.write().end_time = e.value(),
                            }
                        }
                        p { class: "text-xs text-slate-500",
                            "The shift is listed as "
                            {shift_label(&form.read().start_time, &form.read().end_time)}
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
