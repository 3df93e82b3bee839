use chrono::NaiveDate;
use dioxus::prelude::*;

use crate::db;
use crate::model::{AssignmentRecord, SelectedCell, WeekSchedule};
use crate::schedule::{build_week, clean_doctor_name, derive_week, reconcile, rooms_by_block};

#[cfg(target_arch = "wasm32")]
fn today() -> NaiveDate {
    let d = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        d.get_full_year() as i32,
        d.get_month() as u32 + 1,
        d.get_date() as u32,
    )
    .unwrap()
}

#[cfg(not(target_arch = "wasm32"))]
fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[component]
#[allow(unused_mut)]
pub fn Schedule() -> Element {
    let shifts = use_signal(db::list_shifts);
    let rooms = use_signal(db::list_rooms);
    let mut week = use_signal(|| Option::<WeekSchedule>::None);
    let mut selected = use_signal(|| Option::<SelectedCell>::None);
    let mut modal_open = use_signal(|| false);

    // Load the persisted week for the current key, or generate and persist
    // the skeleton once, then merge the assignment log over it. A week that
    // was generated earlier is never rebuilt, even if rooms or shifts
    // changed since.
    use_effect(move || {
        let info = derive_week(today());
        let schedule = match db::load_week_schedule(&info.week_key) {
            Some(saved) => saved,
            None => {
                let fresh = build_week(&info, &rooms.read(), &shifts.read());
                db::save_week_schedule(&fresh);
                fresh
            }
        };
        let merged = reconcile(schedule, &db::list_assignments(), &shifts.read());
        week.set(Some(merged));
    });

    let mut apply_update = move |cell: SelectedCell, raw: String| {
        let name = clean_doctor_name(&raw);
        let Some(mut ws) = week.read().clone() else { return };
        if let Some(day) = ws.data.iter_mut().find(|d| d.day == cell.day) {
            if let Some(row) = day.room_data.get_mut(&cell.room_id) {
                if let Some(slot) = row.iter_mut().find(|c| c.shift_id == cell.shift_id) {
                    slot.doctor = name.clone();
                }
            }
        }
        db::save_week_schedule(&ws);
        db::put_assignment(AssignmentRecord {
            room_id: cell.room_id,
            day: cell.day,
            shift_id: cell.shift_id,
            doctor: name,
        });
        week.set(Some(ws));
    };

    let mut on_cell_click = move |cell: SelectedCell| {
        db::remember_selected_cell(&cell);
        selected.set(Some(cell));
        modal_open.set(true);
    };

    let Some(ws) = week.read().clone() else {
        return rsx! {};
    };
    let groups = rooms_by_block(&rooms.read());
    let flat_rooms: Vec<_> = groups.iter().flat_map(|(_, members)| members.clone()).collect();
    let shift_list = shifts.read().clone();

    rsx! {
        div { class: "space-y-6",
            div { class: "flex justify-center items-center",
                h2 { class: "text-xl font-semibold", "Week {ws.week_number}, {ws.year}" }
            }
            div { class: "overflow-x-auto",
                table { class: "w-full border-collapse text-sm",
                    thead {
                        tr {
                            th { class: "border p-3 bg-slate-100" }
                            for (block_name, members) in groups.iter() {
                                th {
                                    class: "border p-3 bg-slate-100 text-center",
                                    colspan: "{members.len()}",
                                    "{block_name}"
                                }
                            }
                        }
                        tr {
                            th { class: "border p-3 bg-slate-100" }
                            for room in flat_rooms.iter() {
                                th { class: "border p-3 bg-slate-200 text-center", "{room.name}" }
                            }
                        }
                    }
                    tbody {
                        for day in ws.data.iter() {
                            tr {
                                td { class: "border p-3 bg-slate-200 font-medium", "{day.day}" }
                                for _room in flat_rooms.iter() {
                                    td { class: "border p-0 bg-slate-50" }
                                }
                            }
                            for shift in shift_list.iter() {
                                tr {
                                    td { class: "border p-3 text-center", "{shift.name}" }
                                    for room in flat_rooms.iter() {
                                        {
                                            let doctor = day
                                                .room_data
                                                .get(&room.id)
                                                .and_then(|row| row.iter().find(|c| c.shift_id == shift.id))
                                                .map(|c| c.doctor.clone())
                                                .unwrap_or_default();
                                            let cell = SelectedCell {
                                                room_id: room.id.clone(),
                                                day: day.day.clone(),
                                                shift_id: shift.id.clone(),
                                                doctor: if doctor.is_empty() { None } else { Some(doctor.clone()) },
                                            };
                                            if doctor.is_empty() {
                                                rsx! {
                                                    td { class: "border p-0 min-w-32",
                                                        div {
                                                            class: "w-full h-full p-3 cursor-pointer bg-yellow-300",
                                                            onclick: move |_| on_cell_click(cell.clone()),
                                                        }
                                                    }
                                                }
                                            } else {
                                                let unassign = cell.clone();
                                                rsx! {
                                                    td { class: "border p-0 min-w-32",
                                                        div {
                                                            class: "w-full h-full p-3 cursor-pointer bg-green-400",
                                                            onclick: move |_| on_cell_click(cell.clone()),
                                                            div { class: "flex items-center justify-between",
                                                                span { "Dr. {doctor}" }
                                                                button {
                                                                    class: "text-slate-900 px-2",
                                                                    onclick: move |e| {
                                                                        e.stop_propagation();
                                                                        apply_update(unassign.clone(), String::new());
                                                                    },
                                                                    "✕"
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
        }

        {modal_open().then(|| {
            let current = selected
                .read()
                .as_ref()
                .and_then(|c| c.doctor.clone())
                .unwrap_or_default();
            rsx! {
                DoctorModal {
                    current_doctor: current,
                    on_save: move |name: String| {
                        if let Some(cell) = selected.read().clone() {
                            apply_update(cell, name);
                        }
                        modal_open.set(false);
                        selected.set(None);
                    },
                    on_close: move |_| {
                        modal_open.set(false);
                        selected.set(None);
                    },
                }
            }
        })}
    }
}

/// Assign/remove dialog for a single cell. When the cell already has a
/// doctor the dialog only offers removal; reassignment goes through the
/// log upsert all the same.
#[component]
fn DoctorModal(
    current_doctor: String,
    on_save: EventHandler<String>,
    on_close: EventHandler<()>,
) -> Element {
    let doctors = use_signal(db::doctor_list);
    let mut selected_doctor = use_signal(String::new);
    let mut custom_name = use_signal(String::new);
    let mut is_custom = use_signal(|| false);

    let is_remove = !current_doctor.is_empty();

    let on_submit = move |_| {
        if is_remove {
            on_save.call(String::new());
            return;
        }
        if is_custom() {
            let name = custom_name.read().trim().to_string();
            if name.is_empty() {
                return;
            }
            // Free-text names feed the dropdown for next time.
            db::remember_doctor(&name);
            on_save.call(name);
        } else {
            let name = selected_doctor.read().clone();
            if name.is_empty() {
                return;
            }
            on_save.call(name);
        }
    };

    rsx! {
        div { class: "fixed inset-0 z-50 flex items-center justify-center bg-black/50 p-4",
            div { class: "w-full max-w-md rounded-xl border border-slate-200 bg-white shadow-lg overflow-hidden",
                div { class: "border-b p-4",
                    h3 { class: "text-xl font-medium text-slate-800",
                        {if is_remove { "Remove Doctor" } else { "Add Doctor" }}
                    }
                }
                {
                    if is_remove {
                        rsx! {
                            div { class: "p-5 border-b",
                                p { class: "text-slate-600",
                                    "Are you sure you want to remove Dr. {current_doctor}?"
                                }
                            }
                        }
                    } else {
                        rsx! {
                            div { class: "p-5 border-b space-y-4",
                                div { class: "space-y-2",
                                    label { class: "flex items-center gap-2 text-sm font-medium text-slate-700",
                                        input {
                                            r#type: "radio",
                                            name: "doctorType",
                                            checked: !is_custom(),
                                            onchange: move |_| is_custom.set(false),
                                        }
                                        "Select existing doctor"
                                    }
                                    select {
                                        class: "h-10 w-full rounded-md border border-slate-300 bg-white px-3 py-2 text-sm disabled:bg-gray-100",
                                        disabled: is_custom(),
                                        value: selected_doctor.read().clone(),
                                        onchange: move |e| selected_doctor.set(e.value()),
                                        option { value: "", "-- Select a doctor --" }
                                        for d in doctors.read().iter() {
                                            option { value: "{d}", "{d}" }
                                        }
                                    }
                                }
                                div { class: "space-y-2",
                                    label { class: "flex items-center gap-2 text-sm font-medium text-slate-700",
                                        input {
                                            r#type: "radio",
                                            name: "doctorType",
                                            checked: is_custom(),
                                            onchange: move |_| is_custom.set(true),
                                        }
                                        "Add new doctor"
                                    }
                                    input {
                                        class: "h-10 w-full rounded-md border border-slate-300 bg-white px-3 py-2 text-sm disabled:bg-gray-100",
                                        disabled: !is_custom(),
                                        placeholder: "Doctor name (without the Dr. prefix)",
                                        value: custom_name.read().clone(),
                                        oninput: move |e| custom_name.set(e.value()),
                                    }
                                }
                            }
                        }
                    }
                }
                div { class: "flex justify-end p-4 gap-2",
                    button {
                        class: "h-9 px-3 rounded-md border border-slate-300 text-sm",
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    {
                        if is_remove {
                            rsx! {
                                button {
                                    class: "h-9 px-3 rounded-md bg-red-600 hover:bg-red-500 text-white text-sm font-medium",
                                    onclick: on_submit,
                                    "Remove"
                                }
                            }
                        } else {
                            rsx! {
                                button {
                                    class: "h-9 px-3 rounded-md bg-blue-600 hover:bg-blue-500 text-white text-sm font-medium",
                                    onclick: on_submit,
                                    "Save"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
