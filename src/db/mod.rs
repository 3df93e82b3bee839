//! Storage facade. Collections live in one in-memory table guarded by a
//! mutex; every mutation rewrites the owning collection's storage key
//! before returning, so the persisted payload always matches memory.
//! The raw key/value backend is localStorage on wasm and an in-process
//! map everywhere else.

use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Mutex;

use crate::model::{AssignmentRecord, Block, Room, SelectedCell, Shift, WeekSchedule};

#[cfg(target_arch = "wasm32")]
mod web_store;
#[cfg(target_arch = "wasm32")]
use web_store as backend;
#[cfg(not(target_arch = "wasm32"))]
mod mem_store;
#[cfg(not(target_arch = "wasm32"))]
use mem_store as backend;

const KEY_SHIFTS: &str = "shifts";
const KEY_BLOCKS: &str = "blocks";
const KEY_ROOMS: &str = "rooms";
const KEY_WEEK_SCHEDULE: &str = "weekSchedule";
const KEY_ASSIGNMENTS: &str = "doctorAssignments";
const KEY_DOCTOR_LIST: &str = "doctorList";
const KEY_SELECTED_CELL: &str = "selectedCellData";

#[derive(Default)]
struct AppData {
    shifts: Vec<Shift>,
    blocks: Vec<Block>,
    rooms: Vec<Room>,
    assignments: Vec<AssignmentRecord>,
    doctors: Vec<String>,
}

static DATA: Lazy<Mutex<AppData>> = Lazy::new(|| {
    Mutex::new(AppData {
        shifts: load_collection(KEY_SHIFTS),
        blocks: load_collection(KEY_BLOCKS),
        rooms: load_collection(KEY_ROOMS),
        assignments: load_collection(KEY_ASSIGNMENTS),
        doctors: load_collection(KEY_DOCTOR_LIST),
    })
});

// Collections carry no schema version; a payload that no longer parses is
// unrecoverable here and startup is the right place to find out.
fn load_collection<T: DeserializeOwned>(key: &str) -> Vec<T> {
    match backend::get_item(key) {
        Some(raw) => serde_json::from_str(&raw)
            .unwrap_or_else(|e| panic!("corrupt payload under {key}: {e}")),
        None => Vec::new(),
    }
}

fn persist<T: Serialize>(key: &str, items: &[T]) {
    if let Ok(json) = serde_json::to_string(items) {
        backend::set_item(key, &json);
    }
}

// ================= Shifts =================

pub fn list_shifts() -> Vec<Shift> {
    DATA.lock().unwrap().shifts.clone()
}

pub fn add_shift(shift: Shift) {
    let mut data = DATA.lock().unwrap();
    data.shifts.push(shift);
    persist(KEY_SHIFTS, &data.shifts);
}

// Update and delete are silent no-ops when the id is unknown.
pub fn update_shift(shift: Shift) {
    let mut data = DATA.lock().unwrap();
    if let Some(existing) = data.shifts.iter_mut().find(|s| s.id == shift.id) {
        *existing = shift;
    }
    persist(KEY_SHIFTS, &data.shifts);
}

pub fn delete_shift(id: &str) {
    let mut data = DATA.lock().unwrap();
    data.shifts.retain(|s| s.id != id);
    persist(KEY_SHIFTS, &data.shifts);
}

// ================= Blocks =================

pub fn list_blocks() -> Vec<Block> {
    DATA.lock().unwrap().blocks.clone()
}

pub fn add_block(block: Block) {
    let mut data = DATA.lock().unwrap();
    data.blocks.push(block);
    persist(KEY_BLOCKS, &data.blocks);
}

pub fn update_block(block: Block) {
    let mut data = DATA.lock().unwrap();
    if let Some(existing) = data.blocks.iter_mut().find(|b| b.id == block.id) {
        *existing = block;
    }
    persist(KEY_BLOCKS, &data.blocks);
}

// No cascade: rooms pointing at the block keep their id and name snapshot.
pub fn delete_block(id: &str) {
    let mut data = DATA.lock().unwrap();
    data.blocks.retain(|b| b.id != id);
    persist(KEY_BLOCKS, &data.blocks);
}

// ================= Rooms =================

pub fn list_rooms() -> Vec<Room> {
    DATA.lock().unwrap().rooms.clone()
}

pub fn add_room(room: Room) {
    let mut data = DATA.lock().unwrap();
    data.rooms.push(room);
    persist(KEY_ROOMS, &data.rooms);
}

pub fn update_room(room: Room) {
    let mut data = DATA.lock().unwrap();
    if let Some(existing) = data.rooms.iter_mut().find(|r| r.id == room.id) {
        *existing = room;
    }
    persist(KEY_ROOMS, &data.rooms);
}

pub fn delete_room(id: &str) {
    let mut data = DATA.lock().unwrap();
    data.rooms.retain(|r| r.id != id);
    persist(KEY_ROOMS, &data.rooms);
}

// ================= Week schedules =================

/// The one load path that tolerates a bad payload: an unreadable week is
/// logged and discarded so the caller regenerates it.
pub fn load_week_schedule(week_key: &str) -> Option<WeekSchedule> {
    let raw = backend::get_item(week_key)?;
    match serde_json::from_str(&raw) {
        Ok(schedule) => Some(schedule),
        Err(e) => {
            log::error!("discarding unreadable schedule under {week_key}: {e}");
            None
        }
    }
}

/// Writes both the per-week key and the `weekSchedule` mirror of the
/// last-viewed week.
pub fn save_week_schedule(schedule: &WeekSchedule) {
    if let Ok(json) = serde_json::to_string(schedule) {
        backend::set_item(&schedule.week_key, &json);
        backend::set_item(KEY_WEEK_SCHEDULE, &json);
    }
}

// ================= Assignment log =================

pub fn list_assignments() -> Vec<AssignmentRecord> {
    DATA.lock().unwrap().assignments.clone()
}

/// Upsert by (room, day, shift): a later write for the same cell replaces
/// the earlier one, and an empty doctor removes the record instead of
/// storing an empty binding.
pub fn put_assignment(record: AssignmentRecord) {
    let mut data = DATA.lock().unwrap();
    if record.doctor.is_empty() {
        data.assignments.retain(|a| !same_cell(a, &record));
    } else if let Some(existing) = data.assignments.iter_mut().find(|a| same_cell(a, &record)) {
        existing.doctor = record.doctor;
    } else {
        data.assignments.push(record);
    }
    persist(KEY_ASSIGNMENTS, &data.assignments);
}

fn same_cell(a: &AssignmentRecord, b: &AssignmentRecord) -> bool {
    a.room_id == b.room_id && a.day == b.day && a.shift_id == b.shift_id
}

// ================= Doctor names =================

pub fn doctor_list() -> Vec<String> {
    DATA.lock().unwrap().doctors.clone()
}

pub fn remember_doctor(name: &str) {
    if name.trim().is_empty() {
        return;
    }
    let mut data = DATA.lock().unwrap();
    if !data.doctors.iter().any(|d| d == name) {
        data.doctors.push(name.to_string());
        persist(KEY_DOCTOR_LIST, &data.doctors);
    }
}

/// Mirror of the last clicked cell. Nothing reads it back; kept for
/// storage-layout parity.
pub fn remember_selected_cell(cell: &SelectedCell) {
    if let Ok(json) = serde_json::to_string(cell) {
        backend::set_item(KEY_SELECTED_CELL, &json);
    }
}

/// Wipe the fixed keys and the in-memory table. Per-week keys are left
/// behind; the backend has no key enumeration to find them.
pub fn reset_data() {
    let mut data = DATA.lock().unwrap();
    *data = AppData::default();
    for key in [
        KEY_SHIFTS,
        KEY_BLOCKS,
        KEY_ROOMS,
        KEY_ASSIGNMENTS,
        KEY_DOCTOR_LIST,
        KEY_WEEK_SCHEDULE,
        KEY_SELECTED_CELL,
    ] {
        backend::remove_item(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{new_id, shift_label};
    use crate::schedule::{build_week, derive_week, reconcile};
    use chrono::NaiveDate;

    // The store is a process-wide static, so tests take this lock to keep
    // cargo's parallel runner from interleaving them.
    static LOCK: Mutex<()> = Mutex::new(());

    fn setup() -> std::sync::MutexGuard<'static, ()> {
        let guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
        reset_data();
        guard
    }

    fn shift(id: &str) -> Shift {
        Shift {
            id: id.into(),
            name: shift_label("09:00", "13:00"),
            start_time: "09:00".into(),
            end_time: "13:00".into(),
        }
    }

    fn room(id: &str, block_id: &str, block_name: &str) -> Room {
        Room {
            id: id.into(),
            name: format!("OR-{id}"),
            block_id: block_id.into(),
            block_name: block_name.into(),
        }
    }

    fn record(room_id: &str, day: &str, shift_id: &str, doctor: &str) -> AssignmentRecord {
        AssignmentRecord {
            room_id: room_id.into(),
            day: day.into(),
            shift_id: shift_id.into(),
            doctor: doctor.into(),
        }
    }

    fn persisted_shifts() -> String {
        backend::get_item(KEY_SHIFTS).unwrap_or_default()
    }

    #[test]
    fn persisted_payload_tracks_every_mutation() {
        let _guard = setup();

        add_shift(shift("s1"));
        assert_eq!(persisted_shifts(), serde_json::to_string(&list_shifts()).unwrap());

        add_shift(shift("s2"));
        assert_eq!(persisted_shifts(), serde_json::to_string(&list_shifts()).unwrap());

        let mut edited = shift("s1");
        edited.end_time = "15:00".into();
        update_shift(edited);
        assert_eq!(persisted_shifts(), serde_json::to_string(&list_shifts()).unwrap());

        delete_shift("s2");
        assert_eq!(persisted_shifts(), serde_json::to_string(&list_shifts()).unwrap());
        assert_eq!(list_shifts().len(), 1);
    }

    #[test]
    fn update_of_unknown_id_is_a_silent_noop() {
        let _guard = setup();
        add_shift(shift("s1"));
        let before = list_shifts();
        update_shift(shift("ghost"));
        assert_eq!(list_shifts(), before);
    }

    #[test]
    fn delete_of_unknown_id_is_a_silent_noop() {
        let _guard = setup();
        add_block(Block { id: "b1".into(), name: "Main".into() });
        delete_block("ghost");
        assert_eq!(list_blocks().len(), 1);
    }

    #[test]
    fn deleting_a_block_orphans_its_rooms() {
        let _guard = setup();
        add_block(Block { id: "b1".into(), name: "Main".into() });
        add_room(room("r1", "b1", "Main"));

        delete_block("b1");

        assert!(list_blocks().is_empty());
        let rooms = list_rooms();
        assert_eq!(rooms.len(), 1);
        // stale references survive on purpose
        assert_eq!(rooms[0].block_id, "b1");
        assert_eq!(rooms[0].block_name, "Main");
    }

    #[test]
    fn assignment_log_keeps_one_record_per_cell() {
        let _guard = setup();
        put_assignment(record("r1", "Monday", "s1", "Smith"));
        put_assignment(record("r1", "Monday", "s1", "Jones"));
        put_assignment(record("r1", "Tuesday", "s1", "Smith"));

        let log = list_assignments();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].doctor, "Jones");
    }

    #[test]
    fn empty_doctor_removes_the_record() {
        let _guard = setup();
        put_assignment(record("r1", "Monday", "s1", "Smith"));
        put_assignment(record("r1", "Monday", "s1", ""));
        assert!(list_assignments().is_empty());
        // removing again stays a no-op
        put_assignment(record("r1", "Monday", "s1", ""));
        assert!(list_assignments().is_empty());
    }

    #[test]
    fn doctor_names_are_kept_distinct() {
        let _guard = setup();
        remember_doctor("Smith");
        remember_doctor("Smith");
        remember_doctor("  ");
        remember_doctor("Patel");
        assert_eq!(doctor_list(), vec!["Smith".to_string(), "Patel".to_string()]);
    }

    #[test]
    fn unreadable_week_payload_falls_back_to_none() {
        let _guard = setup();
        backend::set_item("Week-90-1999", "{not json");
        assert!(load_week_schedule("Week-90-1999").is_none());
        backend::remove_item("Week-90-1999");
    }

    #[test]
    fn week_save_writes_the_mirror_key() {
        let _guard = setup();
        let info = derive_week(NaiveDate::from_ymd_opt(2024, 4, 8).unwrap());
        let week = build_week(&info, &[room("r1", "b1", "Main")], &[shift("s1")]);
        save_week_schedule(&week);

        assert_eq!(
            backend::get_item(&week.week_key),
            backend::get_item(KEY_WEEK_SCHEDULE)
        );
        backend::remove_item(&week.week_key);
    }

    #[test]
    fn generated_week_survives_a_reload_and_merge() {
        let _guard = setup();
        add_shift(shift("s1"));
        add_room(room("r1", "b1", "Main"));

        let info = derive_week(NaiveDate::from_ymd_opt(2024, 4, 8).unwrap());
        let skeleton = build_week(&info, &list_rooms(), &list_shifts());
        save_week_schedule(&skeleton);

        put_assignment(record("r1", "Monday", "s1", "Smith"));

        let reloaded = load_week_schedule(&info.week_key).expect("saved week loads back");
        assert_eq!(reloaded, skeleton);

        let merged = reconcile(reloaded, &list_assignments(), &list_shifts());
        let monday = merged.data.iter().find(|d| d.day == "Monday").unwrap();
        assert_eq!(monday.room_data["r1"][0].doctor, "Smith");

        // unassigning drops the record from the log entirely
        put_assignment(record("r1", "Monday", "s1", ""));
        assert!(list_assignments().is_empty());

        // so a fresh merge over the persisted skeleton shows the cell unassigned
        let fresh = load_week_schedule(&info.week_key).unwrap();
        let fresh = reconcile(fresh, &list_assignments(), &list_shifts());
        let monday = fresh.data.iter().find(|d| d.day == "Monday").unwrap();
        assert_eq!(monday.room_data["r1"][0].doctor, "");

        backend::remove_item(&info.week_key);
    }

    #[test]
    fn corrupt_collection_payload_panics_on_load() {
        let result = std::panic::catch_unwind(|| {
            backend::set_item("corrupt-probe", "[{\"id\":");
            let _: Vec<Shift> = load_collection("corrupt-probe");
        });
        backend::remove_item("corrupt-probe");
        assert!(result.is_err());
    }

    #[test]
    fn new_ids_are_unique() {
        assert_ne!(new_id(), new_id());
    }
}
