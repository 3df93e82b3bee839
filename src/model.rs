use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

// Persisted JSON keeps the camelCase field names the storage layout was
// defined with, so an existing browser profile keeps working across builds.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: String,
    /// Display label derived from the time range at save time. Editing a
    /// shift later does not rename `shift_name` snapshots already baked
    /// into schedule cells.
    pub name: String,
    pub start_time: String, // "HH:MM"
    pub end_time: String,   // "HH:MM"
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub name: String,
    pub block_id: String,
    /// Snapshot of the block's name when the room was saved. Renaming the
    /// block afterwards leaves this stale on purpose.
    pub block_name: String,
}

/// One grid cell. An empty `doctor` string means unassigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorSchedule {
    pub shift_id: String,
    pub shift_name: String,
    pub doctor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    /// English weekday name; assignment records are keyed on it.
    pub day: String,
    pub date: String, // "YYYY-MM-DD"
    pub room_data: HashMap<String, Vec<DoctorSchedule>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSchedule {
    pub week_key: String,
    pub week_number: u32,
    pub year: i32,
    /// 7 entries, Monday first.
    pub data: Vec<DaySchedule>,
}

/// Durable log entry binding a doctor to a cell, independent of any
/// generated week. At most one record exists per (room, day, shift).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRecord {
    pub room_id: String,
    pub day: String,
    pub shift_id: String,
    pub doctor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedCell {
    pub room_id: String,
    pub day: String,
    pub shift_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor: Option<String>,
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Shift display label, 12-hour clock: "9:00 AM - 1:00 PM".
pub fn shift_label(start: &str, end: &str) -> String {
    format!("{} - {}", fmt_12h(start), fmt_12h(end))
}

fn fmt_12h(hm: &str) -> String {
    match NaiveTime::parse_from_str(hm, "%H:%M") {
        Ok(t) => t.format("%-I:%M %p").to_string(),
        Err(_) => hm.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_uses_twelve_hour_clock() {
        assert_eq!(shift_label("09:00", "13:00"), "9:00 AM - 1:00 PM");
        assert_eq!(shift_label("00:15", "12:00"), "12:15 AM - 12:00 PM");
    }

    #[test]
    fn label_keeps_unparseable_input_verbatim() {
        assert_eq!(shift_label("", "13:00"), " - 1:00 PM");
    }

    #[test]
    fn shift_serializes_with_camel_case_keys() {
        let shift = Shift {
            id: "s1".into(),
            name: "9:00 AM - 1:00 PM".into(),
            start_time: "09:00".into(),
            end_time: "13:00".into(),
        };
        let json = serde_json::to_string(&shift).unwrap();
        assert!(json.contains("\"startTime\":\"09:00\""));
        assert!(json.contains("\"endTime\":\"13:00\""));
    }

    #[test]
    fn room_serializes_block_snapshot_fields() {
        let room = Room {
            id: "r1".into(),
            name: "OR1".into(),
            block_id: "b1".into(),
            block_name: "Main".into(),
        };
        let json = serde_json::to_string(&room).unwrap();
        assert!(json.contains("\"blockId\":\"b1\""));
        assert!(json.contains("\"blockName\":\"Main\""));
    }
}
