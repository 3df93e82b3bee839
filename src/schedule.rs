//! Week derivation, skeleton generation and assignment merge for the
//! weekly room grid. Everything here is pure so the grid view stays a
//! thin consumer.

use chrono::{Datelike, Duration, NaiveDate};

use crate::model::{AssignmentRecord, DaySchedule, DoctorSchedule, Room, Shift, WeekSchedule};

#[derive(Debug, Clone, PartialEq)]
pub struct WeekInfo {
    pub week_start: NaiveDate,
    pub week_days: [NaiveDate; 7],
    pub week_number: u32,
    pub year: i32,
    pub week_key: String,
}

/// Derive the Monday-first calendar week containing `today`.
///
/// The key is stable for every date inside the same week; the year is the
/// week start's calendar year, so a week spanning new year keeps one key.
pub fn derive_week(today: NaiveDate) -> WeekInfo {
    let week_start = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    let mut week_days = [week_start; 7];
    for (i, day) in week_days.iter_mut().enumerate() {
        *day = week_start + Duration::days(i as i64);
    }
    let week_number = week_start.iso_week().week();
    let year = week_start.year();
    WeekInfo {
        week_start,
        week_days,
        week_number,
        year,
        week_key: format!("Week-{week_number}-{year}"),
    }
}

/// Build the all-unassigned skeleton for a week: every current room gets
/// one empty cell per current shift, for each of the 7 days. Empty rooms
/// or shifts legitimately produce an empty grid.
pub fn build_week(info: &WeekInfo, rooms: &[Room], shifts: &[Shift]) -> WeekSchedule {
    let data = info
        .week_days
        .iter()
        .map(|day| DaySchedule {
            day: day.format("%A").to_string(),
            date: day.format("%Y-%m-%d").to_string(),
            room_data: rooms
                .iter()
                .map(|room| (room.id.clone(), empty_row(shifts)))
                .collect(),
        })
        .collect();
    WeekSchedule {
        week_key: info.week_key.clone(),
        week_number: info.week_number,
        year: info.year,
        data,
    }
}

fn empty_row(shifts: &[Shift]) -> Vec<DoctorSchedule> {
    shifts
        .iter()
        .map(|shift| DoctorSchedule {
            shift_id: shift.id.clone(),
            shift_name: shift.name.clone(),
            doctor: String::new(),
        })
        .collect()
}

/// Merge the assignment log into a skeleton or previously saved week.
///
/// Rooms that were added after the week was generated get a lazily
/// initialized row (one empty cell per current shift) before the record
/// applies. Applying the same log twice yields the same schedule.
pub fn reconcile(
    mut week: WeekSchedule,
    log: &[AssignmentRecord],
    shifts: &[Shift],
) -> WeekSchedule {
    for record in log {
        let Some(day) = week.data.iter_mut().find(|d| d.day == record.day) else {
            continue;
        };
        let row = day
            .room_data
            .entry(record.room_id.clone())
            .or_insert_with(|| empty_row(shifts));
        if let Some(cell) = row.iter_mut().find(|c| c.shift_id == record.shift_id) {
            cell.doctor = record.doctor.clone();
        }
    }
    week
}

/// Strip a leading "Dr." / "Dr " honorific and surrounding whitespace.
pub fn clean_doctor_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let lower = trimmed.to_lowercase();
    let rest = if lower.starts_with("dr.") {
        &trimmed[3..]
    } else if lower.starts_with("dr ") {
        &trimmed[2..]
    } else if lower == "dr" {
        ""
    } else {
        trimmed
    };
    rest.trim().to_string()
}

/// Group rooms under their block-name snapshot, preserving first-seen
/// block order and room order within a block. Rooms whose block snapshot
/// is empty land under "Unknown Block".
pub fn rooms_by_block(rooms: &[Room]) -> Vec<(String, Vec<Room>)> {
    let mut groups: Vec<(String, Vec<Room>)> = Vec::new();
    for room in rooms {
        let name = if room.block_name.is_empty() {
            "Unknown Block".to_string()
        } else {
            room.block_name.clone()
        };
        match groups.iter_mut().find(|(group, _)| *group == name) {
            Some((_, members)) => members.push(room.clone()),
            None => groups.push((name, vec![room.clone()])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: &str, name: &str, block_name: &str) -> Room {
        Room {
            id: id.into(),
            name: name.into(),
            block_id: "b1".into(),
            block_name: block_name.into(),
        }
    }

    fn shift(id: &str, name: &str) -> Shift {
        Shift {
            id: id.into(),
            name: name.into(),
            start_time: "09:00".into(),
            end_time: "13:00".into(),
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

    #[test]
    fn week_starts_on_monday() {
        // 2024-04-10 is a Wednesday.
        let info = derive_week(NaiveDate::from_ymd_opt(2024, 4, 10).unwrap());
        assert_eq!(info.week_start, NaiveDate::from_ymd_opt(2024, 4, 8).unwrap());
        assert_eq!(info.week_days[0].format("%A").to_string(), "Monday");
    }

    #[test]
    fn week_days_are_seven_consecutive_dates() {
        let monday = NaiveDate::from_ymd_opt(2024, 4, 8).unwrap();
        let info = derive_week(monday);
        assert_eq!(info.week_days[0], monday);
        for pair in info.week_days.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
    }

    #[test]
    fn week_key_is_stable_across_the_week() {
        let monday = NaiveDate::from_ymd_opt(2024, 4, 8).unwrap();
        let key = derive_week(monday).week_key;
        assert_eq!(key, "Week-15-2024");
        for offset in 0..7 {
            let day = monday + Duration::days(offset);
            assert_eq!(derive_week(day).week_key, key);
        }
        assert_ne!(derive_week(monday + Duration::days(7)).week_key, key);
    }

    #[test]
    fn build_fills_every_room_and_shift() {
        let info = derive_week(NaiveDate::from_ymd_opt(2024, 4, 8).unwrap());
        let rooms = vec![room("r1", "OR1", "Main")];
        let shifts = vec![shift("s1", "9-1")];
        let week = build_week(&info, &rooms, &shifts);

        assert_eq!(week.data.len(), 7);
        assert_eq!(week.data[0].day, "Monday");
        assert_eq!(week.data[0].date, "2024-04-08");
        for day in &week.data {
            let row = &day.room_data["r1"];
            assert_eq!(row.len(), 1);
            assert_eq!(row[0].shift_id, "s1");
            assert_eq!(row[0].shift_name, "9-1");
            assert_eq!(row[0].doctor, "");
        }
    }

    #[test]
    fn build_with_nothing_defined_yields_empty_grid() {
        let info = derive_week(NaiveDate::from_ymd_opt(2024, 4, 8).unwrap());
        let week = build_week(&info, &[], &[]);
        assert_eq!(week.data.len(), 7);
        assert!(week.data.iter().all(|d| d.room_data.is_empty()));
    }

    #[test]
    fn reconcile_applies_matching_record_only() {
        let info = derive_week(NaiveDate::from_ymd_opt(2024, 4, 8).unwrap());
        let rooms = vec![room("r1", "OR1", "Main")];
        let shifts = vec![shift("s1", "9-1")];
        let skeleton = build_week(&info, &rooms, &shifts);

        let log = vec![record("r1", "Monday", "s1", "Smith")];
        let merged = reconcile(skeleton, &log, &shifts);

        for day in &merged.data {
            let doctor = &day.room_data["r1"][0].doctor;
            if day.day == "Monday" {
                assert_eq!(doctor, "Smith");
            } else {
                assert_eq!(doctor, "");
            }
        }
    }

    #[test]
    fn reconcile_with_empty_log_is_identity() {
        let info = derive_week(NaiveDate::from_ymd_opt(2024, 4, 8).unwrap());
        let shifts = vec![shift("s1", "9-1")];
        let skeleton = build_week(&info, &[room("r1", "OR1", "Main")], &shifts);
        let merged = reconcile(skeleton.clone(), &[], &shifts);
        assert_eq!(merged, skeleton);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let info = derive_week(NaiveDate::from_ymd_opt(2024, 4, 8).unwrap());
        let shifts = vec![shift("s1", "9-1"), shift("s2", "1-3")];
        let skeleton = build_week(&info, &[room("r1", "OR1", "Main")], &shifts);
        let log = vec![
            record("r1", "Monday", "s1", "Smith"),
            record("r1", "Friday", "s2", "Jones"),
        ];
        let once = reconcile(skeleton, &log, &shifts);
        let twice = reconcile(once.clone(), &log, &shifts);
        assert_eq!(once, twice);
    }

    #[test]
    fn reconcile_initializes_rows_for_late_rooms() {
        // r2 did not exist when the week was generated.
        let info = derive_week(NaiveDate::from_ymd_opt(2024, 4, 8).unwrap());
        let shifts = vec![shift("s1", "9-1"), shift("s2", "1-3")];
        let skeleton = build_week(&info, &[room("r1", "OR1", "Main")], &shifts);

        let log = vec![record("r2", "Tuesday", "s2", "Patel")];
        let merged = reconcile(skeleton, &log, &shifts);

        let tuesday = merged.data.iter().find(|d| d.day == "Tuesday").unwrap();
        let row = &tuesday.room_data["r2"];
        assert_eq!(row.len(), 2);
        assert_eq!(row[0].doctor, "");
        assert_eq!(row[1].doctor, "Patel");
        // other days stay untouched
        let monday = merged.data.iter().find(|d| d.day == "Monday").unwrap();
        assert!(!monday.room_data.contains_key("r2"));
    }

    #[test]
    fn reconcile_ignores_unknown_day_and_shift() {
        let info = derive_week(NaiveDate::from_ymd_opt(2024, 4, 8).unwrap());
        let shifts = vec![shift("s1", "9-1")];
        let skeleton = build_week(&info, &[room("r1", "OR1", "Main")], &shifts);
        let log = vec![
            record("r1", "Someday", "s1", "Smith"),
            record("r1", "Monday", "missing", "Jones"),
        ];
        let merged = reconcile(skeleton.clone(), &log, &shifts);
        assert_eq!(merged.data[0].room_data["r1"][0].doctor, "");
    }

    #[test]
    fn honorific_prefix_is_stripped() {
        assert_eq!(clean_doctor_name("Dr. Smith"), "Smith");
        assert_eq!(clean_doctor_name("dr Smith"), "Smith");
        assert_eq!(clean_doctor_name("  Smith "), "Smith");
        assert_eq!(clean_doctor_name("Dr."), "");
        // Names merely starting with the letters stay intact.
        assert_eq!(clean_doctor_name("Drake"), "Drake");
    }

    #[test]
    fn rooms_group_under_block_snapshots() {
        let rooms = vec![
            room("r1", "OR1", "Main"),
            room("r2", "OR2", "Annex"),
            room("r3", "OR3", "Main"),
            room("r4", "OR4", ""),
        ];
        let groups = rooms_by_block(&rooms);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].0, "Main");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "Annex");
        assert_eq!(groups[2].0, "Unknown Block");
    }
}
