//! Shared helpers for integration tests.

// Not every suite uses every helper
#![allow(dead_code)]

use shiftdesk_rust::api::{ShiftSelection, ShiftType};
use shiftdesk_rust::db::repository::CapacityStore;
use shiftdesk_rust::db::LocalRepository;
use shiftdesk_rust::models::SchedulingMonth;

/// The month every integration suite schedules against.
pub fn target_month() -> SchedulingMonth {
    SchedulingMonth::new(3, 2026).unwrap()
}

/// Seed every (day, shift-type) slot of the month with the same total.
pub async fn seed_month(repo: &LocalRepository, month: SchedulingMonth, total: u32) {
    for day in 1..=month.days_in_month() {
        let date = month.date_of(day).unwrap();
        for shift_type in ShiftType::ALL {
            repo.set_total(date, shift_type, total)
                .await
                .expect("seeding capacity should succeed");
        }
    }
}

/// A 19-shift set matching the exact 6/7/6 epoch, all runs <= 9.
pub fn exact_epoch_set() -> Vec<ShiftSelection> {
    let mut set = Vec::new();
    for day in 1..=6u8 {
        set.push(ShiftSelection::new(day, ShiftType::Morning));
    }
    for day in 8..=14u8 {
        set.push(ShiftSelection::new(day, ShiftType::Evening));
    }
    for day in 16..=21u8 {
        set.push(ShiftSelection::new(day, ShiftType::Night));
    }
    set
}

/// A 20-shift set legal under the cap epoch (≤7 per type, runs <= 9).
pub fn cap_epoch_set() -> Vec<ShiftSelection> {
    let mut set = Vec::new();
    for day in 1..=7u8 {
        set.push(ShiftSelection::new(day, ShiftType::Morning));
    }
    for day in 9..=15u8 {
        set.push(ShiftSelection::new(day, ShiftType::Evening));
    }
    for day in 17..=22u8 {
        set.push(ShiftSelection::new(day, ShiftType::Night));
    }
    set
}
