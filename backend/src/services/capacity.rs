//! Capacity administration service.
//!
//! Read and edit the monthly capacity pool in the shape the admin dashboard
//! and the shift selector consume: one `{total, taken, available}` cell per
//! `"<day>_<ShiftType>"` key.

use crate::api::ShiftType;
use crate::db::repository::{CapacityStore, FullRepository, RepositoryError, RepositoryResult};
use crate::models::SchedulingMonth;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One slot's counters in presentation shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityCell {
    pub total: u32,
    pub taken: u32,
    pub available: u32,
}

/// All capacity cells for a month, keyed `"<day>_<ShiftType>"` (e.g.
/// `"5_Morning"`), the key format the frontend calendar grid uses.
pub async fn month_overview(
    repo: &dyn FullRepository,
    month: SchedulingMonth,
) -> RepositoryResult<HashMap<String, CapacityCell>> {
    let entries = repo.read_month(month).await?;
    Ok(entries
        .into_iter()
        .map(|((day, shift_type), slot)| {
            (
                format!("{}_{}", day, shift_type),
                CapacityCell {
                    total: slot.total,
                    taken: slot.taken(),
                    available: slot.available,
                },
            )
        })
        .collect())
}

/// Admin edit of one slot's total.
///
/// Rejected outright (no partial effect) when the new total would drop below
/// the slots already taken, or when the day is not in the month.
pub async fn set_slot_total(
    repo: &dyn FullRepository,
    month: SchedulingMonth,
    day: u8,
    shift_type: ShiftType,
    new_total: u32,
) -> RepositoryResult<CapacityCell> {
    let date = month.date_of(day).ok_or_else(|| {
        RepositoryError::validation(format!("day {} is not a valid day of {}", day, month))
    })?;
    let slot = repo.set_total(date, shift_type, new_total).await?;
    Ok(CapacityCell {
        total: slot.total,
        taken: slot.taken(),
        available: slot.available,
    })
}

/// Interactive ±1 reserve/release on one slot.
pub async fn adjust_slot(
    repo: &dyn FullRepository,
    month: SchedulingMonth,
    day: u8,
    shift_type: ShiftType,
    delta: i32,
) -> RepositoryResult<CapacityCell> {
    let date = month.date_of(day).ok_or_else(|| {
        RepositoryError::validation(format!("day {} is not a valid day of {}", day, month))
    })?;
    let slot = repo.adjust(date, shift_type, delta).await?;
    Ok(CapacityCell {
        total: slot.total,
        taken: slot.taken(),
        available: slot.available,
    })
}
