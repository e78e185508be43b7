//! Repository trait definitions.
//!
//! These traits are the abstract contracts through which the core consumes
//! its external collaborators: the capacity store backing the ledger, the
//! schedule store holding committed month schedules, and the vacation store.
//! Implementations live in [`crate::db::repositories`].

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use crate::api::{CommittedDay, EmployeeId, ShiftSelection, ShiftType, SlotCapacity};
use crate::models::SchedulingMonth;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Persistent backing for the capacity ledger.
///
/// `adjust` and `set_total` are serialized per store so that concurrent
/// sessions racing for the last unit of a slot can never both succeed; the
/// store's own bounds check is authoritative even when the caller's
/// availability pre-check was stale. Every successful mutation is immediately
/// visible to subsequent reads.
#[async_trait]
pub trait CapacityStore: Send + Sync {
    /// All capacity entries for a month, keyed by (day-of-month, shift type).
    async fn read_month(
        &self,
        month: SchedulingMonth,
    ) -> RepositoryResult<HashMap<(u8, ShiftType), SlotCapacity>>;

    /// Counters for one slot. A missing entry reads as zero capacity.
    async fn get_slot(&self, date: NaiveDate, shift_type: ShiftType)
        -> RepositoryResult<SlotCapacity>;

    /// Admin edit of a slot's total.
    ///
    /// Fails with a capacity error when `new_total` is below the slots
    /// already taken; `taken` is recomputed at the moment of the atomic
    /// update. On success `available := new_total - taken`.
    async fn set_total(
        &self,
        date: NaiveDate,
        shift_type: ShiftType,
        new_total: u32,
    ) -> RepositoryResult<SlotCapacity>;

    /// Atomically apply `available += delta` (±1 during interactive
    /// selection). Fails without mutating when the result would fall outside
    /// `0..=total`.
    async fn adjust(
        &self,
        date: NaiveDate,
        shift_type: ShiftType,
        delta: i32,
    ) -> RepositoryResult<SlotCapacity>;
}

/// Store of committed month schedules.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Committed days (shifts and vacation) for one employee and month,
    /// sorted by day.
    async fn committed_shifts(
        &self,
        employee: &EmployeeId,
        month: SchedulingMonth,
    ) -> RepositoryResult<Vec<CommittedDay>>;

    /// Persist a complete selection set for one employee and month.
    ///
    /// Idempotent when retried with the identical set (keyed by
    /// employee + month); a differing set against an existing schedule is a
    /// validation error, as is any overlap with committed vacation days.
    /// Pure metadata write: capacity was already adjusted per toggle.
    async fn commit_shifts(
        &self,
        employee: &EmployeeId,
        month: SchedulingMonth,
        shifts: &[ShiftSelection],
    ) -> RepositoryResult<()>;

    /// Delete an employee's committed schedule, returning the removed
    /// selections so the caller can restore ledger capacity.
    async fn reset_schedule(
        &self,
        employee: &EmployeeId,
        month: SchedulingMonth,
    ) -> RepositoryResult<Vec<ShiftSelection>>;

    /// Every committed day across all employees for a month, for export.
    async fn month_schedules(
        &self,
        month: SchedulingMonth,
    ) -> RepositoryResult<Vec<(EmployeeId, CommittedDay)>>;
}

/// Store of accepted vacation overlays.
#[async_trait]
pub trait VacationStore: Send + Sync {
    /// Accepted vacation days (day-of-month) for one employee and month,
    /// sorted ascending. Empty when no overlay exists.
    async fn vacation_days(
        &self,
        employee: &EmployeeId,
        month: SchedulingMonth,
    ) -> RepositoryResult<Vec<u8>>;

    /// Accept a vacation overlay. Days overlapping a committed shift are a
    /// validation error. Vacation days consume no shift capacity.
    async fn submit_vacation(
        &self,
        employee: &EmployeeId,
        month: SchedulingMonth,
        days: &[u8],
    ) -> RepositoryResult<()>;

    /// Delete an employee's vacation overlay for a month. No-op when absent.
    async fn reset_vacation(
        &self,
        employee: &EmployeeId,
        month: SchedulingMonth,
    ) -> RepositoryResult<()>;
}

/// Combined repository interface used by the service layer.
#[async_trait]
pub trait FullRepository: CapacityStore + ScheduleStore + VacationStore {
    /// Verify the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}
