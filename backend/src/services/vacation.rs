//! Vacation overlay service.
//!
//! The overlay is an alternate allocation mode: instead of selecting shifts,
//! an employee pre-commits at least [`MIN_VACATION_DAYS`] vacation days for
//! the month. Once accepted it supersedes shift selection: the session
//! checks the overlay before allowing any toggle. Vacation days are a
//! parallel resource and consume no shift capacity, but may never overlap a
//! day that already has a committed shift (the store enforces the overlap
//! atomically).

use crate::api::EmployeeId;
use crate::db::repository::{FullRepository, RepositoryError, VacationStore};
use crate::models::SchedulingMonth;

/// Minimum number of vacation days in a request.
pub const MIN_VACATION_DAYS: usize = 10;

/// Errors raised by vacation requests.
#[derive(Debug, thiserror::Error)]
pub enum VacationError {
    #[error("at least {required} vacation days are required ({got} given)")]
    InsufficientVacationDays { got: usize, required: usize },

    #[error("day {day} is not a valid day of {month}")]
    DayOutOfRange { day: u8, month: SchedulingMonth },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Accept a vacation request for an employee and month.
///
/// Validates the minimum-day rule and day-of-month bounds, then persists the
/// overlay. Overlap with a committed shift day is rejected by the store with
/// no partial effect.
pub async fn request(
    repo: &dyn FullRepository,
    employee: &EmployeeId,
    month: SchedulingMonth,
    days: &[u8],
) -> Result<(), VacationError> {
    let mut distinct: Vec<u8> = days.to_vec();
    distinct.sort_unstable();
    distinct.dedup();

    if distinct.len() < MIN_VACATION_DAYS {
        return Err(VacationError::InsufficientVacationDays {
            got: distinct.len(),
            required: MIN_VACATION_DAYS,
        });
    }

    if let Some(day) = distinct.iter().find(|d| !month.contains_day(**d)) {
        return Err(VacationError::DayOutOfRange { day: *day, month });
    }

    repo.submit_vacation(employee, month, &distinct).await?;
    Ok(())
}

/// Accepted vacation days for an employee and month.
pub async fn vacation_days(
    repo: &dyn FullRepository,
    employee: &EmployeeId,
    month: SchedulingMonth,
) -> Result<Vec<u8>, RepositoryError> {
    repo.vacation_days(employee, month).await
}

/// Delete an employee's vacation overlay for a month.
pub async fn reset(
    repo: &dyn FullRepository,
    employee: &EmployeeId,
    month: SchedulingMonth,
) -> Result<(), RepositoryError> {
    repo.reset_vacation(employee, month).await
}
