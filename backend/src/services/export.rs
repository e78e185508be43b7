//! Schedule export service.
//!
//! Renders all committed shifts and vacation days of a month as CSV. Pure
//! read; no core logic, no ledger access.

use crate::api::CommittedDay;
use crate::db::repository::{FullRepository, RepositoryError, ScheduleStore};
use crate::models::SchedulingMonth;

/// Errors raised while rendering an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Render one month's committed schedule as CSV.
///
/// One row per committed day: `employee_id,date,shift_type`, sorted by
/// employee then day. Vacation days render with shift type `Vacation`.
pub async fn render_month_csv(
    repo: &dyn FullRepository,
    month: SchedulingMonth,
) -> Result<String, ExportError> {
    let rows = repo.month_schedules(month).await?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["employee_id", "date", "shift_type"])?;

    for (employee, day) in rows {
        let date = match month.date_of(day.day()) {
            Some(date) => date.to_string(),
            None => continue,
        };
        let shift_type = match day {
            CommittedDay::Shift { shift_type, .. } => shift_type.as_str(),
            CommittedDay::Vacation { .. } => "Vacation",
        };
        writer.write_record([employee.as_str(), date.as_str(), shift_type])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| RepositoryError::internal(format!("CSV writer flush failed: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| ExportError::Repository(RepositoryError::internal(e.to_string())))
}
