//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Datelike;
use std::collections::HashMap;

use super::dto::{
    AdjustCapacityRequest, CapacityCell, HealthResponse, MessageResponse, MonthQuery,
    ScheduleEntryDto, SelectShiftsRequest, SetCapacityRequest, VacationRequestDto,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{CommittedDay, EmployeeId, ShiftSelection};
use crate::db::repository::{FullRepository, ScheduleStore};
use crate::models::SchedulingMonth;
use crate::services::{capacity, export, session::SelectionSession, vacation};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn target_month(query: &MonthQuery) -> Result<SchedulingMonth, AppError> {
    SchedulingMonth::new(query.month, query.year)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid month: {}", query.month)))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is
/// accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Capacity
// =============================================================================

/// GET /v1/capacity?month=&year=
///
/// Month capacity map with `{total, taken, available}` per
/// `"<day>_<ShiftType>"` key.
pub async fn get_capacity(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> HandlerResult<HashMap<String, CapacityCell>> {
    let month = target_month(&query)?;
    let cells = capacity::month_overview(state.repository.as_ref(), month).await?;
    Ok(Json(cells))
}

/// POST /v1/admin/capacity
///
/// Admin edit of one slot's total. Rejected with no partial effect when the
/// new total would drop below the slots already taken.
pub async fn set_capacity(
    State(state): State<AppState>,
    Json(request): Json<SetCapacityRequest>,
) -> HandlerResult<CapacityCell> {
    let month = SchedulingMonth::of_date(request.date);
    let cell = capacity::set_slot_total(
        state.repository.as_ref(),
        month,
        request.date.day() as u8,
        request.shift_type,
        request.capacity,
    )
    .await?;
    Ok(Json(cell))
}

/// PUT /v1/capacity/adjust
///
/// Interactive ±1 reserve/release during selection. A lost availability race
/// returns 409 so the frontend re-fetches and informs the user.
pub async fn adjust_capacity(
    State(state): State<AppState>,
    Json(request): Json<AdjustCapacityRequest>,
) -> HandlerResult<CapacityCell> {
    let month = SchedulingMonth::of_date(request.date);
    let cell = capacity::adjust_slot(
        state.repository.as_ref(),
        month,
        request.date.day() as u8,
        request.shift_type,
        request.change,
    )
    .await?;
    Ok(Json(cell))
}

// =============================================================================
// Shift Selection
// =============================================================================

/// POST /v1/shifts/select
///
/// Final submit of a complete selection set. Capacity was already reserved
/// per toggle through the adjust endpoint, so this is a pure metadata commit.
pub async fn select_shifts(
    State(state): State<AppState>,
    Json(request): Json<SelectShiftsRequest>,
) -> HandlerResult<MessageResponse> {
    let first = request
        .shifts
        .first()
        .ok_or_else(|| AppError::BadRequest("No shifts in request".to_string()))?;
    let month = SchedulingMonth::of_date(first.date);

    let mut selections = Vec::with_capacity(request.shifts.len());
    for entry in &request.shifts {
        if SchedulingMonth::of_date(entry.date) != month {
            return Err(AppError::BadRequest(format!(
                "Shift date {} is outside {}",
                entry.date, month
            )));
        }
        selections.push(ShiftSelection::new(entry.date.day() as u8, entry.shift_type));
    }

    let employee = EmployeeId::new(request.employee_id);
    let mut session = SelectionSession::load(
        state.repository.as_ref(),
        employee,
        month,
        state.policy,
    )
    .await?;
    session.adopt_selections(selections)?;
    session.submit(state.repository.as_ref()).await?;

    Ok(Json(MessageResponse {
        message: "Shifts selected successfully".to_string(),
    }))
}

/// GET /v1/shifts/{employee_id}?month=&year=
///
/// All committed days (shifts and vacation) for one employee and month.
pub async fn get_employee_shifts(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Query(query): Query<MonthQuery>,
) -> HandlerResult<Vec<ScheduleEntryDto>> {
    let month = target_month(&query)?;
    let employee = EmployeeId::new(employee_id);

    let committed = state
        .repository
        .committed_shifts(&employee, month)
        .await?;

    let entries = committed
        .iter()
        .filter_map(|day| {
            let date = month.date_of(day.day())?;
            let shift_type = match day {
                CommittedDay::Shift { shift_type, .. } => shift_type.as_str().to_string(),
                CommittedDay::Vacation { .. } => "Vacation".to_string(),
            };
            Some(ScheduleEntryDto { date, shift_type })
        })
        .collect();

    Ok(Json(entries))
}

/// DELETE /v1/shifts/{employee_id}?month=&year=
///
/// Administrative reset: deletes the committed schedule and vacation overlay
/// and restores every previously committed slot's capacity by +1.
pub async fn reset_schedule(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Query(query): Query<MonthQuery>,
) -> HandlerResult<MessageResponse> {
    let month = target_month(&query)?;
    let employee = EmployeeId::new(employee_id);

    let mut session = SelectionSession::load(
        state.repository.as_ref(),
        employee,
        month,
        state.policy,
    )
    .await?;
    session.reset(state.repository.as_ref()).await?;

    Ok(Json(MessageResponse {
        message: "Successfully reset schedule and vacations".to_string(),
    }))
}

// =============================================================================
// Vacation
// =============================================================================

/// POST /v1/vacation/request
///
/// Request a vacation overlay (≥ 10 days) for the month of the given dates.
pub async fn request_vacation(
    State(state): State<AppState>,
    Json(request): Json<VacationRequestDto>,
) -> HandlerResult<MessageResponse> {
    let first = request
        .dates
        .first()
        .ok_or_else(|| AppError::BadRequest("No dates in request".to_string()))?;
    let month = SchedulingMonth::of_date(*first);

    let mut days = Vec::with_capacity(request.dates.len());
    for date in &request.dates {
        if SchedulingMonth::of_date(*date) != month {
            return Err(AppError::BadRequest(format!(
                "Vacation date {} is outside {}",
                date, month
            )));
        }
        days.push(date.day() as u8);
    }

    let employee = EmployeeId::new(request.employee_id);
    vacation::request(state.repository.as_ref(), &employee, month, &days).await?;

    Ok(Json(MessageResponse {
        message: "Vacation days submitted successfully".to_string(),
    }))
}

/// GET /v1/vacation/{employee_id}?month=&year=
pub async fn get_vacation(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Query(query): Query<MonthQuery>,
) -> HandlerResult<Vec<chrono::NaiveDate>> {
    let month = target_month(&query)?;
    let employee = EmployeeId::new(employee_id);

    let days = vacation::vacation_days(state.repository.as_ref(), &employee, month).await?;
    let dates = days.iter().filter_map(|day| month.date_of(*day)).collect();
    Ok(Json(dates))
}

/// DELETE /v1/vacation/{employee_id}?month=&year=
pub async fn reset_vacation(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Query(query): Query<MonthQuery>,
) -> HandlerResult<MessageResponse> {
    let month = target_month(&query)?;
    let employee = EmployeeId::new(employee_id);

    vacation::reset(state.repository.as_ref(), &employee, month).await?;
    Ok(Json(MessageResponse {
        message: "Vacation days reset".to_string(),
    }))
}

// =============================================================================
// Export
// =============================================================================

/// GET /v1/export/schedule?month=&year=
///
/// CSV rendering of all committed shifts for the month. Pure read.
pub async fn export_schedule(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<impl IntoResponse, AppError> {
    let month = target_month(&query)?;
    let csv = export::render_month_csv(state.repository.as_ref(), month).await?;

    Ok(([(header::CONTENT_TYPE, "text/csv")], csv))
}
