//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! Capacity cells are re-exported from the service layer since they already
//! derive Serialize/Deserialize.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use crate::services::capacity::CapacityCell;

/// Query parameters selecting a target month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MonthQuery {
    pub month: u32,
    pub year: i32,
}

/// Request body for an admin capacity edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetCapacityRequest {
    /// Slot date (YYYY-MM-DD)
    pub date: NaiveDate,
    pub shift_type: crate::api::ShiftType,
    /// New total for the slot
    pub capacity: u32,
}

/// Request body for an interactive ±1 reserve/release.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustCapacityRequest {
    pub date: NaiveDate,
    pub shift_type: crate::api::ShiftType,
    /// +1 to release, -1 to reserve
    pub change: i32,
}

/// One shift entry in a selection submit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftEntryDto {
    pub date: NaiveDate,
    pub shift_type: crate::api::ShiftType,
}

/// Request body for the final selection submit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectShiftsRequest {
    pub employee_id: String,
    pub shifts: Vec<ShiftEntryDto>,
}

/// Request body for a vacation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacationRequestDto {
    pub employee_id: String,
    pub dates: Vec<NaiveDate>,
}

/// One committed day in an employee schedule response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntryDto {
    pub date: NaiveDate,
    /// Shift type name, or "Vacation" for vacation days
    pub shift_type: String,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Store connection status
    pub database: String,
}
