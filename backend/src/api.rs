//! Public API surface for the Rust backend.
//!
//! This file consolidates the shared domain types used across the rule
//! engine, the repository layer and the HTTP API. All types derive
//! Serialize/Deserialize for JSON serialization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Employee identifier (badge id, e.g. "t997").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub String);

impl EmployeeId {
    pub fn new(value: impl Into<String>) -> Self {
        EmployeeId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shift type within a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShiftType {
    Morning,
    Evening,
    Night,
}

impl ShiftType {
    /// All shift types in display order.
    pub const ALL: [ShiftType; 3] = [ShiftType::Morning, ShiftType::Evening, ShiftType::Night];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftType::Morning => "Morning",
            ShiftType::Evening => "Evening",
            ShiftType::Night => "Night",
        }
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morning" => Ok(ShiftType::Morning),
            "evening" => Ok(ShiftType::Evening),
            "night" => Ok(ShiftType::Night),
            _ => Err(format!("Unknown shift type: {}", s)),
        }
    }
}

/// One employee-day shift assignment within a target month.
///
/// `day` is the 1-based day of the month; at most one selection per day is
/// ever held by a session or committed for an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShiftSelection {
    pub day: u8,
    pub shift_type: ShiftType,
}

impl ShiftSelection {
    pub fn new(day: u8, shift_type: ShiftType) -> Self {
        ShiftSelection { day, shift_type }
    }
}

/// A committed calendar day: either a worked shift or a vacation day.
///
/// The two are mutually exclusive per day; the schedule store enforces this
/// when a schedule or vacation overlay is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommittedDay {
    Shift { day: u8, shift_type: ShiftType },
    Vacation { day: u8 },
}

impl CommittedDay {
    pub fn day(&self) -> u8 {
        match self {
            CommittedDay::Shift { day, .. } => *day,
            CommittedDay::Vacation { day } => *day,
        }
    }

    /// The shift assignment, if this day is a worked shift.
    pub fn shift(&self) -> Option<ShiftSelection> {
        match self {
            CommittedDay::Shift { day, shift_type } => Some(ShiftSelection::new(*day, *shift_type)),
            CommittedDay::Vacation { .. } => None,
        }
    }
}

/// Capacity counters for one (date, shift-type) slot.
///
/// Invariant: `0 <= available <= total`. A slot missing from the ledger reads
/// as `SlotCapacity::ZERO` (no availability). Entries are never deleted, only
/// zeroed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCapacity {
    pub total: u32,
    pub available: u32,
}

impl SlotCapacity {
    pub const ZERO: SlotCapacity = SlotCapacity {
        total: 0,
        available: 0,
    };

    /// A fresh slot with all capacity still available.
    pub fn with_total(total: u32) -> Self {
        SlotCapacity {
            total,
            available: total,
        }
    }

    /// Number of slots already reserved or committed.
    pub fn taken(&self) -> u32 {
        self.total - self.available
    }

    /// Apply `available += delta`, enforcing the ledger bounds.
    ///
    /// Returns the mutated counters without touching `self`; the store swaps
    /// the result in under its own lock so a failed bounds check has no
    /// effect.
    pub fn adjusted(&self, delta: i32) -> Result<SlotCapacity, CapacityError> {
        let next = self.available as i64 + delta as i64;
        if next < 0 {
            return Err(CapacityError::Underflow);
        }
        if next > self.total as i64 {
            return Err(CapacityError::Overflow { total: self.total });
        }
        Ok(SlotCapacity {
            total: self.total,
            available: next as u32,
        })
    }

    /// Replace `total`, preserving the taken count.
    ///
    /// Fails when `new_total` would drop below the slots already taken.
    pub fn with_new_total(&self, new_total: u32) -> Result<SlotCapacity, CapacityError> {
        let taken = self.taken();
        if new_total < taken {
            return Err(CapacityError::InvalidTotal {
                requested: new_total,
                taken,
            });
        }
        Ok(SlotCapacity {
            total: new_total,
            available: new_total - taken,
        })
    }
}

/// Errors raised by capacity ledger mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CapacityError {
    /// Reserve on a slot with no remaining availability.
    #[error("no available capacity to reserve")]
    Underflow,

    /// Release that would push `available` past `total`.
    #[error("release would exceed total capacity ({total})")]
    Overflow { total: u32 },

    /// Admin edit below the number of already-taken slots.
    #[error("cannot set capacity to {requested}: {taken} slots already taken")]
    InvalidTotal { requested: u32, taken: u32 },

    /// Pre-check failure: the slot has no availability for this session.
    #[error("no availability for day {day} {shift_type}")]
    SlotUnavailable { day: u8, shift_type: ShiftType },
}
