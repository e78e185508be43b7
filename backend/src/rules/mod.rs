//! Pure allocation rule engine.
//!
//! Every function here is a pure check over a candidate selection set and the
//! configured [`AllocationPolicy`]: no clocks, no stores, no side effects.
//! Slot availability (the only rule that needs live data) is checked by the
//! selection session against the capacity ledger, not here.

use crate::api::{ShiftSelection, ShiftType};
use crate::models::AllocationPolicy;
use std::fmt;

/// Rule violations surfaced to the user.
///
/// These are always recoverable locally: the session rejects the toggle or
/// submit and mutates nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A selection already exists for this day (one shift per day).
    #[error("day {day} already has a selected shift")]
    DayAlreadyTaken { day: u8 },

    /// Selecting would exceed the per-type ceiling.
    #[error("cannot select more than {cap} {shift_type} shifts ({selected} selected)")]
    TypeCapExceeded {
        shift_type: ShiftType,
        selected: u32,
        cap: u32,
    },

    /// Selecting would exceed the monthly quota.
    #[error("cannot select more than {quota} shifts")]
    QuotaExceeded { quota: u32 },

    /// The hypothetical set would contain too long a consecutive-day run.
    #[error("cannot work more than {max} consecutive days (run of {run})")]
    ConsecutiveRunExceeded { run: u32, max: u32 },

    /// Final-submit composition failure, with per-type detail.
    #[error("selection does not satisfy the quota: {report}")]
    QuotaNotMet { report: QuotaReport },
}

/// Per-type "selected vs required" detail for a failed final submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaReport {
    pub total_selected: u32,
    pub total_quota: u32,
    /// One entry per shift type whose count misses its exact target.
    pub shortfalls: Vec<TypeShortfall>,
}

/// One shift type's count against its exact target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeShortfall {
    pub shift_type: ShiftType,
    pub selected: u32,
    pub required: u32,
}

impl fmt::Display for TypeShortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}/{}", self.shift_type, self.selected, self.required)
    }
}

impl fmt::Display for QuotaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shortfalls.is_empty() {
            write!(
                f,
                "selected {}/{} shifts",
                self.total_selected, self.total_quota
            )
        } else {
            let lines: Vec<String> = self.shortfalls.iter().map(|s| s.to_string()).collect();
            write!(f, "{}", lines.join(", "))
        }
    }
}

// =========================================================
// Toggle validation
// =========================================================

/// Validate toggling (day, shift_type) ON against the running set.
///
/// Applies, in order: one-shift-per-day, per-type ceiling, total quota, and
/// the consecutive-day run limit over the hypothetical new set. Toggling OFF
/// an existing selection is always legal and has no check here.
pub fn check_toggle_on(
    policy: &AllocationPolicy,
    current: &[ShiftSelection],
    day: u8,
    shift_type: ShiftType,
) -> Result<(), ValidationError> {
    if current.iter().any(|s| s.day == day) {
        return Err(ValidationError::DayAlreadyTaken { day });
    }

    let selected = type_count(current, shift_type);
    let cap = policy.per_type.cap_for(shift_type);
    if selected + 1 > cap {
        return Err(ValidationError::TypeCapExceeded {
            shift_type,
            selected,
            cap,
        });
    }

    if current.len() as u32 + 1 > policy.total_quota {
        return Err(ValidationError::QuotaExceeded {
            quota: policy.total_quota,
        });
    }

    let mut days: Vec<u8> = current.iter().map(|s| s.day).collect();
    days.push(day);
    let run = consecutive_run(&days);
    if run > policy.max_consecutive_days {
        return Err(ValidationError::ConsecutiveRunExceeded {
            run,
            max: policy.max_consecutive_days,
        });
    }

    Ok(())
}

/// Validate a complete set at final submit.
///
/// The total must equal the quota exactly, and in exact mode every type's
/// count must equal its target. The failure report names "selected vs
/// required" for every type with a shortfall or excess.
pub fn check_final(
    policy: &AllocationPolicy,
    selections: &[ShiftSelection],
) -> Result<(), ValidationError> {
    let total_selected = selections.len() as u32;
    let mut shortfalls = Vec::new();

    if policy.per_type.is_exact() {
        for shift_type in ShiftType::ALL {
            let selected = type_count(selections, shift_type);
            // exact_target is Some for every type in exact mode
            if let Some(required) = policy.per_type.exact_target(shift_type) {
                if selected != required {
                    shortfalls.push(TypeShortfall {
                        shift_type,
                        selected,
                        required,
                    });
                }
            }
        }
    }

    if total_selected != policy.total_quota || !shortfalls.is_empty() {
        return Err(ValidationError::QuotaNotMet {
            report: QuotaReport {
                total_selected,
                total_quota: policy.total_quota,
                shortfalls,
            },
        });
    }

    Ok(())
}

// =========================================================
// Helpers
// =========================================================

/// Count selections of one shift type.
pub fn type_count(selections: &[ShiftSelection], shift_type: ShiftType) -> u32 {
    selections
        .iter()
        .filter(|s| s.shift_type == shift_type)
        .count() as u32
}

/// Longest run of consecutive calendar days in `days`.
///
/// Days are deduplicated and sorted ascending, then scanned for the longest
/// run of unit-incrementing integers. An empty input has run length 0.
pub fn consecutive_run(days: &[u8]) -> u32 {
    let mut sorted: Vec<u8> = days.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut max_run: u32 = 0;
    let mut current_run: u32 = 0;
    let mut prev: Option<u8> = None;

    for day in sorted {
        current_run = match prev {
            Some(p) if day == p + 1 => current_run + 1,
            _ => 1,
        };
        max_run = max_run.max(current_run);
        prev = Some(day);
    }

    max_run
}
