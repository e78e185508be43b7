//! Allocation policy configuration.
//!
//! The quota constants have changed across deployment generations (20-shift
//! cap-mode vs 19-shift exact-mode with the vacation feature), so they are
//! modelled as a versioned configuration value supplied at session creation,
//! never as hardcoded literals. Both epochs stay expressible and testable
//! side by side.

use crate::api::ShiftType;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Per-shift-type composition rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum PerTypePolicy {
    /// Uniform maximum per shift type, checked on every toggle.
    Cap { max: u32 },
    /// Exact per-type targets, enforced at final submit. Interactive toggles
    /// treat each target as that type's cap.
    Exact {
        morning: u32,
        evening: u32,
        night: u32,
    },
}

impl PerTypePolicy {
    /// The interactive ceiling for one shift type under this policy.
    pub fn cap_for(&self, shift_type: ShiftType) -> u32 {
        match self {
            PerTypePolicy::Cap { max } => *max,
            PerTypePolicy::Exact {
                morning,
                evening,
                night,
            } => match shift_type {
                ShiftType::Morning => *morning,
                ShiftType::Evening => *evening,
                ShiftType::Night => *night,
            },
        }
    }

    /// The exact target for one shift type, if this policy is exact-mode.
    pub fn exact_target(&self, shift_type: ShiftType) -> Option<u32> {
        match self {
            PerTypePolicy::Cap { .. } => None,
            PerTypePolicy::Exact { .. } => Some(self.cap_for(shift_type)),
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, PerTypePolicy::Exact { .. })
    }
}

/// Versioned allocation policy for one deployment epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPolicy {
    /// Exact number of shifts required to complete a month.
    pub total_quota: u32,
    /// Maximum run length of consecutive calendar days with a shift.
    pub max_consecutive_days: u32,
    /// Per-type composition rule.
    pub per_type: PerTypePolicy,
}

impl AllocationPolicy {
    /// First-generation policy: 20 shifts, at most 7 of each type.
    pub fn cap_epoch() -> Self {
        AllocationPolicy {
            total_quota: 20,
            max_consecutive_days: 9,
            per_type: PerTypePolicy::Cap { max: 7 },
        }
    }

    /// Second-generation policy: 19 shifts at exactly 6 Morning / 7 Evening /
    /// 6 Night, introduced together with the vacation overlay.
    pub fn exact_epoch() -> Self {
        AllocationPolicy {
            total_quota: 19,
            max_consecutive_days: 9,
            per_type: PerTypePolicy::Exact {
                morning: 6,
                evening: 7,
                night: 6,
            },
        }
    }
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self::exact_epoch()
    }
}

impl FromStr for AllocationPolicy {
    type Err = String;

    /// Parse a named policy epoch from configuration.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cap" | "cap-epoch" => Ok(Self::cap_epoch()),
            "exact" | "exact-epoch" => Ok(Self::exact_epoch()),
            _ => Err(format!("Unknown policy epoch: {}", s)),
        }
    }
}
