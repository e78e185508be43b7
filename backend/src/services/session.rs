//! Selection session state machine.
//!
//! A [`SelectionSession`] is an explicit value owned by the caller; there is
//! no ambient global selection state. It tracks one employee's in-progress
//! month, applies the pure rule engine to every toggle, and keeps the shared
//! capacity ledger synchronized with the local set.
//!
//! Capacity follows a two-phase protocol: phase 1 (interactive) mutates the
//! shared ledger eagerly on every toggle, so phase 2 (`submit`) is a pure
//! metadata persistence step with no further capacity math. The trade is that
//! a failed persistence call must be reconciled: the session stays in
//! `Submitting` and the commit is retried idempotently, or rolled back with
//! [`SelectionSession::reset`].

use crate::api::{CapacityError, EmployeeId, ShiftSelection, ShiftType};
use crate::db::repository::{
    CapacityStore, FullRepository, RepositoryError, ScheduleStore, VacationStore,
};
use crate::models::{AllocationPolicy, SchedulingMonth};
use crate::rules::{self, ValidationError};
use serde::Serialize;

/// Lifecycle state of a selection session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No selections held.
    Empty,
    /// In-progress selection set, ledger units reserved per entry.
    Selecting,
    /// Final validation passed but persistence has not been confirmed.
    Submitting,
    /// A full schedule or vacation overlay is persisted; view-only.
    Committed,
}

/// Errors surfaced by session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A rule violation; no state was mutated.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A capacity bounds failure or lost availability race; the UI should
    /// re-fetch the ledger and retry or report the slot as taken.
    #[error(transparent)]
    Capacity(#[from] CapacityError),

    /// Day number outside the target month.
    #[error("day {day} is not a valid day of {month}")]
    DayOutOfRange { day: u8, month: SchedulingMonth },

    /// The month is already committed for this employee.
    #[error("schedule for this month is already committed")]
    AlreadyCommitted,

    /// A vacation overlay suppresses shift selection for this month.
    #[error("a vacation overlay is active for this month")]
    VacationCommitted,

    /// Operation not valid in the current lifecycle state.
    #[error("{operation} is not valid in the {state:?} state")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },

    /// Persistence failed after capacity was already adjusted interactively.
    /// Retryable: the commit is idempotent per employee + month, and
    /// `reset()` rolls every reservation back.
    #[error("failed to persist schedule (retryable): {0}")]
    Persistence(RepositoryError),

    /// Store failure outside the persistence step.
    #[error(transparent)]
    Repository(RepositoryError),
}

/// Split store failures into capacity semantics vs infrastructure.
fn store_error(err: RepositoryError) -> SessionError {
    match err.capacity_error() {
        Some(capacity) => SessionError::Capacity(capacity),
        None => SessionError::Repository(err),
    }
}

/// One employee's in-progress selection for a target month.
#[derive(Debug, Clone)]
pub struct SelectionSession {
    employee: EmployeeId,
    month: SchedulingMonth,
    policy: AllocationPolicy,
    selections: Vec<ShiftSelection>,
    state: SessionState,
    vacation_committed: bool,
}

impl SelectionSession {
    /// Open a session for an employee and month, reconciling against the
    /// stores: an already persisted schedule or an accepted vacation overlay
    /// puts the session straight into `Committed` (view-only). This is also
    /// how an unknown-outcome submit from a previous session is resolved.
    pub async fn load(
        repo: &dyn FullRepository,
        employee: EmployeeId,
        month: SchedulingMonth,
        policy: AllocationPolicy,
    ) -> Result<Self, SessionError> {
        let committed = repo
            .committed_shifts(&employee, month)
            .await
            .map_err(store_error)?;
        let vacation = repo
            .vacation_days(&employee, month)
            .await
            .map_err(store_error)?;

        let shifts: Vec<ShiftSelection> =
            committed.iter().filter_map(|day| day.shift()).collect();
        let vacation_committed = !vacation.is_empty();

        let state = if vacation_committed || !shifts.is_empty() {
            SessionState::Committed
        } else {
            SessionState::Empty
        };

        Ok(Self {
            employee,
            month,
            policy,
            selections: shifts,
            state,
            vacation_committed,
        })
    }

    /// Fresh empty session without touching the stores (tests, admin tools).
    pub fn new(employee: EmployeeId, month: SchedulingMonth, policy: AllocationPolicy) -> Self {
        Self {
            employee,
            month,
            policy,
            selections: Vec::new(),
            state: SessionState::Empty,
            vacation_committed: false,
        }
    }

    // =========================================================
    // Transitions
    // =========================================================

    /// Toggle one (day, shift-type) cell.
    ///
    /// Toggle-on runs the rule checks, then reserves one ledger unit;
    /// toggle-off always releases exactly one unit. On any rejection the
    /// local set and the ledger are left unchanged; the ledger's own atomic
    /// bounds check is the admission-control boundary when two sessions race
    /// for the same slot.
    pub async fn toggle(
        &mut self,
        repo: &dyn FullRepository,
        day: u8,
        shift_type: ShiftType,
    ) -> Result<(), SessionError> {
        match self.state {
            SessionState::Committed => return Err(SessionError::AlreadyCommitted),
            SessionState::Submitting => {
                return Err(SessionError::InvalidState {
                    operation: "toggle",
                    state: self.state,
                })
            }
            SessionState::Empty | SessionState::Selecting => {}
        }
        if self.vacation_committed {
            return Err(SessionError::VacationCommitted);
        }
        let date = self
            .month
            .date_of(day)
            .ok_or(SessionError::DayOutOfRange {
                day,
                month: self.month,
            })?;

        let existing = self
            .selections
            .iter()
            .position(|s| s.day == day && s.shift_type == shift_type);

        if let Some(index) = existing {
            // Deselect: release the unit before dropping the local entry
            repo.adjust(date, shift_type, 1).await.map_err(store_error)?;
            self.selections.remove(index);
        } else {
            rules::check_toggle_on(&self.policy, &self.selections, day, shift_type)?;

            // Availability check against the live ledger, not a local cache
            let slot = repo.get_slot(date, shift_type).await.map_err(store_error)?;
            if slot.total == 0 || slot.available == 0 {
                return Err(SessionError::Capacity(CapacityError::SlotUnavailable {
                    day,
                    shift_type,
                }));
            }

            // The pre-check may be stale; the ledger's underflow guard decides
            repo.adjust(date, shift_type, -1)
                .await
                .map_err(store_error)?;
            self.selections.push(ShiftSelection::new(day, shift_type));
        }

        self.state = if self.selections.is_empty() {
            SessionState::Empty
        } else {
            SessionState::Selecting
        };
        Ok(())
    }

    /// Adopt a complete selection set built interactively by the caller.
    ///
    /// Used by the submit endpoint, where the frontend held the in-progress
    /// set and reserved its capacity units through the adjust endpoint as the
    /// user toggled. Replays the toggle-on rule checks over the set; the
    /// ledger is not touched.
    pub fn adopt_selections(
        &mut self,
        selections: Vec<ShiftSelection>,
    ) -> Result<(), SessionError> {
        if self.state == SessionState::Committed {
            return Err(SessionError::AlreadyCommitted);
        }
        if self.vacation_committed {
            return Err(SessionError::VacationCommitted);
        }

        let mut adopted: Vec<ShiftSelection> = Vec::with_capacity(selections.len());
        for selection in selections {
            if !self.month.contains_day(selection.day) {
                return Err(SessionError::DayOutOfRange {
                    day: selection.day,
                    month: self.month,
                });
            }
            rules::check_toggle_on(&self.policy, &adopted, selection.day, selection.shift_type)?;
            adopted.push(selection);
        }

        self.state = if adopted.is_empty() {
            SessionState::Empty
        } else {
            SessionState::Selecting
        };
        self.selections = adopted;
        Ok(())
    }

    /// Final submit: validate the complete set, then persist it.
    ///
    /// Persistence is pure metadata: capacity was already adjusted per
    /// toggle. On store failure the session stays in `Submitting` and the
    /// error is retryable; a timed-out call is an unknown outcome and is
    /// reconciled by [`SelectionSession::load`] on the next session.
    pub async fn submit(&mut self, repo: &dyn FullRepository) -> Result<(), SessionError> {
        if self.state == SessionState::Committed {
            return Err(SessionError::AlreadyCommitted);
        }
        if self.vacation_committed {
            return Err(SessionError::VacationCommitted);
        }

        rules::check_final(&self.policy, &self.selections)?;

        self.state = SessionState::Submitting;
        match repo
            .commit_shifts(&self.employee, self.month, &self.selections)
            .await
        {
            Ok(()) => {
                self.state = SessionState::Committed;
                Ok(())
            }
            Err(err) => Err(SessionError::Persistence(err)),
        }
    }

    /// Release everything and return to `Empty`.
    ///
    /// Valid in any state. Every slot held locally or committed externally is
    /// released back to the ledger (+1 each), the persisted schedule and any
    /// vacation overlay are deleted, and the selection set is cleared.
    pub async fn reset(&mut self, repo: &dyn FullRepository) -> Result<(), SessionError> {
        let removed = repo
            .reset_schedule(&self.employee, self.month)
            .await
            .map_err(store_error)?;

        // After a confirmed or unknown-outcome commit the store set and the
        // local set are the same reservation; release whichever exists.
        let to_release: Vec<ShiftSelection> = if removed.is_empty() {
            std::mem::take(&mut self.selections)
        } else {
            self.selections.clear();
            removed
        };

        for selection in &to_release {
            if let Some(date) = self.month.date_of(selection.day) {
                repo.adjust(date, selection.shift_type, 1)
                    .await
                    .map_err(store_error)?;
            }
        }

        repo.reset_vacation(&self.employee, self.month)
            .await
            .map_err(store_error)?;

        self.vacation_committed = false;
        self.state = SessionState::Empty;
        Ok(())
    }

    // =========================================================
    // Derived views (recomputed, never cached across a toggle)
    // =========================================================

    pub fn employee(&self) -> &EmployeeId {
        &self.employee
    }

    pub fn month(&self) -> SchedulingMonth {
        self.month
    }

    pub fn policy(&self) -> &AllocationPolicy {
        &self.policy
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_vacation_committed(&self) -> bool {
        self.vacation_committed
    }

    /// The current selection set, sorted by day.
    pub fn selections(&self) -> Vec<ShiftSelection> {
        let mut sorted = self.selections.clone();
        sorted.sort();
        sorted
    }

    /// Number of selections of one shift type.
    pub fn type_count(&self, shift_type: ShiftType) -> u32 {
        rules::type_count(&self.selections, shift_type)
    }

    /// Shifts still needed to reach the monthly quota.
    pub fn remaining_total(&self) -> u32 {
        self.policy
            .total_quota
            .saturating_sub(self.selections.len() as u32)
    }

    /// Selections of one type still allowed under its ceiling.
    pub fn remaining_for_type(&self, shift_type: ShiftType) -> u32 {
        self.policy
            .per_type
            .cap_for(shift_type)
            .saturating_sub(self.type_count(shift_type))
    }

    /// Whether a slot can currently be toggled on, from a live ledger read.
    pub async fn slot_available(
        &self,
        repo: &dyn FullRepository,
        day: u8,
        shift_type: ShiftType,
    ) -> Result<bool, SessionError> {
        let date = match self.month.date_of(day) {
            Some(date) => date,
            None => return Ok(false),
        };
        let slot = repo.get_slot(date, shift_type).await.map_err(store_error)?;
        Ok(slot.total > 0 && slot.available > 0)
    }
}
