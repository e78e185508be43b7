//! In-memory repository implementation.
//!
//! Backs all three store traits with `HashMap`s behind a single
//! `parking_lot::RwLock`. Every mutation takes the write lock, which
//! serializes `adjust`/`set_total` per store and makes the check-then-mutate
//! of each capacity operation atomic: two sessions racing for the last unit
//! of a slot can never both succeed.

use crate::api::{CommittedDay, EmployeeId, ShiftSelection, ShiftType, SlotCapacity};
use crate::db::repository::{
    CapacityStore, ErrorContext, FullRepository, RepositoryError, RepositoryResult, ScheduleStore,
    VacationStore,
};
use crate::models::SchedulingMonth;
use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Default)]
struct LocalState {
    capacities: HashMap<(NaiveDate, ShiftType), SlotCapacity>,
    schedules: HashMap<(EmployeeId, SchedulingMonth), Vec<ShiftSelection>>,
    vacations: HashMap<(EmployeeId, SchedulingMonth), Vec<u8>>,
}

/// In-memory repository for unit testing and single-node deployments.
pub struct LocalRepository {
    inner: RwLock<LocalState>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(LocalState::default()),
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CapacityStore for LocalRepository {
    async fn read_month(
        &self,
        month: SchedulingMonth,
    ) -> RepositoryResult<HashMap<(u8, ShiftType), SlotCapacity>> {
        let state = self.inner.read();
        let entries = state
            .capacities
            .iter()
            .filter(|((date, _), _)| SchedulingMonth::of_date(*date) == month)
            .map(|((date, shift_type), slot)| {
                ((chrono::Datelike::day(date) as u8, *shift_type), *slot)
            })
            .collect();
        Ok(entries)
    }

    async fn get_slot(
        &self,
        date: NaiveDate,
        shift_type: ShiftType,
    ) -> RepositoryResult<SlotCapacity> {
        let state = self.inner.read();
        Ok(state
            .capacities
            .get(&(date, shift_type))
            .copied()
            .unwrap_or(SlotCapacity::ZERO))
    }

    async fn set_total(
        &self,
        date: NaiveDate,
        shift_type: ShiftType,
        new_total: u32,
    ) -> RepositoryResult<SlotCapacity> {
        let mut state = self.inner.write();
        // taken is recomputed from the entry under the write lock, never from
        // a value read earlier by the caller
        let current = state
            .capacities
            .get(&(date, shift_type))
            .copied()
            .unwrap_or(SlotCapacity::ZERO);
        let updated = current.with_new_total(new_total).map_err(|e| {
            RepositoryError::Capacity {
                source: e,
                context: ErrorContext::new("set_total")
                    .with_entity("capacity")
                    .with_entity_id(format!("{} {}", date, shift_type)),
            }
        })?;
        state.capacities.insert((date, shift_type), updated);
        Ok(updated)
    }

    async fn adjust(
        &self,
        date: NaiveDate,
        shift_type: ShiftType,
        delta: i32,
    ) -> RepositoryResult<SlotCapacity> {
        let mut state = self.inner.write();
        let current = state
            .capacities
            .get(&(date, shift_type))
            .copied()
            .unwrap_or(SlotCapacity::ZERO);
        let updated = current.adjusted(delta).map_err(|e| RepositoryError::Capacity {
            source: e,
            context: ErrorContext::new("adjust")
                .with_entity("capacity")
                .with_entity_id(format!("{} {}", date, shift_type))
                .with_details(format!("delta={}", delta)),
        })?;
        state.capacities.insert((date, shift_type), updated);
        Ok(updated)
    }
}

#[async_trait]
impl ScheduleStore for LocalRepository {
    async fn committed_shifts(
        &self,
        employee: &EmployeeId,
        month: SchedulingMonth,
    ) -> RepositoryResult<Vec<CommittedDay>> {
        let state = self.inner.read();
        let key = (employee.clone(), month);

        let mut days: Vec<CommittedDay> = state
            .schedules
            .get(&key)
            .into_iter()
            .flatten()
            .map(|s| CommittedDay::Shift {
                day: s.day,
                shift_type: s.shift_type,
            })
            .collect();
        days.extend(
            state
                .vacations
                .get(&key)
                .into_iter()
                .flatten()
                .map(|day| CommittedDay::Vacation { day: *day }),
        );
        days.sort_by_key(|d| d.day());
        Ok(days)
    }

    async fn commit_shifts(
        &self,
        employee: &EmployeeId,
        month: SchedulingMonth,
        shifts: &[ShiftSelection],
    ) -> RepositoryResult<()> {
        let mut state = self.inner.write();
        let key = (employee.clone(), month);

        if let Some(vacation) = state.vacations.get(&key) {
            if let Some(clash) = shifts.iter().find(|s| vacation.contains(&s.day)) {
                return Err(RepositoryError::validation_with_context(
                    format!("day {} is already a vacation day", clash.day),
                    ErrorContext::new("commit_shifts")
                        .with_entity("schedule")
                        .with_entity_id(employee.as_str()),
                ));
            }
        }

        if let Some(existing) = state.schedules.get(&key) {
            let mut a = existing.clone();
            let mut b = shifts.to_vec();
            a.sort();
            b.sort();
            if a == b {
                // Idempotent retry of the same commit
                return Ok(());
            }
            return Err(RepositoryError::validation_with_context(
                format!("employee {} already has a schedule for {}", employee, month),
                ErrorContext::new("commit_shifts")
                    .with_entity("schedule")
                    .with_entity_id(employee.as_str()),
            ));
        }

        state.schedules.insert(key, shifts.to_vec());
        Ok(())
    }

    async fn reset_schedule(
        &self,
        employee: &EmployeeId,
        month: SchedulingMonth,
    ) -> RepositoryResult<Vec<ShiftSelection>> {
        let mut state = self.inner.write();
        Ok(state
            .schedules
            .remove(&(employee.clone(), month))
            .unwrap_or_default())
    }

    async fn month_schedules(
        &self,
        month: SchedulingMonth,
    ) -> RepositoryResult<Vec<(EmployeeId, CommittedDay)>> {
        let state = self.inner.read();
        let mut rows: Vec<(EmployeeId, CommittedDay)> = Vec::new();

        for ((employee, m), shifts) in &state.schedules {
            if *m != month {
                continue;
            }
            for s in shifts {
                rows.push((
                    employee.clone(),
                    CommittedDay::Shift {
                        day: s.day,
                        shift_type: s.shift_type,
                    },
                ));
            }
        }
        for ((employee, m), days) in &state.vacations {
            if *m != month {
                continue;
            }
            for day in days {
                rows.push((employee.clone(), CommittedDay::Vacation { day: *day }));
            }
        }

        rows.sort_by(|(a_emp, a_day), (b_emp, b_day)| {
            a_emp.cmp(b_emp).then(a_day.day().cmp(&b_day.day()))
        });
        Ok(rows)
    }
}

#[async_trait]
impl VacationStore for LocalRepository {
    async fn vacation_days(
        &self,
        employee: &EmployeeId,
        month: SchedulingMonth,
    ) -> RepositoryResult<Vec<u8>> {
        let state = self.inner.read();
        Ok(state
            .vacations
            .get(&(employee.clone(), month))
            .cloned()
            .unwrap_or_default())
    }

    async fn submit_vacation(
        &self,
        employee: &EmployeeId,
        month: SchedulingMonth,
        days: &[u8],
    ) -> RepositoryResult<()> {
        let mut state = self.inner.write();
        let key = (employee.clone(), month);

        if let Some(shifts) = state.schedules.get(&key) {
            if let Some(clash) = days.iter().find(|d| shifts.iter().any(|s| s.day == **d)) {
                return Err(RepositoryError::validation_with_context(
                    format!("day {} already has a committed shift", clash),
                    ErrorContext::new("submit_vacation")
                        .with_entity("vacation")
                        .with_entity_id(employee.as_str()),
                ));
            }
        }

        let mut sorted: Vec<u8> = days.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        state.vacations.insert(key, sorted);
        Ok(())
    }

    async fn reset_vacation(
        &self,
        employee: &EmployeeId,
        month: SchedulingMonth,
    ) -> RepositoryResult<()> {
        let mut state = self.inner.write();
        state.vacations.remove(&(employee.clone(), month));
        Ok(())
    }
}

#[async_trait]
impl FullRepository for LocalRepository {}
