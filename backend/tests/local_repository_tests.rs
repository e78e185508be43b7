//! Tests for the in-memory repository.
//!
//! These cover the capacity ledger's atomic bounds checks, concurrent access
//! patterns, and the schedule/vacation store invariants.

mod support;

use std::sync::Arc;

use shiftdesk_rust::api::{CapacityError, EmployeeId, ShiftSelection, ShiftType, SlotCapacity};
use shiftdesk_rust::db::repository::{CapacityStore, ScheduleStore, VacationStore};
use shiftdesk_rust::db::LocalRepository;
use support::target_month;

fn date(day: u8) -> chrono::NaiveDate {
    target_month().date_of(day).unwrap()
}

// =========================================================
// Capacity ledger
// =========================================================

#[tokio::test]
async fn test_missing_slot_reads_zero() {
    let repo = LocalRepository::new();
    let slot = repo.get_slot(date(1), ShiftType::Morning).await.unwrap();
    assert_eq!(slot, SlotCapacity::ZERO);
}

#[tokio::test]
async fn test_set_total_creates_and_updates() {
    let repo = LocalRepository::new();

    let created = repo.set_total(date(5), ShiftType::Morning, 6).await.unwrap();
    assert_eq!(created.total, 6);
    assert_eq!(created.available, 6);

    // Mutations are immediately visible to subsequent reads
    let read_back = repo.get_slot(date(5), ShiftType::Morning).await.unwrap();
    assert_eq!(read_back, created);
}

#[tokio::test]
async fn test_set_total_preserves_taken_slots() {
    let repo = LocalRepository::new();
    repo.set_total(date(5), ShiftType::Evening, 6).await.unwrap();
    repo.adjust(date(5), ShiftType::Evening, -1).await.unwrap();
    repo.adjust(date(5), ShiftType::Evening, -1).await.unwrap();

    let widened = repo.set_total(date(5), ShiftType::Evening, 10).await.unwrap();
    assert_eq!(widened.taken(), 2);
    assert_eq!(widened.available, 8);
}

#[tokio::test]
async fn test_set_total_below_taken_rejected_without_effect() {
    let repo = LocalRepository::new();
    repo.set_total(date(5), ShiftType::Night, 4).await.unwrap();
    repo.adjust(date(5), ShiftType::Night, -1).await.unwrap();
    repo.adjust(date(5), ShiftType::Night, -1).await.unwrap();
    repo.adjust(date(5), ShiftType::Night, -1).await.unwrap();

    let err = repo.set_total(date(5), ShiftType::Night, 2).await.unwrap_err();
    assert_eq!(
        err.capacity_error(),
        Some(CapacityError::InvalidTotal {
            requested: 2,
            taken: 3
        })
    );

    // No partial effect
    let slot = repo.get_slot(date(5), ShiftType::Night).await.unwrap();
    assert_eq!(slot.total, 4);
    assert_eq!(slot.available, 1);
}

#[tokio::test]
async fn test_adjust_bounds_are_enforced() {
    let repo = LocalRepository::new();
    repo.set_total(date(9), ShiftType::Morning, 1).await.unwrap();

    repo.adjust(date(9), ShiftType::Morning, -1).await.unwrap();
    let under = repo.adjust(date(9), ShiftType::Morning, -1).await.unwrap_err();
    assert_eq!(under.capacity_error(), Some(CapacityError::Underflow));

    repo.adjust(date(9), ShiftType::Morning, 1).await.unwrap();
    let over = repo.adjust(date(9), ShiftType::Morning, 1).await.unwrap_err();
    assert_eq!(over.capacity_error(), Some(CapacityError::Overflow { total: 1 }));

    // Failed adjustments never mutate
    let slot = repo.get_slot(date(9), ShiftType::Morning).await.unwrap();
    assert_eq!(slot.available, 1);
}

#[tokio::test]
async fn test_adjust_on_missing_slot_fails_without_creating() {
    let repo = LocalRepository::new();
    let err = repo.adjust(date(3), ShiftType::Night, -1).await.unwrap_err();
    assert_eq!(err.capacity_error(), Some(CapacityError::Underflow));

    let month = repo.read_month(target_month()).await.unwrap();
    assert!(month.is_empty());
}

#[tokio::test]
async fn test_read_month_filters_other_months() {
    let repo = LocalRepository::new();
    repo.set_total(date(5), ShiftType::Morning, 6).await.unwrap();
    let other = chrono::NaiveDate::from_ymd_opt(2026, 4, 5).unwrap();
    repo.set_total(other, ShiftType::Morning, 9).await.unwrap();

    let month = repo.read_month(target_month()).await.unwrap();
    assert_eq!(month.len(), 1);
    assert_eq!(
        month.get(&(5, ShiftType::Morning)).unwrap().total,
        6
    );
}

// =========================================================
// Concurrent access
// =========================================================

#[tokio::test]
async fn test_concurrent_adjust_last_unit_single_winner() {
    // {total: 6, available: 1}; two concurrent reserves on the same slot;
    // exactly one may succeed.
    let repo = Arc::new(LocalRepository::new());
    repo.set_total(date(5), ShiftType::Morning, 6).await.unwrap();
    for _ in 0..5 {
        repo.adjust(date(5), ShiftType::Morning, -1).await.unwrap();
    }

    let mut handles = vec![];
    for _ in 0..2 {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            repo.adjust(date(5), ShiftType::Morning, -1).await
        }));
    }

    let mut successes = 0;
    let mut capacity_failures = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(e) => {
                assert_eq!(e.capacity_error(), Some(CapacityError::Underflow));
                capacity_failures += 1;
            }
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(capacity_failures, 1);
    let slot = repo.get_slot(date(5), ShiftType::Morning).await.unwrap();
    assert_eq!(slot.available, 0);
}

#[tokio::test]
async fn test_concurrent_set_total_and_adjust_keep_invariant() {
    let repo = Arc::new(LocalRepository::new());
    repo.set_total(date(7), ShiftType::Evening, 10).await.unwrap();

    let mut handles = vec![];
    for i in 0..10 {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            if i % 2 == 0 {
                repo.adjust(date(7), ShiftType::Evening, -1).await.map(|_| ())
            } else {
                // Admin edits race with employee reserves; taken is recomputed
                // inside the store's own atomic update
                repo.set_total(date(7), ShiftType::Evening, 10 + i as u32)
                    .await
                    .map(|_| ())
            }
        }));
    }
    for handle in handles {
        let _ = handle.await.unwrap();
    }

    let slot = repo.get_slot(date(7), ShiftType::Evening).await.unwrap();
    assert!(slot.available <= slot.total, "invariant violated: {:?}", slot);
}

// =========================================================
// Schedule store
// =========================================================

#[tokio::test]
async fn test_commit_then_read_back_sorted() {
    let repo = LocalRepository::new();
    let employee = EmployeeId::new("t997");
    let shifts = vec![
        ShiftSelection::new(9, ShiftType::Night),
        ShiftSelection::new(2, ShiftType::Morning),
    ];

    repo.commit_shifts(&employee, target_month(), &shifts)
        .await
        .unwrap();

    let committed = repo
        .committed_shifts(&employee, target_month())
        .await
        .unwrap();
    assert_eq!(committed.len(), 2);
    assert_eq!(committed[0].day(), 2);
    assert_eq!(committed[1].day(), 9);
}

#[tokio::test]
async fn test_commit_identical_set_is_idempotent() {
    let repo = LocalRepository::new();
    let employee = EmployeeId::new("t997");
    let shifts = support::exact_epoch_set();

    repo.commit_shifts(&employee, target_month(), &shifts)
        .await
        .unwrap();
    // Retry after an unknown outcome: same key, same set, no double-booking
    repo.commit_shifts(&employee, target_month(), &shifts)
        .await
        .unwrap();

    let committed = repo
        .committed_shifts(&employee, target_month())
        .await
        .unwrap();
    assert_eq!(committed.len(), 19);
}

#[tokio::test]
async fn test_commit_different_set_rejected() {
    let repo = LocalRepository::new();
    let employee = EmployeeId::new("t997");

    repo.commit_shifts(
        &employee,
        target_month(),
        &[ShiftSelection::new(2, ShiftType::Morning)],
    )
    .await
    .unwrap();

    let err = repo
        .commit_shifts(
            &employee,
            target_month(),
            &[ShiftSelection::new(3, ShiftType::Morning)],
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("already has a schedule"));
}

#[tokio::test]
async fn test_commit_over_vacation_day_rejected() {
    let repo = LocalRepository::new();
    let employee = EmployeeId::new("m997");
    let days: Vec<u8> = (1..=10).collect();
    repo.submit_vacation(&employee, target_month(), &days)
        .await
        .unwrap();

    let err = repo
        .commit_shifts(
            &employee,
            target_month(),
            &[ShiftSelection::new(4, ShiftType::Evening)],
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("vacation day"));
}

#[tokio::test]
async fn test_reset_schedule_returns_removed_selections() {
    let repo = LocalRepository::new();
    let employee = EmployeeId::new("t997");
    let shifts = support::exact_epoch_set();
    repo.commit_shifts(&employee, target_month(), &shifts)
        .await
        .unwrap();

    let removed = repo.reset_schedule(&employee, target_month()).await.unwrap();
    assert_eq!(removed.len(), 19);
    assert!(repo
        .committed_shifts(&employee, target_month())
        .await
        .unwrap()
        .is_empty());

    // Resetting again is a no-op
    let removed_again = repo.reset_schedule(&employee, target_month()).await.unwrap();
    assert!(removed_again.is_empty());
}

#[tokio::test]
async fn test_month_schedules_spans_employees() {
    let repo = LocalRepository::new();
    repo.commit_shifts(
        &EmployeeId::new("b01"),
        target_month(),
        &[ShiftSelection::new(2, ShiftType::Morning)],
    )
    .await
    .unwrap();
    repo.commit_shifts(
        &EmployeeId::new("a01"),
        target_month(),
        &[ShiftSelection::new(1, ShiftType::Night)],
    )
    .await
    .unwrap();
    repo.submit_vacation(&EmployeeId::new("c01"), target_month(), &(1..=10).collect::<Vec<u8>>())
        .await
        .unwrap();

    let rows = repo.month_schedules(target_month()).await.unwrap();
    assert_eq!(rows.len(), 12);
    // Sorted by employee, then day
    assert_eq!(rows[0].0, EmployeeId::new("a01"));
    assert_eq!(rows[1].0, EmployeeId::new("b01"));
    assert_eq!(rows[2].0, EmployeeId::new("c01"));
}
