#[cfg(test)]
mod tests {
    use crate::api::{CapacityError, EmployeeId, ShiftSelection, ShiftType, SlotCapacity};
    use std::str::FromStr;

    #[test]
    fn test_employee_id_new() {
        let id = EmployeeId::new("t997");
        assert_eq!(id.as_str(), "t997");
    }

    #[test]
    fn test_employee_id_equality() {
        let id1 = EmployeeId::new("w997");
        let id2 = EmployeeId::new("w997");
        let id3 = EmployeeId::new("m997");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_employee_id_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(EmployeeId::new("a"));
        set.insert(EmployeeId::new("b"));
        set.insert(EmployeeId::new("a")); // Duplicate

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_shift_type_round_trip() {
        for shift_type in ShiftType::ALL {
            let parsed = ShiftType::from_str(shift_type.as_str()).unwrap();
            assert_eq!(parsed, shift_type);
        }
    }

    #[test]
    fn test_shift_type_parse_case_insensitive() {
        assert_eq!(ShiftType::from_str("morning").unwrap(), ShiftType::Morning);
        assert_eq!(ShiftType::from_str("NIGHT").unwrap(), ShiftType::Night);
        assert!(ShiftType::from_str("afternoon").is_err());
    }

    #[test]
    fn test_shift_selection_ordering() {
        let a = ShiftSelection::new(3, ShiftType::Night);
        let b = ShiftSelection::new(5, ShiftType::Morning);

        assert!(a < b);
    }

    #[test]
    fn test_slot_capacity_with_total() {
        let slot = SlotCapacity::with_total(6);
        assert_eq!(slot.total, 6);
        assert_eq!(slot.available, 6);
        assert_eq!(slot.taken(), 0);
    }

    #[test]
    fn test_slot_capacity_adjust_reserve_release() {
        let slot = SlotCapacity::with_total(2);
        let reserved = slot.adjusted(-1).unwrap();
        assert_eq!(reserved.available, 1);
        assert_eq!(reserved.taken(), 1);

        let released = reserved.adjusted(1).unwrap();
        assert_eq!(released, slot);
    }

    #[test]
    fn test_slot_capacity_underflow() {
        let slot = SlotCapacity {
            total: 4,
            available: 0,
        };
        assert_eq!(slot.adjusted(-1), Err(CapacityError::Underflow));
    }

    #[test]
    fn test_slot_capacity_overflow() {
        let slot = SlotCapacity::with_total(4);
        assert_eq!(
            slot.adjusted(1),
            Err(CapacityError::Overflow { total: 4 })
        );
    }

    #[test]
    fn test_slot_capacity_zero_reads_empty() {
        assert_eq!(SlotCapacity::ZERO.total, 0);
        assert_eq!(SlotCapacity::ZERO.available, 0);
        assert!(SlotCapacity::ZERO.adjusted(-1).is_err());
    }

    #[test]
    fn test_set_total_preserves_taken() {
        let slot = SlotCapacity {
            total: 6,
            available: 2,
        };
        let widened = slot.with_new_total(10).unwrap();
        assert_eq!(widened.taken(), 4);
        assert_eq!(widened.available, 6);
    }

    #[test]
    fn test_set_total_below_taken_rejected() {
        let slot = SlotCapacity {
            total: 6,
            available: 2,
        };
        assert_eq!(
            slot.with_new_total(3),
            Err(CapacityError::InvalidTotal {
                requested: 3,
                taken: 4
            })
        );
    }

    #[test]
    fn test_set_total_to_taken_zeroes_available() {
        let slot = SlotCapacity {
            total: 6,
            available: 2,
        };
        let shrunk = slot.with_new_total(4).unwrap();
        assert_eq!(shrunk.available, 0);
        assert_eq!(shrunk.taken(), 4);
    }
}
