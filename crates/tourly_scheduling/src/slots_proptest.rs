#[cfg(test)]
mod tests {
    use crate::horizon::AvailabilityWindow;
    use crate::slots::SlotGrid;
    use crate::test_support::at;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    proptest! {
        // Every generated slot must validate against its own grid, stay
        // within the configured bounds, and come out strictly ascending.
        #[test]
        fn generated_slots_validate_against_their_grid(
            start_hour in 0u32..12,
            end_hour in 12u32..24,
            step_minutes in prop::sample::select(vec![5i64, 10, 15, 20, 30, 60]),
        ) {
            let day_start = at(start_hour, 0);
            let day_end = at(end_hour, 0);
            let grid = SlotGrid::new(day_start, day_end, Duration::minutes(step_minutes));

            let slots = grid.generate_slots();
            prop_assert!(!slots.is_empty());
            prop_assert_eq!(slots.first(), Some(&day_start));

            for pair in slots.windows(2) {
                prop_assert!(pair[0] < pair[1]);
                prop_assert_eq!(pair[1] - pair[0], Duration::minutes(step_minutes));
            }
            for slot in &slots {
                prop_assert!(*slot <= day_end);
                prop_assert!(grid.is_valid_slot(*slot));
            }
        }

        // Times between grid points never validate.
        #[test]
        fn off_grid_minutes_are_rejected(minute in 1u32..30) {
            let grid = SlotGrid::new(at(9, 0), at(17, 0), Duration::minutes(30));
            prop_assert!(!grid.is_valid_slot(at(9, minute)));
        }

        // Horizon membership is exactly the closed interval [today, today+n].
        #[test]
        fn horizon_membership_matches_offset(
            horizon_days in 0i64..90,
            offset in -120i64..240,
        ) {
            let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
            let window = AvailabilityWindow::new(today, horizon_days);
            let candidate = today + Duration::days(offset);
            let expected = (0..=horizon_days).contains(&offset);
            prop_assert_eq!(window.is_within_horizon(candidate), expected);
        }
    }
}
