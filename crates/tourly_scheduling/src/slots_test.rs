#[cfg(test)]
mod tests {
    use crate::error::SchedulingError;
    use crate::slots::SlotGrid;
    use crate::test_support::at;
    use chrono::NaiveTime;
    use tourly_config::SchedulingConfig;

    fn default_grid() -> SlotGrid {
        SlotGrid::from_config(&SchedulingConfig::default()).unwrap()
    }

    #[test]
    fn default_grid_is_seventeen_ascending_slots() {
        let slots = default_grid().generate_slots();
        assert_eq!(slots.len(), 17);
        assert_eq!(slots.first(), Some(&at(9, 0)));
        assert_eq!(slots.last(), Some(&at(17, 0)));
        for pair in slots.windows(2) {
            assert!(pair[0] < pair[1], "slots must be strictly ascending");
        }
    }

    #[test]
    fn grid_is_date_independent() {
        // The generator takes no date at all; two invocations agree.
        let grid = default_grid();
        assert_eq!(grid.generate_slots(), grid.generate_slots());
    }

    #[test]
    fn valid_slots_are_exactly_the_generated_values() {
        let grid = default_grid();
        assert!(grid.is_valid_slot(at(9, 0)));
        assert!(grid.is_valid_slot(at(12, 30)));
        assert!(grid.is_valid_slot(at(17, 0)));

        assert!(!grid.is_valid_slot(at(9, 15)));
        assert!(!grid.is_valid_slot(at(8, 30)));
        assert!(!grid.is_valid_slot(at(17, 30)));
        // Second-level precision is off-grid
        assert!(!grid.is_valid_slot(NaiveTime::from_hms_opt(9, 0, 30).unwrap()));
    }

    #[test]
    fn custom_grid_from_config() {
        let config = SchedulingConfig {
            day_start: "10:00".to_string(),
            day_end: "12:00".to_string(),
            slot_minutes: 60,
            ..SchedulingConfig::default()
        };
        let slots = SlotGrid::from_config(&config).unwrap().generate_slots();
        assert_eq!(slots, vec![at(10, 0), at(11, 0), at(12, 0)]);
    }

    #[test]
    fn misconfigured_grids_are_rejected() {
        let inverted = SchedulingConfig {
            day_start: "17:00".to_string(),
            day_end: "09:00".to_string(),
            ..SchedulingConfig::default()
        };
        assert!(matches!(
            SlotGrid::from_config(&inverted),
            Err(SchedulingError::Config(_))
        ));

        let zero_step = SchedulingConfig {
            slot_minutes: 0,
            ..SchedulingConfig::default()
        };
        assert!(matches!(
            SlotGrid::from_config(&zero_step),
            Err(SchedulingError::Config(_))
        ));

        let garbled = SchedulingConfig {
            day_start: "nine".to_string(),
            ..SchedulingConfig::default()
        };
        assert!(matches!(
            SlotGrid::from_config(&garbled),
            Err(SchedulingError::Config(_))
        ));
    }
}
