// --- File: crates/tourly_scheduling/src/slots.rs ---
//! The fixed daily slot grid.
//!
//! Slots are times of day, identical for every business day. A fixed grid
//! turns conflict detection into an equality check on `(agent, date-time)`
//! instead of interval overlap arithmetic.

use chrono::{Duration, NaiveTime};
use tourly_config::SchedulingConfig;

use crate::error::SchedulingError;

/// Generates the bookable times of day.
#[derive(Debug, Clone)]
pub struct SlotGrid {
    day_start: NaiveTime,
    day_end: NaiveTime,
    step: Duration,
}

impl SlotGrid {
    pub fn new(day_start: NaiveTime, day_end: NaiveTime, step: Duration) -> Self {
        Self {
            day_start,
            day_end,
            step,
        }
    }

    /// Builds the grid from configuration ("HH:MM" bounds, step in minutes).
    pub fn from_config(config: &SchedulingConfig) -> Result<Self, SchedulingError> {
        let day_start = NaiveTime::parse_from_str(&config.day_start, "%H:%M").map_err(|e| {
            SchedulingError::Config(format!("invalid day_start {:?}: {}", config.day_start, e))
        })?;
        let day_end = NaiveTime::parse_from_str(&config.day_end, "%H:%M").map_err(|e| {
            SchedulingError::Config(format!("invalid day_end {:?}: {}", config.day_end, e))
        })?;
        if day_end < day_start {
            return Err(SchedulingError::Config(
                "day_end must not precede day_start".to_string(),
            ));
        }
        if config.slot_minutes <= 0 {
            return Err(SchedulingError::Config(
                "slot_minutes must be positive".to_string(),
            ));
        }
        Ok(Self::new(
            day_start,
            day_end,
            Duration::minutes(config.slot_minutes),
        ))
    }

    /// The full ordered grid for a business day, both bounds inclusive.
    /// With the defaults (09:00–17:00, 30 min) this is 17 slots.
    pub fn generate_slots(&self) -> Vec<NaiveTime> {
        let mut slots = Vec::new();
        let mut current = self.day_start;
        loop {
            slots.push(current);
            let (next, wrapped) = current.overflowing_add_signed(self.step);
            if wrapped != 0 || next <= current || next > self.day_end {
                break;
            }
            current = next;
        }
        slots
    }

    /// Exact membership: `time` must be one of the generated values.
    pub fn is_valid_slot(&self, time: NaiveTime) -> bool {
        if time < self.day_start || time > self.day_end {
            return false;
        }
        let offset = time - self.day_start;
        offset.num_seconds() % self.step.num_seconds() == 0
    }
}
