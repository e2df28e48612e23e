// --- File: crates/tourly_scheduling/src/horizon.rs ---
//! Booking horizon: the forward-looking window within which tours may be
//! booked, and clamping of calendar navigation to that window.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tourly_config::SchedulingConfig;

/// A calendar month as shown by the booking UI.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    /// 1-based month.
    pub month: u32,
}

impl YearMonth {
    /// Validates both the month and that chrono can represent the year.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("month validated at construction")
    }

    pub fn last_day(&self) -> NaiveDate {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .expect("month validated at construction")
            .pred_opt()
            .expect("month has a last day")
    }

    /// Every day of the month, ascending.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.first_day()
            .iter_days()
            .take_while(|d| *d <= self.last_day())
            .collect()
    }
}

/// The booking horizon, captured against a fixed "today".
///
/// "Today" is resolved on the server in the configured business time zone,
/// never from a client clock. All queries are pure functions of
/// `(today, horizon_days)`.
#[derive(Debug, Clone, Copy)]
pub struct AvailabilityWindow {
    today: NaiveDate,
    horizon_days: i64,
}

impl AvailabilityWindow {
    pub fn new(today: NaiveDate, horizon_days: i64) -> Self {
        Self {
            today,
            horizon_days: horizon_days.max(0),
        }
    }

    /// Captures the window as of now, resolving "today" in the configured
    /// business time zone (UTC when unset or unparsable).
    pub fn current(config: &SchedulingConfig) -> Self {
        let tz = config
            .time_zone
            .as_deref()
            .and_then(|name| Tz::from_str(name).ok())
            .unwrap_or(Tz::UTC);
        let today = Utc::now().with_timezone(&tz).date_naive();
        Self::new(today, config.horizon_days)
    }

    /// First bookable day (today).
    pub fn horizon_start(&self) -> NaiveDate {
        self.today
    }

    /// Last bookable day, inclusive.
    pub fn horizon_end(&self) -> NaiveDate {
        self.today + Duration::days(self.horizon_days)
    }

    /// Inclusive on both bounds: the horizon-end day itself is bookable.
    pub fn is_within_horizon(&self, date: NaiveDate) -> bool {
        self.horizon_start() <= date && date <= self.horizon_end()
    }

    /// Clamps a calendar navigation request to the horizon.
    ///
    /// Returns the requested month when it still intersects the horizon.
    /// A request that would leave the horizon entirely is rejected with
    /// `None` so the caller keeps its current view, rather than being
    /// silently teleported to an unrelated month.
    pub fn clamp_navigation(&self, requested: YearMonth) -> Option<YearMonth> {
        let intersects = requested.first_day() <= self.horizon_end()
            && requested.last_day() >= self.horizon_start();
        intersects.then_some(requested)
    }

    /// The month containing `horizon_start`, the default calendar view.
    pub fn current_month(&self) -> YearMonth {
        YearMonth {
            year: self.today.year(),
            month: self.today.month(),
        }
    }
}
