use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, Offset, Utc};

/// A simple clock abstraction for deterministic time in services and tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock that uses the current system time.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    /// Returns a clock fixed at the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// Returns the current time according to the clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// If this is a fixed clock, advance it by the given duration.
    ///
    /// Has no effect on `Clock::Default`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

//
// ─── CALENDAR ──────────────────────────────────────────────────────────────────
//

/// Time zone used to turn instants into calendar days for streak tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarZone {
    /// The host's local time zone.
    #[default]
    Local,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl CalendarZone {
    /// Calendar days in UTC.
    #[must_use]
    pub fn utc() -> Self {
        Self::Fixed(Utc.fix())
    }

    /// Builds a fixed zone from an offset in minutes east of UTC.
    ///
    /// Returns `None` when the offset is outside +/- 24 hours.
    #[must_use]
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Self::Fixed)
    }

    /// Calendar date of `at` in this zone.
    #[must_use]
    pub fn date_of(&self, at: DateTime<Utc>) -> NaiveDate {
        match self {
            CalendarZone::Local => at.with_timezone(&Local).date_naive(),
            CalendarZone::Fixed(offset) => at.with_timezone(offset).date_naive(),
        }
    }
}

/// Deterministic timestamp for tests and examples (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_advances() {
        let mut clock = fixed_clock();
        clock.advance(Duration::days(1));
        assert_eq!(clock.now(), fixed_now() + Duration::days(1));
    }

    #[test]
    fn default_clock_ignores_advance() {
        let mut clock = Clock::default_clock();
        clock.advance(Duration::days(1));
        assert!(matches!(clock, Clock::Default));
    }

    #[test]
    fn utc_zone_uses_utc_date() {
        let zone = CalendarZone::utc();
        assert_eq!(
            zone.date_of(fixed_now()),
            NaiveDate::from_ymd_opt(2023, 11, 14).unwrap()
        );
    }

    #[test]
    fn offset_zone_can_roll_into_next_day() {
        // 22:13 UTC is already the 15th at UTC+3.
        let zone = CalendarZone::from_offset_minutes(180).unwrap();
        assert_eq!(
            zone.date_of(fixed_now()),
            NaiveDate::from_ymd_opt(2023, 11, 15).unwrap()
        );
    }

    #[test]
    fn rejects_out_of_range_offset() {
        assert!(CalendarZone::from_offset_minutes(25 * 60).is_none());
    }
}
