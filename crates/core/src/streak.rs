//! Daily study streak rules.
//!
//! A streak counts consecutive calendar days with at least one study
//! activity. Repeat activity on the same day leaves it untouched; activity the
//! day after the last active day extends it; anything else restarts it at 1.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::model::Profile;
use crate::time::CalendarZone;

/// How a study activity affected the current streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StreakChange {
    /// Already studied today.
    Unchanged,
    /// Studied yesterday; streak grew by one.
    Extended,
    /// First activity ever, or after a gap; streak is now 1.
    Restarted,
}

/// Classify an activity on `today` given the last active calendar day.
#[must_use]
pub fn classify(last: Option<NaiveDate>, today: NaiveDate) -> StreakChange {
    match last {
        Some(last) if last == today => StreakChange::Unchanged,
        Some(last) if today.pred_opt() == Some(last) => StreakChange::Extended,
        _ => StreakChange::Restarted,
    }
}

/// Record a study activity at `now` on the profile's streak counters.
///
/// `last_study_date` is only moved forward when the day changes, so repeated
/// activity on one day keeps the first timestamp of that day.
pub fn record_activity(profile: &mut Profile, now: DateTime<Utc>, zone: CalendarZone) -> StreakChange {
    let today = zone.date_of(now);
    let last = profile.last_study_date.map(|at| zone.date_of(at));

    let change = classify(last, today);
    match change {
        StreakChange::Unchanged => return change,
        StreakChange::Extended => {
            profile.current_streak = profile.current_streak.saturating_add(1);
        }
        StreakChange::Restarted => profile.current_streak = 1,
    }

    profile.longest_streak = profile.longest_streak.max(profile.current_streak);
    profile.last_study_date = Some(now);
    change
}
