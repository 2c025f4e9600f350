use serde::{Deserialize, Serialize};
use thiserror::Error;

const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("daily goal must be between 1 and {MINUTES_PER_DAY} minutes, got {0}")]
    InvalidDailyGoal(u32),
}

/// Learner preferences stored alongside progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearningSettings {
    sound_enabled: bool,
    animations_enabled: bool,
    /// Minutes per day.
    daily_goal: u32,
}

impl Default for LearningSettings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            animations_enabled: true,
            daily_goal: 10,
        }
    }
}

impl LearningSettings {
    #[must_use]
    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    #[must_use]
    pub fn animations_enabled(&self) -> bool {
        self.animations_enabled
    }

    #[must_use]
    pub fn daily_goal_minutes(&self) -> u32 {
        self.daily_goal
    }
}

/// Partial settings edit, validated against the current settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub sound_enabled: Option<bool>,
    pub animations_enabled: Option<bool>,
    pub daily_goal_minutes: Option<u32>,
}

impl SettingsUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the update and apply it on top of `current`.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidDailyGoal` if the goal is 0 or longer than a day.
    pub fn validate(self, current: &LearningSettings) -> Result<LearningSettings, SettingsError> {
        let daily_goal = self.daily_goal_minutes.unwrap_or(current.daily_goal);
        if !(1..=MINUTES_PER_DAY).contains(&daily_goal) {
            return Err(SettingsError::InvalidDailyGoal(daily_goal));
        }

        Ok(LearningSettings {
            sound_enabled: self.sound_enabled.unwrap_or(current.sound_enabled),
            animations_enabled: self.animations_enabled.unwrap_or(current.animations_enabled),
            daily_goal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_new_install() {
        let settings = LearningSettings::default();
        assert!(settings.sound_enabled());
        assert!(settings.animations_enabled());
        assert_eq!(settings.daily_goal_minutes(), 10);
    }

    #[test]
    fn update_keeps_unspecified_fields() {
        let current = LearningSettings::default();
        let updated = SettingsUpdate {
            sound_enabled: Some(false),
            ..SettingsUpdate::new()
        }
        .validate(&current)
        .unwrap();

        assert!(!updated.sound_enabled());
        assert!(updated.animations_enabled());
        assert_eq!(updated.daily_goal_minutes(), 10);
    }

    #[test]
    fn update_rejects_out_of_range_goal() {
        let current = LearningSettings::default();
        for goal in [0, MINUTES_PER_DAY + 1] {
            let err = SettingsUpdate {
                daily_goal_minutes: Some(goal),
                ..SettingsUpdate::new()
            }
            .validate(&current)
            .unwrap_err();
            assert_eq!(err, SettingsError::InvalidDailyGoal(goal));
        }
    }
}
