use lingo_core::CalendarZone;
use storage::progress::PROGRESS_KEY;

/// Runtime knobs for the progress store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressConfig {
    /// Key the progress document is stored under.
    pub storage_key: String,
    /// Zone used to decide calendar days for streaks.
    pub calendar_zone: CalendarZone,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            storage_key: PROGRESS_KEY.to_owned(),
            calendar_zone: CalendarZone::Local,
        }
    }
}

impl ProgressConfig {
    /// Read `LINGO_STORAGE_KEY` and `LINGO_UTC_OFFSET_MINUTES` from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like `from_env`, with a custom variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let storage_key = lookup("LINGO_STORAGE_KEY")
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| PROGRESS_KEY.to_owned());

        let calendar_zone = match lookup("LINGO_UTC_OFFSET_MINUTES") {
            None => CalendarZone::Local,
            Some(raw) => raw
                .trim()
                .parse::<i32>()
                .ok()
                .and_then(CalendarZone::from_offset_minutes)
                .unwrap_or_else(|| {
                    tracing::warn!(value = %raw, "ignoring invalid LINGO_UTC_OFFSET_MINUTES");
                    CalendarZone::Local
                }),
        };

        Self {
            storage_key,
            calendar_zone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = ProgressConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ProgressConfig::default());
        assert_eq!(config.storage_key, "langbuddy_user_progress");
    }

    #[test]
    fn reads_key_and_offset() {
        let config = ProgressConfig::from_lookup(lookup(&[
            ("LINGO_STORAGE_KEY", " profile_b "),
            ("LINGO_UTC_OFFSET_MINUTES", "330"),
        ]));
        assert_eq!(config.storage_key, "profile_b");
        assert_eq!(config.calendar_zone, CalendarZone::from_offset_minutes(330).unwrap());
    }

    #[test]
    fn invalid_offset_falls_back_to_local() {
        let config = ProgressConfig::from_lookup(lookup(&[("LINGO_UTC_OFFSET_MINUTES", "soon")]));
        assert_eq!(config.calendar_zone, CalendarZone::Local);

        let config = ProgressConfig::from_lookup(lookup(&[("LINGO_UTC_OFFSET_MINUTES", "99999")]));
        assert_eq!(config.calendar_zone, CalendarZone::Local);
    }
}
