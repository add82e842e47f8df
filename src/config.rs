use std::{env, fmt::Display, str::FromStr, time::Duration};

use tracing::{info, warn};

use crate::searching::debounce::DEFAULT_SETTLE_PERIOD;

/// Where the user collection is fetched from when nothing else is configured.
pub const DEFAULT_SOURCE: &str = "https://jsonplaceholder.typicode.com/users";

pub const SOURCE_VAR: &str = "USERSEARCH_SOURCE";
pub const SETTLE_MS_VAR: &str = "USERSEARCH_SETTLE_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// URL, `s3://`, `memory://` or local path of the user collection JSON.
    pub source: String,
    /// Quiet period before a typed term is searched.
    pub settle_period: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            settle_period: DEFAULT_SETTLE_PERIOD,
        }
    }
}

impl SearchConfig {
    /// Reads configuration from the environment, falling back to defaults.
    ///
    /// Unlike secrets, nothing here is mandatory: a missing or malformed variable is
    /// logged and replaced by its default.
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default_settle_ms = DEFAULT_SETTLE_PERIOD.as_millis() as u64;

        Self {
            source: try_load(&lookup, SOURCE_VAR, DEFAULT_SOURCE.to_string()),
            settle_period: Duration::from_millis(try_load(&lookup, SETTLE_MS_VAR, default_settle_ms)),
        }
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default}");
        return default;
    };

    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value '{raw}': {e}, using default: {default}");
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> SearchConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SearchConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(config_from(&[]), SearchConfig::default());
        assert_eq!(SearchConfig::default().settle_period, Duration::from_millis(300));
    }

    #[test]
    fn test_reads_values() {
        let config = config_from(&[(SOURCE_VAR, "memory://users.json"), (SETTLE_MS_VAR, "50")]);
        assert_eq!(config.source, "memory://users.json");
        assert_eq!(config.settle_period, Duration::from_millis(50));
    }

    #[test]
    fn test_invalid_settle_falls_back() {
        let config = config_from(&[(SETTLE_MS_VAR, "soon")]);
        assert_eq!(config.settle_period, DEFAULT_SETTLE_PERIOD);
    }
}
