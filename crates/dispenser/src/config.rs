//! Runtime configuration, read from the environment.

use std::time::Duration;

use thiserror::Error;

use crate::machine::DispensePolicy;

pub const DISPENSE_DELAY_VAR: &str = "BARISTAMATIC_DISPENSE_DELAY_MS";
pub const STRICT_DISPENSE_VAR: &str = "BARISTAMATIC_STRICT_DISPENSE";

/// How long the dispensing status stays up after a dispense.
pub const DEFAULT_DISPENSE_DELAY: Duration = Duration::from_millis(3000);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a whole number of milliseconds, got {value:?}")]
    InvalidDelay { var: &'static str, value: String },

    #[error("{var} must be true or false, got {value:?}")]
    InvalidFlag { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispenserConfig {
    pub dispense_delay: Duration,
    pub policy: DispensePolicy,
}

impl Default for DispenserConfig {
    fn default() -> Self {
        Self {
            dispense_delay: DEFAULT_DISPENSE_DELAY,
            policy: DispensePolicy::Permissive,
        }
    }
}

impl DispenserConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from any variable lookup (unset = `None`).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(DISPENSE_DELAY_VAR) {
            let millis = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidDelay {
                var: DISPENSE_DELAY_VAR,
                value: raw.clone(),
            })?;
            config.dispense_delay = Duration::from_millis(millis);
        }

        if let Some(raw) = lookup(STRICT_DISPENSE_VAR) {
            let strict = parse_flag(&raw).ok_or_else(|| ConfigError::InvalidFlag {
                var: STRICT_DISPENSE_VAR,
                value: raw.clone(),
            })?;
            if strict {
                config.policy = DispensePolicy::Strict;
            }
        }

        Ok(config)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = DispenserConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, DispenserConfig::default());
        assert_eq!(config.dispense_delay, Duration::from_millis(3000));
        assert_eq!(config.policy, DispensePolicy::Permissive);
    }

    #[test]
    fn reads_delay_and_strict_flag() {
        let config = DispenserConfig::from_lookup(lookup(&[
            (DISPENSE_DELAY_VAR, " 250 "),
            (STRICT_DISPENSE_VAR, "TRUE"),
        ]))
        .unwrap();
        assert_eq!(config.dispense_delay, Duration::from_millis(250));
        assert_eq!(config.policy, DispensePolicy::Strict);
    }

    #[test]
    fn rejects_bad_values() {
        let err = DispenserConfig::from_lookup(lookup(&[(DISPENSE_DELAY_VAR, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDelay { .. }));

        let err = DispenserConfig::from_lookup(lookup(&[(STRICT_DISPENSE_VAR, "maybe")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "BARISTAMATIC_STRICT_DISPENSE must be true or false, got \"maybe\""
        );
    }
}
