use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Minimum time the overlay stays visible, so fast loads never flash it
pub const DEFAULT_MIN_DURATION_MS: u64 = 600;
/// Safety net when the load event never fires (or fires very late)
pub const DEFAULT_MAX_WAIT_MS: u64 = 2500;
/// Must match the overlay fade-out transition of the stylesheet
pub const DEFAULT_FADE_OUT_MS: u64 = 600;

pub const ENV_MIN_DURATION_MS: &str = "PAGE_LOADER_MIN_DURATION_MS";
pub const ENV_MAX_WAIT_MS: &str = "PAGE_LOADER_MAX_WAIT_MS";
pub const ENV_FADE_OUT_MS: &str = "PAGE_LOADER_FADE_OUT_MS";

/// Timings of the loader overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub min_duration_ms: u64,
    pub max_wait_ms: u64,
    pub fade_out_ms: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            min_duration_ms: DEFAULT_MIN_DURATION_MS,
            max_wait_ms: DEFAULT_MAX_WAIT_MS,
            fade_out_ms: DEFAULT_FADE_OUT_MS,
        }
    }
}

impl LoaderConfig {
    /// Builds the configuration from the process environment.
    ///
    /// Unset variables keep their default value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`LoaderConfig::from_env`] with an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            min_duration_ms: read_ms(&lookup, ENV_MIN_DURATION_MS, defaults.min_duration_ms)?,
            max_wait_ms: read_ms(&lookup, ENV_MAX_WAIT_MS, defaults.max_wait_ms)?,
            fade_out_ms: read_ms(&lookup, ENV_FADE_OUT_MS, defaults.fade_out_ms)?,
        })
    }

    pub fn min_duration(&self) -> Duration {
        Duration::from_millis(self.min_duration_ms)
    }
    pub fn max_wait(&self) -> Duration {
        Duration::from_millis(self.max_wait_ms)
    }
    pub fn fade_out(&self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }
}

fn read_ms<F>(lookup: &F, var: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from<'a>(
        pairs: &'a [(&'static str, &'static str)],
    ) -> impl Fn(&'static str) -> Option<String> + 'a {
        move |var| {
            pairs
                .iter()
                .find(|(k, _)| *k == var)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults_match_page_timings() {
        let config = LoaderConfig::default();
        assert_eq!(config.min_duration(), Duration::from_millis(600));
        assert_eq!(config.max_wait(), Duration::from_millis(2500));
        assert_eq!(config.fade_out(), Duration::from_millis(600));
    }

    #[test]
    fn unset_variables_keep_defaults() {
        let config = LoaderConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, LoaderConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = LoaderConfig::from_lookup(lookup_from(&[
            (ENV_MIN_DURATION_MS, "300"),
            (ENV_FADE_OUT_MS, " 250 "),
        ]))
        .unwrap();
        assert_eq!(config.min_duration_ms, 300);
        assert_eq!(config.max_wait_ms, DEFAULT_MAX_WAIT_MS);
        assert_eq!(config.fade_out_ms, 250);
    }

    #[test]
    fn garbage_is_reported_with_its_variable() {
        let err = LoaderConfig::from_lookup(lookup_from(&[(ENV_MAX_WAIT_MS, "soon")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                var: ENV_MAX_WAIT_MS,
                value: "soon".to_owned()
            }
        );
    }
}
