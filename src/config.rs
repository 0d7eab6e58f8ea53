//! Editor configuration with defaults and environment overrides.

use crate::consts::{
    DEFAULT_GRID_SIZE, HISTORY_LIMIT, IMAGE_MAX_DIMENSION, MIN_RESIZE_SIZE, NUDGE_STEP, NUDGE_STEP_FAST,
};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Tunable editor settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    /// Maximum retained undo snapshots.
    pub history_limit: usize,
    /// Resize floor applied while dragging a handle.
    pub min_size: f64,
    /// Initial grid spacing.
    pub grid_size: f64,
    /// Arrow-key nudge distance.
    pub nudge_step: f64,
    /// Arrow-key nudge distance with shift held.
    pub nudge_step_fast: f64,
    /// Largest width or height of an inserted image.
    pub image_max_dimension: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: HISTORY_LIMIT,
            min_size: MIN_RESIZE_SIZE,
            grid_size: DEFAULT_GRID_SIZE,
            nudge_step: NUDGE_STEP,
            nudge_step_fast: NUDGE_STEP_FAST,
            image_max_dimension: IMAGE_MAX_DIMENSION,
        }
    }
}

impl EditorConfig {
    /// Build config from environment variables. Every variable is optional.
    ///
    /// - `CARDSMITH_HISTORY_LIMIT`: default 50, at least 1
    /// - `CARDSMITH_MIN_SIZE`: default 20, non-negative
    /// - `CARDSMITH_GRID_SIZE`: default 20, positive
    /// - `CARDSMITH_NUDGE_STEP`: default 1, positive
    /// - `CARDSMITH_NUDGE_STEP_FAST`: default 10, positive
    /// - `CARDSMITH_IMAGE_MAX`: default 300, positive
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for the first value that does not parse or is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(_) => None,
        })
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`EditorConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            history_limit: parse_limit(&lookup, "CARDSMITH_HISTORY_LIMIT", defaults.history_limit)?,
            min_size: parse_dimension(&lookup, "CARDSMITH_MIN_SIZE", defaults.min_size, true)?,
            grid_size: parse_dimension(&lookup, "CARDSMITH_GRID_SIZE", defaults.grid_size, false)?,
            nudge_step: parse_dimension(&lookup, "CARDSMITH_NUDGE_STEP", defaults.nudge_step, false)?,
            nudge_step_fast: parse_dimension(&lookup, "CARDSMITH_NUDGE_STEP_FAST", defaults.nudge_step_fast, false)?,
            image_max_dimension: parse_dimension(&lookup, "CARDSMITH_IMAGE_MAX", defaults.image_max_dimension, false)?,
        })
    }
}

fn parse_limit<F>(lookup: &F, key: &'static str, default: usize) -> Result<usize, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().parse::<usize>() {
        Ok(v) if v >= 1 => Ok(v),
        _ => Err(ConfigError::Invalid { key, value: raw }),
    }
}

fn parse_dimension<F>(lookup: &F, key: &'static str, default: f64, allow_zero: bool) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && (v > 0.0 || (allow_zero && v == 0.0)) => Ok(v),
        _ => Err(ConfigError::Invalid { key, value: raw }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
