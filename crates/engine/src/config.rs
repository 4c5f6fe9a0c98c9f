//! Engine configuration, read once at startup.

use std::path::PathBuf;
use std::str::FromStr;

use crate::types::{ConfigError, DEFAULT_FPS, DEFAULT_PHYSICS_PER_FRAME};

const DEFAULT_LOG_FILE: &str = "logs/game.log";
const DEFAULT_LOG_LEVEL: &str = "info";

/// How the scheduler waits between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PacingMode {
    /// Sleep a fixed `1 / fps` after every frame. Work time is not
    /// subtracted, so the real frame rate drifts below the target under load.
    #[default]
    FixedDelay,
    /// Sleep until the next frame deadline, subtracting the time the frame
    /// took.
    Deadline,
}

impl FromStr for PacingMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" | "fixed-delay" => Ok(PacingMode::FixedDelay),
            "deadline" => Ok(PacingMode::Deadline),
            other => Err(ConfigError::InvalidConfig(format!(
                "unknown pacing mode {other:?} (expected \"fixed\" or \"deadline\")"
            ))),
        }
    }
}

/// Runtime settings, immutable for the run.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub fps: u32,
    /// Run updates and physics without drawing anything.
    pub headless: bool,
    /// Physics sub-steps per rendered frame.
    pub physics_per_frame: u32,
    /// Show a prompt and block on a key press before starting.
    pub wait_for_start: bool,
    pub pacing: PacingMode,
    /// `env_logger` filter string, e.g. `info` or `termgame_core=debug`.
    pub log_level: String,
    /// Log file. `None` logs to stderr.
    pub log_file: Option<PathBuf>,
    /// Recommended terminal font size, shown in the start prompt.
    pub font_size: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            headless: false,
            physics_per_frame: DEFAULT_PHYSICS_PER_FRAME,
            wait_for_start: false,
            pacing: PacingMode::FixedDelay,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            font_size: None,
        }
    }
}

impl EngineConfig {
    /// Create from `TERMGAME_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup. Missing or unparseable values fall back to
    /// the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let fps = lookup("TERMGAME_FPS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.fps);

        let physics_per_frame = lookup("TERMGAME_PHYSICS_PER_FRAME")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.physics_per_frame);

        let headless = lookup("TERMGAME_HEADLESS")
            .map(|v| parse_flag(&v))
            .unwrap_or(defaults.headless);

        let wait_for_start = lookup("TERMGAME_WAIT_FOR_START")
            .map(|v| parse_flag(&v))
            .unwrap_or(defaults.wait_for_start);

        let pacing = lookup("TERMGAME_PACING")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.pacing);

        let log_level = lookup("TERMGAME_LOG_LEVEL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.log_level);

        let log_file = match lookup("TERMGAME_LOG_FILE") {
            Some(s) if s.trim().is_empty() => None,
            Some(s) => Some(PathBuf::from(s.trim())),
            None => defaults.log_file,
        };

        let font_size = lookup("TERMGAME_FONT_SIZE").and_then(|s| s.trim().parse().ok());

        Self {
            fps,
            headless,
            physics_per_frame,
            wait_for_start,
            pacing,
            log_level,
            log_file,
            font_size,
        }
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_physics_per_frame(mut self, steps: u32) -> Self {
        self.physics_per_frame = steps;
        self
    }

    pub fn with_wait_for_start(mut self, wait: bool) -> Self {
        self.wait_for_start = wait;
        self
    }

    pub fn with_pacing(mut self, pacing: PacingMode) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::InvalidConfig("fps must be at least 1".to_string()));
        }
        if self.physics_per_frame == 0 {
            return Err(ConfigError::InvalidConfig(
                "physics_per_frame must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Length of one physics sub-step in seconds: `1 / (fps * physics_per_frame)`.
    pub fn physics_dt(&self) -> f64 {
        1.0 / (self.fps as f64 * self.physics_per_frame as f64)
    }
}

fn parse_flag(v: &str) -> bool {
    matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = EngineConfig::from_lookup(|_| None);
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.fps, 10);
        assert_eq!(config.physics_per_frame, 5);
        assert_eq!(config.log_file, Some(PathBuf::from("logs/game.log")));
    }

    #[test]
    fn test_values_are_parsed() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            ("TERMGAME_FPS", "30"),
            ("TERMGAME_HEADLESS", "true"),
            ("TERMGAME_PHYSICS_PER_FRAME", "2"),
            ("TERMGAME_WAIT_FOR_START", "1"),
            ("TERMGAME_PACING", "Deadline"),
            ("TERMGAME_LOG_LEVEL", "debug"),
            ("TERMGAME_LOG_FILE", ""),
            ("TERMGAME_FONT_SIZE", "6"),
        ]));
        assert_eq!(config.fps, 30);
        assert!(config.headless);
        assert_eq!(config.physics_per_frame, 2);
        assert!(config.wait_for_start);
        assert_eq!(config.pacing, PacingMode::Deadline);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_file, None);
        assert_eq!(config.font_size, Some(6));
    }

    #[test]
    fn test_garbage_falls_back_to_defaults() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            ("TERMGAME_FPS", "fast"),
            ("TERMGAME_PACING", "sometimes"),
            ("TERMGAME_HEADLESS", "nope"),
        ]));
        assert_eq!(config.fps, DEFAULT_FPS);
        assert_eq!(config.pacing, PacingMode::FixedDelay);
        assert!(!config.headless);
    }

    #[test]
    fn test_validate_rejects_zero_rates() {
        assert!(EngineConfig::default().validate().is_ok());
        assert!(matches!(
            EngineConfig::default().with_fps(0).validate(),
            Err(ConfigError::InvalidConfig(_))
        ));
        assert!(EngineConfig::default()
            .with_physics_per_frame(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_physics_dt() {
        let config = EngineConfig::default().with_fps(10).with_physics_per_frame(5);
        assert!((config.physics_dt() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _config = EngineConfig::from_env();
    }
}
