//! Runtime configuration, read from `TETRIS_*` environment variables.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::Level;

pub const DEFAULT_HIGH_SCORE_PATH: &str = "highscore.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Where the high score is persisted (`TETRIS_HIGHSCORE_PATH`).
    pub high_score_path: PathBuf,
    /// Fixed piece-sampling seed (`TETRIS_SEED`); clock-derived when unset.
    pub seed: Option<u32>,
    /// Log file (`TETRIS_LOG_PATH`). No logging when unset.
    pub log_path: Option<PathBuf>,
    /// Maximum log level (`TETRIS_LOG_LEVEL`).
    pub log_level: Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            high_score_path: PathBuf::from(DEFAULT_HIGH_SCORE_PATH),
            seed: None,
            log_path: None,
            log_level: Level::INFO,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unparseable values fall back
    /// to the defaults; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let defaults = Self::default();

        Self {
            high_score_path: var("TETRIS_HIGHSCORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.high_score_path),
            seed: var("TETRIS_SEED").and_then(|s| s.parse().ok()),
            log_path: var("TETRIS_LOG_PATH").map(PathBuf::from),
            log_level: var("TETRIS_LOG_LEVEL")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.log_level),
        }
    }

    /// The configured seed, or one taken from the wall clock.
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(AppConfig::from_lookup(|_| None), AppConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let vars = [
            ("TETRIS_HIGHSCORE_PATH", "/tmp/hs.json"),
            ("TETRIS_SEED", "42"),
            ("TETRIS_LOG_PATH", " game.log "),
            ("TETRIS_LOG_LEVEL", "debug"),
        ];
        let config = AppConfig::from_lookup(lookup(&vars));
        assert_eq!(config.high_score_path, PathBuf::from("/tmp/hs.json"));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.seed_or_clock(), 42);
        assert_eq!(config.log_path, Some(PathBuf::from("game.log")));
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn bad_values_fall_back() {
        let vars = [
            ("TETRIS_SEED", "lots"),
            ("TETRIS_LOG_LEVEL", "loud"),
            ("TETRIS_LOG_PATH", "   "),
        ];
        let config = AppConfig::from_lookup(lookup(&vars));
        assert_eq!(config.seed, None);
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.log_path, None);
    }
}
