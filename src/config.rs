//! Application configuration from environment variables and CLI arguments.
//!
//! # Environment Variables
//!
//! - `PAIRS_SAVE_PATH`: save file (default: `$XDG_STATE_HOME/tui-pairs/save.json`)
//! - `PAIRS_LOG_PATH`: write logs to this file (logging is off when unset)
//! - `PAIRS_SEED`: deal seed (default: derived from the clock)
//! - `PAIRS_PREVIEW_MS`, `PAIRS_MISMATCH_MS`, `PAIRS_REMOVE_MS`, `PAIRS_WIN_MS`:
//!   timed transition overrides
//!
//! Unparsable values fall back to their defaults.
//!
//! # Arguments
//!
//! ```text
//! tui-pairs [new|load|auto] [--seed N] [--save PATH]
//! ```

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};

use crate::core::{GameConfig, Timings};
use crate::store::FileStore;
use crate::types::BootMode;

pub const APP_NAME: &str = "tui-pairs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub save_path: PathBuf,
    pub log_path: Option<PathBuf>,
    pub seed: u32,
    pub game: GameConfig,
}

impl AppConfig {
    /// Build from environment variables.
    pub fn from_env() -> Self {
        use std::env;

        let save_path = non_empty_var("PAIRS_SAVE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| FileStore::default_for_app(APP_NAME).path().to_path_buf());
        let log_path = non_empty_var("PAIRS_LOG_PATH").map(PathBuf::from);
        let seed = env::var("PAIRS_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);

        let defaults = Timings::default();
        let timings = Timings {
            preview_ms: ms_var("PAIRS_PREVIEW_MS", defaults.preview_ms),
            mismatch_flip_back_ms: ms_var("PAIRS_MISMATCH_MS", defaults.mismatch_flip_back_ms),
            match_remove_ms: ms_var("PAIRS_REMOVE_MS", defaults.match_remove_ms),
            win_advance_ms: ms_var("PAIRS_WIN_MS", defaults.win_advance_ms),
        };

        Self {
            save_path,
            log_path,
            seed,
            game: GameConfig {
                timings,
                ..GameConfig::default()
            },
        }
    }

    /// Apply CLI overrides on top of the environment.
    pub fn with_args(mut self, args: &BootArgs) -> Self {
        if let Some(seed) = args.seed {
            self.seed = seed;
        }
        if let Some(path) = &args.save_path {
            self.save_path = path.clone();
        }
        self
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn ms_var(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BootArgs {
    pub mode: BootMode,
    pub seed: Option<u32>,
    pub save_path: Option<PathBuf>,
}

/// Parse arguments (without the program name).
pub fn parse_boot_args(args: &[String]) -> Result<BootArgs> {
    let mut out = BootArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                out.seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            "--save" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --save"))?;
                out.save_path = Some(PathBuf::from(v));
            }
            other => {
                out.mode = BootMode::from_str(other)
                    .ok_or_else(|| anyhow!("unknown argument: {}", other))?;
            }
        }
        i += 1;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_args() {
        let parsed = parse_boot_args(&[]).unwrap();
        assert_eq!(parsed, BootArgs::default());
        assert_eq!(parsed.mode, BootMode::AutoLoad);
    }

    #[test]
    fn test_mode_and_flags() {
        let parsed = parse_boot_args(&args(&["load", "--seed", "42", "--save", "/tmp/s.json"]))
            .unwrap();
        assert_eq!(parsed.mode, BootMode::LoadGame);
        assert_eq!(parsed.seed, Some(42));
        assert_eq!(parsed.save_path, Some(PathBuf::from("/tmp/s.json")));
    }

    #[test]
    fn test_bad_args() {
        assert!(parse_boot_args(&args(&["--seed"])).is_err());
        assert!(parse_boot_args(&args(&["--seed", "abc"])).is_err());
        assert!(parse_boot_args(&args(&["resume"])).is_err());
    }

    #[test]
    fn test_args_override_config() {
        let config = AppConfig {
            save_path: PathBuf::from("a.json"),
            log_path: None,
            seed: 1,
            game: GameConfig::default(),
        };
        let parsed = parse_boot_args(&args(&["--seed", "9", "--save", "b.json"])).unwrap();
        let config = config.with_args(&parsed);
        assert_eq!(config.seed, 9);
        assert_eq!(config.save_path, PathBuf::from("b.json"));
    }
}
