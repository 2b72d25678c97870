//! Runtime configuration.
//!
//! Precedence (highest first): CLI flags, environment variables, `.env`,
//! built-in defaults.
//!
//! | variable          | default                   |
//! |-------------------|---------------------------|
//! | `GHG_MODEL_PATH`  | `artifacts/lr_model.json` |
//! | `GHG_SCALER_PATH` | `artifacts/scaler.json`   |
//! | `GHG_LOG_FILE`    | `ghg.log`                 |

use std::path::PathBuf;

use crate::io::artifacts::ArtifactPaths;

pub const ENV_MODEL_PATH: &str = "GHG_MODEL_PATH";
pub const ENV_SCALER_PATH: &str = "GHG_SCALER_PATH";
pub const ENV_LOG_FILE: &str = "GHG_LOG_FILE";

pub const DEFAULT_LOG_FILE: &str = "ghg.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub artifacts: ArtifactPaths,
    pub log_file: PathBuf,
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub model: Option<PathBuf>,
    pub scaler: Option<PathBuf>,
}

impl AppConfig {
    /// Resolve from `.env`, the process environment and CLI overrides.
    pub fn from_env(overrides: &ConfigOverrides) -> Self {
        dotenvy::dotenv().ok();
        Self::resolve(|key| std::env::var(key).ok(), overrides)
    }

    /// Resolve with an explicit variable lookup.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>, overrides: &ConfigOverrides) -> Self {
        let from_env = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };

        let defaults = ArtifactPaths::default();
        let artifacts = ArtifactPaths {
            model: overrides
                .model
                .clone()
                .or_else(|| from_env(ENV_MODEL_PATH))
                .unwrap_or(defaults.model),
            scaler: overrides
                .scaler
                .clone()
                .or_else(|| from_env(ENV_SCALER_PATH))
                .unwrap_or(defaults.scaler),
        };
        let log_file = from_env(ENV_LOG_FILE).unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        Self {
            artifacts,
            log_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = AppConfig::resolve(|_| None, &ConfigOverrides::default());
        assert_eq!(cfg.artifacts, ArtifactPaths::default());
        assert_eq!(cfg.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn env_beats_defaults_and_flags_beat_env() {
        let env: HashMap<&str, &str> = [
            (ENV_MODEL_PATH, "/srv/env_model.json"),
            (ENV_SCALER_PATH, "/srv/env_scaler.json"),
            (ENV_LOG_FILE, "  "),
        ]
        .into_iter()
        .collect();
        let overrides = ConfigOverrides {
            model: Some(PathBuf::from("cli_model.json")),
            scaler: None,
        };

        let cfg = AppConfig::resolve(|k| env.get(k).map(|v| v.to_string()), &overrides);
        assert_eq!(cfg.artifacts.model, PathBuf::from("cli_model.json"));
        assert_eq!(cfg.artifacts.scaler, PathBuf::from("/srv/env_scaler.json"));
        // Blank values fall back to the default.
        assert_eq!(cfg.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }
}
