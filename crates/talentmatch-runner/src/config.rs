use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use talentmatch_engine::MatchingConfig;

/// Default config template created when no config exists
const DEFAULT_CONFIG: &str = r#"
[database]
path = "talentmatch.db"  # Set via TALENTMATCH_DB env var

[logging]
level = "info"  # trace, debug, info, warn, error
json = false

[matching]
max_levels = 4  # hops walked up the taxonomy per skill
threads = 0     # 0 = one worker per core

[import]
# taxonomy_path = "skills.yaml"
# jobs_path = "jobs.json"
# users_path = "users.json"
"#;

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct MatchingSettings {
    pub max_levels: usize,
    #[serde(default)]
    pub threads: usize,
}

impl From<MatchingSettings> for MatchingConfig {
    fn from(settings: MatchingSettings) -> Self {
        Self {
            max_levels: settings.max_levels,
            threads: settings.threads,
        }
    }
}

/// Files imported into the store before matching
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ImportConfig {
    #[serde(default)]
    pub taxonomy_path: Option<PathBuf>,
    #[serde(default)]
    pub jobs_path: Option<PathBuf>,
    #[serde(default)]
    pub users_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub matching: MatchingSettings,
    #[serde(default)]
    pub import: ImportConfig,
}

impl Config {
    /// Get the global config path: ~/.talentmatch/talentmatch.toml
    fn global_config_path() -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".talentmatch").join("talentmatch.toml"))
    }

    /// Ensure global config directory and file exist, creating defaults if needed
    fn ensure_global_config() -> anyhow::Result<PathBuf> {
        let config_path = Self::global_config_path()?;

        if let Some(config_dir) = config_path.parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir)?;
                eprintln!("Created config directory: {}", config_dir.display());
            }
        }

        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG.trim())?;
            eprintln!("Created default config: {}", config_path.display());
        }

        Ok(config_path)
    }

    /// Load configuration with layered approach:
    /// 1. Built-in defaults
    /// 2. Global config: ~/.talentmatch/talentmatch.toml (auto-created if missing)
    /// 3. Local override: ./talentmatch.toml (workspace, optional)
    /// 4. Environment variables (highest priority)
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file from current directory
        dotenvy::dotenv().ok();

        let global_config_path = Self::ensure_global_config()?;
        Self::load_from(&global_config_path, "talentmatch")
    }

    /// Load from an explicit global file and local config name
    pub fn load_from(global_config_path: &Path, local_name: &str) -> anyhow::Result<Self> {
        let mut config_builder = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .add_source(config::File::from(global_config_path).required(false))
            .add_source(config::File::with_name(local_name).required(false))
            .add_source(
                config::Environment::with_prefix("TALENTMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        if let Ok(path) = env::var("TALENTMATCH_DB") {
            config_builder = config_builder.set_override("database.path", path)?;
        }

        let config = config_builder
            .build()
            .with_context(|| format!("Failed to load config from {}", global_config_path.display()))?;

        let config: Self = config.try_deserialize()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "talentmatch.db");
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert_eq!(config.matching.max_levels, 4);
        assert_eq!(config.matching.threads, 0);
        assert!(config.import.jobs_path.is_none());
    }

    #[test]
    fn test_global_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("talentmatch.toml");
        fs::write(
            &global,
            r#"
[matching]
max_levels = 2
threads = 3

[import]
jobs_path = "data/jobs.json"
"#,
        )
        .unwrap();

        let local = dir.path().join("absent");
        let config = Config::load_from(&global, local.to_str().unwrap()).unwrap();
        assert_eq!(config.matching.max_levels, 2);
        assert_eq!(config.matching.threads, 3);
        assert_eq!(config.logging.level, "info");
        assert_eq!(
            config.import.jobs_path.as_deref(),
            Some(Path::new("data/jobs.json"))
        );

        let engine: MatchingConfig = config.matching.into();
        assert_eq!(engine.max_levels, 2);
        assert_eq!(engine.threads, 3);
    }
}
