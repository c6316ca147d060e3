use crate::error::{Result, ShapeError};
use crate::report::ReportTier;
use serde::{Deserialize, Serialize};

/// Main configuration structure loaded from shape_analyzer.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub report: ReportConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// Gates applied to a transcript before it reaches the engine
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    /// Hard limit on transcript length, in characters
    pub char_limit: usize,
    /// Length above which a warning is logged
    pub warn_limit: usize,
    /// File extensions accepted by the file reader, without the dot
    pub allowed_extensions: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            char_limit: 50_000,
            warn_limit: 40_000,
            allowed_extensions: vec!["txt".to_string(), "md".to_string()],
        }
    }
}

/// Report rendering defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    pub tier: ReportTier,
    pub pretty: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            tier: ReportTier::Full,
            pretty: true,
        }
    }
}

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: "shape_analyzer=info".to_string(),
        }
    }
}

impl RuntimeConfig {
    pub fn load_from_env() -> Self {
        let mut config = Self::default();
        if let Ok(level) = std::env::var("SHAPE_LOG_LEVEL")
            && !level.trim().is_empty()
        {
            config.log_level = level;
        }
        config
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables
    /// Uses SHAPE_ANALYZER_CONFIG environment variable or defaults to "shape_analyzer.toml"
    pub fn load() -> Result<Self> {
        // SHAPE_ENV_FILE if set, otherwise ./.env; a missing file is fine
        if let Ok(env_path) = std::env::var("SHAPE_ENV_FILE") {
            let _ = dotenvy::from_path(env_path);
        } else {
            let _ = dotenvy::from_path(".env");
        }

        let config_path = std::env::var("SHAPE_ANALYZER_CONFIG")
            .unwrap_or_else(|_| "shape_analyzer.toml".to_string());

        let mut config = if let Ok(content) = std::fs::read_to_string(&config_path) {
            Self::from_toml_str(&content)?
        } else {
            tracing::warn!("Config file {} not found, using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides()?;
        config.runtime = RuntimeConfig::load_from_env();
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document without consulting the environment.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(limit) = std::env::var("SHAPE_CHAR_LIMIT") {
            self.input.char_limit = parse_env("SHAPE_CHAR_LIMIT", &limit)?;
            tracing::debug!("SHAPE_CHAR_LIMIT env override applied");
        }
        if let Ok(limit) = std::env::var("SHAPE_WARN_LIMIT") {
            self.input.warn_limit = parse_env("SHAPE_WARN_LIMIT", &limit)?;
            tracing::debug!("SHAPE_WARN_LIMIT env override applied");
        }
        if let Ok(tier) = std::env::var("SHAPE_REPORT_TIER") {
            self.report.tier = tier.parse()?;
            tracing::debug!("SHAPE_REPORT_TIER env override applied");
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.char_limit == 0 {
            return Err(config_error("input.char_limit must be greater than 0"));
        }
        if self.input.warn_limit > self.input.char_limit {
            return Err(config_error(
                "input.warn_limit must not exceed input.char_limit",
            ));
        }
        if self
            .input
            .allowed_extensions
            .iter()
            .all(|e| e.trim().is_empty())
        {
            return Err(config_error(
                "input.allowed_extensions must list at least one extension",
            ));
        }
        Ok(())
    }
}

fn parse_env(name: &str, value: &str) -> Result<usize> {
    value.trim().parse::<usize>().map_err(|e| ShapeError::Config {
        message: format!("{name}={value:?} is not a valid count: {e}"),
    })
}

fn config_error(message: &str) -> ShapeError {
    ShapeError::Config {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.input.char_limit, 50_000);
        assert_eq!(config.input.warn_limit, 40_000);
        assert_eq!(config.input.allowed_extensions, vec!["txt", "md"]);
        assert_eq!(config.report.tier, ReportTier::Full);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str("[report]\ntier = \"light\"\n").unwrap();
        assert_eq!(config.report.tier, ReportTier::Light);
        assert!(config.report.pretty);
        assert_eq!(config.input.char_limit, 50_000);
    }

    #[test]
    fn test_warn_above_limit_rejected() {
        let err = Config::from_toml_str("[input]\nchar_limit = 100\nwarn_limit = 200\n").unwrap_err();
        assert!(matches!(err, ShapeError::Config { .. }));
    }

    #[test]
    fn test_empty_extensions_rejected() {
        assert!(Config::from_toml_str("[input]\nallowed_extensions = []\n").is_err());
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = Config::from_toml_str("[input\n").unwrap_err();
        assert!(matches!(err, ShapeError::Config { .. }));
    }

    #[test]
    fn test_parse_env_count() {
        assert_eq!(parse_env("X", " 42 ").unwrap(), 42);
        assert!(parse_env("X", "lots").is_err());
    }
}
