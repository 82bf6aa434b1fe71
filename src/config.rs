//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.
//! Defaults carry the simulation's timing constants.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub economic: EconomicTiming,

    #[serde(default)]
    pub feasibility: FeasibilityTiming,

    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Timing knobs for the economic store
#[derive(Debug, Clone, Deserialize)]
pub struct EconomicTiming {
    /// Simulated fetch latency, uniform in [min, max) ms
    #[serde(default = "default_fetch_delay_min")]
    pub fetch_delay_min_ms: u64,

    #[serde(default = "default_fetch_delay_max")]
    pub fetch_delay_max_ms: u64,

    /// Background feed period, uniform in [min, max) ms
    #[serde(default = "default_economic_tick_min")]
    pub tick_min_ms: u64,

    #[serde(default = "default_economic_tick_max")]
    pub tick_max_ms: u64,

    /// Fallback poll period while the connection is down, fixed
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Delay before the single reconnect attempt, fixed
    #[serde(default = "default_reconnect_delay")]
    pub reconnect_delay_ms: u64,

    /// Probability a simulated fetch fails, in [0, 1]
    #[serde(default)]
    pub failure_rate: f64,
}

fn default_fetch_delay_min() -> u64 {
    1000
}

fn default_fetch_delay_max() -> u64 {
    2000
}

fn default_economic_tick_min() -> u64 {
    5000
}

fn default_economic_tick_max() -> u64 {
    15000
}

fn default_poll_interval() -> u64 {
    30_000
}

fn default_reconnect_delay() -> u64 {
    5000
}

impl Default for EconomicTiming {
    fn default() -> Self {
        Self {
            fetch_delay_min_ms: default_fetch_delay_min(),
            fetch_delay_max_ms: default_fetch_delay_max(),
            tick_min_ms: default_economic_tick_min(),
            tick_max_ms: default_economic_tick_max(),
            poll_interval_ms: default_poll_interval(),
            reconnect_delay_ms: default_reconnect_delay(),
            failure_rate: 0.0,
        }
    }
}

/// Timing knobs for the feasibility store
#[derive(Debug, Clone, Deserialize)]
pub struct FeasibilityTiming {
    /// Simulated fetch latency, uniform in [min, max) ms
    #[serde(default = "default_fetch_delay_min")]
    pub fetch_delay_min_ms: u64,

    #[serde(default = "default_fetch_delay_max")]
    pub fetch_delay_max_ms: u64,

    /// Background feed period, uniform in [min, max) ms
    #[serde(default = "default_feasibility_tick_min")]
    pub tick_min_ms: u64,

    #[serde(default = "default_feasibility_tick_max")]
    pub tick_max_ms: u64,

    /// On-demand analysis compute delay, uniform in [min, max) ms
    #[serde(default = "default_analysis_delay_min")]
    pub analysis_delay_min_ms: u64,

    #[serde(default = "default_analysis_delay_max")]
    pub analysis_delay_max_ms: u64,

    /// Delay before the single reconnect attempt, fixed
    #[serde(default = "default_reconnect_delay")]
    pub reconnect_delay_ms: u64,

    /// Probability a simulated fetch fails, in [0, 1]
    #[serde(default)]
    pub failure_rate: f64,
}

fn default_feasibility_tick_min() -> u64 {
    12_000
}

fn default_feasibility_tick_max() -> u64 {
    25_000
}

fn default_analysis_delay_min() -> u64 {
    3000
}

fn default_analysis_delay_max() -> u64 {
    5000
}

impl Default for FeasibilityTiming {
    fn default() -> Self {
        Self {
            fetch_delay_min_ms: default_fetch_delay_min(),
            fetch_delay_max_ms: default_fetch_delay_max(),
            tick_min_ms: default_feasibility_tick_min(),
            tick_max_ms: default_feasibility_tick_max(),
            analysis_delay_min_ms: default_analysis_delay_min(),
            analysis_delay_max_ms: default_analysis_delay_max(),
            reconnect_delay_ms: default_reconnect_delay(),
            failure_rate: 0.0,
        }
    }
}

/// Simulation-wide settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimulationConfig {
    /// Seed for the random source; omit for OS entropy
    pub seed: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("pulseboard").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(seed) = std::env::var("PULSEBOARD_SEED") {
            if let Ok(s) = seed.parse() {
                self.simulation.seed = Some(s);
            }
        }

        if let Ok(level) = std::env::var("PULSEBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("PULSEBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            economic: EconomicTiming::default(),
            feasibility: FeasibilityTiming::default(),
            simulation: SimulationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Pulseboard Configuration
#
# Environment variables override these settings:
# - PULSEBOARD_SEED
# - PULSEBOARD_LOG_LEVEL
# - PULSEBOARD_LOG_FORMAT

[economic]
# Simulated fetch latency, uniform in [min, max) ms
fetch_delay_min_ms = 1000
fetch_delay_max_ms = 2000

# Background feed period, uniform in [min, max) ms
tick_min_ms = 5000
tick_max_ms = 15000

# Fallback poll period while the connection is down (ms)
poll_interval_ms = 30000

# Delay before the single reconnect attempt (ms)
reconnect_delay_ms = 5000

# Probability a simulated fetch fails (0.0 - 1.0)
failure_rate = 0.0

[feasibility]
fetch_delay_min_ms = 1000
fetch_delay_max_ms = 2000

tick_min_ms = 12000
tick_max_ms = 25000

# On-demand analysis compute delay, uniform in [min, max) ms
analysis_delay_min_ms = 3000
analysis_delay_max_ms = 5000

reconnect_delay_ms = 5000
failure_rate = 0.0

[simulation]
# Seed for reproducible runs; comment out for OS entropy
# seed = 42

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_carry_simulation_timings() {
        let config = Config::default();
        assert_eq!(config.economic.fetch_delay_min_ms, 1000);
        assert_eq!(config.economic.fetch_delay_max_ms, 2000);
        assert_eq!(config.economic.tick_min_ms, 5000);
        assert_eq!(config.economic.tick_max_ms, 15000);
        assert_eq!(config.economic.poll_interval_ms, 30_000);
        assert_eq!(config.economic.reconnect_delay_ms, 5000);

        assert_eq!(config.feasibility.tick_min_ms, 12_000);
        assert_eq!(config.feasibility.tick_max_ms, 25_000);
        assert_eq!(config.feasibility.analysis_delay_min_ms, 3000);
        assert_eq!(config.feasibility.analysis_delay_max_ms, 5000);

        assert_eq!(config.economic.failure_rate, 0.0);
    }

    #[test]
    fn test_generated_default_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.economic.tick_min_ms, 5000);
        assert_eq!(config.logging.level, "info");
        assert!(config.simulation.seed.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[economic]\ntick_min_ms = 100\n\n[simulation]\nseed = 7\n"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.economic.tick_min_ms, 100);
        // Unspecified fields fall back to defaults
        assert_eq!(config.economic.tick_max_ms, 15000);
        assert_eq!(config.simulation.seed, Some(7));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not valid toml [[[").unwrap();

        let result = Config::load(file.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
