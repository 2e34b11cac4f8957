//! Configuration Management
//!
//! Unified configuration for a procscope host:
//! - Logging
//! - Discovery (process mining) parameters
//! - Analysis parameters (strategy, duration policy, thresholds)
//!
//! # Example
//!
//! ```rust,ignore
//! use procscope_core::config::ProcscopeConfig;
//!
//! // Load from environment
//! let config = ProcscopeConfig::from_env()?;
//!
//! // Or load from file
//! let config = ProcscopeConfig::from_file("procscope.toml")?;
//! ```

use crate::error::{ProcessError, Result};
use crate::observability::{LogConfig, LogLevel};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcscopeConfig {
    /// Environment name
    pub environment: String,
    /// Service name used in log output
    pub service_name: String,
    /// Logging configuration
    pub logging: LogConfig,
    /// Discovery configuration
    pub discovery: DiscoveryConfig,
    /// Analysis configuration
    pub analysis: AnalysisConfig,
}

impl Default for ProcscopeConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            service_name: "procscope".to_string(),
            logging: LogConfig::default(),
            discovery: DiscoveryConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

/// Process discovery parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Directly-follows relations observed fewer times than this are dropped
    /// before graph synthesis. `1` keeps every relation.
    pub min_edge_frequency: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            min_edge_frequency: 1,
        }
    }
}

/// Analysis parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Recommendation strategy name (`auto`, `performance`, `cost-reduction`,
    /// `compliance`, `simplicity`)
    pub strategy: String,
    /// Average minutes per task used by the duration estimate
    pub minutes_per_task: u64,
    /// A node with more incoming edges than this is a bottleneck
    pub bottleneck_threshold: usize,
    /// Complexity score above which the model is flagged as a high risk
    pub complexity_alert_threshold: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            strategy: "auto".to_string(),
            minutes_per_task: 30,
            bottleneck_threshold: 2,
            complexity_alert_threshold: 70,
        }
    }
}

impl AnalysisConfig {
    /// Validate analysis parameters.
    pub fn validate(&self) -> Result<()> {
        if self.strategy.trim().is_empty() {
            return Err(ProcessError::config("analysis.strategy must not be empty"));
        }
        if self.minutes_per_task == 0 {
            return Err(ProcessError::config(
                "analysis.minutes_per_task must be greater than zero",
            ));
        }
        if self.complexity_alert_threshold > 100 {
            return Err(ProcessError::config(
                "analysis.complexity_alert_threshold must be within 0..=100",
            ));
        }
        Ok(())
    }
}

impl ProcscopeConfig {
    /// Create development configuration
    pub fn development() -> Self {
        Self {
            logging: LogConfig::development(),
            environment: "development".to_string(),
            ..Default::default()
        }
    }

    /// Create production configuration
    pub fn production() -> Self {
        Self {
            logging: LogConfig::production(),
            environment: "production".to_string(),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// `lookup` receives variable names such as `PROCSCOPE_STRATEGY`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup("PROCSCOPE_ENV").as_deref().unwrap_or("development") {
            "production" | "prod" => Self::production(),
            _ => Self::development(),
        };

        if let Some(name) = lookup("PROCSCOPE_SERVICE_NAME") {
            config.service_name = name;
        }

        if let Some(level) = lookup("PROCSCOPE_LOG_LEVEL") {
            config.logging.level = level
                .parse::<LogLevel>()
                .map_err(ProcessError::ConfigError)?;
        }

        if let Some(strategy) = lookup("PROCSCOPE_STRATEGY") {
            config.analysis.strategy = strategy;
        }

        if let Some(val) = lookup("PROCSCOPE_MIN_EDGE_FREQUENCY") {
            config.discovery.min_edge_frequency = val.parse().map_err(|e| {
                ProcessError::config(format!("PROCSCOPE_MIN_EDGE_FREQUENCY: {}", e))
            })?;
        }

        if let Some(val) = lookup("PROCSCOPE_MINUTES_PER_TASK") {
            config.analysis.minutes_per_task = val.parse().map_err(|e| {
                ProcessError::config(format!("PROCSCOPE_MINUTES_PER_TASK: {}", e))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ProcessError::config(format!("Failed to read config: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ProcessError::config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ProcessError::config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path.as_ref(), content)
            .map_err(|e| ProcessError::config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.analysis.validate()?;

        if self.discovery.min_edge_frequency == 0 {
            tracing::warn!("discovery.min_edge_frequency of 0 behaves like 1");
        }

        Ok(())
    }

    /// Set environment
    pub fn with_environment(mut self, env: impl Into<String>) -> Self {
        self.environment = env.into();
        self
    }

    /// Set service name
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    /// Set recommendation strategy
    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.analysis.strategy = strategy.into();
        self
    }

    /// Set logging configuration
    pub fn with_logging(mut self, config: LogConfig) -> Self {
        self.logging = config;
        self
    }

    /// Set discovery configuration
    pub fn with_discovery(mut self, config: DiscoveryConfig) -> Self {
        self.discovery = config;
        self
    }

    /// Set analysis configuration
    pub fn with_analysis(mut self, config: AnalysisConfig) -> Self {
        self.analysis = config;
        self
    }
}

/// Configuration builder
#[derive(Default)]
pub struct ProcscopeConfigBuilder {
    config: ProcscopeConfig,
}

impl ProcscopeConfigBuilder {
    /// Create new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from production preset
    pub fn production() -> Self {
        Self {
            config: ProcscopeConfig::production(),
        }
    }

    /// Start from development preset
    pub fn development() -> Self {
        Self {
            config: ProcscopeConfig::development(),
        }
    }

    /// Set service name
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.config.service_name = name.into();
        self
    }

    /// Configure discovery
    pub fn discovery(mut self, f: impl FnOnce(DiscoveryConfig) -> DiscoveryConfig) -> Self {
        self.config.discovery = f(self.config.discovery);
        self
    }

    /// Configure analysis
    pub fn analysis(mut self, f: impl FnOnce(AnalysisConfig) -> AnalysisConfig) -> Self {
        self.config.analysis = f(self.config.analysis);
        self
    }

    /// Configure logging
    pub fn logging(mut self, f: impl FnOnce(LogConfig) -> LogConfig) -> Self {
        self.config.logging = f(self.config.logging);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ProcscopeConfig> {
        self.config.validate()?;
        Ok(self.config)
    }

    /// Build without validation
    pub fn build_unchecked(self) -> ProcscopeConfig {
        self.config
    }
}
