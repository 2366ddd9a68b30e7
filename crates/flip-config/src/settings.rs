//! Configuration structures.

use serde::{Deserialize, Serialize};

use flip_core::types::{RiskProfile, SignalConfig, StrategyFilter};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub strategy: StrategySettings,
    #[serde(default)]
    pub signal: SignalSettings,
    #[serde(default)]
    pub ledger: LedgerSettings,
    #[serde(default)]
    pub watcher: WatcherSettings,
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "flip-analytics".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// A named scanner filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyPreset {
    pub name: String,
    #[serde(flatten)]
    pub filter: StrategyFilter,
}

/// Scanner defaults and saved presets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategySettings {
    #[serde(default)]
    pub default: StrategyFilter,
    #[serde(default = "StrategySettings::builtin_presets")]
    pub presets: Vec<StrategyPreset>,
}

impl StrategySettings {
    fn builtin_presets() -> Vec<StrategyPreset> {
        vec![
            StrategyPreset {
                name: "Safe Flips".to_string(),
                filter: StrategyFilter {
                    min_price: 100,
                    max_price: 2_147_000_000,
                    min_volume: 10_000,
                    min_roi: 1.0,
                },
            },
            StrategyPreset {
                name: "High Vol Penny Stocks".to_string(),
                filter: StrategyFilter {
                    min_price: 1,
                    max_price: 5_000,
                    min_volume: 100_000,
                    min_roi: 5.0,
                },
            },
            StrategyPreset {
                name: "High Ticket Items".to_string(),
                filter: StrategyFilter {
                    min_price: 10_000_000,
                    max_price: 2_147_000_000,
                    min_volume: 10,
                    min_roi: 0.5,
                },
            },
        ]
    }

    /// Look up a preset by name, case-insensitively.
    pub fn preset(&self, name: &str) -> Option<&StrategyPreset> {
        self.presets
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

impl Default for StrategySettings {
    fn default() -> Self {
        Self {
            default: StrategyFilter::default(),
            presets: Self::builtin_presets(),
        }
    }
}

/// Signal engine defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalSettings {
    pub risk_profile: RiskProfile,
    pub interval_minutes: u32,
}

impl SignalSettings {
    pub fn to_signal_config(&self) -> SignalConfig {
        SignalConfig {
            risk_profile: self.risk_profile,
            interval_minutes: self.interval_minutes,
        }
    }
}

impl Default for SignalSettings {
    fn default() -> Self {
        Self {
            risk_profile: RiskProfile::Medium,
            interval_minutes: 5,
        }
    }
}

/// Portfolio ledger settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSettings {
    pub starting_cash: i64,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            starting_cash: 10_000_000,
        }
    }
}

/// Watchlist monitor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatcherSettings {
    /// Fractional drop that triggers an alert (0.05 = 5%)
    pub threshold: f64,
}

impl Default for WatcherSettings {
    fn default() -> Self {
        Self { threshold: 0.05 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.app.name, "flip-analytics");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.ledger.starting_cash, 10_000_000);
        assert_eq!(config.signal.risk_profile, RiskProfile::Medium);
        assert_eq!(config.strategy.presets.len(), 3);
    }

    #[test]
    fn test_preset_lookup_is_case_insensitive() {
        let strategy = StrategySettings::default();
        let preset = strategy.preset("safe flips").unwrap();
        assert_eq!(preset.filter.min_volume, 10_000);
        assert!(strategy.preset("no such preset").is_none());
    }

    #[test]
    fn test_deserialize_from_toml() {
        let toml = r#"
            [app]
            name = "flip-analytics"
            environment = "production"

            [logging]
            level = "debug"
            format = "json"

            [strategy.default]
            min_price = 500
            min_volume = 1000

            [signal]
            risk_profile = "high"
            interval_minutes = 5

            [ledger]
            starting_cash = 50000000

            [watcher]
            threshold = 0.08
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();

        assert_eq!(config.app.environment, "production");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.strategy.default.min_price, 500);
        // Unset bounds keep their wide-open defaults
        assert_eq!(config.strategy.default.max_price, i64::MAX);
        assert_eq!(config.signal.risk_profile, RiskProfile::High);
        assert_eq!(config.ledger.starting_cash, 50_000_000);
        assert!((config.watcher.threshold - 0.08).abs() < 1e-12);
    }
}
