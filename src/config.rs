use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::{PartialCredit, RankOptions, ScoringWeights};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub listing: ListingSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub ranking: RankingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct ListingSettings {
    #[serde(default = "default_listing_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_vehicles_path")]
    pub vehicles_path: String,
    pub api_key: Option<String>,
    #[serde(default = "default_listing_timeout")]
    pub timeout_secs: u64,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            endpoint: default_listing_endpoint(),
            vehicles_path: default_vehicles_path(),
            api_key: None,
            timeout_secs: default_listing_timeout(),
        }
    }
}

fn default_listing_endpoint() -> String { "http://localhost:5000/api".to_string() }
fn default_vehicles_path() -> String { "cars".to_string() }
fn default_listing_timeout() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_catalog_ttl")]
    pub catalog_ttl_secs: u64,
    #[serde(default = "default_session_idle")]
    pub session_idle_secs: u64,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            catalog_ttl_secs: default_catalog_ttl(),
            session_idle_secs: default_session_idle(),
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_catalog_ttl() -> u64 { 300 }
fn default_session_idle() -> u64 { 1800 }
fn default_max_sessions() -> u64 { 10_000 }

#[derive(Debug, Clone, Deserialize)]
pub struct RankingSettings {
    #[serde(default = "default_min_match_percentage")]
    pub min_match_percentage: u8,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_max_top_n")]
    pub max_top_n: usize,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            min_match_percentage: default_min_match_percentage(),
            top_n: default_top_n(),
            max_top_n: default_max_top_n(),
        }
    }
}

impl RankingSettings {
    /// Merge request overrides with configured defaults, capping top N
    pub fn options(&self, min_match_percentage: Option<u8>, top_n: Option<usize>) -> RankOptions {
        RankOptions {
            min_match_percentage: min_match_percentage
                .unwrap_or(self.min_match_percentage)
                .min(100),
            top_n: top_n.unwrap_or(self.top_n).min(self.max_top_n),
        }
    }
}

fn default_min_match_percentage() -> u8 { 40 }
fn default_top_n() -> usize { 5 }
fn default_max_top_n() -> usize { 50 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default)]
    pub budget_partial: BudgetPartialConfig,
}

impl ScoringSettings {
    pub fn to_weights(&self) -> ScoringWeights {
        ScoringWeights {
            budget: self.weights.budget,
            seating: self.weights.seating,
            body_type: self.weights.body_type,
            fuel: self.weights.fuel,
            features: self.weights.features,
            budget_partial: self.budget_partial.enabled.then_some(PartialCredit {
                tolerance: self.budget_partial.tolerance,
                credit: self.budget_partial.credit,
            }),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_budget_weight")]
    pub budget: f64,
    #[serde(default = "default_seating_weight")]
    pub seating: f64,
    #[serde(default = "default_body_type_weight")]
    pub body_type: f64,
    #[serde(default = "default_fuel_weight")]
    pub fuel: f64,
    #[serde(default = "default_features_weight")]
    pub features: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            budget: default_budget_weight(),
            seating: default_seating_weight(),
            body_type: default_body_type_weight(),
            fuel: default_fuel_weight(),
            features: default_features_weight(),
        }
    }
}

fn default_budget_weight() -> f64 { 35.0 }
fn default_seating_weight() -> f64 { 15.0 }
fn default_body_type_weight() -> f64 { 20.0 }
fn default_fuel_weight() -> f64 { 15.0 }
fn default_features_weight() -> f64 { 15.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct BudgetPartialConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_budget_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_budget_credit")]
    pub credit: f64,
}

impl Default for BudgetPartialConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tolerance: default_budget_tolerance(),
            credit: default_budget_credit(),
        }
    }
}

fn default_true() -> bool { true }
fn default_budget_tolerance() -> f64 { 0.10 }
fn default_budget_credit() -> f64 { 0.5 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with VMATCH)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., VMATCH__LISTING__ENDPOINT -> listing.endpoint
            .add_source(
                Environment::with_prefix("VMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("VMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Check cross-field constraints the types cannot express
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = self.scoring.to_weights().validate().err().unwrap_or_default();

        if self.ranking.min_match_percentage > 100 {
            errors.push("ranking.min_match_percentage: must be at most 100".to_string());
        }
        if self.ranking.top_n == 0 {
            errors.push("ranking.top_n: must be at least 1".to_string());
        }
        if self.ranking.max_top_n < self.ranking.top_n {
            errors.push("ranking.max_top_n: must not be below top_n".to_string());
        }
        if self.cache.max_sessions == 0 {
            errors.push("cache.max_sessions: must be at least 1".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.budget, 35.0);
        assert_eq!(weights.seating, 15.0);
        assert_eq!(weights.body_type, 20.0);
        assert_eq!(weights.fuel, 15.0);
        assert_eq!(weights.features, 15.0);
    }

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.scoring.to_weights(), ScoringWeights::default());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_ranking_options_merge_and_cap() {
        let ranking = RankingSettings::default();

        assert_eq!(ranking.options(None, None), RankOptions::default());

        let options = ranking.options(Some(70), Some(500));
        assert_eq!(options.min_match_percentage, 70);
        assert_eq!(options.top_n, 50);

        let wide = RankingSettings { max_top_n: 100, ..RankingSettings::default() };
        assert_eq!(wide.options(None, Some(80)).top_n, 80);
    }

    #[test]
    fn test_validate_rejects_bad_weights() {
        let mut settings = Settings::default();
        settings.scoring.weights.budget = 50.0;
        settings.ranking.top_n = 0;

        let errors = settings.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("sum to 100")));
        assert!(errors.iter().any(|e| e.contains("top_n")));
    }

    #[test]
    fn test_disabled_budget_band() {
        let mut scoring = ScoringSettings::default();
        scoring.budget_partial.enabled = false;
        assert!(scoring.to_weights().budget_partial.is_none());
    }
}
