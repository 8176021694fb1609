use chrono::NaiveDate;
use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::projection::GrowthModel;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub campaign: CampaignSettings,
    pub projection: ProjectionSettings,
    pub api: ApiSettings,
    pub inputs: InputSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
    pub log_level: String,
}

/// Campaign accrual rules: per-day multipliers and the boost window cutoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignSettings {
    pub boost_rate: f64,
    pub base_rate: f64,
    /// Flat daily addition for completing the activity task. Not scaled by
    /// the rate.
    pub daily_bonus: f64,
    /// Last calendar day accruing at the boosted rate.
    pub boost_end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSettings {
    pub growth: GrowthModel,
    pub sensitivity: SensitivitySettings,
}

/// Axes of the FDV × duration sensitivity grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivitySettings {
    pub fdv_min: f64,
    pub fdv_max: f64,
    pub fdv_steps: usize,
    pub duration_min: u32,
    pub duration_max: u32,
    pub duration_step: u32,
}

impl SensitivitySettings {
    pub fn fdv_axis(&self) -> Vec<f64> {
        if self.fdv_steps < 2 {
            return vec![self.fdv_min];
        }
        let span = self.fdv_max - self.fdv_min;
        let step = span / (self.fdv_steps - 1) as f64;
        (0..self.fdv_steps)
            .map(|i| self.fdv_min + step * i as f64)
            .collect()
    }

    pub fn duration_axis(&self) -> Vec<u32> {
        (self.duration_min..=self.duration_max)
            .step_by(self.duration_step.max(1) as usize)
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    pub rank_url: String,
    /// Number of top-ranked entries requested and summed.
    pub limit: u32,
    pub offset: u32,
    pub timeout_seconds: u64,
    /// Raw `points` values arrive scaled up by this divisor.
    pub points_divisor: f64,
    /// Extrapolates the top-of-leaderboard sum to the whole population.
    /// Observed deployments run anywhere from 1.3 to 5.0.
    pub sample_scaling_factor: f64,
    /// Used whenever the fetch fails or `--offline` is set.
    pub fallback_global_points: f64,
    pub cache_ttl_seconds: u64,
}

/// Bounds enforced at the input widgets / CLI boundary. The engines assume
/// in-domain values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSettings {
    pub min_capital: f64,
    pub max_capital: f64,
    pub default_capital: f64,
    pub capital_step: f64,
    pub min_days: u32,
    pub max_days: u32,
    pub default_days: u32,
    pub fdv_presets: Vec<f64>,
    pub default_fdv_index: usize,
    pub min_airdrop_pct: f64,
    pub max_airdrop_pct: f64,
    pub airdrop_pct_step: f64,
    pub default_airdrop_pct: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "StandX Yield Estimator".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                log_level: "info".to_string(),
            },
            campaign: CampaignSettings {
                boost_rate: 1.5,
                base_rate: 1.2,
                daily_bonus: 10.0,
                boost_end_date: NaiveDate::from_ymd_opt(2025, 12, 11).unwrap(),
            },
            projection: ProjectionSettings {
                growth: GrowthModel::Compound { daily_rate: 0.015 },
                sensitivity: SensitivitySettings {
                    fdv_min: 100_000_000.0,
                    fdv_max: 3_000_000_000.0,
                    fdv_steps: 10,
                    duration_min: 15,
                    duration_max: 90,
                    duration_step: 5,
                },
            },
            api: ApiSettings {
                rank_url: "https://api.standx.com/v1/offchain/perps-campaign/rank"
                    .to_string(),
                limit: 200,
                offset: 0,
                timeout_seconds: 5,
                points_divisor: 1_000_000.0,
                sample_scaling_factor: 1.3,
                fallback_global_points: 500_000_000.0,
                cache_ttl_seconds: 300,
            },
            inputs: InputSettings {
                min_capital: 100.0,
                max_capital: 1_000_000.0,
                default_capital: 10_000.0,
                capital_step: 1_000.0,
                min_days: 1,
                max_days: 90,
                default_days: 30,
                fdv_presets: vec![
                    100_000_000.0,
                    250_000_000.0,
                    500_000_000.0,
                    1_000_000_000.0,
                    2_000_000_000.0,
                    3_000_000_000.0,
                ],
                default_fdv_index: 3,
                min_airdrop_pct: 1.0,
                max_airdrop_pct: 10.0,
                airdrop_pct_step: 0.5,
                default_airdrop_pct: 5.0,
            },
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("STANDX_EST"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .build()?;

        s.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        let c = &self.campaign;
        if c.boost_rate <= 0.0 || c.base_rate <= 0.0 {
            return Err("Accrual rates must be positive".to_string());
        }
        if c.daily_bonus < 0.0 {
            return Err("Daily bonus cannot be negative".to_string());
        }

        // Negative inflation would break projection monotonicity.
        if self.projection.growth.rates().iter().any(|r| *r < 0.0) {
            return Err("Growth rates must be non-negative".to_string());
        }
        let s = &self.projection.sensitivity;
        if s.fdv_min <= 0.0 || s.fdv_max < s.fdv_min {
            return Err("Sensitivity FDV range is invalid".to_string());
        }
        if s.duration_min == 0 || s.duration_max < s.duration_min || s.duration_step == 0 {
            return Err("Sensitivity duration range is invalid".to_string());
        }

        let a = &self.api;
        if a.limit == 0 {
            return Err("Ranking page size must be positive".to_string());
        }
        if a.timeout_seconds == 0 || a.cache_ttl_seconds == 0 {
            return Err("API timeout and cache TTL must be positive".to_string());
        }
        if a.points_divisor <= 0.0 || a.sample_scaling_factor <= 0.0 {
            return Err("Points divisor and scaling factor must be positive".to_string());
        }
        if a.fallback_global_points <= 0.0 {
            return Err("Fallback global points must be positive".to_string());
        }

        let i = &self.inputs;
        if i.min_capital <= 0.0 || i.max_capital < i.min_capital {
            return Err("Capital bounds are invalid".to_string());
        }
        if i.min_days == 0 || i.max_days < i.min_days {
            return Err("Duration bounds are invalid".to_string());
        }
        if i.fdv_presets.is_empty() || i.fdv_presets.iter().any(|f| *f <= 0.0) {
            return Err("FDV presets must be a non-empty list of positive values".to_string());
        }
        if i.default_fdv_index >= i.fdv_presets.len() {
            return Err(format!(
                "Default FDV index {} is out of range",
                i.default_fdv_index
            ));
        }
        if i.min_airdrop_pct <= 0.0 || i.max_airdrop_pct > 100.0 {
            return Err("Airdrop percentage bounds must stay within (0, 100]".to_string());
        }

        Ok(())
    }
}
