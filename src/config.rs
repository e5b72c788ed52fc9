use crate::dashboard::DashboardOptions;
use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_ENV: &str = "ROSTERD_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterdConfig {
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub students: StudentsConfig,
    #[serde(default)]
    pub fixtures: FixturesConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_trend_days")]
    pub trend_days: usize,
    #[serde(default = "default_top_performers")]
    pub top_performers: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            trend_days: default_trend_days(),
            top_performers: default_top_performers(),
        }
    }
}

impl DashboardConfig {
    pub fn options(&self) -> DashboardOptions {
        DashboardOptions {
            trend_days: self.trend_days,
            top_performers: self.top_performers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Decimal places for attendance rates in responses.
    #[serde(default)]
    pub rate_decimals: u32,
    /// Decimal places for marks averages and statistics in responses.
    #[serde(default = "default_stat_decimals")]
    pub stat_decimals: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            rate_decimals: 0,
            stat_decimals: default_stat_decimals(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentsConfig {
    #[serde(default = "default_true")]
    pub cascade_on_delete: bool,
}

impl Default for StudentsConfig {
    fn default() -> Self {
        Self {
            cascade_on_delete: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixturesConfig {
    #[serde(default)]
    pub load_on_start: bool,
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Anchor for generated attendance; the local date when unset.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            load_on_start: false,
            seed: default_seed(),
            today: None,
        }
    }
}

fn default_trend_days() -> usize {
    7
}

fn default_top_performers() -> usize {
    5
}

fn default_stat_decimals() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_seed() -> u64 {
    42
}

impl RosterdConfig {
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("failed to parse rosterd config")
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&text)
    }

    /// `--config <path>` wins over `ROSTERD_CONFIG`; neither means defaults.
    pub fn resolve(args: &[String]) -> anyhow::Result<Self> {
        let from_args = args
            .iter()
            .position(|a| a == "--config")
            .and_then(|i| args.get(i + 1))
            .cloned();
        let path = from_args.or_else(|| std::env::var(CONFIG_ENV).ok());
        match path {
            Some(p) if !p.trim().is_empty() => Self::load_from_file(p.trim()),
            _ => Ok(Self::default()),
        }
    }
}
