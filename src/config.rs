//! Run configuration: defaults, then `.env`/environment overrides, then CLI.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{PipelineError, PipelineResult};
use crate::selection::quality_filter::QualityThresholds;
use crate::selection::sampler::QuotaTables;

pub const TARGET_ENV_VAR: &str = "RECIPE_TARGET";
pub const SEED_ENV_VAR: &str = "RECIPE_SEED";
pub const DATA_DIR_ENV_VAR: &str = "RECIPE_DATA_DIR";

pub const DEFAULT_TARGET: usize = 500;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub target: usize,
    pub seed: u64,
    pub data_dir: PathBuf,
    pub quotas: QuotaTables,
    pub thresholds: QualityThresholds,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET,
            seed: DEFAULT_SEED,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            quotas: QuotaTables::default(),
            thresholds: QualityThresholds::default(),
        }
    }
}

fn parse_var<T: FromStr>(key: &str, raw: Option<String>, default: T) -> PipelineResult<T> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| PipelineError::InvalidConfig {
            key: key.to_string(),
            value,
        }),
    }
}

impl PipelineConfig {
    /// Loads overrides from the process environment (call `dotenv` first).
    pub fn from_env() -> PipelineResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> PipelineResult<Self> {
        let defaults = Self::default();
        let target = parse_var(TARGET_ENV_VAR, lookup(TARGET_ENV_VAR), defaults.target)?;
        let seed = parse_var(SEED_ENV_VAR, lookup(SEED_ENV_VAR), defaults.seed)?;
        let data_dir = lookup(DATA_DIR_ENV_VAR)
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        Ok(Self {
            target,
            seed,
            data_dir,
            ..defaults
        })
    }
}
