use anyhow::Context;

use crate::rng::{SequenceGenerator, DEFAULT_SEED};

pub const ENV_SEED: &str = "QA_DASHBOARD_SEED";

/// Flag first, then `QA_DASHBOARD_SEED`, then the built-in seed.
pub fn resolve_seed(flag: Option<i64>, env_value: Option<&str>) -> anyhow::Result<i64> {
    if let Some(seed) = flag {
        return Ok(seed);
    }

    match env_value.map(str::trim).filter(|value| !value.is_empty()) {
        Some(raw) => raw
            .parse::<i64>()
            .with_context(|| format!("{ENV_SEED} must be an integer, got '{raw}'")),
        None => Ok(DEFAULT_SEED),
    }
}

pub fn generator_from_env(flag: Option<i64>) -> anyhow::Result<SequenceGenerator> {
    let env_value = std::env::var(ENV_SEED).ok();
    let seed = resolve_seed(flag, env_value.as_deref())?;
    SequenceGenerator::new(seed).context("cannot seed the sequence generator")
}
