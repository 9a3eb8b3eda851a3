// src/config.rs
//
// Company financial profile: the single input to the allocation engine.
//
// Resolution precedence for where the profile comes from:
//   --profile CLI argument overrides env;
//   if missing use COFFER_PROFILE (a path to a JSON file);
//   otherwise fall back to the built-in default profile.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::types::{AccountingStandard, RevenueVolatility, TreasuryObjective};

/// Env var naming a JSON profile file, used when no CLI path is given.
pub const PROFILE_ENV_VAR: &str = "COFFER_PROFILE";

/// Company financial/risk profile.
///
/// Immutable per evaluation. All dollar amounts are annual/spot USD.
/// Fields default individually so partial JSON profiles load; a field
/// omitted from the file keeps its default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Annual revenue in USD (>= 0).
    pub annual_revenue_usd: f64,
    /// Annual operating expenses in USD (>= 0).
    pub annual_expenses_usd: f64,
    /// Cash on hand in USD (>= 0).
    pub cash_on_hand_usd: f64,
    /// Revenue volatility bucket.
    pub revenue_volatility: RevenueVolatility,
    /// Gross margin in percent. Clamped to [0, 100] before scoring.
    pub gross_margin_pct: f64,
    /// Months of expenses the treasury must cover before any allocation.
    pub runway_target_months: f64,
    /// Whether the company can take on secured debt if needed.
    pub debt_capacity: bool,
    /// Board risk appetite on a 0..=100 scale.
    pub risk_appetite: f64,
    /// Treasury objective.
    pub treasury_objective: TreasuryObjective,
    /// Accounting regime (drives the accounting note template).
    pub accounting: AccountingStandard,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            annual_revenue_usd: 1_000_000.0,
            annual_expenses_usd: 700_000.0,
            cash_on_hand_usd: 150_000.0,
            revenue_volatility: RevenueVolatility::Medium,
            gross_margin_pct: 55.0,
            runway_target_months: 6.0,
            debt_capacity: true,
            risk_appetite: 60.0,
            treasury_objective: TreasuryObjective::Hedge,
            accounting: AccountingStandard::Gaap,
        }
    }
}

impl Profile {
    /// Load a profile from a JSON file.
    ///
    /// Missing fields take their defaults; unknown enum strings are an
    /// error, never a silent fallback.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Profile> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read profile file {}", path.display()))?;
        let profile: Profile = serde_json::from_str(&contents)
            .with_context(|| format!("invalid profile JSON in {}", path.display()))?;
        Ok(profile)
    }
}

/// Source of the effective profile (for logging/debugging precedence).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileSource {
    /// Explicitly provided via CLI argument (highest priority).
    Cli,
    /// Loaded from the COFFER_PROFILE environment variable.
    Env,
    /// Built-in default profile.
    Default,
}

impl ProfileSource {
    /// Return a stable lowercase name for the source (used in logs/telemetry).
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileSource::Cli => "cli",
            ProfileSource::Env => "env",
            ProfileSource::Default => "default",
        }
    }
}

/// Resolved profile with its source for logging.
#[derive(Debug, Clone)]
pub struct EffectiveProfile {
    pub profile: Profile,
    pub source: ProfileSource,
}

impl EffectiveProfile {
    /// Log the effective profile source at startup (INFO level to stderr).
    ///
    /// Format: `effective_profile_source=<source>`
    pub fn log_startup(&self) {
        eprintln!("effective_profile_source={}", self.source.as_str());
    }
}

/// Resolve the effective profile using standard precedence rules.
///
/// Precedence (highest to lowest):
/// 1. `cli_path` - if Some, load it (source=cli); a load failure is an error
/// 2. `COFFER_PROFILE` env var - if set, load the named file (source=env)
/// 3. Built-in default (source=default)
///
/// A CLI or env path that fails to load is a hard error, never a silent
/// fallthrough to the default profile.
pub fn resolve_effective_profile(cli_path: Option<&Path>) -> anyhow::Result<EffectiveProfile> {
    if let Some(path) = cli_path {
        let profile = Profile::from_json_file(path)?;
        return Ok(EffectiveProfile {
            profile,
            source: ProfileSource::Cli,
        });
    }

    if let Ok(env_val) = std::env::var(PROFILE_ENV_VAR) {
        if !env_val.is_empty() {
            let profile = Profile::from_json_file(PathBuf::from(&env_val))
                .with_context(|| format!("{PROFILE_ENV_VAR}={env_val}"))?;
            return Ok(EffectiveProfile {
                profile,
                source: ProfileSource::Env,
            });
        }
    }

    Ok(EffectiveProfile {
        profile: Profile::default(),
        source: ProfileSource::Default,
    })
}
