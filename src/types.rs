// src/types.rs
//
// Common shared types for the Coffer allocation engine.

use serde::{Deserialize, Serialize};

/// Year-over-year revenue choppiness bucket.
///
/// Lower volatility indicates a safer business and raises the risk
/// capacity score (the score measures capacity to take BTC risk, not
/// riskiness itself).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevenueVolatility {
    Low,
    Medium,
    High,
}

impl RevenueVolatility {
    /// Return a stable lowercase name (used in logs/telemetry and links).
    pub fn as_str(&self) -> &'static str {
        match self {
            RevenueVolatility::Low => "low",
            RevenueVolatility::Medium => "medium",
            RevenueVolatility::High => "high",
        }
    }

    /// Parse a volatility name (case-insensitive). Returns None if unrecognized.
    pub fn parse(s: &str) -> Option<RevenueVolatility> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(RevenueVolatility::Low),
            "medium" | "med" => Some(RevenueVolatility::Medium),
            "high" => Some(RevenueVolatility::High),
            _ => None,
        }
    }
}

/// What the company wants its treasury to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreasuryObjective {
    /// Preserve capital.
    Preserve,
    /// Inflation hedge.
    Hedge,
    /// Growth.
    Growth,
    /// Aggressive growth.
    Aggressive,
}

impl TreasuryObjective {
    /// Return a stable lowercase name (used in logs/telemetry and links).
    pub fn as_str(&self) -> &'static str {
        match self {
            TreasuryObjective::Preserve => "preserve",
            TreasuryObjective::Hedge => "hedge",
            TreasuryObjective::Growth => "growth",
            TreasuryObjective::Aggressive => "aggressive",
        }
    }

    /// Parse an objective name (case-insensitive). Returns None if unrecognized.
    pub fn parse(s: &str) -> Option<TreasuryObjective> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preserve" => Some(TreasuryObjective::Preserve),
            "hedge" => Some(TreasuryObjective::Hedge),
            "growth" => Some(TreasuryObjective::Growth),
            "aggressive" | "agg" => Some(TreasuryObjective::Aggressive),
            _ => None,
        }
    }
}

/// Accounting regime the company reports under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountingStandard {
    /// US GAAP (ASU 2023-08 fair-value measurement).
    Gaap,
    /// IFRS (cost less impairment, optional revaluation).
    Ifrs,
}

impl AccountingStandard {
    /// Return a stable lowercase name (used in logs/telemetry and links).
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountingStandard::Gaap => "gaap",
            AccountingStandard::Ifrs => "ifrs",
        }
    }

    /// Parse a standard name (case-insensitive). Returns None if unrecognized.
    pub fn parse(s: &str) -> Option<AccountingStandard> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gaap" | "us-gaap" | "us_gaap" => Some(AccountingStandard::Gaap),
            "ifrs" => Some(AccountingStandard::Ifrs),
            _ => None,
        }
    }
}

/// Allocation tier selected from the risk capacity score.
///
/// Ordered threshold table, highest threshold wins:
///
/// | score | tier              | pct  |
/// |-------|-------------------|------|
/// | >= 75 | Aggressive Growth | 0.80 |
/// | >= 50 | Backbone          | 0.35 |
/// | >= 25 | Strategic Reserve | 0.18 |
/// | <  25 | Minimalist        | 0.07 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationTier {
    Minimalist,
    StrategicReserve,
    Backbone,
    AggressiveGrowth,
}

impl AllocationTier {
    /// Select the tier for a risk capacity score, evaluated high to low.
    pub fn for_score(score: u8) -> AllocationTier {
        if score >= 75 {
            AllocationTier::AggressiveGrowth
        } else if score >= 50 {
            AllocationTier::Backbone
        } else if score >= 25 {
            AllocationTier::StrategicReserve
        } else {
            AllocationTier::Minimalist
        }
    }

    /// Fraction of cash on hand this tier recommends allocating.
    pub fn allocation_pct(&self) -> f64 {
        match self {
            AllocationTier::Minimalist => 0.07,
            AllocationTier::StrategicReserve => 0.18,
            AllocationTier::Backbone => 0.35,
            AllocationTier::AggressiveGrowth => 0.80,
        }
    }

    /// Human-readable tier label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            AllocationTier::Minimalist => "Minimalist",
            AllocationTier::StrategicReserve => "Strategic Reserve",
            AllocationTier::Backbone => "Backbone",
            AllocationTier::AggressiveGrowth => "Aggressive Growth",
        }
    }

    /// Return a stable lowercase name (used in logs/telemetry).
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationTier::Minimalist => "minimalist",
            AllocationTier::StrategicReserve => "strategic_reserve",
            AllocationTier::Backbone => "backbone",
            AllocationTier::AggressiveGrowth => "aggressive_growth",
        }
    }
}
