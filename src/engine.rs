// src/engine.rs
//
// Pure allocation computation for Coffer.
//
// This module contains the canonical evaluation function that:
// - Takes an immutable company profile
// - Returns a deterministic allocation Report
// - Performs NO I/O (no file writes, no env reads, no printing)
//
// Design principles:
// - Pure function: same inputs always produce same outputs
// - Total: every profile in the documented domain yields a Report;
//   there are no error conditions
// - Out-of-domain numerics pass through arithmetically except where
//   clamping is specified (gross margin, final score)

use crate::config::Profile;
use crate::report::Report;
use crate::types::{AccountingStandard, AllocationTier, RevenueVolatility, TreasuryObjective};

// Score weights. The components target ~100 points max:
// risk appetite up to 35, volatility up to 30, margin up to 20,
// debt capacity a flat 10, objective a -5..+10 nudge.
const RISK_APPETITE_WEIGHT: f64 = 0.35;
const GROSS_MARGIN_WEIGHT: f64 = 0.20;
const DEBT_CAPACITY_POINTS: f64 = 10.0;

/// Evaluate a company profile into an allocation report.
///
/// This is the core of the crate. Safe to call repeatedly and
/// concurrently; there is no shared mutable state.
pub fn evaluate(profile: &Profile) -> Report {
    // Step 1: runway math.
    let monthly_expenses = profile.annual_expenses_usd / 12.0;
    let min_operating_cash = monthly_expenses * profile.runway_target_months;
    let excess_cash = (profile.cash_on_hand_usd - min_operating_cash).max(0.0);
    let has_sufficient_runway = profile.cash_on_hand_usd >= min_operating_cash;

    // Step 2: risk capacity score.
    let risk_score = risk_score(profile);

    // Step 3: tier from the ordered threshold table.
    let tier = AllocationTier::for_score(risk_score);
    let allocation_pct = tier.allocation_pct();

    // Step 4: dollar allocation. Nothing is allocated before the runway
    // cushion exists; once met, the tighter of the two caps wins.
    let btc_amount_usd = if has_sufficient_runway {
        excess_cash.min(profile.cash_on_hand_usd * allocation_pct)
    } else {
        0.0
    };

    // Steps 5-6: narrative guidance. Selected by the same score/runway
    // branching as the tier but looked up independently of the label.
    let buy_plan = buy_plan(profile, risk_score, has_sufficient_runway);
    let custody_plan = custody_plan(risk_score, has_sufficient_runway);
    let accounting_note = accounting_note(profile, risk_score);

    Report {
        min_operating_cash,
        excess_cash,
        risk_score,
        tier,
        allocation_pct,
        has_sufficient_runway,
        btc_amount_usd,
        buy_plan,
        custody_plan,
        accounting_note,
    }
}

/// Weighted risk capacity score, clamped to [0, 100] and rounded.
///
/// Lower volatility and higher margin indicate a safer business and
/// raise the score: it is a capacity-to-take-BTC-risk index, not a
/// measure of riskiness.
fn risk_score(profile: &Profile) -> u8 {
    let volatility_points = match profile.revenue_volatility {
        RevenueVolatility::Low => 30.0,
        RevenueVolatility::Medium => 20.0,
        RevenueVolatility::High => 10.0,
    };

    let objective_adj = match profile.treasury_objective {
        TreasuryObjective::Preserve => -5.0,
        TreasuryObjective::Hedge => 0.0,
        TreasuryObjective::Growth => 5.0,
        TreasuryObjective::Aggressive => 10.0,
    };

    let clamped_margin = profile.gross_margin_pct.clamp(0.0, 100.0);

    let raw = profile.risk_appetite * RISK_APPETITE_WEIGHT
        + volatility_points
        + clamped_margin * GROSS_MARGIN_WEIGHT
        + if profile.debt_capacity {
            DEBT_CAPACITY_POINTS
        } else {
            0.0
        }
        + objective_adj;

    raw.clamp(0.0, 100.0).round() as u8
}

fn buy_plan(profile: &Profile, risk_score: u8, has_sufficient_runway: bool) -> String {
    if !has_sufficient_runway {
        format!(
            "Stage-in via profit-sweep DCA once {}-month runway is fully funded.",
            profile.runway_target_months
        )
    } else if risk_score >= 75 {
        "60% initial tranche, 40% DCA over 8 weeks.".to_string()
    } else if risk_score >= 50 {
        "40% initial tranche, 60% DCA over 12 weeks.".to_string()
    } else {
        "DCA weekly over 26 weeks.".to_string()
    }
}

fn custody_plan(risk_score: u8, has_sufficient_runway: bool) -> String {
    if !has_sufficient_runway {
        "Hold 100% fiat until runway met; then transition to standard custody policy below."
            .to_string()
    } else if risk_score >= 75 {
        "90% cold storage (2-of-3 multisig), 10% hot buffer for ops.".to_string()
    } else if risk_score >= 50 {
        "80% cold storage (2-of-3 multisig), 20% hot buffer.".to_string()
    } else {
        "70% cold storage (2-of-3 multisig), 30% hot buffer.".to_string()
    }
}

fn accounting_note(profile: &Profile, risk_score: u8) -> String {
    let mut note = match profile.accounting {
        AccountingStandard::Gaap => {
            "US GAAP (ASU 2023-08): Crypto measured at fair value through net income; \
             present separate line items; enhanced disclosures. Consult your CPA for \
             adoption timing."
        }
        AccountingStandard::Ifrs => {
            "IFRS: Often treated as intangible at cost less impairment; revaluation \
             model may apply if active market evidence exists. Consult your auditor \
             for policy selection."
        }
    }
    .to_string();

    if profile.debt_capacity && risk_score >= 75 {
        note.push_str(
            " Advanced: consider secured debt for fiat runway while retaining BTC \
             (board decision; treasury policy required).",
        );
    }

    note
}
