// src/report.rs
//
// Allocation report: the output DTO of the engine.
//
// A Report is a pure deterministic function of the Profile it was
// evaluated from. It has no independent lifecycle: recomputed fresh on
// every evaluation, never mutated. Keeping it a plain data-transfer
// object keeps the engine testable without any rendering dependency.

use serde::Serialize;

use crate::types::AllocationTier;

/// Recommended treasury allocation plus the intermediate figures the
/// presentation layer renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Monthly expense run-rate times the runway target.
    pub min_operating_cash: f64,
    /// Cash on hand above the runway-protected minimum (floored at 0).
    pub excess_cash: f64,
    /// Risk capacity score, integer in 0..=100.
    pub risk_score: u8,
    /// Allocation tier selected from the score.
    pub tier: AllocationTier,
    /// Fraction of cash on hand the tier recommends.
    pub allocation_pct: f64,
    /// Whether cash on hand covers the runway target.
    pub has_sufficient_runway: bool,
    /// Recommended allocation in USD. Zero until the runway is funded;
    /// thereafter capped by both the tier percentage and the excess cash.
    pub btc_amount_usd: f64,
    /// Narrative buy plan (staged tranches or DCA).
    pub buy_plan: String,
    /// Narrative custody split (cold storage vs hot buffer).
    pub custody_plan: String,
    /// Accounting treatment note for the selected standard.
    pub accounting_note: String,
}
