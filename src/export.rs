// src/export.rs
//
// Export artifacts for an evaluated profile:
// - report document (Markdown) with a fixed disclaimer footer
// - JSON export pairing the inputs with the formatted results
// - shareable link encoding the profile as query parameters
//
// Everything here is presentation plumbing around the engine's Report;
// the engine itself never depends on this module.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{anyhow, Context};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::config::Profile;
use crate::report::Report;
use crate::types::{AccountingStandard, RevenueVolatility, TreasuryObjective};

/// Base URL the shareable link points at.
pub const SHARE_BASE_URL: &str = "https://coffer.tools/simulator";

/// Disclaimer footer rendered at the bottom of every report document.
pub const DISCLAIMER: &str = "Disclaimer: Not financial, legal, or tax advice. Educational only.";

/// Format a USD amount with thousands separators and zero decimal places.
///
/// `1234567.4` renders as `$1,234,567`; negatives as `-$1,234`.
pub fn format_usd(amount: f64) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let mut units = rounded.abs() as u64;

    let mut groups = Vec::new();
    loop {
        let group = units % 1000;
        units /= 1000;
        if units == 0 {
            groups.push(format!("{group}"));
            break;
        }
        groups.push(format!("{group:03}"));
    }
    groups.reverse();

    let body = groups.join(",");
    if negative {
        format!("-${body}")
    } else {
        format!("${body}")
    }
}

/// Format an allocation fraction as a percentage with one decimal place.
pub fn format_pct(fraction: f64) -> String {
    format!("{:.1}", fraction * 100.0)
}

/// Formatted result fields, keyed exactly as the exported documents
/// label them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportFields {
    #[serde(rename = "Recommended BTC Allocation (%)")]
    pub allocation_pct: String,
    #[serde(rename = "Recommended BTC Allocation (USD)")]
    pub allocation_usd: String,
    #[serde(rename = "Buy Plan")]
    pub buy_plan: String,
    #[serde(rename = "Custody Plan")]
    pub custody_plan: String,
    #[serde(rename = "Accounting Note")]
    pub accounting_note: String,
}

impl ExportFields {
    /// Build the formatted fields from an evaluated report.
    pub fn from_report(report: &Report) -> Self {
        Self {
            allocation_pct: format_pct(report.allocation_pct),
            allocation_usd: format_usd(report.btc_amount_usd),
            buy_plan: report.buy_plan.clone(),
            custody_plan: report.custody_plan.clone(),
            accounting_note: report.accounting_note.clone(),
        }
    }
}

/// Determinism information attached to the JSON export.
#[derive(Debug, Clone, Serialize)]
pub struct DeterminismInfo {
    /// SHA-256 over the deterministic inputs and results.
    pub checksum: String,
}

/// Complete JSON export: inputs paired with formatted results.
#[derive(Debug, Clone, Serialize)]
pub struct ExportBundle {
    pub inputs: Profile,
    pub results: ExportFields,
    pub determinism: DeterminismInfo,
}

impl ExportBundle {
    /// Assemble the export bundle for a profile and its report.
    pub fn new(profile: &Profile, report: &Report) -> Self {
        let results = ExportFields::from_report(report);
        let checksum = compute_checksum(profile, report);
        Self {
            inputs: profile.clone(),
            results,
            determinism: DeterminismInfo { checksum },
        }
    }

    /// Write the bundle as pretty JSON.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

/// Compute a checksum over the deterministic fields of a run.
///
/// Floats are rounded to 6 decimal places before hashing for floating
/// point stability, matching how the figures are compared elsewhere.
pub fn compute_checksum(profile: &Profile, report: &Report) -> String {
    fn push_f64(hasher: &mut Sha256, v: f64) {
        let fixed = (v * 1_000_000.0).round() as i64;
        hasher.update(fixed.to_le_bytes());
    }

    let mut hasher = Sha256::new();

    // Inputs.
    push_f64(&mut hasher, profile.annual_revenue_usd);
    push_f64(&mut hasher, profile.annual_expenses_usd);
    push_f64(&mut hasher, profile.cash_on_hand_usd);
    hasher.update(profile.revenue_volatility.as_str().as_bytes());
    push_f64(&mut hasher, profile.gross_margin_pct);
    push_f64(&mut hasher, profile.runway_target_months);
    hasher.update([profile.debt_capacity as u8]);
    push_f64(&mut hasher, profile.risk_appetite);
    hasher.update(profile.treasury_objective.as_str().as_bytes());
    hasher.update(profile.accounting.as_str().as_bytes());

    // Results.
    push_f64(&mut hasher, report.min_operating_cash);
    push_f64(&mut hasher, report.excess_cash);
    hasher.update([report.risk_score]);
    hasher.update(report.tier.as_str().as_bytes());
    push_f64(&mut hasher, report.allocation_pct);
    hasher.update([report.has_sufficient_runway as u8]);
    push_f64(&mut hasher, report.btc_amount_usd);
    hasher.update(report.buy_plan.as_bytes());
    hasher.update(report.custody_plan.as_bytes());
    hasher.update(report.accounting_note.as_bytes());

    hex_encode(&hasher.finalize())
}

/// Render the report document as Markdown.
///
/// `generated_at` is supplied by the caller; time stays outside the
/// engine so reports remain reproducible in tests.
pub fn render_report_doc(report: &Report, generated_at: &str) -> String {
    let fields = ExportFields::from_report(report);

    let pct_line = if report.btc_amount_usd == 0.0 {
        "0.0% (runway not met; cap by excess cash thereafter)".to_string()
    } else {
        format!(
            "{}% of cash on hand (capped by excess cash)",
            fields.allocation_pct
        )
    };

    let mut doc = String::new();
    doc.push_str("# Bitcoin Treasury Allocation Report\n\n");
    doc.push_str(&format!("**Generated:** {generated_at}\n\n"));

    doc.push_str("## Recommended BTC Allocation\n\n");
    doc.push_str(&format!("{}\n\n", fields.allocation_usd));
    doc.push_str(&format!("{pct_line}\n\n"));

    doc.push_str("## Buy Plan\n\n");
    doc.push_str(&format!("{}\n\n", fields.buy_plan));

    doc.push_str("## Custody Plan\n\n");
    doc.push_str(&format!("{}\n\n", fields.custody_plan));

    doc.push_str("## Accounting Note\n\n");
    doc.push_str(&format!("{}\n\n", fields.accounting_note));

    doc.push_str(&format!(
        "**Calculated Risk Score:** {}\n\n**Allocation Tier:** {}\n\n",
        report.risk_score,
        report.tier.label()
    ));

    doc.push_str("---\n\n");
    doc.push_str(DISCLAIMER);
    doc.push('\n');

    doc
}

/// Write the report document to a file.
pub fn write_report_doc<P: AsRef<Path>>(
    path: P,
    report: &Report,
    generated_at: &str,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(render_report_doc(report, generated_at).as_bytes())?;
    Ok(())
}

/// Render the shareable link for a profile.
///
/// The profile is encoded as canonical query parameters so the link
/// fully reconstructs the inputs. Values are plain numbers, booleans,
/// and lowercase enum names; nothing needs percent-encoding.
pub fn share_link(profile: &Profile) -> String {
    format!(
        "{SHARE_BASE_URL}?annual_revenue_usd={}&annual_expenses_usd={}&cash_on_hand_usd={}\
         &revenue_volatility={}&gross_margin_pct={}&runway_target_months={}\
         &debt_capacity={}&risk_appetite={}&treasury_objective={}&accounting={}",
        profile.annual_revenue_usd,
        profile.annual_expenses_usd,
        profile.cash_on_hand_usd,
        profile.revenue_volatility.as_str(),
        profile.gross_margin_pct,
        profile.runway_target_months,
        profile.debt_capacity,
        profile.risk_appetite,
        profile.treasury_objective.as_str(),
        profile.accounting.as_str(),
    )
}

/// Parse a shareable link (or bare query string) back into a profile.
///
/// Unknown keys are ignored; missing keys keep their defaults; a value
/// that fails to parse is an error.
pub fn parse_share_link(link: &str) -> anyhow::Result<Profile> {
    let query = match link.split_once('?') {
        Some((_, q)) => q,
        None => link,
    };

    let mut profile = Profile::default();

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("malformed query pair {pair:?}"))?;

        match key {
            "annual_revenue_usd" => profile.annual_revenue_usd = parse_f64(key, value)?,
            "annual_expenses_usd" => profile.annual_expenses_usd = parse_f64(key, value)?,
            "cash_on_hand_usd" => profile.cash_on_hand_usd = parse_f64(key, value)?,
            "gross_margin_pct" => profile.gross_margin_pct = parse_f64(key, value)?,
            "runway_target_months" => profile.runway_target_months = parse_f64(key, value)?,
            "risk_appetite" => profile.risk_appetite = parse_f64(key, value)?,
            "debt_capacity" => {
                profile.debt_capacity = value
                    .parse::<bool>()
                    .map_err(|_| anyhow!("invalid boolean for {key}: {value:?}"))?
            }
            "revenue_volatility" => {
                profile.revenue_volatility = RevenueVolatility::parse(value)
                    .ok_or_else(|| anyhow!("invalid revenue_volatility: {value:?}"))?
            }
            "treasury_objective" => {
                profile.treasury_objective = TreasuryObjective::parse(value)
                    .ok_or_else(|| anyhow!("invalid treasury_objective: {value:?}"))?
            }
            "accounting" => {
                profile.accounting = AccountingStandard::parse(value)
                    .ok_or_else(|| anyhow!("invalid accounting: {value:?}"))?
            }
            _ => {}
        }
    }

    Ok(profile)
}

fn parse_f64(key: &str, value: &str) -> anyhow::Result<f64> {
    value
        .parse::<f64>()
        .map_err(|_| anyhow!("invalid number for {key}: {value:?}"))
}

/// Hex-encode bytes.
fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
