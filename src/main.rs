// src/main.rs
//
// CLI entrypoint for Coffer.
//
// Constraints:
// - Profile precedence:
//     --profile overrides env;
//     if missing use COFFER_PROFILE (default built-in profile).
// - Print concise run header (profile source, profile hash).
// - Evaluate once, render the summary to stdout, then emit requested
//   artifacts (report document, JSON export, shareable link).

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{ArgAction, Parser};
use serde_json::json;

use coffer::config::resolve_effective_profile;
use coffer::engine::evaluate;
use coffer::export::{
    format_pct, format_usd, share_link, write_report_doc, ExportBundle, DISCLAIMER,
};
use coffer::telemetry::{TelemetrySink, SCHEMA_VERSION};

#[derive(Debug, Parser)]
#[command(
    name = "coffer",
    about = "Corporate Bitcoin treasury allocation advisor",
    version
)]
struct Args {
    /// Path to a JSON profile (optional).
    /// If omitted, uses COFFER_PROFILE (default built-in profile).
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Directory to write report.md and export.json into.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Print the JSON export to stdout.
    #[arg(long)]
    json: bool,

    /// Print the shareable link to stdout.
    #[arg(long)]
    share: bool,

    /// Verbosity: -v, -vv
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn fnv1a64(s: &str) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;
    let mut h = FNV_OFFSET;
    for b in s.as_bytes() {
        h ^= *b as u64;
        h = h.wrapping_mul(FNV_PRIME);
    }
    h
}

/// Wall-clock timestamp for export artifacts. Time stays outside the
/// engine; exports are the only place it appears.
fn generated_at() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{secs}s since epoch")
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Resolve profile with proper precedence: CLI > env > default.
    let effective = resolve_effective_profile(args.profile.as_deref())?;
    effective.log_startup();
    let profile = effective.profile;

    let profile_hash = fnv1a64(&format!("{profile:?}"));
    println!(
        "coffer | profile_hash=0x{:016x} | source={}",
        profile_hash,
        effective.source.as_str()
    );

    let report = evaluate(&profile);

    // Human-readable summary.
    println!();
    println!("Recommended BTC Allocation: {}", format_usd(report.btc_amount_usd));
    if report.btc_amount_usd == 0.0 {
        println!("  0.0% (runway not met; cap by excess cash thereafter)");
    } else {
        println!(
            "  {}% of cash on hand (capped by excess cash)",
            format_pct(report.allocation_pct)
        );
    }
    println!("Risk Score:      {}", report.risk_score);
    println!("Allocation Tier: {}", report.tier.label());
    println!("Buy Plan:        {}", report.buy_plan);
    println!("Custody Plan:    {}", report.custody_plan);
    println!("Accounting Note: {}", report.accounting_note);
    if args.verbose > 0 {
        println!(
            "Runway floor:    {} (excess {})",
            format_usd(report.min_operating_cash),
            format_usd(report.excess_cash)
        );
    }
    println!();
    println!("{DISCLAIMER}");

    let bundle = ExportBundle::new(&profile, &report);

    if let Some(out_dir) = &args.out_dir {
        let report_path = out_dir.join("report.md");
        let json_path = out_dir.join("export.json");
        write_report_doc(&report_path, &report, &generated_at())?;
        bundle.write_to_file(&json_path)?;
        eprintln!(
            "wrote {} and {}",
            report_path.display(),
            json_path.display()
        );
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
    }

    if args.share {
        println!("{}", share_link(&profile));
    }

    // One telemetry record per evaluation (off unless configured).
    let mut telemetry = TelemetrySink::from_env();
    telemetry.log_json(&json!({
        "schema_version": SCHEMA_VERSION,
        "profile_source": effective.source.as_str(),
        "profile_hash": format!("0x{profile_hash:016x}"),
        "risk_score": report.risk_score,
        "tier": report.tier.as_str(),
        "allocation_pct": report.allocation_pct,
        "btc_amount_usd": report.btc_amount_usd,
        "has_sufficient_runway": report.has_sufficient_runway,
        "checksum": bundle.determinism.checksum,
    }));
    telemetry.flush();

    Ok(())
}
