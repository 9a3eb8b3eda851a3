// tests/export_tests.rs
//
// Export artifacts: JSON bundle shape, checksum determinism, report
// document contents, and share-link round trips.

use coffer::engine::evaluate;
use coffer::export::{
    compute_checksum, parse_share_link, render_report_doc, share_link, ExportBundle, DISCLAIMER,
    SHARE_BASE_URL,
};
use coffer::types::{AccountingStandard, RevenueVolatility, TreasuryObjective};
use coffer::Profile;

#[test]
fn json_export_pairs_inputs_with_formatted_results() {
    let profile = Profile {
        cash_on_hand_usd: 1_000_000.0,
        ..Profile::default()
    };
    let report = evaluate(&profile);
    let bundle = ExportBundle::new(&profile, &report);

    let value = serde_json::to_value(&bundle).unwrap();

    // Inputs round-trip as a profile.
    let inputs: Profile = serde_json::from_value(value["inputs"].clone()).unwrap();
    assert_eq!(inputs, profile);

    // Results carry the exported field labels with formatted values.
    let results = &value["results"];
    assert_eq!(results["Recommended BTC Allocation (%)"], "35.0");
    assert_eq!(results["Recommended BTC Allocation (USD)"], "$350,000");
    assert_eq!(results["Buy Plan"], report.buy_plan);
    assert_eq!(results["Custody Plan"], report.custody_plan);
    assert_eq!(results["Accounting Note"], report.accounting_note);

    assert!(!value["determinism"]["checksum"]
        .as_str()
        .unwrap()
        .is_empty());
}

#[test]
fn checksum_is_deterministic_and_sensitive() {
    let profile = Profile::default();
    let report = evaluate(&profile);

    let checksum1 = compute_checksum(&profile, &report);
    let checksum2 = compute_checksum(&profile, &report);
    assert_eq!(checksum1, checksum2);

    let other_profile = Profile {
        cash_on_hand_usd: 2_000_000.0,
        ..Profile::default()
    };
    let other_report = evaluate(&other_profile);
    let checksum3 = compute_checksum(&other_profile, &other_report);
    assert_ne!(checksum1, checksum3);
}

#[test]
fn report_doc_contains_all_fields_and_disclaimer() {
    let profile = Profile {
        cash_on_hand_usd: 1_000_000.0,
        ..Profile::default()
    };
    let report = evaluate(&profile);
    let doc = render_report_doc(&report, "2026-08-06");

    assert!(doc.starts_with("# Bitcoin Treasury Allocation Report"));
    assert!(doc.contains("**Generated:** 2026-08-06"));
    assert!(doc.contains("$350,000"));
    assert!(doc.contains("35.0% of cash on hand (capped by excess cash)"));
    assert!(doc.contains(&report.buy_plan));
    assert!(doc.contains(&report.custody_plan));
    assert!(doc.contains(&report.accounting_note));
    assert!(doc.contains("**Calculated Risk Score:** 62"));
    assert!(doc.contains("**Allocation Tier:** Backbone"));
    assert!(doc.trim_end().ends_with(DISCLAIMER));
}

#[test]
fn report_doc_shows_runway_gap_when_allocation_is_zero() {
    let report = evaluate(&Profile::default());
    assert_eq!(report.btc_amount_usd, 0.0);

    let doc = render_report_doc(&report, "2026-08-06");
    assert!(doc.contains("$0"));
    assert!(doc.contains("0.0% (runway not met; cap by excess cash thereafter)"));
}

#[test]
fn share_link_round_trips_the_profile() {
    let profile = Profile {
        annual_revenue_usd: 2_500_000.0,
        annual_expenses_usd: 1_100_000.5,
        cash_on_hand_usd: 780_000.0,
        revenue_volatility: RevenueVolatility::High,
        gross_margin_pct: 62.5,
        runway_target_months: 9.0,
        debt_capacity: false,
        risk_appetite: 37.0,
        treasury_objective: TreasuryObjective::Growth,
        accounting: AccountingStandard::Ifrs,
    };

    let link = share_link(&profile);
    assert!(link.starts_with(SHARE_BASE_URL));

    let parsed = parse_share_link(&link).unwrap();
    assert_eq!(parsed, profile);
}

#[test]
fn share_link_parsing_defaults_missing_keys_and_ignores_unknown() {
    let parsed =
        parse_share_link("https://coffer.tools/simulator?risk_appetite=85&utm_source=mail")
            .unwrap();
    assert_eq!(parsed.risk_appetite, 85.0);
    assert_eq!(parsed.annual_expenses_usd, 700_000.0);
}

#[test]
fn share_link_parsing_rejects_bad_values() {
    assert!(parse_share_link("x?risk_appetite=lots").is_err());
    assert!(parse_share_link("x?revenue_volatility=extreme").is_err());
    assert!(parse_share_link("x?debt_capacity=maybe").is_err());
    assert!(parse_share_link("x?accounting").is_err());
}
