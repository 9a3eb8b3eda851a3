// tests/profile_tests.rs
//
// Note: These tests manipulate environment variables and must run serially.
// Use `cargo test --test profile_tests -- --test-threads=1` if flaky.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use coffer::config::{resolve_effective_profile, Profile, ProfileSource, PROFILE_ENV_VAR};
use coffer::types::{AccountingStandard, RevenueVolatility, TreasuryObjective};

// Global mutex to serialize tests that touch environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn write_temp_profile(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("coffer_test_{}_{}.json", std::process::id(), name));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn default_profile_matches_documented_baseline() {
    let profile = Profile::default();

    assert_eq!(profile.annual_revenue_usd, 1_000_000.0);
    assert_eq!(profile.annual_expenses_usd, 700_000.0);
    assert_eq!(profile.cash_on_hand_usd, 150_000.0);
    assert_eq!(profile.revenue_volatility, RevenueVolatility::Medium);
    assert_eq!(profile.gross_margin_pct, 55.0);
    assert_eq!(profile.runway_target_months, 6.0);
    assert!(profile.debt_capacity);
    assert_eq!(profile.risk_appetite, 60.0);
    assert_eq!(profile.treasury_objective, TreasuryObjective::Hedge);
    assert_eq!(profile.accounting, AccountingStandard::Gaap);
}

#[test]
fn cli_path_takes_precedence_over_env() {
    let _guard = ENV_MUTEX.lock().unwrap();
    std::env::remove_var(PROFILE_ENV_VAR);

    let cli_path = write_temp_profile("cli", r#"{"risk_appetite": 90}"#);
    let env_path = write_temp_profile("env", r#"{"risk_appetite": 10}"#);
    std::env::set_var(PROFILE_ENV_VAR, &env_path);

    let effective = resolve_effective_profile(Some(cli_path.as_path())).unwrap();
    assert_eq!(effective.source, ProfileSource::Cli);
    assert_eq!(effective.profile.risk_appetite, 90.0);

    std::env::remove_var(PROFILE_ENV_VAR);
    let _ = fs::remove_file(cli_path);
    let _ = fs::remove_file(env_path);
}

#[test]
fn env_profile_is_used_when_no_cli_path() {
    let _guard = ENV_MUTEX.lock().unwrap();
    std::env::remove_var(PROFILE_ENV_VAR);

    let env_path = write_temp_profile(
        "env_only",
        r#"{"cash_on_hand_usd": 900000, "revenue_volatility": "low"}"#,
    );
    std::env::set_var(PROFILE_ENV_VAR, &env_path);

    let effective = resolve_effective_profile(None).unwrap();
    assert_eq!(effective.source, ProfileSource::Env);
    assert_eq!(effective.profile.cash_on_hand_usd, 900_000.0);
    assert_eq!(
        effective.profile.revenue_volatility,
        RevenueVolatility::Low
    );
    // Missing fields keep defaults.
    assert_eq!(effective.profile.annual_revenue_usd, 1_000_000.0);

    std::env::remove_var(PROFILE_ENV_VAR);
    let _ = fs::remove_file(env_path);
}

#[test]
fn falls_back_to_default_when_nothing_is_set() {
    let _guard = ENV_MUTEX.lock().unwrap();
    std::env::remove_var(PROFILE_ENV_VAR);

    let effective = resolve_effective_profile(None).unwrap();
    assert_eq!(effective.source, ProfileSource::Default);
    assert_eq!(effective.profile, Profile::default());
}

#[test]
fn missing_env_file_is_a_hard_error() {
    let _guard = ENV_MUTEX.lock().unwrap();
    std::env::remove_var(PROFILE_ENV_VAR);

    std::env::set_var(PROFILE_ENV_VAR, "/nonexistent/coffer_profile.json");
    let result = resolve_effective_profile(None);
    assert!(result.is_err());

    std::env::remove_var(PROFILE_ENV_VAR);
}

#[test]
fn invalid_enum_in_profile_file_is_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap();

    let path = write_temp_profile("bad_enum", r#"{"treasury_objective": "speculation"}"#);
    let result = resolve_effective_profile(Some(path.as_path()));
    assert!(result.is_err());

    let _ = fs::remove_file(path);
}
