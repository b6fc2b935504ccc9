mod common;

use chrono::Local;
use common::TestContext;
use predicates::prelude::*;

#[test]
fn funds_start_at_zero() {
    let ctx = TestContext::new();

    ctx.mock_cli()
        .arg("funds")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available funds (USD): 0.00"));
}

#[test]
fn deposit_then_buy_persists_state() {
    let ctx = TestContext::new();

    ctx.mock_cli()
        .args(["deposit", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Available funds (USD): 1000.00"));
    assert_eq!(ctx.read_state().available_funds, 1000.0);

    ctx.mock_cli()
        .args(["b", "tsla", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Purchased 2 TSLA for (USD) 246.90"));

    let state = ctx.read_state();
    assert!((state.available_funds - 753.10).abs() < 1e-9);
    assert_eq!(state.holdings.len(), 5);
    assert_eq!(state.holdings[4].unit_price, 123.45);

    ctx.mock_cli()
        .arg("f")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available funds (USD): 753.10"));
}

#[test]
fn sell_credits_revenue_and_records_sale() {
    let ctx = TestContext::new();

    ctx.mock_cli()
        .args(["sell", "AAPL", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sold 5 AAPL for (USD) 617.25"));

    let state = ctx.read_state();
    assert_eq!(state.available_funds, 617.25);
    let aapl = state.holdings.iter().find(|h| h.symbol.as_str() == "AAPL").unwrap();
    assert_eq!(aapl.units_remaining(), 15.0);

    let today = Local::now().format("%Y-%m-%d").to_string();
    ctx.mock_cli()
        .args(["sales", "--from", &today, "--to", &today])
        .assert()
        .success()
        .stdout(predicate::str::contains("AAPL sold 5 on"))
        .stdout(predicate::str::contains("at $123.45 each"));
}

#[test]
fn overselling_fails_without_changing_state() {
    let ctx = TestContext::new();

    ctx.mock_cli()
        .args(["sell", "AAPL", "25"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Insufficient holdings of AAPL"));

    assert!(!ctx.state_path().exists());
}

#[test]
fn withdrawing_more_than_available_fails() {
    let ctx = TestContext::new();

    ctx.mock_cli()
        .args(["withdraw", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Insufficient funds: requested 50.00, available 0.00"));
}

#[test]
fn negative_amounts_are_rejected() {
    let ctx = TestContext::new();

    ctx.mock_cli()
        .args(["deposit", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Invalid amount -5"));
}

#[test]
fn portfolio_value_uses_live_prices() {
    let ctx = TestContext::new();

    ctx.mock_cli()
        .arg("value")
        .assert()
        .success()
        .stdout(predicate::str::contains("Portfolio value (USD): 5190.40"));
}

#[test]
fn empty_portfolio_lists_no_records() {
    let ctx = TestContext::new();

    ctx.mock_cli()
        .args(["--empty", "investments"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No records to show."));
}

#[test]
fn investments_are_listed_per_symbol() {
    let ctx = TestContext::new();

    ctx.mock_cli()
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: Asset TSLA | Symbol: TSLA | Units: 10"))
        .stdout(predicate::str::contains("Average Price (USD): 775.22"))
        .stdout(predicate::str::contains("Symbol: BTC-USD"));
}

#[test]
fn investments_filter_by_type_and_name() {
    let ctx = TestContext::new();

    ctx.mock_cli()
        .args(["by-type", "crypto"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BTC-USD"))
        .stdout(predicate::str::contains("TSLA").not());

    ctx.mock_cli()
        .args(["by-name", "nvd", "btc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Symbol: NVDA"))
        .stdout(predicate::str::contains("Symbol: BTC-USD"))
        .stdout(predicate::str::contains("Symbol: AAPL").not());

    ctx.mock_cli().args(["by-type", "bonds"]).assert().failure();
}

#[test]
fn purchases_are_listed_oldest_first() {
    let ctx = TestContext::new();

    let output = ctx
        .mock_cli()
        .args(["purchases", "--from", "2021-01-01", "--to", "2021-12-31"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("BTC-USD purchased 0.0445881 on 2021-02-09"));
    assert!(lines[3].starts_with("TSLA purchased 10 on 2021-10-01"));
}

#[test]
fn reversed_date_range_is_an_error() {
    let ctx = TestContext::new();

    ctx.mock_cli()
        .args(["purchases", "--from", "2021-12-31", "--to", "2021-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Invalid date range"));
}

#[test]
fn market_lookups_use_the_offline_client() {
    let ctx = TestContext::new();

    ctx.mock_cli().args(["trending", "US"]).assert().success().stdout("TSLA\nAAPL\n");

    ctx.mock_cli()
        .args(["q", "TSLA"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TSLA - Current Price (USD): 123.45 - % change: 1.234"));

    ctx.mock_cli()
        .args(["x", "US", "^DJI"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NYSE - ^DJI || Current Price (USD): 123.45"));

    ctx.mock_cli()
        .args(["history", "AAPL", "--range", "5d"])
        .assert()
        .success()
        .stdout(predicate::str::contains("HISTORIC DATA: AAPL"))
        .stdout(predicate::str::contains("Closing Price (USD): 104"));
}

#[test]
fn info_only_reports_held_assets() {
    let ctx = TestContext::new();

    ctx.mock_cli()
        .args(["info", "TSLA", "AMZN"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TSLA - Current Price"))
        .stdout(predicate::str::contains("AMZN").not());
}

#[test]
fn holdings_show_lot_details() {
    let ctx = TestContext::new();

    ctx.mock_cli()
        .args(["h", "TSLA"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TSLA - |Purchase Date: 2021-10-01 00:00:00"))
        .stdout(predicate::str::contains("Current Units Balance: 10"));
}

#[test]
fn invalid_history_interval_is_rejected() {
    let ctx = TestContext::new();

    ctx.mock_cli()
        .args(["history", "AAPL", "--interval", "2h"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("2h"));
}

#[test]
fn yahoo_market_requires_an_api_key() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["--market", "yahoo", "funds"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: No market API key configured"));
}

#[test]
fn market_can_come_from_the_environment() {
    let ctx = TestContext::new();

    ctx.cli()
        .env("PORTFOLIO_MARKET", "mock")
        .arg("value")
        .assert()
        .success()
        .stdout(predicate::str::contains("Portfolio value (USD): 5190.40"));
}

#[test]
fn config_file_selects_the_market() {
    let ctx = TestContext::new();
    ctx.write_config("[market]\nprovider = \"mock\"\n");

    ctx.cli().arg("funds").assert().success();
}

#[test]
fn invalid_config_is_reported() {
    let ctx = TestContext::new();
    ctx.write_config("[market]\nprovider = \"bloomberg\"\n");

    ctx.cli()
        .arg("funds")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Failed to parse configuration"));
}

#[test]
fn history_blocks_are_not_padded_with_blank_lines() {
    let ctx = TestContext::new();

    let output = ctx.mock_cli().args(["history", "AAPL", "MSFT", "--range", "5d"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 12);
    assert!(!stdout.contains("\n\n"));
}

#[test]
fn malformed_dates_name_the_expected_format() {
    let ctx = TestContext::new();

    ctx.mock_cli()
        .args(["sales", "--from", "2021-13-01", "--to", "2021-12-31"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date '2021-13-01': expected YYYY-MM-DD"));
}

#[test]
fn hand_edited_state_with_negative_funds_is_refused() {
    let ctx = TestContext::new();
    std::fs::write(ctx.state_path(), r#"{"available_funds": -10.0, "holdings": []}"#).unwrap();

    ctx.mock_cli()
        .arg("funds")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Invalid portfolio state: available funds -10"));
}
