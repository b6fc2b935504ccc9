//! CLI Adapter.

mod menu;
mod output;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::app::logging::init_logging;
use crate::app::{Session, SessionOptions};
use crate::domain::date_range::parse_date;
use crate::domain::{AppError, AssetSymbol, AssetType, DateRange, HistoryRange, Interval, MarketProvider};

use output::print_records;

#[derive(Parser)]
#[command(name = "portfolio")]
#[command(version)]
#[command(
    about = "Track cash, stock and crypto holdings against live market prices",
    long_about = None
)]
struct Cli {
    /// Market data provider (mock or yahoo)
    #[arg(long, global = true, env = "PORTFOLIO_MARKET")]
    market: Option<MarketProvider>,
    /// Configuration file (defaults to ./portfolio.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// JSON file the portfolio is loaded from and saved to
    #[arg(long, global = true, env = "PORTFOLIO_STATE")]
    state: Option<PathBuf>,
    /// Start without the starter holdings
    #[arg(long, global = true)]
    empty: bool,
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub(crate) enum Command {
    /// Interactive menu
    #[clap(visible_alias = "m")]
    Menu,
    /// Add funds
    #[clap(visible_alias = "d")]
    Deposit {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },
    /// Withdraw funds
    #[clap(visible_alias = "w")]
    Withdraw {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },
    /// Show available funds
    #[clap(visible_alias = "f")]
    Funds,
    /// List lots with units remaining
    #[clap(visible_alias = "h")]
    Holdings { symbol: Option<AssetSymbol> },
    /// Buy an asset at the live price
    #[clap(visible_alias = "b")]
    Buy {
        symbol: AssetSymbol,
        #[arg(allow_negative_numbers = true)]
        units: f64,
    },
    /// Sell an asset at the live price
    #[clap(visible_alias = "s")]
    Sell {
        symbol: AssetSymbol,
        #[arg(allow_negative_numbers = true)]
        units: f64,
    },
    /// Trending symbols in a region
    #[clap(visible_alias = "t")]
    Trending { region: String },
    /// Historic closing prices
    History {
        #[arg(required = true)]
        symbols: Vec<AssetSymbol>,
        /// 1m, 5m, 15m, 1d, 1wk or 1mo
        #[arg(long, default_value = "1d")]
        interval: Interval,
        /// 1d, 5d, 1mo, 3mo, 6mo, 1y, 5y or max
        #[arg(long, default_value = "1mo")]
        range: HistoryRange,
    },
    /// Exchange or index summary
    #[clap(visible_alias = "x")]
    Exchange { region: String, exchange: AssetSymbol },
    /// Live quotes for held assets
    Info {
        #[arg(required = true)]
        symbols: Vec<AssetSymbol>,
    },
    /// Live quotes for any assets
    #[clap(visible_alias = "q")]
    Quote {
        #[arg(required = true)]
        symbols: Vec<AssetSymbol>,
    },
    /// Value of all holdings at live prices
    #[clap(visible_alias = "v")]
    Value,
    /// One row per held asset
    #[clap(visible_alias = "ls")]
    Investments,
    /// Held assets of one type (stock or crypto)
    ByType {
        #[arg(value_parser = AssetType::parse)]
        asset_type: AssetType,
    },
    /// Held assets whose symbol or name contains a query
    ByName {
        #[arg(required = true)]
        queries: Vec<String>,
    },
    /// Purchases between two dates (inclusive)
    Purchases {
        #[arg(long, value_parser = parse_date)]
        from: NaiveDate,
        #[arg(long, value_parser = parse_date)]
        to: NaiveDate,
    },
    /// Sales between two dates (inclusive)
    Sales {
        #[arg(long, value_parser = parse_date)]
        from: NaiveDate,
        #[arg(long, value_parser = parse_date)]
        to: NaiveDate,
    },
}

impl Command {
    fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::Deposit { .. }
                | Command::Withdraw { .. }
                | Command::Buy { .. }
                | Command::Sell { .. }
        )
    }
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn execute(cli: Cli) -> Result<(), AppError> {
    let options = SessionOptions {
        config_path: cli.config,
        market: cli.market,
        state_path: cli.state,
        empty: cli.empty,
    };
    let mut session = Session::open(&options)?;

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => menu::run_menu(&mut session),
        command => run_command(&mut session, command),
    }
}

/// Run one operation, printing its result and saving state after changes.
pub(crate) fn run_command(session: &mut Session, command: Command) -> Result<(), AppError> {
    let mutating = command.is_mutating();
    let manager = session.manager_mut();

    match command {
        Command::Menu => return Ok(()),
        Command::Deposit { amount } => {
            manager.add_funds(amount)?;
            println!("Deposited (USD) {:.2}. Available funds (USD): {:.2}", amount, manager.available_funds());
        }
        Command::Withdraw { amount } => {
            manager.withdraw_funds(amount)?;
            println!("Withdrew (USD) {:.2}. Available funds (USD): {:.2}", amount, manager.available_funds());
        }
        Command::Funds => println!("Available funds (USD): {:.2}", manager.available_funds()),
        Command::Holdings { symbol } => print_records(&manager.assets_with_holdings(symbol.as_ref())?),
        Command::Buy { symbol, units } => {
            let cost = manager.purchase_asset(&symbol, units)?;
            println!("Purchased {} {} for (USD) {:.2}", units, symbol, cost);
        }
        Command::Sell { symbol, units } => {
            let revenue = manager.sell_asset(&symbol, units)?;
            println!("Sold {} {} for (USD) {:.2}", units, symbol, revenue);
        }
        Command::Trending { region } => print_records(&manager.trending_stocks(&region)?),
        Command::History { symbols, interval, range } => {
            print_records(&manager.historical_data(&symbols, interval, range)?)
        }
        Command::Exchange { region, exchange } => {
            println!("{}", manager.exchange_summary(&region, &exchange)?)
        }
        Command::Info { symbols } => print_records(&manager.asset_information(&symbols)?),
        Command::Quote { symbols } => match symbols.as_slice() {
            [symbol] => println!("{}", manager.asset_quote(symbol)?),
            _ => print_records(&manager.asset_quotes(&symbols)?),
        },
        Command::Value => println!("Portfolio value (USD): {:.2}", manager.portfolio_value()?),
        Command::Investments => print_records(&manager.list_all_investments()?),
        Command::ByType { asset_type } => print_records(&manager.list_assets_by_type(asset_type)?),
        Command::ByName { queries } => print_records(&manager.list_assets_by_name(&queries)?),
        Command::Purchases { from, to } => {
            print_records(&manager.list_purchases_in_range(&DateRange::new(from, to)?))
        }
        Command::Sales { from, to } => {
            print_records(&manager.list_sales_in_range(&DateRange::new(from, to)?))
        }
    }

    if mutating {
        session.save()?;
    }
    Ok(())
}
