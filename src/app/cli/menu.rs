//! Interactive menu over every portfolio operation.

use std::io::ErrorKind;
use std::str::FromStr;

use dialoguer::{Error as DialoguerError, Input, Select};

use super::{Command, run_command};
use crate::app::Session;
use crate::domain::date_range::parse_date;
use crate::domain::{AppError, AssetSymbol, AssetType, HistoryRange, Interval};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    AddFunds,
    WithdrawFunds,
    Holdings,
    AvailableFunds,
    Buy,
    Sell,
    Trending,
    History,
    Exchange,
    AssetInformation,
    AssetQuotes,
    AssetQuote,
    PortfolioValue,
    Investments,
    ByType,
    ByName,
    Purchases,
    Sales,
    Exit,
}

impl MenuItem {
    const ALL: [MenuItem; 19] = [
        MenuItem::AddFunds,
        MenuItem::WithdrawFunds,
        MenuItem::Holdings,
        MenuItem::AvailableFunds,
        MenuItem::Buy,
        MenuItem::Sell,
        MenuItem::Trending,
        MenuItem::History,
        MenuItem::Exchange,
        MenuItem::AssetInformation,
        MenuItem::AssetQuotes,
        MenuItem::AssetQuote,
        MenuItem::PortfolioValue,
        MenuItem::Investments,
        MenuItem::ByType,
        MenuItem::ByName,
        MenuItem::Purchases,
        MenuItem::Sales,
        MenuItem::Exit,
    ];

    fn title(&self) -> &'static str {
        match self {
            MenuItem::AddFunds => "Add funds",
            MenuItem::WithdrawFunds => "Withdraw funds",
            MenuItem::Holdings => "Assets with holdings",
            MenuItem::AvailableFunds => "Available funds",
            MenuItem::Buy => "Purchase asset",
            MenuItem::Sell => "Sell asset",
            MenuItem::Trending => "Trending stocks",
            MenuItem::History => "Historical data",
            MenuItem::Exchange => "Exchange summary",
            MenuItem::AssetInformation => "Asset information",
            MenuItem::AssetQuotes => "Asset quotes",
            MenuItem::AssetQuote => "Asset quote",
            MenuItem::PortfolioValue => "Portfolio value",
            MenuItem::Investments => "List all investments",
            MenuItem::ByType => "List assets by type",
            MenuItem::ByName => "List assets by name",
            MenuItem::Purchases => "Purchases in date range",
            MenuItem::Sales => "Sales in date range",
            MenuItem::Exit => "Exit",
        }
    }
}

/// Loop over the menu until Exit or Esc. Operation errors are printed and the
/// loop continues.
pub(super) fn run_menu(session: &mut Session) -> Result<(), AppError> {
    let items: Vec<&str> = MenuItem::ALL.iter().map(MenuItem::title).collect();

    loop {
        let selection = Select::new()
            .with_prompt("Portfolio Manager")
            .items(&items)
            .default(0)
            .interact_opt()
            .map_err(|err| AppError::Prompt(format!("Failed to select operation: {}", err)))?;

        let Some(item) = selection.map(|index| MenuItem::ALL[index]) else {
            break;
        };
        if item == MenuItem::Exit {
            break;
        }

        println!("\n== {} ==", item.title());
        match prompt_command(item) {
            Ok(Some(command)) => {
                if let Err(err) = run_command(session, command) {
                    eprintln!("Error: {}", err);
                }
            }
            Ok(None) => println!("Cancelled."),
            Err(err) => eprintln!("Error: {}", err),
        }
        println!();
    }

    session.save()
}

/// Collect the inputs an operation needs. `None` when the user cancels.
fn prompt_command(item: MenuItem) -> Result<Option<Command>, AppError> {
    let command = match item {
        MenuItem::AddFunds => {
            prompt_parsed::<f64>("Amount to add (USD)")?.map(|amount| Command::Deposit { amount })
        }
        MenuItem::WithdrawFunds => prompt_parsed::<f64>("Amount to withdraw (USD)")?
            .map(|amount| Command::Withdraw { amount }),
        MenuItem::Holdings => match prompt_text("Symbol (leave empty for all)", true)? {
            None => None,
            Some(raw) if raw.is_empty() => Some(Command::Holdings { symbol: None }),
            Some(raw) => Some(Command::Holdings { symbol: Some(AssetSymbol::new(&raw)?) }),
        },
        MenuItem::AvailableFunds => Some(Command::Funds),
        MenuItem::Buy => prompt_trade()?.map(|(symbol, units)| Command::Buy { symbol, units }),
        MenuItem::Sell => prompt_trade()?.map(|(symbol, units)| Command::Sell { symbol, units }),
        MenuItem::Trending => {
            prompt_text("Region (e.g. US, GB)", false)?.map(|region| Command::Trending { region })
        }
        MenuItem::History => {
            let Some(symbols) = prompt_symbols("Symbols (comma separated)")? else {
                return Ok(None);
            };
            let Some(interval) = prompt_choice("Interval", &Interval::ALL, 3)? else {
                return Ok(None);
            };
            let Some(range) = prompt_choice("Range", &HistoryRange::ALL, 2)? else {
                return Ok(None);
            };
            Some(Command::History { symbols, interval, range })
        }
        MenuItem::Exchange => {
            let Some(region) = prompt_text("Region (e.g. US)", false)? else {
                return Ok(None);
            };
            prompt_parsed::<AssetSymbol>("Exchange symbol (e.g. ^DJI)")?
                .map(|exchange| Command::Exchange { region, exchange })
        }
        MenuItem::AssetInformation => prompt_symbols("Symbols (comma separated)")?
            .map(|symbols| Command::Info { symbols }),
        MenuItem::AssetQuotes => prompt_symbols("Symbols (comma separated)")?
            .map(|symbols| Command::Quote { symbols }),
        MenuItem::AssetQuote => prompt_parsed::<AssetSymbol>("Symbol")?
            .map(|symbol| Command::Quote { symbols: vec![symbol] }),
        MenuItem::PortfolioValue => Some(Command::Value),
        MenuItem::Investments => Some(Command::Investments),
        MenuItem::ByType => {
            prompt_choice("Asset type", &AssetType::ALL, 0)?.map(|asset_type| Command::ByType { asset_type })
        }
        MenuItem::ByName => prompt_text("Names (comma separated)", false)?
            .map(|raw| Command::ByName { queries: split_list(&raw) }),
        MenuItem::Purchases => prompt_dates()?.map(|(from, to)| Command::Purchases { from, to }),
        MenuItem::Sales => prompt_dates()?.map(|(from, to)| Command::Sales { from, to }),
        MenuItem::Exit => None,
    };
    Ok(command)
}

fn prompt_trade() -> Result<Option<(AssetSymbol, f64)>, AppError> {
    let Some(symbol) = prompt_parsed::<AssetSymbol>("Symbol")? else {
        return Ok(None);
    };
    Ok(prompt_parsed::<f64>("Units")?.map(|units| (symbol, units)))
}

fn prompt_dates() -> Result<Option<(chrono::NaiveDate, chrono::NaiveDate)>, AppError> {
    let Some(from) = prompt_validated("Start date (YYYY-MM-DD)", parse_date)? else {
        return Ok(None);
    };
    Ok(prompt_validated("End date (YYYY-MM-DD)", parse_date)?.map(|to| (from, to)))
}

fn prompt_symbols(prompt: &str) -> Result<Option<Vec<AssetSymbol>>, AppError> {
    prompt_validated(prompt, |raw: &str| -> Result<Vec<AssetSymbol>, AppError> {
        let symbols = AssetSymbol::parse_all(&split_list(raw))?;
        if symbols.is_empty() {
            return Err(AppError::InvalidSymbol(raw.to_string()));
        }
        Ok(symbols)
    })
}

fn prompt_parsed<T>(prompt: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    prompt_validated(prompt, |raw| raw.trim().parse::<T>().map_err(|err| err.to_string()))
}

/// Ask until the input parses. Esc or Ctrl-C cancels.
fn prompt_validated<T, E, F>(prompt: &str, parse: F) -> Result<Option<T>, AppError>
where
    E: std::fmt::Display,
    F: Fn(&str) -> Result<T, E>,
{
    let result = Input::<String>::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| -> Result<(), String> {
            parse(input).map(|_| ()).map_err(|err| err.to_string())
        })
        .interact_text();

    match result {
        Ok(value) => parse(&value).map(Some).map_err(|err| AppError::Prompt(err.to_string())),
        Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(None),
        Err(err) => Err(AppError::Prompt(format!("Failed to read input: {}", err))),
    }
}

fn prompt_text(prompt: &str, allow_empty: bool) -> Result<Option<String>, AppError> {
    match Input::<String>::new().with_prompt(prompt).allow_empty(allow_empty).interact_text() {
        Ok(value) => Ok(Some(value.trim().to_string())),
        Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(None),
        Err(err) => Err(AppError::Prompt(format!("Failed to read input: {}", err))),
    }
}

fn prompt_choice<T: Copy + std::fmt::Display>(
    prompt: &str,
    options: &[T],
    default: usize,
) -> Result<Option<T>, AppError> {
    let items: Vec<String> = options.iter().map(ToString::to_string).collect();
    let selection = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(default)
        .interact_opt()
        .map_err(|err| AppError::Prompt(format!("Failed to select {}: {}", prompt.to_lowercase(), err)))?;

    Ok(selection.map(|index| options[index]))
}

/// Split a comma or whitespace separated list, dropping empty entries.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(|ch: char| ch == ',' || ch.is_whitespace())
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_lists_every_operation_then_exit() {
        assert_eq!(MenuItem::ALL.len(), 19);
        assert_eq!(MenuItem::ALL.last(), Some(&MenuItem::Exit));
        let titles: std::collections::HashSet<&str> =
            MenuItem::ALL.iter().map(MenuItem::title).collect();
        assert_eq!(titles.len(), 19);
    }

    #[test]
    fn lists_split_on_commas_and_spaces() {
        assert_eq!(split_list("tsla, aapl  btc-usd,,"), ["tsla", "aapl", "btc-usd"]);
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn default_choices_point_at_common_values() {
        assert_eq!(Interval::ALL[3], Interval::OneDay);
        assert_eq!(HistoryRange::ALL[2], HistoryRange::OneMonth);
    }
}
