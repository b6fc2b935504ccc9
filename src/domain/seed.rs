//! Starter holdings loaded into a fresh portfolio.

use chrono::NaiveDate;

use super::date_range::local_midnight;
use super::{AppError, AssetSymbol, Holding, Portfolio};

/// Symbol, purchase date, units, unit price.
const STARTER_LOTS: [(&str, (i32, u32, u32), f64, f64); 4] = [
    ("TSLA", (2021, 10, 1), 10.0, 775.22),
    ("AAPL", (2021, 7, 5), 20.0, 139.96),
    ("NVDA", (2021, 4, 14), 12.0, 152.77),
    ("BTC-USD", (2021, 2, 9), 0.0445881, 44854.95),
];

/// Portfolio with no cash and the four starter lots.
pub fn starter_portfolio() -> Result<Portfolio, AppError> {
    let holdings = STARTER_LOTS
        .iter()
        .map(|(symbol, (year, month, day), units, unit_price)| {
            let date = NaiveDate::from_ymd_opt(*year, *month, *day)
                .ok_or_else(|| AppError::InvalidDate(format!("{year}-{month:02}-{day:02}")))?;
            Ok(Holding::new(AssetSymbol::new(symbol)?, local_midnight(date), *units, *unit_price))
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(Portfolio::new(0.0, holdings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_portfolio_has_four_lots_and_no_cash() {
        let portfolio = starter_portfolio().unwrap();
        assert_eq!(portfolio.available_funds, 0.0);
        assert_eq!(portfolio.holdings.len(), 4);
        let symbols: Vec<String> =
            portfolio.held_symbols().iter().map(|s| s.to_string()).collect();
        assert_eq!(symbols, ["TSLA", "AAPL", "NVDA", "BTC-USD"]);
    }

    #[test]
    fn starter_lots_keep_purchase_prices() {
        let portfolio = starter_portfolio().unwrap();
        let tsla = AssetSymbol::new("TSLA").unwrap();
        let average = portfolio.average_purchase_price(&tsla).unwrap();
        assert!((average - 775.22).abs() < 1e-9);
        assert_eq!(portfolio.units_held(&tsla), 10.0);
    }
}
