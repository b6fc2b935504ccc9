//! Report rows produced by portfolio listings.

use std::fmt;

use chrono::{DateTime, Utc};

use super::date_range::format_local;
use super::holding::percent_change;
use super::{AssetSymbol, Holding, SaleRecord};

/// Position summary for one held asset, valued at the live price.
#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentSummary {
    pub symbol: AssetSymbol,
    pub name: String,
    pub quote_type: String,
    pub units_held: f64,
    pub average_price: f64,
    pub current_price: f64,
}

impl InvestmentSummary {
    pub fn current_value(&self) -> f64 {
        self.units_held * self.current_price
    }

    pub fn change_usd(&self) -> f64 {
        self.current_price - self.average_price
    }

    pub fn change_percent(&self) -> f64 {
        percent_change(self.average_price, self.current_price)
    }
}

impl fmt::Display for InvestmentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {} | Symbol: {} | Units: {} | Average Price (USD): {:.2} | \
             Current Price (USD): {:.2} | Value (USD): {:.2} | Change: (USD) {:.2} ({:.2}%)",
            self.name,
            self.symbol,
            self.units_held,
            self.average_price,
            self.current_price,
            self.current_value(),
            self.change_usd(),
            self.change_percent()
        )
    }
}

/// A single lot shown alongside the asset's live price.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingView {
    pub holding: Holding,
    pub current_price: f64,
}

impl fmt::Display for HoldingView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let holding = &self.holding;
        writeln!(
            f,
            "{} - |Purchase Date: {} - |UnitPrice@Purchase: (USD) {}",
            holding.symbol,
            format_local(holding.purchased_at),
            holding.unit_price
        )?;
        writeln!(
            f,
            "|CurrentUnitPrice: {} |Change: (USD) {:.2} - |Change: (%) {:.2}",
            self.current_price,
            holding.change_usd(self.current_price),
            holding.change_percent(self.current_price)
        )?;
        write!(
            f,
            "|Units Purchased: {} less sold: {} = Current Units Balance: {}",
            holding.units,
            holding.units_sold(),
            holding.units_remaining()
        )
    }
}

/// One purchase within a reporting range.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseLine {
    pub symbol: AssetSymbol,
    pub units: f64,
    pub unit_price: f64,
    pub at: DateTime<Utc>,
}

impl From<&Holding> for PurchaseLine {
    fn from(holding: &Holding) -> Self {
        Self {
            symbol: holding.symbol.clone(),
            units: holding.units,
            unit_price: holding.unit_price,
            at: holding.purchased_at,
        }
    }
}

impl fmt::Display for PurchaseLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} purchased {} on {} at ${} each",
            self.symbol,
            self.units,
            format_local(self.at),
            self.unit_price
        )
    }
}

/// One sale within a reporting range.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleLine {
    pub symbol: AssetSymbol,
    pub units: f64,
    pub unit_price: f64,
    pub at: DateTime<Utc>,
}

impl SaleLine {
    pub fn new(symbol: &AssetSymbol, sale: &SaleRecord) -> Self {
        Self {
            symbol: symbol.clone(),
            units: sale.units,
            unit_price: sale.unit_price,
            at: sale.sold_at,
        }
    }
}

impl fmt::Display for SaleLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sold {} on {} at ${} each",
            self.symbol,
            self.units,
            format_local(self.at),
            self.unit_price
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::date_range::local_midnight;
    use chrono::NaiveDate;

    fn summary(average_price: f64, current_price: f64) -> InvestmentSummary {
        InvestmentSummary {
            symbol: AssetSymbol::new("NVDA").unwrap(),
            name: "NVIDIA Corporation".to_string(),
            quote_type: "EQUITY".to_string(),
            units_held: 12.0,
            average_price,
            current_price,
        }
    }

    #[test]
    fn summary_values_position_at_live_price() {
        let row = summary(152.77, 200.0);
        assert_eq!(row.current_value(), 2400.0);
        assert!((row.change_usd() - 47.23).abs() < 1e-9);
        assert!(row.to_string().contains("Value (USD): 2400.00"));
    }

    #[test]
    fn summary_reports_losses_as_negative() {
        let row = summary(200.0, 150.0);
        assert_eq!(row.change_percent(), -25.0);
        assert!(row.to_string().contains("(-25.00%)"));
    }

    #[test]
    fn purchase_line_reads_like_a_ledger_entry() {
        let date = NaiveDate::from_ymd_opt(2021, 10, 1).unwrap();
        let holding =
            Holding::new(AssetSymbol::new("TSLA").unwrap(), local_midnight(date), 10.0, 775.22);
        let line = PurchaseLine::from(&holding);
        assert_eq!(line.to_string(), "TSLA purchased 10 on 2021-10-01 00:00:00 at $775.22 each");
    }

    #[test]
    fn holding_view_shows_balance_after_sales() {
        let date = NaiveDate::from_ymd_opt(2021, 7, 5).unwrap();
        let mut holding =
            Holding::new(AssetSymbol::new("AAPL").unwrap(), local_midnight(date), 20.0, 139.96);
        holding.record_sale(5.0, 150.0, local_midnight(date));
        let view = HoldingView { holding, current_price: 150.0 };
        let text = view.to_string();
        assert!(text.starts_with("AAPL - |Purchase Date: 2021-07-05 00:00:00"));
        assert!(text.contains("less sold: 5 = Current Units Balance: 15"));
    }
}
