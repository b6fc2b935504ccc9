use std::fmt;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use super::AssetSymbol;

/// Live pricing information for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetQuote {
    pub symbol: AssetSymbol,
    /// Display name, or the exchange name for exchange lookups.
    pub name: String,
    /// Market classification such as `EQUITY` or `CRYPTOCURRENCY`.
    pub quote_type: String,
    pub market_time: DateTime<Utc>,
    /// Current price in USD.
    pub price: f64,
    pub change_percent: f64,
    pub change: f64,
    pub previous_close: f64,
    pub open: f64,
}

impl AssetQuote {
    pub fn exchange_summary(&self) -> ExchangeSummary {
        ExchangeSummary {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            price: self.price,
            change_percent: self.change_percent,
            change: self.change,
            quote_type: self.quote_type.clone(),
            previous_close: self.previous_close,
            open: self.open,
        }
    }
}

impl fmt::Display for AssetQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - Current Price (USD): {} - % change: {:.3} - $ change: {:.3}",
            self.symbol, self.price, self.change_percent, self.change
        )
    }
}

/// Summary of an exchange or index, built from its quote.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeSummary {
    pub name: String,
    pub symbol: AssetSymbol,
    pub price: f64,
    pub change_percent: f64,
    pub change: f64,
    pub quote_type: String,
    pub previous_close: f64,
    pub open: f64,
}

impl fmt::Display for ExchangeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} || Current Price (USD): {} || % change: {:.3} || $ change: {:.3} \
             || Quote Type: {} || Previous Close: (USD) {} || Market Open: (USD) {}",
            self.name,
            self.symbol,
            self.price,
            self.change_percent,
            self.change,
            self.quote_type,
            self.previous_close,
            self.open
        )
    }
}

/// One closing price in a historic series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub at: DateTime<Utc>,
    pub close: f64,
}

/// Historic closing prices for one asset, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceHistory {
    pub symbol: AssetSymbol,
    pub points: Vec<PricePoint>,
}

impl PriceHistory {
    /// Pair timestamps with closes, dropping points whose close is missing.
    pub fn from_series(
        symbol: AssetSymbol,
        timestamps: &[i64],
        closes: &[Option<f64>],
    ) -> Self {
        let points = timestamps
            .iter()
            .zip(closes)
            .filter_map(|(secs, close)| {
                let at = DateTime::<Utc>::from_timestamp(*secs, 0)?;
                close.map(|close| PricePoint { at, close })
            })
            .collect();
        Self { symbol, points }
    }
}

impl fmt::Display for PriceHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HISTORIC DATA: {}", self.symbol)?;
        for point in &self.points {
            write!(
                f,
                "\nDate: {} - Closing Price (USD): {}",
                point.at.with_timezone(&Local).format("%d/%m/%Y %H:%M:%S"),
                point.close
            )?;
        }
        Ok(())
    }
}
