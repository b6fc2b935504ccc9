//! Response bodies of the Yahoo Finance compatible API.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{AssetQuote, AssetSymbol};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct QuoteEnvelope {
    #[serde(default)]
    pub quote_response: Option<QuoteResponse>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct QuoteResponse {
    #[serde(default)]
    pub result: Vec<QuoteResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct QuoteResult {
    pub symbol: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub full_exchange_name: Option<String>,
    #[serde(default)]
    pub quote_type: Option<String>,
    #[serde(default)]
    pub regular_market_time: Option<i64>,
    #[serde(default)]
    pub regular_market_price: f64,
    #[serde(default)]
    pub regular_market_change: f64,
    #[serde(default)]
    pub regular_market_change_percent: f64,
    #[serde(default)]
    pub regular_market_previous_close: f64,
    #[serde(default)]
    pub regular_market_open: f64,
}

impl QuoteResult {
    /// Display name, falling back to the short name and then the symbol.
    pub fn asset_name(&self) -> String {
        [&self.display_name, &self.short_name]
            .into_iter()
            .flatten()
            .find(|name| !name.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| self.symbol.clone())
    }

    pub fn into_quote(self, symbol: AssetSymbol, name: String) -> AssetQuote {
        let market_time = self
            .regular_market_time
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        AssetQuote {
            symbol,
            name,
            quote_type: self.quote_type.unwrap_or_default(),
            market_time,
            price: self.regular_market_price,
            change_percent: self.regular_market_change_percent,
            change: self.regular_market_change,
            previous_close: self.regular_market_previous_close,
            open: self.regular_market_open,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct TrendingEnvelope {
    #[serde(default)]
    pub finance: Option<TrendingFinance>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct TrendingFinance {
    #[serde(default)]
    pub result: Vec<TrendingResult>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct TrendingResult {
    #[serde(default)]
    pub quotes: Vec<TrendingQuote>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct TrendingQuote {
    pub symbol: String,
}

impl TrendingEnvelope {
    pub fn into_symbols(self) -> Vec<String> {
        self.finance
            .map(|finance| finance.result)
            .unwrap_or_default()
            .into_iter()
            .flat_map(|result| result.quotes)
            .map(|quote| quote.symbol)
            .collect()
    }
}

/// Spark series keyed by symbol.
pub(super) type SparkEnvelope = HashMap<String, SparkSeries>;

#[derive(Debug, Default, Deserialize)]
pub(super) struct SparkSeries {
    #[serde(default)]
    pub timestamp: Vec<i64>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}
