use std::io;

use thiserror::Error;

/// Library-wide error type for portfolio operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Portfolio state could not be encoded or decoded.
    #[error("Invalid portfolio state: {0}")]
    State(#[from] serde_json::Error),

    /// Portfolio state decoded but breaks a balance or unit invariant.
    #[error("Invalid portfolio state: {0}")]
    InvalidState(String),

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration values are out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No API key is available for the market data provider.
    #[error("No market API key configured. Set PORTFOLIO_API_KEYS or [market].api_keys")]
    MissingApiKey,

    /// Asset symbol failed validation.
    #[error("Invalid asset symbol '{0}'")]
    InvalidSymbol(String),

    /// Asset symbol is well formed but the market does not know it.
    #[error("Unknown asset symbol '{0}'")]
    UnknownSymbol(String),

    /// Asset type is not one of the supported kinds.
    #[error("Invalid asset type '{0}': enter 'stock' or 'crypto'")]
    InvalidAssetType(String),

    /// Interval or range token is not supported by the market API.
    #[error("Invalid {kind} '{value}': expected one of {expected}")]
    InvalidQuery { kind: &'static str, value: String, expected: &'static str },

    /// Monetary amount or unit count is not a positive finite number.
    #[error("Invalid amount {0}: must be a positive number")]
    InvalidAmount(f64),

    /// Date is not a `YYYY-MM-DD` calendar date.
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Date range has its start after its end.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: String, end: String },

    /// Cash balance does not cover the operation.
    #[error("Insufficient funds: requested {requested:.2}, available {available:.2}")]
    InsufficientFunds { requested: f64, available: f64 },

    /// Not enough units of the asset are held to sell.
    #[error("Insufficient holdings of {symbol}: requested {requested}, held {held}")]
    InsufficientHoldings { symbol: String, requested: f64, held: f64 },

    /// No live quote could be obtained for the asset.
    #[error("No live quote available for {0}")]
    QuoteUnavailable(String),

    /// No exchange matched the requested symbol and region.
    #[error("No exchange information for {exchange} in region {region}")]
    ExchangeNotFound { region: String, exchange: String },

    /// Market data API failure.
    #[error("Market API error{}: {message}", .status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    MarketApi { message: String, status: Option<u16> },

    /// Interactive prompt failed.
    #[error("Prompt failed: {0}")]
    Prompt(String),
}

impl AppError {
    pub(crate) fn market_api<S: Into<String>>(message: S, status: Option<u16>) -> Self {
        AppError::MarketApi { message: message.into(), status }
    }
}
