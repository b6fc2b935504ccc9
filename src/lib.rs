//! portfolio: track cash, stock and crypto holdings against live market prices.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use adapters::{MockMarketClient, YahooClient, create_market_client};
pub use app::{PortfolioManager, Session, SessionOptions};
pub use domain::{
    AppConfig, AppError, AssetQuote, AssetSymbol, AssetType, DateRange, HistoryRange, Interval,
    MarketProvider, Portfolio,
};
pub use ports::{Clock, MarketClient, PortfolioStore};
