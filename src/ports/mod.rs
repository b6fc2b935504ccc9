mod clock;
mod market_client;
mod portfolio_store;

pub use clock::Clock;
pub use market_client::MarketClient;
pub use portfolio_store::PortfolioStore;
