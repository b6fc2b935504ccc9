mod fake_market_client;
mod fixed_clock;
mod memory_portfolio_store;

pub use fake_market_client::FakeMarketClient;
pub use fixed_clock::FixedClock;
pub use memory_portfolio_store::MemoryPortfolioStore;
