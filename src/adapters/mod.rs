pub mod json_portfolio_store;
pub mod market_client_factory;
pub mod mock_market_client;
pub mod system_clock;
pub mod yahoo;

pub use json_portfolio_store::JsonFilePortfolioStore;
pub use market_client_factory::create_market_client;
pub use mock_market_client::MockMarketClient;
pub use system_clock::SystemClock;
pub use yahoo::YahooClient;
