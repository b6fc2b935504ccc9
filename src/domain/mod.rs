pub mod asset_type;
pub mod configuration;
pub mod date_range;
pub mod error;
pub mod holding;
pub mod market_query;
pub mod portfolio;
pub mod quote;
pub mod report;
pub mod seed;
pub mod symbol;

pub use asset_type::AssetType;
pub use configuration::{AppConfig, MarketConfig, MarketProvider};
pub use date_range::DateRange;
pub use error::AppError;
pub use holding::{Holding, SaleRecord};
pub use market_query::{HistoryRange, Interval};
pub use portfolio::Portfolio;
pub use quote::{AssetQuote, ExchangeSummary, PriceHistory, PricePoint};
pub use report::{HoldingView, InvestmentSummary, PurchaseLine, SaleLine};
pub use seed::starter_portfolio;
pub use symbol::AssetSymbol;
