pub mod cli;
pub mod logging;
mod portfolio_manager;
mod session;

pub use portfolio_manager::{KNOWN_GOOD_SYMBOLS, PortfolioManager};
pub use session::{Session, SessionOptions};
