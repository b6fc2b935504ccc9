//! Wiring of configuration, market client and saved state into a manager.

use std::path::PathBuf;

use crate::adapters::{JsonFilePortfolioStore, SystemClock, create_market_client};
use crate::app::PortfolioManager;
use crate::domain::configuration::load_config;
use crate::domain::{AppError, MarketProvider, Portfolio, starter_portfolio};
use crate::ports::{Clock, MarketClient, PortfolioStore};

/// How a session should be opened.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Configuration file; `./portfolio.toml` is used when present.
    pub config_path: Option<PathBuf>,
    /// Overrides the configured market provider.
    pub market: Option<MarketProvider>,
    /// JSON state file loaded at start and saved after changes.
    pub state_path: Option<PathBuf>,
    /// Start without the starter holdings when no state is saved.
    pub empty: bool,
}

pub struct Session {
    manager: PortfolioManager,
    store: Option<Box<dyn PortfolioStore>>,
}

impl Session {
    pub fn open(options: &SessionOptions) -> Result<Self, AppError> {
        let config = load_config(options.config_path.as_deref())?;
        let provider = options.market.unwrap_or(config.market.provider);
        tracing::debug!(?config, %provider, "opening session");

        let market = create_market_client(provider, &config.market)?;
        let store = options
            .state_path
            .as_ref()
            .map(|path| Box::new(JsonFilePortfolioStore::new(path)) as Box<dyn PortfolioStore>);

        Self::with_parts(market, Box::new(SystemClock), store, options.empty)
    }

    pub fn with_parts(
        market: Box<dyn MarketClient>,
        clock: Box<dyn Clock>,
        store: Option<Box<dyn PortfolioStore>>,
        empty: bool,
    ) -> Result<Self, AppError> {
        let saved = match &store {
            Some(store) => store.load()?,
            None => None,
        };
        let portfolio = match saved {
            Some(portfolio) => portfolio,
            None if empty => Portfolio::default(),
            None => starter_portfolio()?,
        };

        Ok(Self { manager: PortfolioManager::new(portfolio, market, clock), store })
    }

    pub fn manager(&self) -> &PortfolioManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut PortfolioManager {
        &mut self.manager
    }

    /// Persist the portfolio when a state file is configured.
    pub fn save(&self) -> Result<(), AppError> {
        match &self.store {
            Some(store) => store.save(self.manager.portfolio()),
            None => Ok(()),
        }
    }
}
