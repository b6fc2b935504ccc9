use std::sync::{Arc, Mutex};

use crate::domain::{AppError, Portfolio};
use crate::ports::PortfolioStore;

/// In-memory portfolio store. Clones share the saved state.
#[derive(Debug, Clone, Default)]
pub struct MemoryPortfolioStore {
    saved: Arc<Mutex<Option<Portfolio>>>,
}

impl MemoryPortfolioStore {
    pub fn saved(&self) -> Option<Portfolio> {
        self.saved.lock().unwrap().clone()
    }
}

impl PortfolioStore for MemoryPortfolioStore {
    fn load(&self) -> Result<Option<Portfolio>, AppError> {
        Ok(self.saved())
    }

    fn save(&self, portfolio: &Portfolio) -> Result<(), AppError> {
        *self.saved.lock().unwrap() = Some(portfolio.clone());
        Ok(())
    }
}
