use crate::domain::{AppError, Portfolio};

/// Port for persisting portfolio state between runs.
pub trait PortfolioStore {
    /// Load saved state, or `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Portfolio>, AppError>;

    /// Replace saved state.
    fn save(&self, portfolio: &Portfolio) -> Result<(), AppError>;
}
