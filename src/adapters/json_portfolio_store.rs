//! Portfolio state persisted as pretty-printed JSON.

use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use crate::domain::{AppError, Portfolio};
use crate::ports::PortfolioStore;

#[derive(Debug, Clone)]
pub struct JsonFilePortfolioStore {
    path: PathBuf,
}

impl JsonFilePortfolioStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(format!(".{}.tmp", std::process::id()));
        self.path.with_file_name(name)
    }
}

impl PortfolioStore for JsonFilePortfolioStore {
    fn load(&self) -> Result<Option<Portfolio>, AppError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no saved portfolio state");
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let portfolio: Portfolio = serde_json::from_str(&content)?;
        portfolio.validate()?;
        tracing::info!(
            path = %self.path.display(),
            holdings = portfolio.holdings.len(),
            "loaded portfolio state"
        );
        Ok(Some(portfolio))
    }

    fn save(&self, portfolio: &Portfolio) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let serialized = serde_json::to_string_pretty(portfolio)?;
        let temp_path = self.temp_path();
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(serialized.as_bytes())?;
            file.write_all(b"\n")?;
            file.sync_all()?;
        }

        if let Err(err) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(err.into());
        }

        tracing::info!(path = %self.path.display(), "saved portfolio state");
        Ok(())
    }
}
