use std::fmt;

use super::AppError;

/// Kinds of asset the portfolio can list by type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetType {
    Stock,
    Crypto,
}

impl AssetType {
    pub const ALL: [AssetType; 2] = [AssetType::Stock, AssetType::Crypto];

    /// Parse user input such as `stock` or `crypto`.
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim().to_lowercase().as_str() {
            "stock" | "stocks" | "equity" => Ok(AssetType::Stock),
            "crypto" | "cryptocurrency" | "cryptocurrencies" => Ok(AssetType::Crypto),
            _ => Err(AppError::InvalidAssetType(value.to_string())),
        }
    }

    /// Quote type reported by the market for this kind of asset.
    pub fn quote_type(&self) -> &'static str {
        match self {
            AssetType::Stock => "EQUITY",
            AssetType::Crypto => "CRYPTOCURRENCY",
        }
    }

    pub fn matches_quote_type(&self, quote_type: &str) -> bool {
        self.quote_type().eq_ignore_ascii_case(quote_type.trim())
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AssetType::Stock => "stock",
            AssetType::Crypto => "crypto",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
