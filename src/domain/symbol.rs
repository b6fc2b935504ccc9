use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::AppError;

const MAX_SYMBOL_LEN: usize = 32;

/// A validated, upper-cased market ticker.
///
/// Guarantees:
/// - Non-empty after trimming, at most 32 characters
/// - Contains only ASCII alphanumerics or `.`, `-`, `^`, `=`
///   (`BTC-USD`, `^DJI`, `EURUSD=X`, `BRK.B`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetSymbol(String);

impl AssetSymbol {
    /// Validate, normalize and create a new symbol.
    pub fn new(raw: &str) -> Result<Self, AppError> {
        let trimmed = raw.trim();
        let valid = !trimmed.is_empty()
            && trimmed.len() <= MAX_SYMBOL_LEN
            && trimmed.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='));

        if valid {
            Ok(Self(trimmed.to_ascii_uppercase()))
        } else {
            Err(AppError::InvalidSymbol(raw.to_string()))
        }
    }

    /// Parse a list of raw symbols, failing on the first invalid entry.
    pub fn parse_all<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Self>, AppError> {
        raw.iter().map(|value| Self::new(value.as_ref())).collect()
    }

    /// Return the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for AssetSymbol {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for AssetSymbol {
    fn as_ref(&self) -> &str {
        self
    }
}

impl fmt::Display for AssetSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AssetSymbol {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for AssetSymbol {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AssetSymbol {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        AssetSymbol::new(&s).map_err(serde::de::Error::custom)
    }
}
