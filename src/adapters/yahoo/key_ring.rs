use std::fmt;

use rand::Rng;

use crate::domain::AppError;

/// API keys shared across requests. Each request starts at a random key and
/// every retry moves on to the next one.
#[derive(Clone)]
pub struct ApiKeyRing {
    keys: Vec<String>,
}

impl fmt::Debug for ApiKeyRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyRing").field("keys", &format_args!("[{} REDACTED]", self.keys.len())).finish()
    }
}

impl ApiKeyRing {
    pub fn new(keys: &[String]) -> Result<Self, AppError> {
        let keys: Vec<String> = keys
            .iter()
            .map(|key| key.trim())
            .filter(|key| !key.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        if keys.is_empty() {
            return Err(AppError::MissingApiKey);
        }
        Ok(Self { keys })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn random_start(&self) -> usize {
        rand::thread_rng().gen_range(0..self.keys.len())
    }

    /// Key for a zero-based attempt of a request that started at `start`.
    pub fn key_for_attempt(&self, start: usize, attempt: u32) -> &str {
        &self.keys[(start + attempt as usize) % self.keys.len()]
    }
}
