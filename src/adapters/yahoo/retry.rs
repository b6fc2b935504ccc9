//! Retry policy for market API requests.

use std::thread;
use std::time::Duration;

use rand::Rng;

use crate::domain::{AppError, MarketConfig};

const DEFAULT_MAX_DELAY_MS: u64 = 30_000;
const RETRY_AFTER_TOKEN: &str = "retry_after_ms=";
const MAX_LOG_ERROR_CHARS: usize = 512;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay_ms: u64,
    max_delay_ms: u64,
}

impl RetryPolicy {
    pub fn from_config(config: &MarketConfig) -> Self {
        Self {
            max_attempts: config.max_retries.max(1),
            base_delay_ms: config.retry_delay_ms.max(1),
            max_delay_ms: DEFAULT_MAX_DELAY_MS.max(config.retry_delay_ms),
        }
    }

    fn delay_for_retry(&self, failed_attempt: u32, error: &AppError) -> Duration {
        if let Some(retry_after_ms) = extract_retry_after_ms(error) {
            return Duration::from_millis(retry_after_ms.min(self.max_delay_ms));
        }

        // attempt=1 -> base, attempt=2 -> base*2, attempt=3 -> base*4, capped.
        let exponent = failed_attempt.saturating_sub(1).min(6);
        let multiplier = 1_u64 << exponent;
        let backoff_ms = self.base_delay_ms.saturating_mul(multiplier).min(self.max_delay_ms);
        let jitter_ms = compute_jitter_ms(backoff_ms);
        Duration::from_millis(backoff_ms.saturating_add(jitter_ms).min(self.max_delay_ms))
    }

    /// Run `request` until it succeeds, fails with a non-retryable error, or
    /// runs out of attempts. The closure receives the zero-based attempt.
    pub fn run<T, F>(&self, operation: &str, mut request: F) -> Result<T, AppError>
    where
        F: FnMut(u32) -> Result<T, AppError>,
    {
        let mut attempt = 1;
        loop {
            match request(attempt - 1) {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if !is_retryable_error(&error) || attempt >= self.max_attempts {
                        return Err(error);
                    }

                    let delay = self.delay_for_retry(attempt, &error);
                    tracing::warn!(
                        operation,
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %format_error_for_log(&error),
                        "market request failed, retrying with the next API key"
                    );
                    thread::sleep(delay);
                    attempt += 1;
                }
            }
        }
    }
}

/// Transport failures, rejected keys, timeouts, throttling and server errors.
fn is_retryable_error(error: &AppError) -> bool {
    match error {
        AppError::MarketApi { status: None, .. } => true,
        AppError::MarketApi { status: Some(code), .. } => {
            matches!(code, 401 | 403 | 408 | 429) || *code >= 500
        }
        _ => false,
    }
}

fn extract_retry_after_ms(error: &AppError) -> Option<u64> {
    let message = match error {
        AppError::MarketApi { message, .. } => message,
        _ => return None,
    };

    let start = message.find(RETRY_AFTER_TOKEN)? + RETRY_AFTER_TOKEN.len();
    let digits: String =
        message[start..].chars().take_while(|ch| ch.is_ascii_digit()).collect();
    digits.parse::<u64>().ok()
}

/// Up to a quarter of the backoff, chosen uniformly.
fn compute_jitter_ms(backoff_ms: u64) -> u64 {
    let jitter_cap = backoff_ms / 4;
    if jitter_cap == 0 {
        return 0;
    }
    rand::thread_rng().gen_range(0..jitter_cap)
}

fn format_error_for_log(error: &AppError) -> String {
    match error {
        AppError::MarketApi { message, status } => {
            let sanitized = sanitize_and_truncate_for_log(message);
            match status {
                Some(code) => format!("status={}: {}", code, sanitized),
                None => sanitized,
            }
        }
        _ => sanitize_and_truncate_for_log(&error.to_string()),
    }
}

fn sanitize_and_truncate_for_log(input: &str) -> String {
    let truncated: String = input
        .chars()
        .take(MAX_LOG_ERROR_CHARS)
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect();

    let mut compact = truncated.split_whitespace().collect::<Vec<_>>().join(" ");
    if input.chars().count() > MAX_LOG_ERROR_CHARS {
        compact.push_str(" [truncated]");
    }
    compact
}
