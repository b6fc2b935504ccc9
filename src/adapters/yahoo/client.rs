//! Market data client for Yahoo Finance compatible APIs using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, RETRY_AFTER};
use serde::de::DeserializeOwned;
use url::Url;

use super::dto::{QuoteEnvelope, SparkEnvelope, TrendingEnvelope};
use super::key_ring::ApiKeyRing;
use super::retry::RetryPolicy;
use crate::domain::{
    AppError, AssetQuote, AssetSymbol, HistoryRange, Interval, MarketConfig, PriceHistory,
};
use crate::ports::MarketClient;

const X_API_KEY: &str = "X-API-KEY";
const DEFAULT_STATUS_MESSAGE: &str = "Market API request failed";
const QUOTE_PATH: &str = "v6/finance/quote";
const TRENDING_PATH: &str = "v1/finance/trending";
const SPARK_PATH: &str = "v8/finance/spark";

/// HTTP transport for the market API. Each call may take several attempts,
/// each with a different API key.
#[derive(Clone)]
pub struct YahooClient {
    base_url: Url,
    region: String,
    keys: ApiKeyRing,
    policy: RetryPolicy,
    client: Client,
}

impl std::fmt::Debug for YahooClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooClient")
            .field("base_url", &self.base_url)
            .field("region", &self.region)
            .field("keys", &self.keys)
            .finish()
    }
}

impl YahooClient {
    pub fn new(config: &MarketConfig) -> Result<Self, AppError> {
        let keys = ApiKeyRing::new(&config.api_keys)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::market_api(format!("Failed to create HTTP client: {}", e), None))?;

        Ok(Self {
            base_url: config.base_url.clone(),
            region: config.region.clone(),
            keys,
            policy: RetryPolicy::from_config(config),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        let raw = format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|e| AppError::InvalidConfig(format!("invalid API URL {raw}: {e}")))
    }

    /// Trending endpoint with the region as one percent-encoded path segment.
    fn trending_url(&self, region: &str) -> Result<Url, AppError> {
        let mut url = self.endpoint(TRENDING_PATH)?;
        url.path_segments_mut()
            .map_err(|_| AppError::InvalidConfig(format!("API URL cannot take a path: {}", self.base_url)))?
            .push(region.trim());
        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let start = self.keys.random_start();
        let body = self.policy.run(operation, |attempt| {
            self.send_once(&url, query, self.keys.key_for_attempt(start, attempt))
        })?;

        serde_json::from_str(&body)
            .map_err(|e| AppError::market_api(format!("Failed to parse response: {}", e), None))
    }

    fn send_once(&self, url: &Url, query: &[(&str, String)], api_key: &str) -> Result<String, AppError> {
        tracing::debug!(url = %url, ?query, "market API request");
        let response = self
            .client
            .get(url.clone())
            .query(query)
            .header(X_API_KEY, api_key)
            .send()
            .map_err(|e| AppError::market_api(format!("HTTP request failed: {}", e), None))?;

        let status = response.status();
        let retry_after_ms = response.headers().get(RETRY_AFTER).and_then(parse_retry_after_ms);
        let body_text = response.text().unwrap_or_default();

        if status.is_success() {
            return Ok(body_text);
        }

        let mut message = extract_error_message(&body_text).unwrap_or_else(|| {
            if !body_text.trim().is_empty() {
                body_text.clone()
            } else if status.as_u16() == 429 {
                "Rate limited".to_string()
            } else if matches!(status.as_u16(), 401 | 403) {
                "API key rejected".to_string()
            } else if status.is_server_error() {
                "Server error".to_string()
            } else {
                DEFAULT_STATUS_MESSAGE.to_string()
            }
        });

        if let Some(value) = retry_after_ms {
            message.push_str(&format!(" (retry_after_ms={})", value));
        }

        Err(AppError::market_api(message, Some(status.as_u16())))
    }

    fn fetch_quotes(&self, region: &str, symbols: &[AssetSymbol]) -> Result<QuoteEnvelope, AppError> {
        let joined = symbols.iter().map(AssetSymbol::as_str).collect::<Vec<_>>().join(",");
        self.get_json(
            "quote",
            self.endpoint(QUOTE_PATH)?,
            &[("region", region.to_string()), ("lang", "en".to_string()), ("symbols", joined)],
        )
    }
}

impl MarketClient for YahooClient {
    fn quotes(&self, symbols: &[AssetSymbol]) -> Result<Vec<AssetQuote>, AppError> {
        if symbols.is_empty() {
            return Ok(Vec::new());
        }

        let envelope = self.fetch_quotes(&self.region, symbols)?;
        let results = envelope.quote_response.map(|response| response.result).unwrap_or_default();

        let mut quotes = Vec::with_capacity(results.len());
        for result in results {
            match AssetSymbol::new(&result.symbol) {
                Ok(symbol) => {
                    let name = result.asset_name();
                    quotes.push(result.into_quote(symbol, name));
                }
                Err(_) => tracing::warn!(symbol = %result.symbol, "ignoring quote with unusable symbol"),
            }
        }
        Ok(quotes)
    }

    fn trending(&self, region: &str) -> Result<Vec<String>, AppError> {
        let envelope: TrendingEnvelope = self.get_json("trending", self.trending_url(region)?, &[])?;
        Ok(envelope.into_symbols())
    }

    fn history(
        &self,
        symbols: &[AssetSymbol],
        interval: Interval,
        range: HistoryRange,
    ) -> Result<Vec<PriceHistory>, AppError> {
        let known: Vec<AssetSymbol> = {
            let quoted = self.quotes(symbols)?;
            symbols
                .iter()
                .filter(|symbol| {
                    let found = quoted.iter().any(|quote| &quote.symbol == *symbol);
                    if !found {
                        tracing::warn!(symbol = %symbol, "skipping unknown symbol in history request");
                    }
                    found
                })
                .cloned()
                .collect()
        };
        if known.is_empty() {
            return Ok(Vec::new());
        }

        let joined = known.iter().map(AssetSymbol::as_str).collect::<Vec<_>>().join(",");
        let mut envelope: SparkEnvelope = self.get_json(
            "history",
            self.endpoint(SPARK_PATH)?,
            &[
                ("interval", interval.as_str().to_string()),
                ("range", range.as_str().to_string()),
                ("symbols", joined),
            ],
        )?;

        Ok(known
            .into_iter()
            .filter_map(|symbol| {
                let series = envelope.remove(symbol.as_str())?;
                Some(PriceHistory::from_series(symbol, &series.timestamp, &series.close))
            })
            .collect())
    }

    fn exchange(
        &self,
        region: &str,
        exchange: &AssetSymbol,
    ) -> Result<Option<AssetQuote>, AppError> {
        let envelope = self.fetch_quotes(region.trim(), std::slice::from_ref(exchange))?;
        let first = envelope
            .quote_response
            .and_then(|response| response.result.into_iter().next());

        Ok(first.map(|result| {
            let name = result.full_exchange_name.clone().unwrap_or_else(|| result.asset_name());
            let symbol = AssetSymbol::new(&result.symbol).unwrap_or_else(|_| exchange.clone());
            result.into_quote(symbol, name)
        }))
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;

    let candidates = [
        parsed.pointer("/error/message"),
        parsed.get("message"),
        parsed.pointer("/finance/error/description"),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(|value| value.as_str())
        .map(ToOwned::to_owned)
}

fn parse_retry_after_ms(value: &HeaderValue) -> Option<u64> {
    let raw = value.to_str().ok()?.trim();
    let seconds = raw.parse::<u64>().ok()?;
    Some(seconds.saturating_mul(1000))
}
