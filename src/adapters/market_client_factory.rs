use crate::domain::{AppError, MarketConfig, MarketProvider};
use crate::ports::MarketClient;

use super::mock_market_client::MockMarketClient;
use super::yahoo::YahooClient;

/// Build the market client selected by `provider`.
pub fn create_market_client(
    provider: MarketProvider,
    config: &MarketConfig,
) -> Result<Box<dyn MarketClient>, AppError> {
    tracing::debug!(%provider, "creating market client");
    match provider {
        MarketProvider::Mock => Ok(Box::new(MockMarketClient)),
        MarketProvider::Yahoo => Ok(Box::new(YahooClient::new(config)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AssetSymbol;

    #[test]
    fn mock_provider_needs_no_keys() {
        let client = create_market_client(MarketProvider::Mock, &MarketConfig::default()).unwrap();
        let quote = client.quote(&AssetSymbol::new("TSLA").unwrap()).unwrap().unwrap();
        assert_eq!(quote.price, 123.45);
    }

    #[test]
    fn yahoo_provider_requires_keys() {
        let result = create_market_client(MarketProvider::Yahoo, &MarketConfig::default());
        assert!(matches!(result, Err(AppError::MissingApiKey)));
    }

    #[test]
    fn yahoo_provider_builds_with_keys() {
        let config = MarketConfig { api_keys: vec!["k".to_string()], ..Default::default() };
        assert!(create_market_client(MarketProvider::Yahoo, &config).is_ok());
    }
}
