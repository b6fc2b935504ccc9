use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use crate::domain::{
    AppError, AssetQuote, AssetSymbol, HistoryRange, Interval, PricePoint, PriceHistory,
};
use crate::ports::MarketClient;

#[derive(Debug, Clone)]
struct FakeAsset {
    name: String,
    quote_type: String,
    price: f64,
}

#[derive(Debug, Default)]
struct FakeMarketState {
    assets: HashMap<String, FakeAsset>,
    trending: Vec<String>,
    quote_requests: Vec<Vec<String>>,
    history_requests: Vec<(Vec<String>, Interval, HistoryRange)>,
    exchange_requests: Vec<(String, String)>,
}

/// Market client serving only the assets it was given, recording every request.
#[derive(Debug, Clone, Default)]
pub struct FakeMarketClient {
    state: Arc<Mutex<FakeMarketState>>,
}

impl FakeMarketClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset(self, symbol: &str, name: &str, quote_type: &str, price: f64) -> Self {
        self.state.lock().unwrap().assets.insert(
            symbol.to_string(),
            FakeAsset { name: name.to_string(), quote_type: quote_type.to_string(), price },
        );
        self
    }

    pub fn with_trending(self, symbols: &[&str]) -> Self {
        self.state.lock().unwrap().trending = symbols.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn set_price(&self, symbol: &str, price: f64) {
        if let Some(asset) = self.state.lock().unwrap().assets.get_mut(symbol) {
            asset.price = price;
        }
    }

    pub fn remove_asset(&self, symbol: &str) {
        self.state.lock().unwrap().assets.remove(symbol);
    }

    pub fn quote_requests(&self) -> Vec<Vec<String>> {
        self.state.lock().unwrap().quote_requests.clone()
    }

    pub fn history_requests(&self) -> Vec<(Vec<String>, Interval, HistoryRange)> {
        self.state.lock().unwrap().history_requests.clone()
    }

    pub fn exchange_requests(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().exchange_requests.clone()
    }

    fn quote_of(symbol: &AssetSymbol, asset: &FakeAsset) -> AssetQuote {
        AssetQuote {
            symbol: symbol.clone(),
            name: asset.name.clone(),
            quote_type: asset.quote_type.clone(),
            market_time: DateTime::<Utc>::UNIX_EPOCH,
            price: asset.price,
            change_percent: 0.0,
            change: 0.0,
            previous_close: asset.price,
            open: asset.price,
        }
    }
}

impl MarketClient for FakeMarketClient {
    fn quotes(&self, symbols: &[AssetSymbol]) -> Result<Vec<AssetQuote>, AppError> {
        let mut state = self.state.lock().unwrap();
        state.quote_requests.push(symbols.iter().map(|s| s.to_string()).collect());
        Ok(symbols
            .iter()
            .filter_map(|symbol| {
                state.assets.get(symbol.as_str()).map(|asset| Self::quote_of(symbol, asset))
            })
            .collect())
    }

    fn trending(&self, _region: &str) -> Result<Vec<String>, AppError> {
        Ok(self.state.lock().unwrap().trending.clone())
    }

    fn history(
        &self,
        symbols: &[AssetSymbol],
        interval: Interval,
        range: HistoryRange,
    ) -> Result<Vec<PriceHistory>, AppError> {
        let mut state = self.state.lock().unwrap();
        state.history_requests.push((symbols.iter().map(|s| s.to_string()).collect(), interval, range));
        Ok(symbols
            .iter()
            .filter_map(|symbol| {
                let asset = state.assets.get(symbol.as_str())?;
                Some(PriceHistory {
                    symbol: symbol.clone(),
                    points: vec![PricePoint { at: DateTime::<Utc>::UNIX_EPOCH, close: asset.price }],
                })
            })
            .collect())
    }

    fn exchange(
        &self,
        region: &str,
        exchange: &AssetSymbol,
    ) -> Result<Option<AssetQuote>, AppError> {
        let mut state = self.state.lock().unwrap();
        state.exchange_requests.push((region.to_string(), exchange.to_string()));
        Ok(state.assets.get(exchange.as_str()).map(|asset| Self::quote_of(exchange, asset)))
    }
}
