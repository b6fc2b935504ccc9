use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::domain::{
    AppError, AssetQuote, AssetSymbol, HistoryRange, Interval, PricePoint, PriceHistory,
};
use crate::ports::MarketClient;

const MOCK_PRICE: f64 = 123.45;
const MOCK_CHANGE: f64 = 1.234;
const MOCK_EXCHANGE_NAME: &str = "NYSE";
const MOCK_TRENDING: [&str; 2] = ["TSLA", "AAPL"];
const HISTORY_CLOSES: [f64; 5] = [100.0, 101.0, 102.0, 103.0, 104.0];

/// Offline market client that prices every symbol identically.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockMarketClient;

impl MockMarketClient {
    fn quote_for(symbol: &AssetSymbol, name: String) -> AssetQuote {
        let quote_type =
            if symbol.ends_with("-USD") { "CRYPTOCURRENCY" } else { "EQUITY" }.to_string();
        AssetQuote {
            symbol: symbol.clone(),
            name,
            quote_type,
            market_time: DateTime::<Utc>::UNIX_EPOCH,
            price: MOCK_PRICE,
            change_percent: MOCK_CHANGE,
            change: MOCK_CHANGE,
            previous_close: MOCK_CHANGE,
            open: MOCK_CHANGE,
        }
    }

    fn history_end() -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2022, 1, 5)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl MarketClient for MockMarketClient {
    fn quotes(&self, symbols: &[AssetSymbol]) -> Result<Vec<AssetQuote>, AppError> {
        Ok(symbols.iter().map(|symbol| Self::quote_for(symbol, format!("Asset {symbol}"))).collect())
    }

    fn trending(&self, _region: &str) -> Result<Vec<String>, AppError> {
        Ok(MOCK_TRENDING.iter().map(|symbol| symbol.to_string()).collect())
    }

    fn history(
        &self,
        symbols: &[AssetSymbol],
        _interval: Interval,
        _range: HistoryRange,
    ) -> Result<Vec<PriceHistory>, AppError> {
        let end = Self::history_end();
        let last = HISTORY_CLOSES.len() as i64 - 1;
        let points: Vec<PricePoint> = HISTORY_CLOSES
            .iter()
            .enumerate()
            .map(|(index, close)| PricePoint { at: end - Duration::days(last - index as i64), close: *close })
            .collect();

        Ok(symbols
            .iter()
            .map(|symbol| PriceHistory { symbol: symbol.clone(), points: points.clone() })
            .collect())
    }

    fn exchange(
        &self,
        _region: &str,
        exchange: &AssetSymbol,
    ) -> Result<Option<AssetQuote>, AppError> {
        Ok(Some(Self::quote_for(exchange, MOCK_EXCHANGE_NAME.to_string())))
    }
}
