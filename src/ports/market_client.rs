//! Market data port definition.

use crate::domain::{AppError, AssetQuote, AssetSymbol, HistoryRange, Interval, PriceHistory};

/// Port for live and historic market data.
pub trait MarketClient {
    /// Quote every symbol in one request. Unknown symbols are absent from the result.
    fn quotes(&self, symbols: &[AssetSymbol]) -> Result<Vec<AssetQuote>, AppError>;

    /// Symbols trending in a region, in the order the market reports them.
    fn trending(&self, region: &str) -> Result<Vec<String>, AppError>;

    /// Closing price series for each symbol.
    fn history(
        &self,
        symbols: &[AssetSymbol],
        interval: Interval,
        range: HistoryRange,
    ) -> Result<Vec<PriceHistory>, AppError>;

    /// Quote for an exchange or index symbol in a region.
    fn exchange(&self, region: &str, exchange: &AssetSymbol)
    -> Result<Option<AssetQuote>, AppError>;

    /// Quote a single symbol.
    fn quote(&self, symbol: &AssetSymbol) -> Result<Option<AssetQuote>, AppError> {
        let quotes = self.quotes(std::slice::from_ref(symbol))?;
        Ok(quotes.into_iter().find(|quote| &quote.symbol == symbol))
    }

    /// Whether the market returns a quote for the symbol.
    fn is_known_symbol(&self, symbol: &AssetSymbol) -> Result<bool, AppError> {
        Ok(self.quote(symbol)?.is_some())
    }
}
