//! Portfolio operations backed by live market data.

use std::collections::{HashMap, HashSet};

use crate::domain::holding::UNIT_EPSILON;
use crate::domain::portfolio::ensure_positive;
use crate::domain::{
    AppError, AssetQuote, AssetSymbol, AssetType, DateRange, ExchangeSummary, HistoryRange,
    HoldingView, Interval, InvestmentSummary, Portfolio, PriceHistory, PurchaseLine, SaleLine,
};
use crate::ports::{Clock, MarketClient};

/// Symbols assumed valid without asking the market.
pub const KNOWN_GOOD_SYMBOLS: [&str; 6] = ["TSLA", "AAPL", "GME", "NVDA", "BTC-USD", "MSFT"];

/// Owns the portfolio and prices it through a market client.
pub struct PortfolioManager {
    portfolio: Portfolio,
    market: Box<dyn MarketClient>,
    clock: Box<dyn Clock>,
    known_symbols: HashSet<AssetSymbol>,
}

impl PortfolioManager {
    pub fn new(portfolio: Portfolio, market: Box<dyn MarketClient>, clock: Box<dyn Clock>) -> Self {
        let known_symbols =
            KNOWN_GOOD_SYMBOLS.iter().filter_map(|raw| AssetSymbol::new(raw).ok()).collect();
        Self { portfolio, market, clock, known_symbols }
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// Whether the symbol is known to the market. Positive answers are cached.
    pub fn check_asset_symbol(&mut self, symbol: &AssetSymbol) -> Result<bool, AppError> {
        if self.known_symbols.contains(symbol) {
            return Ok(true);
        }
        let known = self.market.is_known_symbol(symbol)?;
        if known {
            self.known_symbols.insert(symbol.clone());
        }
        Ok(known)
    }

    pub fn add_funds(&mut self, amount: f64) -> Result<(), AppError> {
        self.portfolio.deposit(amount)?;
        tracing::info!(amount, balance = self.portfolio.available_funds, "funds added");
        Ok(())
    }

    pub fn withdraw_funds(&mut self, amount: f64) -> Result<(), AppError> {
        self.portfolio.withdraw(amount)?;
        tracing::info!(amount, balance = self.portfolio.available_funds, "funds withdrawn");
        Ok(())
    }

    pub fn available_funds(&self) -> f64 {
        self.portfolio.available_funds
    }

    /// Lots with units remaining, each shown with its asset's live price.
    pub fn assets_with_holdings(
        &self,
        symbol: Option<&AssetSymbol>,
    ) -> Result<Vec<HoldingView>, AppError> {
        let holdings = self.portfolio.holdings_with_units(symbol);
        let mut symbols: Vec<AssetSymbol> = Vec::new();
        for holding in &holdings {
            if !symbols.contains(&holding.symbol) {
                symbols.push(holding.symbol.clone());
            }
        }

        let prices = self.live_prices(&symbols)?;
        holdings
            .into_iter()
            .map(|holding| {
                let current_price = price_of(&prices, &holding.symbol)?.price;
                Ok(HoldingView { holding: holding.clone(), current_price })
            })
            .collect()
    }

    /// Buy at the live price, returning the cost.
    pub fn purchase_asset(&mut self, symbol: &AssetSymbol, units: f64) -> Result<f64, AppError> {
        ensure_positive(units)?;
        let quote = self.asset_quote(symbol)?;
        self.known_symbols.insert(symbol.clone());

        let cost =
            self.portfolio.record_purchase(symbol.clone(), units, quote.price, self.clock.now())?;
        tracing::info!(symbol = %symbol, units, price = quote.price, cost, "asset purchased");
        Ok(cost)
    }

    /// Sell at the live price, returning the revenue.
    pub fn sell_asset(&mut self, symbol: &AssetSymbol, units: f64) -> Result<f64, AppError> {
        ensure_positive(units)?;
        if !self.check_asset_symbol(symbol)? {
            return Err(AppError::UnknownSymbol(symbol.to_string()));
        }

        let held = self.portfolio.units_held(symbol);
        if held + UNIT_EPSILON < units {
            return Err(AppError::InsufficientHoldings {
                symbol: symbol.to_string(),
                requested: units,
                held,
            });
        }

        let quote = self.asset_quote(symbol)?;
        let revenue = self.portfolio.record_sale(symbol, units, quote.price, self.clock.now())?;
        tracing::info!(symbol = %symbol, units, price = quote.price, revenue, "asset sold");
        Ok(revenue)
    }

    pub fn trending_stocks(&self, region: &str) -> Result<Vec<String>, AppError> {
        self.market.trending(region)
    }

    pub fn historical_data(
        &self,
        symbols: &[AssetSymbol],
        interval: Interval,
        range: HistoryRange,
    ) -> Result<Vec<PriceHistory>, AppError> {
        if symbols.is_empty() {
            return Ok(Vec::new());
        }
        self.market.history(symbols, interval, range)
    }

    pub fn exchange_summary(
        &self,
        region: &str,
        exchange: &AssetSymbol,
    ) -> Result<ExchangeSummary, AppError> {
        let quote = self.market.exchange(region, exchange)?.ok_or_else(|| {
            AppError::ExchangeNotFound { region: region.to_string(), exchange: exchange.to_string() }
        })?;
        Ok(quote.exchange_summary())
    }

    /// Live quotes for the requested symbols that are held in the portfolio.
    pub fn asset_information(
        &mut self,
        symbols: &[AssetSymbol],
    ) -> Result<Vec<AssetQuote>, AppError> {
        let mut selected: Vec<AssetSymbol> = Vec::new();
        for symbol in symbols {
            if selected.contains(symbol) {
                continue;
            }
            if self.portfolio.units_held(symbol) <= UNIT_EPSILON {
                tracing::debug!(symbol = %symbol, "not held, skipping");
                continue;
            }
            if !self.check_asset_symbol(symbol)? {
                tracing::warn!(symbol = %symbol, "unknown symbol, skipping");
                continue;
            }
            selected.push(symbol.clone());
        }

        if selected.is_empty() {
            return Ok(Vec::new());
        }
        self.market.quotes(&selected)
    }

    pub fn asset_quotes(&self, symbols: &[AssetSymbol]) -> Result<Vec<AssetQuote>, AppError> {
        self.market.quotes(symbols)
    }

    pub fn asset_quote(&self, symbol: &AssetSymbol) -> Result<AssetQuote, AppError> {
        self.market.quote(symbol)?.ok_or_else(|| AppError::QuoteUnavailable(symbol.to_string()))
    }

    /// Remaining units of every lot valued at live prices, fetched in one request.
    pub fn portfolio_value(&self) -> Result<f64, AppError> {
        let symbols = self.portfolio.held_symbols();
        let prices = self.live_prices(&symbols)?;

        self.portfolio.holdings_with_units(None).into_iter().try_fold(0.0, |total, holding| {
            let price = price_of(&prices, &holding.symbol)?.price;
            Ok(total + holding.current_value(price))
        })
    }

    /// One row per held symbol.
    pub fn list_all_investments(&self) -> Result<Vec<InvestmentSummary>, AppError> {
        let symbols = self.portfolio.held_symbols();
        let prices = self.live_prices(&symbols)?;

        symbols
            .iter()
            .map(|symbol| {
                let quote = price_of(&prices, symbol)?;
                Ok(InvestmentSummary {
                    symbol: symbol.clone(),
                    name: quote.name.clone(),
                    quote_type: quote.quote_type.clone(),
                    units_held: self.portfolio.units_held(symbol),
                    average_price: self.portfolio.average_purchase_price(symbol).unwrap_or(0.0),
                    current_price: quote.price,
                })
            })
            .collect()
    }

    pub fn list_assets_by_type(
        &self,
        asset_type: AssetType,
    ) -> Result<Vec<InvestmentSummary>, AppError> {
        let mut rows = self.list_all_investments()?;
        rows.retain(|row| asset_type.matches_quote_type(&row.quote_type));
        Ok(rows)
    }

    /// Rows whose symbol or name contains any query, ignoring case.
    pub fn list_assets_by_name<S: AsRef<str>>(
        &self,
        queries: &[S],
    ) -> Result<Vec<InvestmentSummary>, AppError> {
        let needles: Vec<String> = queries
            .iter()
            .map(|query| query.as_ref().trim().to_lowercase())
            .filter(|query| !query.is_empty())
            .collect();
        if needles.is_empty() {
            return Ok(Vec::new());
        }

        let mut rows = self.list_all_investments()?;
        rows.retain(|row| {
            let symbol = row.symbol.as_str().to_lowercase();
            let name = row.name.to_lowercase();
            needles.iter().any(|needle| symbol.contains(needle) || name.contains(needle))
        });
        Ok(rows)
    }

    pub fn list_purchases_in_range(&self, range: &DateRange) -> Vec<PurchaseLine> {
        self.portfolio.purchases_in(range).into_iter().map(PurchaseLine::from).collect()
    }

    pub fn list_sales_in_range(&self, range: &DateRange) -> Vec<SaleLine> {
        self.portfolio
            .sales_in(range)
            .into_iter()
            .map(|(symbol, sale)| SaleLine::new(symbol, sale))
            .collect()
    }

    fn live_prices(
        &self,
        symbols: &[AssetSymbol],
    ) -> Result<HashMap<AssetSymbol, AssetQuote>, AppError> {
        if symbols.is_empty() {
            return Ok(HashMap::new());
        }
        let quotes = self.market.quotes(symbols)?;
        Ok(quotes.into_iter().map(|quote| (quote.symbol.clone(), quote)).collect())
    }
}

fn price_of<'a>(
    prices: &'a HashMap<AssetSymbol, AssetQuote>,
    symbol: &AssetSymbol,
) -> Result<&'a AssetQuote, AppError> {
    prices.get(symbol).ok_or_else(|| AppError::QuoteUnavailable(symbol.to_string()))
}
