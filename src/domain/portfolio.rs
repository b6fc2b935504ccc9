//! Cash balance and purchase lots, with no market access.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::holding::UNIT_EPSILON;
use super::{AppError, AssetSymbol, DateRange, Holding, SaleRecord};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Portfolio {
    /// Uninvested cash in USD.
    #[serde(default)]
    pub available_funds: f64,
    #[serde(default)]
    pub holdings: Vec<Holding>,
}

impl Portfolio {
    pub fn new(available_funds: f64, holdings: Vec<Holding>) -> Self {
        Self { available_funds, holdings }
    }

    pub fn deposit(&mut self, amount: f64) -> Result<(), AppError> {
        ensure_positive(amount)?;
        self.available_funds += amount;
        Ok(())
    }

    pub fn withdraw(&mut self, amount: f64) -> Result<(), AppError> {
        ensure_positive(amount)?;
        if amount > self.available_funds {
            return Err(AppError::InsufficientFunds {
                requested: amount,
                available: self.available_funds,
            });
        }
        self.available_funds -= amount;
        Ok(())
    }

    /// Buy `units` at `unit_price`, paying from available funds.
    pub fn record_purchase(
        &mut self,
        symbol: AssetSymbol,
        units: f64,
        unit_price: f64,
        at: DateTime<Utc>,
    ) -> Result<f64, AppError> {
        ensure_positive(units)?;
        let cost = units * unit_price;
        if cost > self.available_funds {
            return Err(AppError::InsufficientFunds {
                requested: cost,
                available: self.available_funds,
            });
        }

        self.available_funds -= cost;
        self.holdings.push(Holding::new(symbol, at, units, unit_price));
        Ok(cost)
    }

    /// Sell `units` of `symbol` at `unit_price` and return the revenue.
    ///
    /// Lots bought at the lowest price are drawn down first, which realizes the
    /// largest profit for a single sale price. Ties go to the oldest lot.
    pub fn record_sale(
        &mut self,
        symbol: &AssetSymbol,
        units: f64,
        unit_price: f64,
        at: DateTime<Utc>,
    ) -> Result<f64, AppError> {
        ensure_positive(units)?;
        let held = self.units_held(symbol);
        if held + UNIT_EPSILON < units {
            return Err(AppError::InsufficientHoldings {
                symbol: symbol.to_string(),
                requested: units,
                held,
            });
        }

        let mut lots: Vec<usize> = self
            .holdings
            .iter()
            .enumerate()
            .filter(|(_, holding)| &holding.symbol == symbol && holding.has_units())
            .map(|(index, _)| index)
            .collect();
        lots.sort_by(|a, b| {
            let (a, b) = (&self.holdings[*a], &self.holdings[*b]);
            a.unit_price.total_cmp(&b.unit_price).then(a.purchased_at.cmp(&b.purchased_at))
        });

        let mut left_to_sell = units;
        for index in lots {
            if left_to_sell <= UNIT_EPSILON {
                break;
            }
            let holding = &mut self.holdings[index];
            let taken = holding.units_remaining().min(left_to_sell);
            holding.record_sale(taken, unit_price, at);
            left_to_sell -= taken;
        }

        let revenue = units * unit_price;
        self.available_funds += revenue;
        Ok(revenue)
    }

    /// Check balances and units of state that did not come through the
    /// operations above, such as a saved file.
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.available_funds.is_finite() || self.available_funds < 0.0 {
            return Err(AppError::InvalidState(format!(
                "available funds {} must not be negative",
                self.available_funds
            )));
        }

        for holding in &self.holdings {
            let lot = format!("{} lot of {}", holding.symbol, holding.purchased_at.format("%Y-%m-%d"));
            ensure_positive(holding.units)
                .map_err(|_| AppError::InvalidState(format!("{lot}: units {} must be positive", holding.units)))?;
            ensure_price(holding.unit_price)
                .map_err(|_| AppError::InvalidState(format!("{lot}: invalid unit price {}", holding.unit_price)))?;

            for sale in &holding.sales {
                ensure_positive(sale.units)
                    .map_err(|_| AppError::InvalidState(format!("{lot}: sold units {} must be positive", sale.units)))?;
                ensure_price(sale.unit_price)
                    .map_err(|_| AppError::InvalidState(format!("{lot}: invalid sale price {}", sale.unit_price)))?;
            }
            if holding.units_sold() > holding.units + UNIT_EPSILON {
                return Err(AppError::InvalidState(format!(
                    "{lot}: sold {} of {} units",
                    holding.units_sold(),
                    holding.units
                )));
            }
        }
        Ok(())
    }

    /// Lots with units remaining, optionally limited to one symbol.
    pub fn holdings_with_units(&self, symbol: Option<&AssetSymbol>) -> Vec<&Holding> {
        self.holdings
            .iter()
            .filter(|holding| holding.has_units())
            .filter(|holding| symbol.is_none_or(|symbol| &holding.symbol == symbol))
            .collect()
    }

    /// Distinct symbols with units remaining, in first-purchase order.
    pub fn held_symbols(&self) -> Vec<AssetSymbol> {
        let mut symbols: Vec<AssetSymbol> = Vec::new();
        for holding in self.holdings_with_units(None) {
            if !symbols.contains(&holding.symbol) {
                symbols.push(holding.symbol.clone());
            }
        }
        symbols
    }

    pub fn units_held(&self, symbol: &AssetSymbol) -> f64 {
        self.holdings
            .iter()
            .filter(|holding| &holding.symbol == symbol)
            .map(Holding::units_remaining)
            .sum()
    }

    /// Unit-weighted purchase price over every lot of the symbol, sold or not.
    pub fn average_purchase_price(&self, symbol: &AssetSymbol) -> Option<f64> {
        let (units, cost) = self
            .holdings
            .iter()
            .filter(|holding| &holding.symbol == symbol)
            .fold((0.0, 0.0), |(units, cost), holding| {
                (units + holding.units, cost + holding.units * holding.unit_price)
            });

        (units > 0.0).then(|| cost / units)
    }

    /// Lots purchased within the range, oldest first.
    pub fn purchases_in(&self, range: &DateRange) -> Vec<&Holding> {
        let mut purchases: Vec<&Holding> =
            self.holdings.iter().filter(|holding| range.contains(holding.purchased_at)).collect();
        purchases.sort_by_key(|holding| holding.purchased_at);
        purchases
    }

    /// Sales made within the range, oldest first.
    pub fn sales_in(&self, range: &DateRange) -> Vec<(&AssetSymbol, &SaleRecord)> {
        let mut sales: Vec<(&AssetSymbol, &SaleRecord)> = self
            .holdings
            .iter()
            .flat_map(|holding| holding.sales.iter().map(move |sale| (&holding.symbol, sale)))
            .filter(|(_, sale)| range.contains(sale.sold_at))
            .collect();
        sales.sort_by_key(|(_, sale)| sale.sold_at);
        sales
    }
}

pub(crate) fn ensure_positive(amount: f64) -> Result<(), AppError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(AppError::InvalidAmount(amount))
    }
}

fn ensure_price(price: f64) -> Result<(), AppError> {
    if price.is_finite() && price >= 0.0 { Ok(()) } else { Err(AppError::InvalidAmount(price)) }
}
