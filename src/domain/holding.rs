use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AssetSymbol;

/// Unit counts below this are treated as zero.
pub const UNIT_EPSILON: f64 = 1e-9;

/// Units of a lot sold in a single transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub units: f64,
    /// Sale price per unit in USD.
    pub unit_price: f64,
    pub sold_at: DateTime<Utc>,
}

/// One purchase lot and the sales drawn from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: AssetSymbol,
    pub purchased_at: DateTime<Utc>,
    /// Units bought in the original purchase.
    pub units: f64,
    /// Purchase price per unit in USD.
    pub unit_price: f64,
    #[serde(default)]
    pub sales: Vec<SaleRecord>,
}

impl Holding {
    pub fn new(symbol: AssetSymbol, purchased_at: DateTime<Utc>, units: f64, unit_price: f64) -> Self {
        Self { symbol, purchased_at, units, unit_price, sales: Vec::new() }
    }

    pub fn units_sold(&self) -> f64 {
        self.sales.iter().map(|sale| sale.units).sum()
    }

    pub fn units_remaining(&self) -> f64 {
        (self.units - self.units_sold()).max(0.0)
    }

    pub fn has_units(&self) -> bool {
        self.units_remaining() > UNIT_EPSILON
    }

    pub fn current_value(&self, price: f64) -> f64 {
        if !self.has_units() {
            return 0.0;
        }
        self.units_remaining() * price
    }

    /// Price movement per unit since purchase, in USD.
    pub fn change_usd(&self, price: f64) -> f64 {
        price - self.unit_price
    }

    /// Price movement per unit since purchase, as a percentage of the purchase price.
    pub fn change_percent(&self, price: f64) -> f64 {
        percent_change(self.unit_price, price)
    }

    pub fn record_sale(&mut self, units: f64, unit_price: f64, sold_at: DateTime<Utc>) {
        self.sales.push(SaleRecord { units, unit_price, sold_at });
    }
}

pub(crate) fn percent_change(from: f64, to: f64) -> f64 {
    if from == 0.0 {
        return 0.0;
    }
    (to - from) / from * 100.0
}
