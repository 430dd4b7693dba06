//! # Money Types
//!
//! Currency and price types shared by carts, checkouts, and orders.
//! Amounts are carried in the smallest currency unit (cents for USD).

use serde::{Deserialize, Serialize};

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    USD,
    EUR,
    GBP,
    JPY,
    CAD,
    AUD,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::USD => "usd",
            Currency::EUR => "eur",
            Currency::GBP => "gbp",
            Currency::JPY => "jpy",
            Currency::CAD => "cad",
            Currency::AUD => "aud",
        }
    }

    /// Returns the number of decimal places for this currency
    /// (JPY has 0 decimals, the others have 2)
    pub fn decimal_places(&self) -> u8 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::USD
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Price with amount in smallest currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in smallest currency unit (cents for USD)
    pub amount: i64,
    /// Currency
    pub currency: Currency,
}

impl Price {
    /// Create a price from an amount in the smallest currency unit
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Zero in the given currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: 0,
            currency,
        }
    }

    /// Format for display ("$45.00" style, currency code prefixed)
    pub fn display(&self) -> String {
        let divisor = 10_i64.pow(self.currency.decimal_places() as u32);
        if divisor == 1 {
            format!("{} {}", self.currency, self.amount)
        } else {
            format!(
                "{} {}.{:02}",
                self.currency,
                self.amount / divisor,
                (self.amount % divisor).abs()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display() {
        let price = Price::new(4500, Currency::USD);
        assert_eq!(price.display(), "USD 45.00");

        let yen = Price::new(4500, Currency::JPY);
        assert_eq!(yen.display(), "JPY 4500");
    }

    #[test]
    fn test_currency_roundtrip() {
        assert_eq!(Currency::EUR.as_str(), "eur");
        assert_eq!(Currency::JPY.decimal_places(), 0);
        assert_eq!(Currency::USD.decimal_places(), 2);
    }
}
