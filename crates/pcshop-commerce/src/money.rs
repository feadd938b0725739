//! Money type for representing monetary values.
//!
//! Amounts are integers in the smallest unit of the currency. The storefront
//! prices everything in VND, which has no minor unit, so a VND amount is a whole
//! number of dong.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    VND,
    USD,
}

impl Currency {
    /// Get the currency code (e.g., "VND").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::VND => "VND",
            Currency::USD => "USD",
        }
    }

    /// Get the currency symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::VND => "\u{20ab}",
            Currency::USD => "$",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::VND => 0,
            Currency::USD => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit.
    pub amount: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Create a VND amount.
    ///
    /// ```
    /// use pcshop_commerce::money::{Money, Currency};
    /// let price = Money::vnd(25_990_000);
    /// assert_eq!(price.currency, Currency::VND);
    /// ```
    pub fn vnd(amount: i64) -> Self {
        Self::new(amount, Currency::VND)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Try to add another Money value.
    ///
    /// Returns None on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount
            .checked_add(other.amount)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Sum Money values, returning None on overflow or mixed currencies.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }

    /// Format as a display string: "25.990.000 ₫" or "$49.99".
    pub fn display(&self) -> String {
        let places = self.currency.decimal_places();
        let divisor = 10_i64.pow(places);
        let whole = (self.amount / divisor).unsigned_abs();
        let fraction = (self.amount % divisor).unsigned_abs();
        let sign = if self.amount < 0 { "-" } else { "" };

        match self.currency {
            Currency::VND => format!("{}{} {}", sign, group_thousands(whole, '.'), self.currency.symbol()),
            Currency::USD => format!(
                "{}{}{}.{:0width$}",
                sign,
                self.currency.symbol(),
                group_thousands(whole, ','),
                fraction,
                width = places as usize
            ),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vnd_display() {
        assert_eq!(Money::vnd(25_990_000).display(), "25.990.000 \u{20ab}");
        assert_eq!(Money::vnd(990).display(), "990 \u{20ab}");
        assert_eq!(Money::vnd(0).display(), "0 \u{20ab}");
    }

    #[test]
    fn test_usd_display() {
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
        assert_eq!(Money::new(123_456_705, Currency::USD).display(), "$1,234,567.05");
    }

    #[test]
    fn test_try_add_and_mismatch() {
        let a = Money::vnd(1000);
        let b = Money::vnd(500);
        assert_eq!(a.try_add(&b), Some(Money::vnd(1500)));
        assert_eq!(a.try_add(&Money::new(1, Currency::USD)), None);
    }

    #[test]
    fn test_overflow_is_none() {
        let big = Money::vnd(i64::MAX);
        assert_eq!(big.try_add(&Money::vnd(1)), None);
        assert_eq!(big.try_multiply(2), None);
    }

    #[test]
    fn test_try_sum() {
        let prices = [Money::vnd(10), Money::vnd(20), Money::vnd(30)];
        assert_eq!(Money::try_sum(prices.iter(), Currency::VND), Some(Money::vnd(60)));
        assert_eq!(Money::try_sum([].iter(), Currency::VND), Some(Money::vnd(0)));
    }
}
