use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// A dollar amount, always held at two decimal places.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(from = "Decimal")]
pub struct Money(Decimal);

/// Largest amount, in whole dollars, accepted from operator or file input.
const MAX_DOLLARS: i64 = 1_000_000_000_000;

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount.round_dp(2))
    }

    /// Whole-dollar amount, e.g. `Money::from_dollars(35)`.
    pub fn from_dollars(dollars: i64) -> Self {
        Self(Decimal::from(dollars))
    }

    /// Parse operator or file input. Surrounding whitespace and a leading `$` are accepted.
    pub fn parse(input: &str) -> Result<Self, MoneyError> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
        if digits.is_empty() {
            return Err(MoneyError::Empty);
        }

        let amount = Decimal::from_str(digits).map_err(|_| MoneyError::Invalid(trimmed.to_string()))?;
        if amount.abs() > Decimal::from(MAX_DOLLARS) {
            return Err(MoneyError::OutOfRange(trimmed.to_string()));
        }
        Ok(Self::new(amount))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self::new(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    #[error("Amount is empty")]
    Empty,

    #[error("Invalid amount: {0}")]
    Invalid(String),

    #[error("Amount out of range: {0}")]
    OutOfRange(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_accepts_dollar_sign_and_rounds() {
        assert_eq!(Money::parse(" $12.5 ").unwrap(), Money::new(dec!(12.50)));
        assert_eq!(Money::parse("8").unwrap(), Money::from_dollars(8));
        assert_eq!(Money::parse("19.999").unwrap().to_string(), "20.00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Money::parse(""), Err(MoneyError::Empty));
        assert_eq!(Money::parse("$"), Err(MoneyError::Empty));
        assert!(matches!(Money::parse("twelve"), Err(MoneyError::Invalid(_))));
    }

    #[test]
    fn test_parse_caps_huge_amounts() {
        assert!(Money::parse("1000000000000").is_ok());
        assert!(matches!(Money::parse("1000000000000.01"), Err(MoneyError::OutOfRange(_))));
        assert!(matches!(
            Money::parse("79228162514264337593543950335"),
            Err(MoneyError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_addition_saturates() {
        let max = Money::new(Decimal::MAX);
        let mut total = max + Money::from_dollars(35);
        assert_eq!(total, max);

        total += Money::from_dollars(10);
        assert_eq!(total, max);
        assert_eq!([max, max].into_iter().sum::<Money>(), max);
    }

    #[test]
    fn test_positive_and_sum() {
        assert!(Money::from_dollars(1).is_positive());
        assert!(!Money::ZERO.is_positive());
        assert!(!Money::parse("-3").unwrap().is_positive());

        let total: Money = [Money::from_dollars(50), Money::from_dollars(35), Money::from_dollars(35)]
            .into_iter()
            .sum();
        assert_eq!(total.to_string(), "120.00");
    }
}
