use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monetary amount parsed from a remote payload.
///
/// Construction never fails: an absent or unparseable amount holds zero, so
/// downstream consumers never branch on parse failure. Display formatting is
/// the presentation collaborator's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub amount: Decimal,
}

impl Price {
    pub fn new(amount: Option<&str>) -> Self {
        Price {
            amount: parse_amount(amount),
        }
    }

    pub fn from_decimal(amount: Decimal) -> Self {
        Price { amount }
    }

    pub fn zero() -> Self {
        Price {
            amount: Decimal::ZERO,
        }
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        self.amount.cmp(&other.amount)
    }
}

/// Percentage change parsed from a remote payload, same zero-on-absence
/// contract as [`Price`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percentage {
    pub amount: Decimal,
}

impl Percentage {
    pub fn new(amount: Option<&str>) -> Self {
        Percentage {
            amount: parse_amount(amount),
        }
    }

    pub fn zero() -> Self {
        Percentage {
            amount: Decimal::ZERO,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}

fn parse_amount(amount: Option<&str>) -> Decimal {
    amount
        .and_then(|value| Decimal::from_str(value.trim()).ok())
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn price_parses_valid_amount() {
        let price = Price::new(Some("29446.336548759988"));
        assert_eq!(price.amount, dec!(29446.336548759988));
    }

    #[test]
    fn price_defaults_to_zero_on_absent_amount() {
        assert_eq!(Price::new(None).amount, Decimal::ZERO);
    }

    #[test]
    fn price_defaults_to_zero_on_invalid_amount() {
        assert_eq!(Price::new(Some("not a number")).amount, Decimal::ZERO);
        assert_eq!(Price::new(Some("")).amount, Decimal::ZERO);
    }

    #[test]
    fn price_compares_by_amount() {
        let low = Price::new(Some("20000.20"));
        let high = Price::new(Some("30000.47"));
        assert!(low < high);
        assert_eq!(low, Price::new(Some("20000.20")));
    }

    #[test]
    fn percentage_parses_negative_amount() {
        let percentage = Percentage::new(Some("-0.97"));
        assert_eq!(percentage.amount, dec!(-0.97));
        assert!(percentage.is_negative());
    }

    #[test]
    fn percentage_defaults_to_zero_on_absent_amount() {
        assert_eq!(Percentage::new(None).amount, Decimal::ZERO);
    }
}
