use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Sub};
use std::str::FromStr;

/// Money type with 8 decimal places of internal precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    /// one cent, the smallest amount a credit line accepts
    pub const CENT: Money = Money(Decimal::from_parts(1, 0, 0, false, 2));

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(half_up(d, 8))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(half_up(Decimal::from_str(s)?, 8)))
    }

    /// create from integer amount (dollars, euros, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// round half-up (midpoint away from zero) to `dp` places
    pub fn round_half_up(&self, dp: u32) -> Self {
        Money(half_up(self.0, dp))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// `None` when the sum leaves the decimal range
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(|d| Money(half_up(d, 8)))
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(|d| Money(half_up(d, 8)))
    }

    /// `None` when the product leaves the decimal range
    pub fn checked_mul(self, factor: Decimal) -> Option<Self> {
        self.0.checked_mul(factor).map(|d| Money(half_up(d, 8)))
    }
}

fn half_up(d: Decimal, dp: u32) -> Decimal {
    d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(half_up(self.0 + other.0, 8))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(half_up(self.0 - other.0, 8))
    }
}

impl Div<Decimal> for Money {
    type Output = Money;

    fn div(self, other: Decimal) -> Money {
        Money(half_up(self.0 / other, 8))
    }
}

/// rate type for annual interest rates expressed as a fraction (0.12 = 12%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);
    pub const ONE: Rate = Rate(Decimal::ONE);

    /// create from decimal (e.g., 0.05 for 5%)
    pub fn from_decimal(d: Decimal) -> Self {
        Rate(d)
    }

    /// create from percentage (e.g., 5 for 5%)
    pub fn from_percentage(p: u32) -> Self {
        Rate(Decimal::from(p) / Decimal::from(100))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::from(100)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// monthly rate from annual rate, rounded half-up to 6 places
    pub fn monthly_rate(&self) -> Rate {
        Rate(half_up(self.0 / Decimal::from(12), 6))
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_precision() {
        let m = Money::from_str_exact("100.123456785").unwrap();
        assert_eq!(m.to_string(), "100.12345679"); // half-up to 8 places
    }

    #[test]
    fn test_round_half_up_not_bankers() {
        // bankers rounding would give 0.12
        assert_eq!(Money::from_decimal(dec!(0.125)).round_half_up(2).as_decimal(), dec!(0.13));
        assert_eq!(Money::from_decimal(dec!(2.345)).round_half_up(2).as_decimal(), dec!(2.35));
    }

    #[test]
    fn test_cent_constant() {
        assert_eq!(Money::CENT, Money::from_str_exact("0.01").unwrap());
        assert!(Money::CENT.is_positive());
        assert!(!Money::ZERO.is_positive());
    }

    #[test]
    fn test_monthly_rate_rounding() {
        assert_eq!(Rate::from_percentage(12).monthly_rate().as_decimal(), dec!(0.01));
        // 0.25 / 12 = 0.0208333...
        assert_eq!(Rate::from_percentage(25).monthly_rate().as_decimal(), dec!(0.020833));
        // 0.1 / 12 = 0.00833333...
        assert_eq!(Rate::from_percentage(10).monthly_rate().as_decimal(), dec!(0.008333));
    }

    #[test]
    fn test_debt_bookkeeping_is_exact() {
        let limit = Money::from_str_exact("1000.10").unwrap();
        let draw = Money::from_str_exact("333.37").unwrap();
        let available = limit - draw;
        let debt = Money::ZERO + draw;
        assert_eq!(available + debt, limit);
    }

    #[test]
    fn test_checked_ops_at_the_decimal_ceiling() {
        let max = Money::from_decimal(Decimal::MAX);
        assert_eq!(max.checked_add(Money::from_major(1)), None);
        assert_eq!(Money::from_decimal(Decimal::MIN).checked_sub(Money::from_major(1)), None);
        assert_eq!(max.checked_mul(dec!(2)), None);

        let near = Money::from_str_exact("70000000000000000000000000000").unwrap();
        assert_eq!(near.checked_sub(near), Some(Money::ZERO));
        assert_eq!(
            Money::from_major(100).checked_mul(dec!(0.5)),
            Some(Money::from_major(50))
        );
    }
}
