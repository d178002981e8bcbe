use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

/// fractional digits of every rounded monetary amount
pub const MONEY_DP: u32 = 2;

/// fractional digits kept for the monthly interest rate
pub const RATE_DP: u32 = 10;

/// percent-per-year to fraction-per-month divisor
const MONTHLY_RATE_DIVISOR: u32 = 1200;

/// round half-up (away from zero on a tie), result carries exactly `dp` digits
pub fn round_half_up(d: Decimal, dp: u32) -> Decimal {
    let mut rounded = d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    rounded
}

/// Exact fixed-point monetary amount.
///
/// Arithmetic is exact; rounding only happens where a caller asks for it,
/// always half-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::from_parts(0, 0, 0, false, MONEY_DP));

    /// create from decimal without rounding
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d)
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str_exact(s.trim())?))
    }

    /// create from integer amount (dollars, crowns, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from minor amount (cents)
    pub fn from_minor(amount: i64) -> Self {
        Money(Decimal::new(amount, MONEY_DP))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// round half-up to whole cents
    pub fn round_cents(&self) -> Self {
        Money(round_half_up(self.0, MONEY_DP))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Machine-oriented rendering: half-up to cents, `.` as decimal point,
    /// no grouping, always two fractional digits.
    pub fn to_plain_string(&self) -> String {
        let rounded = round_half_up(self.0, MONEY_DP);
        // rust_decimal keeps the sign on a rounded-away negative zero
        let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };
        format!("{:.2}", rounded)
    }
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

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl From<u32> for Money {
    fn from(i: u32) -> Self {
        Money::from_major(i as i64)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 -= other.0;
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, other: Decimal) -> Money {
        Money(self.0 * other)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, x| acc + *x)
    }
}

/// Annual interest rate expressed in percent (5.0 means 5% p.a.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from an annual percentage (e.g., 5.0 for 5%)
    pub fn from_percent(p: Decimal) -> Self {
        Rate(p)
    }

    /// create from whole percent
    pub fn from_percentage(p: u32) -> Self {
        Rate(Decimal::from(p))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Rate(Decimal::from_str_exact(s.trim())?))
    }

    /// get annual percentage
    pub fn as_percent(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// annual percentage with two fractional digits, `.` as decimal point
    pub fn to_plain_string(&self) -> String {
        format!("{:.2}", round_half_up(self.0, MONEY_DP))
    }

    /// fraction-per-month, half-up to ten fractional digits
    pub fn monthly_fraction(&self) -> Decimal {
        round_half_up(self.0 / Decimal::from(MONTHLY_RATE_DIVISOR), RATE_DP)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl FromStr for Rate {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rate::from_str_exact(s)
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate::from_percent(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_half_up_on_tie() {
        assert_eq!(round_half_up(dec!(2.345), 2), dec!(2.35));
        assert_eq!(round_half_up(dec!(2.355), 2), dec!(2.36));
        assert_eq!(round_half_up(dec!(-2.345), 2), dec!(-2.35));
        assert_eq!(round_half_up(dec!(2.344999), 2), dec!(2.34));
        assert_eq!(round_half_up(dec!(100), 2).to_string(), "100.00");
    }

    #[test]
    fn test_money_exact_arithmetic() {
        let a = Money::from_str_exact("0.10").unwrap();
        let b = Money::from_str_exact("0.20").unwrap();
        assert_eq!(a + b, Money::from_str_exact("0.30").unwrap());

        let mut c = Money::from_major(100);
        c -= Money::from_minor(1);
        assert_eq!(c, Money::from_minor(9_999));
    }

    #[test]
    fn test_money_plain_rendering() {
        assert_eq!(Money::from_major(100).to_plain_string(), "100.00");
        assert_eq!(Money::from_decimal(dec!(416.66667)).to_plain_string(), "416.67");
        assert_eq!(Money::from_decimal(dec!(0.005)).to_plain_string(), "0.01");
        assert_eq!(Money::from_decimal(dec!(-0.001)).to_plain_string(), "0.00");
        assert_eq!(Money::from_decimal(dec!(-12.5)).to_plain_string(), "-12.50");
    }

    #[test]
    fn test_money_sum() {
        let amounts = vec![Money::from_minor(1), Money::from_minor(2), Money::from_minor(3)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total, Money::from_minor(6));
    }

    #[test]
    fn test_monthly_fraction_precision() {
        // 5 / 1200 = 0.0041666666..., ten digits half-up
        assert_eq!(Rate::from_percent(dec!(5.0)).monthly_fraction(), dec!(0.0041666667));
        assert_eq!(Rate::from_percentage(12).monthly_fraction(), dec!(0.01));
        assert!(Rate::ZERO.monthly_fraction().is_zero());
    }

    #[test]
    fn test_rate_plain_rendering() {
        assert_eq!(Rate::from_percent(dec!(5.0)).to_plain_string(), "5.00");
        assert_eq!(Rate::from_percent(dec!(3.125)).to_plain_string(), "3.13");
        assert_eq!(Rate::ZERO.to_plain_string(), "0.00");
    }

    #[test]
    fn test_rate_parsing() {
        assert_eq!(" 6.5 ".parse::<Rate>().unwrap(), Rate::from_percent(dec!(6.5)));
        assert!("abc".parse::<Rate>().is_err());
    }
}
