mod guest;
mod host;
mod reservation;

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use derive_more::{Display, Error};

pub use self::guest::*;
pub use self::host::*;
pub use self::reservation::*;

/// Monetary amount in cents. Persisted and displayed as plain decimal text
/// ("100", "150.5", "99.99"). Signed so that a negative cost can be rejected
/// by validation instead of being unrepresentable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (dollars, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };
        let dollars = dollars.parse::<i64>().map_err(|_| ParseMoneyError)?;
        let cents = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| ParseMoneyError)? * 10,
            2 => fraction.parse::<i64>().map_err(|_| ParseMoneyError)?,
            _ => return Err(ParseMoneyError),
        };
        let total = dollars * 100 + cents;
        Ok(Money(if negative { -total } else { total }))
    }
}

#[derive(Error, Display, Debug, Clone, Copy, PartialEq, Eq)]
#[display("Invalid monetary amount")]
pub struct ParseMoneyError;
