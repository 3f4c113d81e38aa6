use anyhow::bail;
use serde_with::{DeserializeFromStr, SerializeDisplay};

use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

/// Represents a product price.
///
/// The amount is stored internally as an integer number of cents, but the
/// [`Display`] implementation formats it for display as a decimal to 2
/// places (for example, `4.50`).
#[derive(
    Clone, Copy, Default, DeserializeFromStr, SerializeDisplay, Eq, PartialEq, Ord, PartialOrd,
)]
pub struct Price(i64);

impl Debug for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.abs();
        write!(f, "{sign}{}.{:02}", cents / 100, cents % 100)
    }
}

impl FromStr for Price {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim().trim_start_matches('$');
        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        let negative = whole.starts_with('-');
        let dollars: i64 = if whole.is_empty() || whole == "-" {
            0
        } else {
            whole.parse()?
        };
        let cents: i64 = match frac.len() {
            0 => 0,
            1 => 10 * frac.parse::<i64>()?,
            2 => frac.parse()?,
            _ => bail!("price {s:?} has more than 2 decimal places"),
        };
        let total = dollars.abs() * 100 + cents;
        Ok(Self(if negative { -total } else { total }))
    }
}
