//! Fixed-point price
//!
//! Ten digits total, two after the decimal point, stored as integer cents.
//! Serialized as a string (`"1200.00"`); accepts strings or JSON numbers.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Total significant digits allowed.
pub const MAX_DIGITS: u32 = 10;

/// Digits after the decimal point.
pub const DECIMAL_PLACES: u32 = 2;

const WHOLE_DIGITS: u32 = MAX_DIGITS - DECIMAL_PLACES;
const MAX_CENTS: i64 = 10i64.pow(MAX_DIGITS) - 1;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    #[error("A valid number is required.")]
    Malformed,

    #[error("Ensure that there are no more than 2 decimal places.")]
    TooManyDecimalPlaces,

    #[error("Ensure that there are no more than 8 digits before the decimal point.")]
    TooManyWholeDigits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    cents: i64,
}

impl Price {
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        if cents.abs() > MAX_CENTS {
            return Err(PriceError::TooManyWholeDigits);
        }
        Ok(Self { cents })
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };

        let (whole, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(PriceError::Malformed);
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(PriceError::Malformed);
        }

        // Trailing zeros past the second place carry no precision
        let frac = frac.trim_end_matches('0');
        if frac.len() > DECIMAL_PLACES as usize {
            return Err(PriceError::TooManyDecimalPlaces);
        }
        let whole = whole.trim_start_matches('0');
        if whole.len() > WHOLE_DIGITS as usize {
            return Err(PriceError::TooManyWholeDigits);
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| PriceError::Malformed)?
        };
        let frac: i64 = format!("{:0<2}", frac)
            .parse()
            .map_err(|_| PriceError::Malformed)?;

        let cents = whole * 100 + frac;
        Price::from_cents(if negative { -cents } else { cents })
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        let text = match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s,
            Raw::Number(n) => n.to_string(),
        };
        text.parse().map_err(de::Error::custom)
    }
}
