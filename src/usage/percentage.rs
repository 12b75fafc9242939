//! Fixed-point utilization percentages.
//!
//! Percentages are stored as an integer count of `10^-PERCENTAGE_SCALE`
//! units so that equal ratios (1/3 and 2/6) compare equal and ranking
//! ties are exact. JSON carries the decimal text (`"33.3333"`) so that a
//! written report reads back to the same units.

use crate::utils::config::PERCENTAGE_SCALE;
use crate::utils::error::UsageError;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const SCALE_FACTOR: i128 = 10i128.pow(PERCENTAGE_SCALE);

/// Decimal percentage with `PERCENTAGE_SCALE` fractional digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Percentage(i128);

impl Percentage {
    pub const ZERO: Percentage = Percentage(0);

    /// `current / limit * 100`, rounded half away from zero
    ///
    /// Returns `None` when `limit <= 0`.
    pub fn from_ratio(current: i64, limit: i64) -> Option<Self> {
        if limit <= 0 {
            return None;
        }

        let numerator = i128::from(current) * 100 * SCALE_FACTOR;
        let denominator = i128::from(limit);

        let mut units = numerator / denominator;
        let remainder = (numerator % denominator).abs();
        if remainder * 2 >= denominator {
            units += numerator.signum();
        }

        Some(Percentage(units))
    }

    /// Build from a whole number of percent
    pub fn from_whole(percent: i64) -> Self {
        Percentage(i128::from(percent) * SCALE_FACTOR)
    }

    /// Nearest representable value to a float, used for thresholds and JSON input
    pub fn from_f64(value: f64) -> Self {
        Percentage((value * SCALE_FACTOR as f64).round() as i128)
    }

    /// Raw fixed-point units
    pub fn units(&self) -> i128 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / SCALE_FACTOR as f64
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(
            f,
            "{}{}.{:0width$}",
            sign,
            abs / SCALE_FACTOR,
            abs % SCALE_FACTOR,
            width = PERCENTAGE_SCALE as usize
        )
    }
}

impl FromStr for Percentage {
    type Err = UsageError;

    /// Parse decimal text exactly, e.g. `"-12.5"` or `"33.3333"`
    ///
    /// At most `PERCENTAGE_SCALE` fractional digits are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || UsageError::InvalidPercentage(s.to_string());

        let text = s.trim();
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty()
            || !all_digits(whole)
            || !all_digits(fraction)
            || fraction.len() > PERCENTAGE_SCALE as usize
        {
            return Err(invalid());
        }

        let whole: i128 = whole.parse().map_err(|_| invalid())?;
        let fraction_units: i128 = if fraction.is_empty() {
            0
        } else {
            let padding = PERCENTAGE_SCALE - fraction.len() as u32;
            fraction.parse::<i128>().map_err(|_| invalid())? * 10i128.pow(padding)
        };

        let units = whole
            .checked_mul(SCALE_FACTOR)
            .and_then(|units| units.checked_add(fraction_units))
            .ok_or_else(invalid)?;

        Ok(Percentage(if negative { -units } else { units }))
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct PercentageVisitor;

impl<'de> Visitor<'de> for PercentageVisitor {
    type Value = Percentage;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal percentage string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Percentage, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Percentage, E> {
        Ok(Percentage::from_whole(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Percentage, E> {
        Ok(Percentage(i128::from(v) * SCALE_FACTOR))
    }

    // Hand-written reports may still carry float literals
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Percentage, E> {
        if v.is_finite() {
            Ok(Percentage::from_f64(v))
        } else {
            Err(E::custom(format!("non-finite percentage {}", v)))
        }
    }
}

impl<'de> Deserialize<'de> for Percentage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PercentageVisitor)
    }
}
