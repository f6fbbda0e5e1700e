//! Metric-prefixed time magnitudes.
//!
//! The harness prints timings as `<number> <prefix>s` where the prefix is a
//! power-of-1000 SI tier. Everything downstream works in seconds (`f64`).

use crate::error::{Error, Result};

/// Power-of-1000 scale symbol, ordered from smallest to largest tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetricPrefix {
    Nano,
    Micro,
    Milli,
    Unit,
    Kilo,
    Mega,
    Giga,
    Tera,
    Peta,
    Exa,
    Zetta,
    Yotta,
}

impl MetricPrefix {
    pub const ALL: [MetricPrefix; 12] = [
        MetricPrefix::Nano,
        MetricPrefix::Micro,
        MetricPrefix::Milli,
        MetricPrefix::Unit,
        MetricPrefix::Kilo,
        MetricPrefix::Mega,
        MetricPrefix::Giga,
        MetricPrefix::Tera,
        MetricPrefix::Peta,
        MetricPrefix::Exa,
        MetricPrefix::Zetta,
        MetricPrefix::Yotta,
    ];

    /// Exponent of 1000 this prefix stands for (`-3` for nano up to `8` for yotta).
    pub fn exponent(self) -> i32 {
        self as i32 - 3
    }

    pub fn symbol(self) -> &'static str {
        match self {
            MetricPrefix::Nano => "n",
            MetricPrefix::Micro => "μ",
            MetricPrefix::Milli => "m",
            MetricPrefix::Unit => "",
            MetricPrefix::Kilo => "k",
            MetricPrefix::Mega => "M",
            MetricPrefix::Giga => "G",
            MetricPrefix::Tera => "T",
            MetricPrefix::Peta => "P",
            MetricPrefix::Exa => "E",
            MetricPrefix::Zetta => "Z",
            MetricPrefix::Yotta => "Y",
        }
    }

    /// Parse a prefix symbol. The micro sign (U+00B5) is accepted for micro.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        if symbol == "\u{b5}" {
            return Some(MetricPrefix::Micro);
        }
        Self::ALL.into_iter().find(|p| p.symbol() == symbol)
    }

    /// Next larger tier, or `None` at yotta.
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self as usize + 1).copied()
    }

    pub fn multiplier(self) -> f64 {
        1000f64.powi(self.exponent())
    }
}

/// Convert `numeric_text` scaled by `prefix_symbol` into seconds.
///
/// Thousands separators are stripped before parsing, so `("1,234.50", "m")`
/// is 1.2345 s.
pub fn parse_magnitude(numeric_text: &str, prefix_symbol: &str) -> Result<f64> {
    let cleaned = numeric_text.replace(',', "");
    let value: f64 = cleaned.parse().map_err(|_| Error::MalformedNumber {
        text: numeric_text.to_string(),
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(Error::MalformedNumber {
            text: numeric_text.to_string(),
        });
    }

    let prefix = MetricPrefix::from_symbol(prefix_symbol).ok_or_else(|| Error::UnknownPrefix {
        symbol: prefix_symbol.to_string(),
    })?;

    Ok(value * prefix.multiplier())
}

/// Magnitude, in hundredths, at which a value is promoted to the next tier.
const PROMOTE_AT_CENTS: f64 = 250_000.0;

/// Render seconds as `<value> <prefix>s`, starting from nanoseconds and
/// promoting one tier per factor of 1000 while the value, rounded to two
/// decimals, is 2500 or more.
///
/// Residuals in `1000..2500` keep a grouped-thousands form, e.g.
/// `"1,500.00 ns"`. Rounding happens before the split, so `1999.996` shows
/// as `"2,000.00"`.
pub fn format_seconds(seconds: f64) -> Result<String> {
    let mut value = seconds * 1e9;
    let mut prefix = MetricPrefix::Nano;

    let cents = loop {
        let cents = (value * 100.0).round();
        if cents < PROMOTE_AT_CENTS {
            break cents;
        }
        prefix = prefix
            .next()
            .ok_or(Error::PrefixRangeExceeded { seconds })?;
        value /= 1000.0;
    };

    if cents >= 100_000.0 {
        let thousands = (cents / 100_000.0).trunc();
        let rest = (cents - thousands * 100_000.0) / 100.0;
        Ok(format!(
            "{},{:06.2} {}s",
            thousands as u64,
            rest,
            prefix.symbol()
        ))
    } else {
        Ok(format!("{:.2} {}s", cents / 100.0, prefix.symbol()))
    }
}
