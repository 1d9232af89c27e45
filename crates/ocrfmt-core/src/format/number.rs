//! Locale number, percent and currency formats.

use std::str::FromStr;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::is_space_like;
use crate::error::FormatError;
use crate::locale::LocaleSpec;

const SPACE_CLASS: &str = r"[\x{20}\x{A0}\x{202F}\x{2009}]";
const MINUS_CLASS: &str = r"[\-\x{2212}]";
const APOSTROPHE_CLASS: &str = r"['\x{2019}]";

/// Which of a locale's number formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberStyle {
    /// Plain decimal number, up to three fraction digits.
    Number,
    /// Value times 100 with a percent sign, no fraction digits.
    Percent,
    /// Amount with currency symbol and the currency's fraction digits.
    Currency,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Affixes {
    prefix: String,
    suffix: String,
}

/// A compiled number format.
#[derive(Debug, Clone)]
pub struct NumberFormat {
    decimal: char,
    grouping: char,
    grouping_size: usize,
    min_fraction: u32,
    max_fraction: u32,
    multiplier: u32,
    positive: Affixes,
    negative: Affixes,
    positive_re: Regex,
    negative_re: Regex,
}

impl NumberFormat {
    /// Compile one of the number formats described by a locale spec.
    pub fn new(spec: &LocaleSpec, style: NumberStyle) -> Result<Self, FormatError> {
        let (pattern, min_fraction, max_fraction, multiplier) = match style {
            NumberStyle::Number => ("#", 0, 3, 1),
            NumberStyle::Percent => (spec.percent_pattern.as_str(), 0, 0, 100),
            NumberStyle::Currency => (
                spec.currency_pattern.as_str(),
                spec.currency_digits,
                spec.currency_digits,
                1,
            ),
        };

        let (positive_pattern, negative_pattern) = match pattern.split_once(';') {
            Some((positive, negative)) => (positive, Some(negative)),
            None => (pattern, None),
        };

        let positive = parse_affixes(positive_pattern, spec)?;
        let negative = match negative_pattern {
            Some(negative) => parse_affixes(negative, spec)?,
            None => Affixes {
                prefix: format!("{}{}", spec.minus_sign, positive.prefix),
                suffix: positive.suffix.clone(),
            },
        };

        if spec.decimal_separator == spec.grouping_separator {
            return Err(FormatError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: "decimal and grouping separator are identical".to_string(),
            });
        }

        let body = body_regex(spec.decimal_separator, spec.grouping_separator, spec.grouping_size);
        let positive_re = compile(&positive, &body, spec.minus_sign, pattern)?;
        let negative_re = compile(&negative, &body, spec.minus_sign, pattern)?;

        Ok(Self {
            decimal: spec.decimal_separator,
            grouping: spec.grouping_separator,
            grouping_size: spec.grouping_size,
            min_fraction,
            max_fraction,
            multiplier,
            positive,
            negative,
            positive_re,
            negative_re,
        })
    }

    /// Format a value, rounding half to even.
    pub fn format(&self, value: f64) -> String {
        let affixes = if value.is_sign_negative() {
            &self.negative
        } else {
            &self.positive
        };

        let body = if value.is_nan() {
            "NaN".to_string()
        } else if value.is_infinite() {
            "∞".to_string()
        } else {
            self.format_magnitude(value.abs())
        };

        format!("{}{}{}", affixes.prefix, body, affixes.suffix)
    }

    /// Parse text that must match this format completely.
    pub fn parse(&self, text: &str) -> Result<f64, String> {
        let (caps, negative) = if let Some(caps) = self.positive_re.captures(text) {
            (caps, false)
        } else if let Some(caps) = self.negative_re.captures(text) {
            (caps, true)
        } else {
            return Err(format!("does not match {}", self.pattern()));
        };

        let integer: String = caps["int"].chars().filter(char::is_ascii_digit).collect();
        let literal = match caps.name("frac") {
            Some(fraction) => format!("{}.{}", integer, fraction.as_str()),
            None => integer,
        };

        let magnitude: f64 = literal
            .parse()
            .map_err(|e| format!("invalid number {literal:?}: {e}"))?;
        if !magnitude.is_finite() {
            return Err(format!("{literal:?} is out of range"));
        }
        let value = magnitude / f64::from(self.multiplier);

        Ok(if negative { -value } else { value })
    }

    /// Pattern in the conventional `#,##0.00` notation.
    pub fn pattern(&self) -> String {
        let mut fraction = String::new();
        if self.max_fraction > 0 {
            fraction.push(self.decimal);
            fraction.extend(std::iter::repeat_n('0', self.min_fraction as usize));
            fraction.extend(std::iter::repeat_n('#', (self.max_fraction - self.min_fraction) as usize));
        }
        format!(
            "{}#{}##0{}{}",
            self.positive.prefix, self.grouping, fraction, self.positive.suffix
        )
    }

    fn format_magnitude(&self, magnitude: f64) -> String {
        let rounded = Decimal::from_str(&magnitude.to_string())
            .ok()
            .and_then(|d| d.checked_mul(Decimal::from(self.multiplier)))
            .map(|d| d.round_dp_with_strategy(self.max_fraction, RoundingStrategy::MidpointNearestEven))
            .map(|d| d.to_string())
            .unwrap_or_else(|| {
                format!(
                    "{:.*}",
                    self.max_fraction as usize,
                    magnitude * f64::from(self.multiplier)
                )
            });

        let (integer, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));

        let mut fraction = fraction.trim_end_matches('0').to_string();
        while fraction.len() < self.min_fraction as usize {
            fraction.push('0');
        }

        let mut out = self.group(integer);
        if !fraction.is_empty() {
            out.push(self.decimal);
            out.push_str(&fraction);
        }
        out
    }

    fn group(&self, integer: &str) -> String {
        if self.grouping_size == 0 {
            return integer.to_string();
        }

        let chars: Vec<char> = integer.chars().collect();
        let mut grouped = String::with_capacity(integer.len() + integer.len() / self.grouping_size);
        for (i, c) in chars.iter().enumerate() {
            if i > 0 && (chars.len() - i) % self.grouping_size == 0 {
                grouped.push(self.grouping);
            }
            grouped.push(*c);
        }
        grouped
    }
}

fn parse_affixes(pattern: &str, spec: &LocaleSpec) -> Result<Affixes, FormatError> {
    let mut parts = pattern.split('#');
    let (Some(prefix), Some(suffix), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(FormatError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: "expected exactly one '#' digit placeholder".to_string(),
        });
    };

    let expand = |affix: &str| -> String {
        let mut out = String::new();
        for c in affix.chars() {
            match c {
                '¤' => out.push_str(&spec.currency_symbol),
                '-' => out.push(spec.minus_sign),
                other => out.push(other),
            }
        }
        out
    };

    Ok(Affixes {
        prefix: expand(prefix),
        suffix: expand(suffix),
    })
}

fn char_class(c: char, minus: char) -> String {
    if is_space_like(c) {
        SPACE_CLASS.to_string()
    } else if c == minus || c == '-' || c == '\u{2212}' {
        MINUS_CLASS.to_string()
    } else if c == '\'' || c == '\u{2019}' {
        APOSTROPHE_CLASS.to_string()
    } else {
        regex::escape(c.encode_utf8(&mut [0; 4]))
    }
}

fn body_regex(decimal: char, grouping: char, grouping_size: usize) -> String {
    let decimal = regex::escape(decimal.encode_utf8(&mut [0; 4]));
    let integer = if grouping_size == 0 {
        "[0-9]+".to_string()
    } else {
        let group = if is_space_like(grouping) {
            SPACE_CLASS.to_string()
        } else if grouping == '\'' || grouping == '\u{2019}' {
            APOSTROPHE_CLASS.to_string()
        } else {
            regex::escape(grouping.encode_utf8(&mut [0; 4]))
        };
        format!("[0-9]{{1,{n}}}(?:{group}[0-9]{{{n}}})+|[0-9]+", n = grouping_size)
    };
    format!("(?P<int>{integer})(?:{decimal}(?P<frac>[0-9]+))?")
}

fn compile(affixes: &Affixes, body: &str, minus: char, pattern: &str) -> Result<Regex, FormatError> {
    let prefix: String = affixes.prefix.chars().map(|c| char_class(c, minus)).collect();
    let suffix: String = affixes.suffix.chars().map(|c| char_class(c, minus)).collect();

    Regex::new(&format!("^{prefix}{body}{suffix}$")).map_err(|e| FormatError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}
