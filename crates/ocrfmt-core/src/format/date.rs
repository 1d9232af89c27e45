//! Pattern-based date and time formats.
//!
//! Patterns use the usual letters: `y` year, `M` month, `d` day, `E` weekday,
//! `H` hour (0-23), `h` hour (1-12), `m` minute, `s` second, `a` AM/PM
//! marker. Text in single quotes is literal, `''` is a single quote.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use super::is_space_like;
use crate::error::FormatError;
use crate::locale::CalendarNames;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year,
    Month,
    Day,
    Weekday,
    Hour24,
    Hour12,
    Minute,
    Second,
    AmPm,
}

impl Field {
    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'y' => Some(Self::Year),
            'M' => Some(Self::Month),
            'd' => Some(Self::Day),
            'E' => Some(Self::Weekday),
            'H' => Some(Self::Hour24),
            'h' => Some(Self::Hour12),
            'm' => Some(Self::Minute),
            's' => Some(Self::Second),
            'a' => Some(Self::AmPm),
            _ => None,
        }
    }

    fn is_numeric(self, width: usize) -> bool {
        match self {
            Self::Month => width <= 2,
            Self::Weekday | Self::AmPm => false,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Field(Field, usize),
    Literal(String),
}

/// A compiled date, time or date-time pattern bound to a language's names.
#[derive(Debug, Clone)]
pub struct DateFormat {
    pattern: String,
    tokens: Vec<Token>,
    names: Arc<CalendarNames>,
}

/// Parsed field values before they are assembled into a timestamp.
#[derive(Debug, Default)]
struct Fields {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    hour: Option<u32>,
    hour12: Option<u32>,
    minute: Option<u32>,
    second: Option<u32>,
    pm: Option<bool>,
}

impl DateFormat {
    pub fn compile(pattern: &str, names: Arc<CalendarNames>) -> Result<Self, FormatError> {
        let tokens = tokenize(pattern)?;
        Ok(Self {
            pattern: pattern.to_string(),
            tokens,
            names,
        })
    }

    /// Join a date and a time format with literal text in between.
    pub fn combine(date: &DateFormat, separator: &str, time: &DateFormat) -> Self {
        let mut tokens = date.tokens.clone();
        if !separator.is_empty() {
            push_literal(&mut tokens, separator);
        }
        for token in &time.tokens {
            match token {
                Token::Literal(text) => push_literal(&mut tokens, text),
                field => tokens.push(field.clone()),
            }
        }

        Self {
            pattern: format!("{}{}{}", date.pattern, quote(separator), time.pattern),
            tokens,
            names: date.names.clone(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format(&self, value: &NaiveDateTime) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Field(field, width) => self.format_field(&mut out, *field, *width, value),
            }
        }
        out
    }

    /// Parse text that must match the whole pattern.
    ///
    /// Missing date fields default to 1970-01-01, missing time fields to
    /// midnight.
    pub fn parse(&self, text: &str) -> Result<NaiveDateTime, String> {
        let mut fields = Fields::default();
        let mut rest = text;

        for (i, token) in self.tokens.iter().enumerate() {
            rest = match token {
                Token::Literal(literal) => match_literal(rest, literal)
                    .ok_or_else(|| format!("expected {literal:?} at {rest:?}"))?,
                Token::Field(field, width) => {
                    let next_is_numeric = matches!(
                        self.tokens.get(i + 1),
                        Some(Token::Field(next, next_width)) if next.is_numeric(*next_width)
                    );
                    self.parse_field(rest, *field, *width, next_is_numeric, &mut fields)?
                }
            };
        }

        if !rest.is_empty() {
            return Err(format!("unexpected trailing text {rest:?}"));
        }

        fields.into_timestamp()
    }

    fn format_field(&self, out: &mut String, field: Field, width: usize, value: &NaiveDateTime) {
        match field {
            Field::Year if width == 2 => pad(out, value.year().rem_euclid(100), 2),
            Field::Year => pad(out, value.year(), width),
            Field::Month if width >= 4 => out.push_str(&self.names.months[value.month0() as usize]),
            Field::Month if width == 3 => out.push_str(&self.names.months_short[value.month0() as usize]),
            Field::Month => pad(out, value.month(), width),
            Field::Day => pad(out, value.day(), width),
            Field::Weekday => {
                let index = value.weekday().num_days_from_sunday() as usize;
                if width >= 4 {
                    out.push_str(&self.names.weekdays[index]);
                } else {
                    out.push_str(&self.names.weekdays_short[index]);
                }
            }
            Field::Hour24 => pad(out, value.hour(), width),
            Field::Hour12 => {
                let hour = value.hour() % 12;
                pad(out, if hour == 0 { 12 } else { hour }, width);
            }
            Field::Minute => pad(out, value.minute(), width),
            Field::Second => pad(out, value.second(), width),
            Field::AmPm => {
                let marker = if value.hour() < 12 { &self.names.am } else { &self.names.pm };
                out.push_str(marker);
            }
        }
    }

    fn parse_field<'t>(
        &self,
        text: &'t str,
        field: Field,
        width: usize,
        next_is_numeric: bool,
        fields: &mut Fields,
    ) -> Result<&'t str, String> {
        match field {
            Field::Month if width >= 3 => {
                let (index, rest) = match_name(text, &self.names.months, &self.names.months_short)
                    .ok_or_else(|| format!("expected month name at {text:?}"))?;
                fields.month = Some(index as u32 + 1);
                Ok(rest)
            }
            Field::Weekday => {
                let (_, rest) = match_name(text, &self.names.weekdays, &self.names.weekdays_short)
                    .ok_or_else(|| format!("expected weekday name at {text:?}"))?;
                Ok(rest)
            }
            Field::AmPm => {
                let markers = [self.names.am.clone(), self.names.pm.clone()];
                let (index, rest) = match_name(text, &markers, &[])
                    .ok_or_else(|| format!("expected AM/PM marker at {text:?}"))?;
                fields.pm = Some(index == 1);
                Ok(rest)
            }
            Field::Year => {
                let max = if next_is_numeric { width.max(2) } else { 4 };
                let (digits, rest) = take_digits(text, max).ok_or_else(|| format!("expected year at {text:?}"))?;
                let year: i32 = digits.parse().map_err(|_| format!("invalid year {digits:?}"))?;
                fields.year = Some(if width <= 2 && digits.len() == 2 {
                    pivot_year(year)
                } else {
                    year
                });
                Ok(rest)
            }
            numeric => {
                let max = if next_is_numeric { width.max(1) } else { 2 };
                let (digits, rest) =
                    take_digits(text, max).ok_or_else(|| format!("expected digits at {text:?}"))?;
                let value: u32 = digits.parse().map_err(|_| format!("invalid number {digits:?}"))?;
                let (slot, range) = match numeric {
                    Field::Month => (&mut fields.month, 1..=12),
                    Field::Day => (&mut fields.day, 1..=31),
                    Field::Hour24 => (&mut fields.hour, 0..=23),
                    Field::Hour12 => (&mut fields.hour12, 1..=12),
                    Field::Minute => (&mut fields.minute, 0..=59),
                    _ => (&mut fields.second, 0..=59),
                };
                if !range.contains(&value) {
                    return Err(format!("{value} is out of range"));
                }
                *slot = Some(value);
                Ok(rest)
            }
        }
    }
}

impl Fields {
    fn into_timestamp(self) -> Result<NaiveDateTime, String> {
        let year = self.year.unwrap_or(1970);
        let month = self.month.unwrap_or(1);
        let day = self.day.unwrap_or(1);

        let hour = match (self.hour, self.hour12) {
            (Some(hour), _) => hour,
            (None, Some(hour12)) => {
                let base = hour12 % 12;
                if self.pm == Some(true) { base + 12 } else { base }
            }
            (None, None) => 0,
        };

        NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| format!("no such date {year:04}-{month:02}-{day:02}"))?
            .and_hms_opt(hour, self.minute.unwrap_or(0), self.second.unwrap_or(0))
            .ok_or_else(|| "invalid time of day".to_string())
    }
}

/// Two-digit years 00-50 are 20xx, 51-99 are 19xx.
fn pivot_year(year: i32) -> i32 {
    if year <= 50 { 2000 + year } else { 1900 + year }
}

fn tokenize(pattern: &str) -> Result<Vec<Token>, FormatError> {
    let invalid = |reason: &str| FormatError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    };

    let mut tokens = Vec::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\'' {
            if chars.peek() == Some(&'\'') {
                chars.next();
                push_literal(&mut tokens, "'");
                continue;
            }
            let mut literal = String::new();
            loop {
                match chars.next() {
                    Some('\'') if chars.peek() == Some(&'\'') => {
                        chars.next();
                        literal.push('\'');
                    }
                    Some('\'') => break,
                    Some(other) => literal.push(other),
                    None => return Err(invalid("unterminated quote")),
                }
            }
            push_literal(&mut tokens, &literal);
        } else if c.is_ascii_alphabetic() {
            let field = Field::from_letter(c)
                .ok_or_else(|| invalid(&format!("unsupported pattern letter '{c}'")))?;
            let mut width = 1;
            while chars.peek() == Some(&c) {
                chars.next();
                width += 1;
            }
            tokens.push(Token::Field(field, width));
        } else {
            push_literal(&mut tokens, c.encode_utf8(&mut [0; 4]));
        }
    }

    if tokens.is_empty() {
        return Err(invalid("empty pattern"));
    }
    Ok(tokens)
}

fn push_literal(tokens: &mut Vec<Token>, text: &str) {
    if let Some(Token::Literal(last)) = tokens.last_mut() {
        last.push_str(text);
    } else {
        tokens.push(Token::Literal(text.to_string()));
    }
}

fn quote(text: &str) -> String {
    if text.chars().any(|c| c.is_ascii_alphabetic() || c == '\'') {
        format!("'{}'", text.replace('\'', "''"))
    } else {
        text.to_string()
    }
}

fn pad(out: &mut String, value: impl std::fmt::Display, width: usize) {
    out.push_str(&format!("{value:0>width$}"));
}

fn take_digits(text: &str, max: usize) -> Option<(&str, &str)> {
    let len = text
        .char_indices()
        .take(max)
        .take_while(|(_, c)| c.is_ascii_digit())
        .count();
    if len == 0 {
        None
    } else {
        Some(text.split_at(len))
    }
}

/// Case-insensitive comparison that treats all space-like characters alike.
fn fold(c: char) -> char {
    if is_space_like(c) {
        ' '
    } else {
        c.to_lowercase().next().unwrap_or(c)
    }
}

fn strip_folded<'t>(text: &'t str, expected: &str) -> Option<&'t str> {
    let mut rest = text.char_indices();
    for wanted in expected.chars() {
        let (_, actual) = rest.next()?;
        if fold(actual) != fold(wanted) {
            return None;
        }
    }
    Some(match rest.next() {
        Some((offset, _)) => &text[offset..],
        None => "",
    })
}

fn match_literal<'t>(text: &'t str, literal: &str) -> Option<&'t str> {
    strip_folded(text, literal)
}

/// Longest name matching the start of `text`, with its index.
fn match_name<'t>(text: &'t str, full: &[String], short: &[String]) -> Option<(usize, &'t str)> {
    full.iter()
        .enumerate()
        .chain(short.iter().enumerate())
        .filter_map(|(index, name)| strip_folded(text, name).map(|rest| (index, name.chars().count(), rest)))
        .max_by_key(|(_, len, _)| *len)
        .map(|(index, _, rest)| (index, rest))
}
