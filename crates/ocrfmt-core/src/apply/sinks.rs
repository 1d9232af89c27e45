//! Typed destination fields.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::ApplyError;
use crate::models::value::{FieldType, ResolvedValue};

/// A destination that can be written with a resolved value.
pub trait FieldSink {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Declared type; decides which categories the resolver tries.
    fn field_type(&self) -> FieldType;

    /// Write `value`, leaving the field untouched on error.
    fn accept(&mut self, value: &ResolvedValue) -> Result<(), ApplyError>;
}

/// Rust types a [`TypedSink`] can hold.
pub trait FieldValue: Sized + Clone + fmt::Debug {
    const FIELD_TYPE: FieldType;

    /// Convert a resolved value, `None` when it cannot be represented.
    ///
    /// Raw text is trimmed and read in a plain, locale-neutral notation.
    fn from_resolved(value: &ResolvedValue) -> Option<Self>;
}

impl FieldValue for String {
    const FIELD_TYPE: FieldType = FieldType::Text;

    fn from_resolved(value: &ResolvedValue) -> Option<Self> {
        Some(match value {
            ResolvedValue::RawText(text) => text.clone(),
            ResolvedValue::Number(n) | ResolvedValue::Currency(n) => n.to_string(),
            ResolvedValue::Percent(n) => format!("{}%", n * 100.0),
            ResolvedValue::Date(t) => t.date().to_string(),
            ResolvedValue::Time(t) => t.time().to_string(),
            ResolvedValue::DateTime(t) => t.to_string(),
        })
    }
}

impl FieldValue for f64 {
    const FIELD_TYPE: FieldType = FieldType::Number;

    fn from_resolved(value: &ResolvedValue) -> Option<Self> {
        match value {
            ResolvedValue::RawText(text) => text.trim().parse().ok().filter(|n: &f64| n.is_finite()),
            other => other.as_number(),
        }
    }
}

impl FieldValue for NaiveDate {
    const FIELD_TYPE: FieldType = FieldType::Date;

    fn from_resolved(value: &ResolvedValue) -> Option<Self> {
        match value {
            ResolvedValue::Date(t) | ResolvedValue::DateTime(t) => Some(t.date()),
            ResolvedValue::RawText(text) => NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok(),
            _ => None,
        }
    }
}

impl FieldValue for NaiveTime {
    const FIELD_TYPE: FieldType = FieldType::Time;

    fn from_resolved(value: &ResolvedValue) -> Option<Self> {
        match value {
            ResolvedValue::Time(t) | ResolvedValue::DateTime(t) => Some(t.time()),
            ResolvedValue::RawText(text) => {
                let text = text.trim();
                NaiveTime::parse_from_str(text, "%H:%M:%S")
                    .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
                    .ok()
            }
            _ => None,
        }
    }
}

impl FieldValue for NaiveDateTime {
    const FIELD_TYPE: FieldType = FieldType::Timestamp;

    fn from_resolved(value: &ResolvedValue) -> Option<Self> {
        match value {
            ResolvedValue::RawText(text) => {
                let text = text.trim();
                ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
                    .iter()
                    .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
            }
            other => other.as_timestamp(),
        }
    }
}

type Validator<T> = Box<dyn Fn(&T) -> Result<(), String> + Send + Sync>;

/// In-memory field holding one value of type `T`.
pub struct TypedSink<T: FieldValue> {
    name: String,
    field_type: FieldType,
    value: Option<T>,
    validator: Option<Validator<T>>,
}

pub type TextSink = TypedSink<String>;
pub type NumberSink = TypedSink<f64>;
pub type DateSink = TypedSink<NaiveDate>;
pub type TimeSink = TypedSink<NaiveTime>;
pub type DateTimeSink = TypedSink<NaiveDateTime>;

impl<T: FieldValue> TypedSink<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: T::FIELD_TYPE,
            value: None,
            validator: None,
        }
    }

    /// Narrow or widen the declared type, e.g. a currency-only number field.
    pub fn with_field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = field_type;
        self
    }

    pub fn with_value(mut self, value: T) -> Self {
        self.value = Some(value);
        self
    }

    /// Reject values for which `check` returns an error message.
    pub fn with_validator(mut self, check: impl Fn(&T) -> Result<(), String> + Send + Sync + 'static) -> Self {
        self.validator = Some(Box::new(check));
        self
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }
}

impl<T: FieldValue> FieldSink for TypedSink<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn field_type(&self) -> FieldType {
        self.field_type
    }

    fn accept(&mut self, value: &ResolvedValue) -> Result<(), ApplyError> {
        let converted = T::from_resolved(value).ok_or_else(|| ApplyError::TypeMismatch {
            field: self.name.clone(),
            value: value.to_string(),
        })?;

        if let Some(check) = &self.validator {
            check(&converted).map_err(|reason| ApplyError::Validation {
                field: self.name.clone(),
                reason,
            })?;
        }

        self.value = Some(converted);
        Ok(())
    }
}

impl<T: FieldValue> fmt::Debug for TypedSink<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedSink")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("value", &self.value)
            .field("validated", &self.validator.is_some())
            .finish()
    }
}
