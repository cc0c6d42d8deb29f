use chrono::{DateTime, NaiveDate};

use super::{FailureKind, ValidationVerdict, Validator};

/// Inclusive numeric range. Values are parsed as `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    min: f64,
    max: f64,
}

/// Builds a [`NumericRange`] validator.
pub fn numeric_range(min: f64, max: f64) -> NumericRange {
    NumericRange { min, max }
}

impl Validator for NumericRange {
    fn validate(&self, value: &str) -> ValidationVerdict {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return ValidationVerdict::valid();
        }
        let number = match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => n,
            _ => {
                return ValidationVerdict::invalid(FailureKind::NotANumber)
                    .with_detail("value", trimmed);
            }
        };
        if number < self.min || number > self.max {
            return ValidationVerdict::invalid(FailureKind::OutOfRange)
                .with_detail("value", number)
                .with_detail("min", self.min)
                .with_detail("max", self.max);
        }
        ValidationVerdict::valid()
    }
}

/// Inclusive bounds on the number of characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringLength {
    min: usize,
    max: usize,
}

/// Builds a [`StringLength`] validator.
pub fn string_length(min: usize, max: usize) -> StringLength {
    StringLength { min, max }
}

impl Validator for StringLength {
    fn validate(&self, value: &str) -> ValidationVerdict {
        if value.is_empty() {
            return ValidationVerdict::valid();
        }
        let length = value.chars().count();
        if length < self.min || length > self.max {
            return ValidationVerdict::invalid(FailureKind::LengthOutOfRange)
                .with_detail("length", length)
                .with_detail("min", self.min)
                .with_detail("max", self.max);
        }
        ValidationVerdict::valid()
    }
}

/// Exact, case-sensitive membership in a fixed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Whitelist {
    allowed: Vec<String>,
}

/// Builds a [`Whitelist`] validator.
pub fn whitelist<I, S>(allowed: I) -> Whitelist
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Whitelist {
        allowed: allowed.into_iter().map(Into::into).collect(),
    }
}

impl Validator for Whitelist {
    fn validate(&self, value: &str) -> ValidationVerdict {
        if value.is_empty() || self.allowed.iter().any(|a| a == value) {
            return ValidationVerdict::valid();
        }
        ValidationVerdict::invalid(FailureKind::NotAllowed)
            .with_detail("value", value)
            .with_detail("allowed", self.allowed.join(", "))
    }
}

/// Inclusive calendar-date range.
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp, of which only the date is
/// compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    min: NaiveDate,
    max: NaiveDate,
}

/// Builds a [`DateRange`] validator.
pub fn date_range(min: NaiveDate, max: NaiveDate) -> DateRange {
    DateRange { min, max }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

impl Validator for DateRange {
    fn validate(&self, value: &str) -> ValidationVerdict {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return ValidationVerdict::valid();
        }
        let Some(date) = parse_date(trimmed) else {
            return ValidationVerdict::invalid(FailureKind::InvalidDate)
                .with_detail("value", trimmed);
        };
        if date < self.min || date > self.max {
            return ValidationVerdict::invalid(FailureKind::DateOutOfRange)
                .with_detail("value", date)
                .with_detail("min", self.min)
                .with_detail("max", self.max);
        }
        ValidationVerdict::valid()
    }
}
