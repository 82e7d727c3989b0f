use crate::utils::error::{RatioError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Coerces raw text into a number the way every formula expects it.
///
/// Blank text and anything that does not parse to a finite `f64` yield `None`.
pub fn parse_finite(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// The validity predicate shared by all formulas.
pub fn is_valid(value: Option<f64>) -> bool {
    matches!(value, Some(v) if v.is_finite())
}

/// Splits a comma-separated list, dropping tokens that are not numbers.
pub fn parse_number_list(raw: &str) -> Vec<f64> {
    raw.split(',').filter_map(parse_finite).collect()
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(RatioError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: format!("Supported values: {}", allowed.join(", ")),
    })
}

pub fn validate_known_keys<'a, I>(field_name: &str, keys: I, known: &[&str]) -> Result<()>
where
    I: IntoIterator<Item = &'a String>,
{
    let known_set: HashSet<&str> = known.iter().copied().collect();

    for key in keys {
        if !known_set.contains(key.as_str()) {
            return Err(RatioError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: key.clone(),
                reason: format!("Unknown field. Known fields: {}", known.join(", ")),
            });
        }
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| RatioError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(RatioError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
