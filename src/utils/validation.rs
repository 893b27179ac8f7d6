use crate::utils::error::{BoletinError, Result};
use chrono::format::{Item, StrftimeItems};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(BoletinError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BoletinError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_date_format(field_name: &str, format: &str) -> Result<()> {
    validate_non_empty_string(field_name, format)?;
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(BoletinError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format.to_string(),
            reason: "Not a valid strftime pattern".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(BoletinError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_ordered(min_field: &str, min: f64, max_field: &str, max: f64) -> Result<()> {
    if min >= max {
        return Err(BoletinError::InvalidConfigValueError {
            field: min_field.to_string(),
            value: min.to_string(),
            reason: format!("Must be lower than {} ({})", max_field, max),
        });
    }
    Ok(())
}
