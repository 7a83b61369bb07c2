use crate::utils::error::{FarmError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(FarmError::InvalidValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(FarmError::InvalidValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FarmError::InvalidValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Parses a finite decimal number, ignoring surrounding whitespace.
pub fn parse_number(field_name: &str, raw: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(FarmError::InvalidValueError {
            field: field_name.to_string(),
            value: raw.to_string(),
            reason: "Value must be a number, e.g. 0.5".to_string(),
        }),
    }
}

pub fn parse_positive_number(field_name: &str, raw: &str) -> Result<f64> {
    let value = parse_number(field_name, raw)?;
    if value <= 0.0 {
        return Err(FarmError::InvalidValueError {
            field: field_name.to_string(),
            value: raw.to_string(),
            reason: "Value must be greater than zero".to_string(),
        });
    }
    Ok(value)
}

pub fn parse_positive_count(field_name: &str, raw: &str) -> Result<u32> {
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(FarmError::InvalidValueError {
            field: field_name.to_string(),
            value: raw.to_string(),
            reason: "Value must be a whole number greater than zero".to_string(),
        }),
    }
}

/// Parses a 1-based menu pick and checks it against `len` listed items.
pub fn parse_selection(raw: &str, len: usize) -> Result<usize> {
    let index = raw
        .trim()
        .parse::<usize>()
        .map_err(|_| FarmError::InvalidValueError {
            field: "selection".to_string(),
            value: raw.to_string(),
            reason: "Selection must be a listed number".to_string(),
        })?;
    check_index(index, len)?;
    Ok(index)
}

/// Maps a 1-based index to a 0-based position within `len` items.
pub fn check_index(index: usize, len: usize) -> Result<usize> {
    if index == 0 || index > len {
        return Err(FarmError::IndexOutOfRange { index, len });
    }
    Ok(index - 1)
}
