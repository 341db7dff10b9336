use crate::utils::error::{GameError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(GameError::config(
            field_name,
            value,
            format!("must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN 也會被拒絕
    if !(value >= min && value <= max) {
        return Err(GameError::config(
            field_name,
            value,
            format!("must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

pub fn validate_less_than(
    field_name: &str,
    value: usize,
    other_field: &str,
    other: usize,
) -> Result<()> {
    if value >= other {
        return Err(GameError::config(
            field_name,
            value,
            format!("must be smaller than {} ({})", other_field, other),
        ));
    }
    Ok(())
}
