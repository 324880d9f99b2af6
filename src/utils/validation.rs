use crate::domain::model::LineItem;
use crate::utils::error::{CheckoutError, Result};
use rust_decimal::Decimal;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(CheckoutError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CheckoutError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(CheckoutError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CheckoutError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
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
        return Err(CheckoutError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// ISO 4217 style: exactly three ASCII uppercase letters.
pub fn validate_currency_code(field_name: &str, code: &str) -> Result<()> {
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase()) {
        return Ok(());
    }
    Err(CheckoutError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: code.to_string(),
        reason: "Currency must be a three-letter uppercase code such as USD".to_string(),
    })
}

/// Rejects basket snapshots carrying negative unit prices or whose total does
/// not fit in a `Decimal`.
///
/// Missing product ids are allowed; they are grouped under the missing-id key.
pub fn validate_line_items(items: &[LineItem]) -> Result<()> {
    let mut total = Decimal::ZERO;
    for (index, item) in items.iter().enumerate() {
        if item.unit_price.is_sign_negative() && !item.unit_price.is_zero() {
            return Err(CheckoutError::InvalidLineItem {
                index,
                reason: format!("price must not be negative (got {})", item.unit_price),
            });
        }
        total = total
            .checked_add(item.unit_price)
            .ok_or_else(|| CheckoutError::InvalidLineItem {
                index,
                reason: "basket total exceeds the supported range".to_string(),
            })?;
    }
    Ok(())
}
