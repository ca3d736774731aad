use crate::utils::error::{FiftyStatesError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(FiftyStatesError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => {
                if url.query().is_some() {
                    return Err(FiftyStatesError::InvalidConfigValueError {
                        field: field_name.to_string(),
                        value: url_str.to_string(),
                        reason: "Base URL must not carry a query string".to_string(),
                    });
                }
                Ok(())
            }
            scheme => Err(FiftyStatesError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(FiftyStatesError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FiftyStatesError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Resource paths are relative to the base endpoint; query parameters travel
/// separately, so a `?` here is just part of a segment.
pub fn validate_resource_path(path: &str) -> Result<()> {
    if path.is_empty() || path.starts_with('/') {
        return Err(FiftyStatesError::InvalidConfigValueError {
            field: "path".to_string(),
            value: path.to_string(),
            reason: "Path must be non-empty and relative".to_string(),
        });
    }
    Ok(())
}
