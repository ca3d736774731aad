use thiserror::Error;

/// Message used when a successful response carries a body that is not JSON.
pub const INVALID_RESPONSE: &str = "Invalid Response";

#[derive(Error, Debug)]
pub enum FiftyStatesError {
    /// Non-2xx response, or a 2xx response whose body is not JSON.
    #[error("{message}")]
    ApiError { status: Option<u16>, message: String },

    #[error("Request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Invalid date in field `{field}`: {value:?} (expected YYYY-MM-DD HH:MM:SS)")]
    FormatError { field: String, value: String },

    /// A non-object where an entity is expected, or a non-array where a
    /// nested list or search result is expected.
    #[error("Cannot decode {entity}: {message}")]
    DecodeError { entity: &'static str, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for `{field}` ({value:?}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl FiftyStatesError {
    pub(crate) fn invalid_response(status: u16) -> Self {
        Self::ApiError {
            status: Some(status),
            message: INVALID_RESPONSE.to_string(),
        }
    }

    /// 錯誤訊息本體，API 錯誤時即為伺服器回傳的原始內容
    pub fn message(&self) -> String {
        match self {
            Self::ApiError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::ApiError { .. })
    }

    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::FormatError { .. })
    }
}

pub type Result<T> = std::result::Result<T, FiftyStatesError>;
