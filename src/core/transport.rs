use crate::config::ClientConfig;
use crate::core::{Params, Transport};
use crate::utils::error::{FiftyStatesError, Result};
use crate::utils::validation::{validate_resource_path, Validate};
use reqwest::blocking::Client;
use serde_json::Value;
use url::Url;

/// Blocking HTTP transport against the Fifty State API.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: Url,
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let base_url = Url::parse(&config.normalized_base_url()).map_err(|e| {
            FiftyStatesError::InvalidConfigValueError {
                field: "base_url".to_string(),
                value: config.base_url.clone(),
                reason: format!("Invalid URL format: {}", e),
            }
        })?;

        let mut builder = Client::builder();
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        Ok(Self {
            base_url,
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// 組出完整請求網址: `<base><path>/?<params>&format=json`
    ///
    /// `path` holds raw, slash-separated segments; each segment is
    /// percent-encoded here.
    pub fn endpoint(&self, path: &str, params: &Params) -> Result<Url> {
        validate_resource_path(path)?;

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FiftyStatesError::InvalidConfigValueError {
                field: "base_url".to_string(),
                value: self.base_url.to_string(),
                reason: "Base URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(path.trim_end_matches('/').split('/'))
            .push("");

        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                if key == crate::domain::ports::FORMAT_PARAM {
                    tracing::warn!("Ignoring reserved query parameter format={}", value);
                    continue;
                }
                query.append_pair(key, value);
            }
            query.append_pair(crate::domain::ports::FORMAT_PARAM, "json");
        }

        Ok(url)
    }
}

impl Transport for HttpTransport {
    fn call(&self, path: &str, params: &Params) -> Result<Value> {
        let url = self.endpoint(path, params)?;

        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url).send()?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let body = response.text()?;

        if !status.is_success() {
            return Err(FiftyStatesError::ApiError {
                status: Some(status.as_u16()),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::debug!("Response body is not JSON: {}", e);
            FiftyStatesError::invalid_response(status.as_u16())
        })
    }
}
