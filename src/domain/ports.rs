use crate::utils::error::Result;
use serde_json::Value;
use std::collections::BTreeMap;

/// Query parameters for one API call, excluding the reserved `format` key.
pub type Params = BTreeMap<String, String>;

/// Reserved query key, always sent as `format=json`.
pub const FORMAT_PARAM: &str = "format";

pub trait Transport: Send + Sync {
    /// GET `path` relative to the base endpoint and return the decoded JSON body.
    fn call(&self, path: &str, params: &Params) -> Result<Value>;
}
