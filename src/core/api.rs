//! Fetch operations: one GET per call, then hydration of the body.

use crate::core::hydrate::{hydrate_list, Hydrate};
use crate::core::{Params, Transport};
use crate::domain::model::{Bill, District, Legislator, State, Vote};
use crate::utils::error::Result;

/// GET `path` and hydrate the single object it returns.
pub fn fetch<T: Hydrate>(transport: &impl Transport, path: &str, params: &Params) -> Result<T> {
    let raw = transport.call(path, params)?;
    T::hydrate(raw)
}

/// GET `path` and hydrate the JSON array it returns.
pub fn fetch_list<T: Hydrate>(
    transport: &impl Transport,
    path: &str,
    params: &Params,
) -> Result<Vec<T>> {
    let raw = transport.call(path, params)?;
    let items: Vec<T> = hydrate_list(raw)?;
    tracing::debug!("Hydrated {} {} records from {}", items.len(), T::ENTITY, path);
    Ok(items)
}

impl State {
    pub fn get(transport: &impl Transport, abbrev: &str) -> Result<Self> {
        fetch(transport, abbrev, &Params::new())
    }
}

impl Bill {
    pub fn get(
        transport: &impl Transport,
        state: &str,
        session: &str,
        chamber: &str,
        bill_id: &str,
    ) -> Result<Self> {
        let path = format!("{}/{}/{}/bills/{}", state, session, chamber, bill_id);
        fetch(transport, &path, &Params::new())
    }

    /// Full-text bill search; `extra` is sent alongside `q` as-is.
    pub fn search(transport: &impl Transport, query: &str, extra: &Params) -> Result<Vec<Self>> {
        let mut params = extra.clone();
        params.insert("q".to_string(), query.to_string());
        fetch_list(transport, "bills/search", &params)
    }
}

impl Legislator {
    pub fn get(transport: &impl Transport, id: u64) -> Result<Self> {
        fetch(transport, &format!("legislators/{}", id), &Params::new())
    }

    pub fn search(transport: &impl Transport, params: &Params) -> Result<Vec<Self>> {
        fetch_list(transport, "legislators/search", params)
    }
}

impl Vote {
    pub fn get(transport: &impl Transport, id: u64) -> Result<Self> {
        fetch(transport, &format!("votes/{}", id), &Params::new())
    }
}

impl District {
    pub fn get(
        transport: &impl Transport,
        state: &str,
        session: &str,
        chamber: &str,
        district: &str,
    ) -> Result<Self> {
        let path = format!("{}/{}/{}/districts/{}", state, session, chamber, district);
        fetch(transport, &path, &Params::new())
    }

    /// District containing the point (`lat`, `long`).
    pub fn geo(
        transport: &impl Transport,
        state: &str,
        session: &str,
        chamber: &str,
        lat: f64,
        long: f64,
    ) -> Result<Self> {
        let path = format!("{}/{}/{}/districts/geo", state, session, chamber);
        let mut params = Params::new();
        params.insert("lat".to_string(), lat.to_string());
        params.insert("long".to_string(), long.to_string());
        fetch(transport, &path, &params)
    }
}
