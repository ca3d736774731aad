pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::ClientConfig;
pub use crate::core::{
    api::{fetch, fetch_list},
    hydrate::Hydrate,
    transport::HttpTransport,
};
pub use crate::domain::model::{
    Action, Bill, ContactInfo, District, Legislator, Role, Session, SpecificVote, Sponsor, State,
    Version, Vote,
};
pub use crate::domain::ports::{Params, Transport};
pub use crate::utils::error::{FiftyStatesError, Result};
