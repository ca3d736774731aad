pub mod api;
pub mod hydrate;
pub mod transport;

pub use crate::domain::model::*;
pub use crate::domain::ports::{Params, Transport};
pub use crate::utils::error::Result;
