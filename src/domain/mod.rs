// Domain layer: entity models and the transport port. No HTTP here.

pub mod model;
pub mod ports;
