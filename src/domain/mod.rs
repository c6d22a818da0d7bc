// Domain layer: value types and the ports the finder depends on.

pub mod model;
pub mod ports;
