// Domain layer: synthesized document models and ports (interfaces).

pub mod model;
pub mod ports;
