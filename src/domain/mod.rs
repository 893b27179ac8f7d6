// Domain layer: core models and ports (interfaces) the controller talks through.

pub mod model;
pub mod ports;
