// Domain layer: entity types and the provider port. No I/O lives here.

pub mod model;
pub mod ports;
