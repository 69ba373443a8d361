// Domain layer: core models and ports (interfaces). No storage or transport
// dependencies beyond serde.

pub mod model;
pub mod ports;
