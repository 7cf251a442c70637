// Domain layer: the listing model, the fetch status and the source port.

pub mod model;
pub mod ports;
