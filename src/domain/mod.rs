// Domain layer: launch descriptors, path layout and the ports the core depends on.

pub mod model;
pub mod ports;
