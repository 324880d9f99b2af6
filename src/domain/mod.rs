// Domain layer: basket and checkout models plus the ports the adapters implement.

pub mod model;
pub mod ports;
