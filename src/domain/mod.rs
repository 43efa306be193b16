// Domain layer: response models, request descriptors and the ports the client talks through.

pub mod model;
pub mod ports;
pub mod request;
