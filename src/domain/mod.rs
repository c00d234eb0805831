// Domain layer: models, ports and the digit scanner. No I/O here.

pub mod model;
pub mod ports;
pub mod scanner;
