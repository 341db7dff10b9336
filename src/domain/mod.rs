// Domain layer: game models and ports (interfaces). Nothing here touches tokio or the terminal.

pub mod model;
pub mod ports;
