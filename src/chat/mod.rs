pub mod classifier;
pub mod responder;
pub mod service;

pub use classifier::{Classification, classify};
pub use responder::{Reply, Responder};
pub use service::{ChatService, Exchange};
