pub mod chat;
pub mod config;
pub mod error;
pub mod server;
pub mod session;

pub use error::{Error, Result};
