#![doc = include_str!("../README.md")]

pub mod error;
pub mod logger;
pub mod user;

pub use error::{FedAuthError, Result};
pub use logger::{LogLevel, Logger, LoggerConfig};
pub use user::{Contact, Profile};
