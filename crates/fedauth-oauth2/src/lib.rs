#![doc = include_str!("../README.md")]

pub mod adapter;
pub mod client;
pub mod providers;

// Re-exports
pub use adapter::{AdapterOptions, ContactQuery, Endpoints, OAuth2Api, ProviderAdapter};
pub use client::{HttpApi, OAuth2Client};
pub use providers::{Gmail, Instagram};
