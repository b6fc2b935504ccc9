//! Yahoo Finance compatible HTTP market client.

mod client;
mod dto;
mod key_ring;
mod retry;

pub use client::YahooClient;
pub use key_ring::ApiKeyRing;
pub use retry::RetryPolicy;
