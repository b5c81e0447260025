//! Outbound HTTP with an on-disk response cache and retries for transient failures.

pub mod cache;
pub mod client;
pub mod error;
pub mod retry;
