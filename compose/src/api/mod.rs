pub mod client;
pub mod common;
pub mod error;
pub mod whitelist;

#[cfg(test)]
mod test_helpers;

pub use client::{Client, RetryConfig, DEFAULT_ENDPOINT};
pub use common::ApiErrorDetails;
pub use error::ApiError;
pub use whitelist::{Recipe, WhitelistEntry, WhitelistSource};
