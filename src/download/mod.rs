//! HTTP transport and the cache-backed fetch flow.
//!
//! [`HttpClient`] streams bodies to disk; [`fetch_to_cache`] layers the
//! URL-keyed cache with atomic temp-file commit semantics on top. There is
//! no retry or cancellation logic here: a fetch either commits a cache
//! entry or cleans up after itself and reports a typed error.

mod client;
mod error;
mod fetch;

pub use client::{CONNECT_TIMEOUT_SECS, HttpClient, READ_TIMEOUT_SECS};
pub use error::FetchError;
pub use fetch::fetch_to_cache;
