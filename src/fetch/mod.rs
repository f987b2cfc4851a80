//! Document fetching module
//!
//! The batch driver only depends on the [`Fetcher`] trait: any failure it
//! returns is treated as "not available" for that item.

pub mod client;
pub mod validate;

pub use client::{FetchConfig, FetchConfigBuilder, HttpFetcher};
pub use validate::UrlValidator;

use crate::error::FetchError;
use std::future::Future;

/// Source of raw markup for an address
pub trait Fetcher {
    /// Fetch the markup for `uri` in a single attempt
    fn fetch(&self, uri: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

impl<F: Fetcher> Fetcher for &F {
    fn fetch(&self, uri: &str) -> impl Future<Output = Result<String, FetchError>> + Send {
        (**self).fetch(uri)
    }
}
