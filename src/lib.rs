//! webattr - Fetch HTML pages and extract one attribute per page
//!
//! This crate fetches a list of addresses, extracts a single value from
//! each document and renders every result through an output template.
//!
//! # Features
//!
//! - **Presets**: `title` and `canonical` selectors
//! - **Generic queries**: `abstract(tag, predicate, property)` with a small,
//!   structured predicate language (`-eq`, `-contains`, `-like`, `-match`)
//! - **Templates**: `$Value`, `$Uri`, `$Index`, `$Count`, `$Percent`
//! - **Failure isolation**: one unreachable page renders `n/a` and never
//!   stops the batch
//!
//! # Architecture
//!
//! ```text
//! addresses ──▶ BatchDriver ──▶ ItemProcessor ──▶ Fetcher (HTTP / file)
//!                   │                 │
//!                   ▼                 ▼
//!             ┌──────────┐    ┌──────────────────┐
//!             │ Selector │    │ AttributeExtract │
//!             └────┬─────┘    └────────┬─────────┘
//!                  │                   │
//!                  ▼                   ▼
//!                Query          OutputTemplate ──▶ lines
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use webattr::batch::{BatchDriver, BatchOptions};
//! use webattr::fetch::FetchConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let driver = BatchDriver::http(FetchConfig::default())?;
//!     let options = BatchOptions::new().template("$Index/$Count: $Value")?;
//!
//!     let lines = driver
//!         .run(&["https://example.com"], "canonical", &options)
//!         .await?;
//!     for line in lines {
//!         println!("{line}");
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod batch;
pub mod error;
pub mod extraction;
pub mod fetch;
pub mod input;
pub mod progress;
pub mod template;

// Re-exports for convenience
pub use batch::{run, BatchDriver, BatchOptions, BatchReport};
pub use error::{Error, Result};
pub use extraction::{AttributeExtractor, ExtractionResult, Query, NOT_AVAILABLE};
pub use fetch::{FetchConfig, Fetcher, HttpFetcher};
pub use template::{OutputTemplate, DEFAULT_TEMPLATE};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
