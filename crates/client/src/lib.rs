//! Source client for nw-items.
//!
//! This crate provides the HTTP fetch of item pages from the reference wiki
//! and the extraction of their title and info panel.

pub mod extract;
pub mod fetch;

pub use extract::{PageSelectors, ParsedPage, parse_page};

pub use fetch::{SourceConfig, WikiSource, item_url};
