//! PDF Scraper Core Library
//!
//! Scans one web page for links to PDF files and downloads each file once
//! into a local folder.
//!
//! # Architecture
//!
//! The library is a four-stage pipeline, each stage usable on its own:
//! - [`page`] - Source page fetch with a local text cache
//! - [`parser`] - Lexical PDF link extraction into an ordered [`LinkSet`]
//! - [`storage`] - Output directory and cache file helpers
//! - [`download`] - HTTP client, filename derivation and validated PDF writes
//!
//! [`pipeline::run`] wires the stages together for one sequential run.

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod download;
pub mod page;
pub mod parser;
pub mod pipeline;
pub mod storage;
mod user_agent;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::ScraperConfig;
pub use download::{DownloadError, DownloadOutcome, HttpClient, derive_safe_filename};
pub use page::{fetch_page, load_or_fetch_page};
pub use parser::{LinkSet, dedupe_preserving_order, extract_pdf_links};
pub use pipeline::{RunSummary, run};
pub use storage::{StorageError, ensure_output_dir};
