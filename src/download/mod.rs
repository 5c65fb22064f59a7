//! HTTP fetching and PDF persistence.
//!
//! # Features
//!
//! - Page fetch with the client's default settings
//! - Per-PDF total timeout (30s by default)
//! - Deterministic, filesystem-safe filenames derived from the URL
//! - Presence-based skip: a file that already exists is never requested again
//! - Validation by status (`200` only), `Content-Type` and non-empty body
//!
//! # Example
//!
//! ```no_run
//! use pdf_scraper::download::HttpClient;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new()?;
//! let outcome = client
//!     .download_pdf("https://example.com/sds/sheet.pdf", Path::new("PDFs"))
//!     .await?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

mod client;
pub mod constants;
mod error;
mod filename;

pub use client::{DownloadOutcome, HttpClient};
pub use constants::{DOWNLOAD_TIMEOUT_SECS, MAX_DOWNLOAD_TIMEOUT_SECS, PDF_CONTENT_TYPE_MARKER};
pub use error::DownloadError;
pub use filename::{derive_safe_filename, is_usable_filename};
