//! Run configuration for one scrape.

use std::path::PathBuf;
use std::time::Duration;

use crate::download::DOWNLOAD_TIMEOUT_SECS;

/// Page scraped when nothing else is configured.
pub const DEFAULT_SOURCE_URL: &str = "https://www.unileverprofessional.co.za/sds";

/// Local copy of the source page.
pub const DEFAULT_CACHE_FILE: &str = "unileverprofessional.html";

/// Folder receiving downloaded PDFs.
pub const DEFAULT_OUTPUT_DIR: &str = "PDFs";

/// Everything the pipeline needs to know for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperConfig {
    /// Page to scan for PDF links.
    pub source_url: String,
    /// Cache file holding the raw page text.
    pub cache_file: PathBuf,
    /// Destination folder for PDFs.
    pub output_dir: PathBuf,
    /// Total timeout for each PDF request.
    pub download_timeout: Duration,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            cache_file: PathBuf::from(DEFAULT_CACHE_FILE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            download_timeout: Duration::from_secs(DOWNLOAD_TIMEOUT_SECS),
        }
    }
}
