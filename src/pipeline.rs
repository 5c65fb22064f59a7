//! The linear scrape pipeline.
//!
//! page → links → dedup → output folder → one download at a time. Each link
//! is fully resolved before the next one starts, and no failure stops the
//! run.

use std::path::Path;

use tracing::{info, instrument, warn};

use crate::config::ScraperConfig;
use crate::download::{DownloadOutcome, HttpClient};
use crate::page::load_or_fetch_page;
use crate::parser::{dedupe_preserving_order, extract_pdf_links};
use crate::storage::ensure_output_dir;

/// Counters for one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    links_found: usize,
    downloaded: usize,
    skipped: usize,
    failed: usize,
}

impl RunSummary {
    /// Creates a summary with zero counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of unique PDF links extracted from the page.
    #[must_use]
    pub fn links_found(&self) -> usize {
        self.links_found
    }

    /// Number of files written during this run.
    #[must_use]
    pub fn downloaded(&self) -> usize {
        self.downloaded
    }

    /// Number of links whose file already existed.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of links that failed for any reason.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Number of links processed (downloaded + skipped + failed).
    #[must_use]
    pub fn total(&self) -> usize {
        self.downloaded + self.skipped + self.failed
    }

    fn record(&mut self, outcome: &DownloadOutcome) {
        match outcome {
            DownloadOutcome::Downloaded { .. } => self.downloaded += 1,
            DownloadOutcome::AlreadyPresent { .. } => self.skipped += 1,
        }
    }
}

/// Runs the whole scrape described by `config`.
///
/// Never fails: page, directory and per-file errors are logged and counted.
#[instrument(skip_all, fields(source = %config.source_url))]
pub async fn run(client: &HttpClient, config: &ScraperConfig) -> RunSummary {
    let page = load_or_fetch_page(client, &config.source_url, &config.cache_file).await;

    let links = dedupe_preserving_order(extract_pdf_links(&page).into_vec());
    info!(links = links.len(), "PDF links extracted");

    match ensure_output_dir(&config.output_dir).await {
        Ok(true) => info!(path = %config.output_dir.display(), "created output directory"),
        Ok(false) => {}
        Err(error) => warn!(%error, "could not create output directory, continuing"),
    }

    let summary = download_all(client, &links, &config.output_dir).await;

    info!(
        links = summary.links_found(),
        downloaded = summary.downloaded(),
        skipped = summary.skipped(),
        failed = summary.failed(),
        "scrape complete"
    );
    summary
}

/// Downloads `links` into `output_dir` one after another.
///
/// A failed link is logged and counted; the loop always reaches the end.
pub async fn download_all(client: &HttpClient, links: &[String], output_dir: &Path) -> RunSummary {
    let mut summary = RunSummary::new();
    summary.links_found = links.len();

    for url in links {
        match client.download_pdf(url, output_dir).await {
            Ok(outcome) => summary.record(&outcome),
            Err(error) => {
                warn!(%url, %error, "download failed");
                summary.failed += 1;
            }
        }
    }

    summary
}
