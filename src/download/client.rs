//! HTTP client wrapper for fetching the source page and downloading PDFs.
//!
//! One `reqwest::Client` serves both jobs. The page request runs with the
//! client's defaults; each PDF request carries its own total timeout.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};

use super::constants::{DOWNLOAD_TIMEOUT_SECS, PDF_CONTENT_TYPE_MARKER};
use super::error::DownloadError;
use super::filename::{derive_safe_filename, is_usable_filename};
use crate::{storage, user_agent};

/// HTTP client for the scraper.
///
/// Created once per run and reused for the page and every PDF, taking
/// advantage of connection pooling.
///
/// # Example
///
/// ```no_run
/// use pdf_scraper::download::{DownloadOutcome, HttpClient};
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new()?;
/// let url = "https://example.com/sheet.pdf";
/// match client.download_pdf(url, Path::new("PDFs")).await? {
///     DownloadOutcome::Downloaded { path, bytes } => {
///         println!("{bytes} bytes -> {}", path.display());
///     }
///     DownloadOutcome::AlreadyPresent { path } => println!("kept {}", path.display()),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    download_timeout: Duration,
}

/// Result of a PDF download call that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// A new file was written.
    Downloaded {
        /// Destination path.
        path: PathBuf,
        /// Number of bytes written.
        bytes: u64,
    },
    /// A file with the derived name already existed; no request was sent.
    AlreadyPresent {
        /// Existing destination path.
        path: PathBuf,
    },
}

impl HttpClient {
    /// Creates a client with the default 30 second PDF download timeout.
    ///
    /// # Errors
    ///
    /// Returns the builder error if the TLS backend or resolver cannot be
    /// initialized.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_download_timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
    }

    /// Creates a client with an explicit per-PDF timeout.
    ///
    /// # Errors
    ///
    /// Returns the builder error if the TLS backend or resolver cannot be
    /// initialized.
    pub fn with_download_timeout(download_timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()?;
        Ok(Self {
            client,
            download_timeout,
        })
    }

    /// Returns the timeout applied to each PDF request.
    #[must_use]
    pub fn download_timeout(&self) -> Duration {
        self.download_timeout
    }

    /// Fetches a page and returns its body as text.
    ///
    /// The status code is not inspected; whatever body the server sends is
    /// returned. Invalid UTF-8 is replaced lossily.
    ///
    /// # Errors
    ///
    /// Returns `Timeout` or `Network` when the request or the body read fails.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_page_text(&self, url: &str) -> Result<String, DownloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::from_request(url, e))?;
        debug!(
            status = response.status().as_u16(),
            "page response received"
        );

        let body = response
            .bytes()
            .await
            .map_err(|e| DownloadError::from_request(url, e))?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// Downloads one PDF into `output_dir` under its derived filename.
    ///
    /// Skips without any request when the destination file already exists.
    /// Otherwise the response must be `200 OK`, carry a `Content-Type`
    /// containing `application/pdf`, and have a non-empty body. The body is
    /// buffered in memory and written to a newly created file; an existing
    /// file is never overwritten.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The URL yields no usable filename
    /// - The request fails (network error, timeout)
    /// - The status is not 200 or the content type is not PDF
    /// - The body is empty
    /// - Creating or writing the file fails
    #[must_use = "download outcome reports whether a file was written"]
    #[instrument(skip(self, output_dir), fields(url = %url))]
    pub async fn download_pdf(
        &self,
        url: &str,
        output_dir: &Path,
    ) -> Result<DownloadOutcome, DownloadError> {
        let filename = derive_safe_filename(url);
        if !is_usable_filename(&filename) {
            return Err(DownloadError::invalid_url(url));
        }
        let output_path = output_dir.join(&filename);

        if storage::file_exists(&output_path).await {
            info!(path = %output_path.display(), "already downloaded, skipping");
            return Ok(DownloadOutcome::AlreadyPresent { path: output_path });
        }

        let response = self
            .client
            .get(url)
            .timeout(self.download_timeout)
            .send()
            .await
            .map_err(|e| DownloadError::from_request(url, e))?;

        if response.status() != StatusCode::OK {
            return Err(DownloadError::http_status(url, response.status().as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !is_pdf_content_type(&content_type) {
            return Err(DownloadError::invalid_content_type(url, content_type));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DownloadError::from_request(url, e))?;
        if body.is_empty() {
            return Err(DownloadError::empty_body(url));
        }

        write_new_file(&output_path, &body).await?;

        let bytes = body.len() as u64;
        info!(path = %output_path.display(), bytes, "downloaded");
        Ok(DownloadOutcome::Downloaded {
            path: output_path,
            bytes,
        })
    }
}

/// True when the header value names a PDF (MIME types compare case-insensitively).
fn is_pdf_content_type(content_type: &str) -> bool {
    content_type
        .to_ascii_lowercase()
        .contains(PDF_CONTENT_TYPE_MARKER)
}

/// Creates `path` (failing if it exists) and writes `data`, removing the
/// partial file if the write fails.
async fn write_new_file(path: &Path, data: &[u8]) -> Result<(), DownloadError> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .map_err(|e| DownloadError::io(path, e))?;

    let written = async {
        file.write_all(data).await?;
        file.flush().await
    }
    .await;

    if let Err(e) = written {
        debug!(path = %path.display(), "cleaning up partial file after write error");
        drop(file);
        let _ = tokio::fs::remove_file(path).await;
        return Err(DownloadError::io(path, e));
    }
    Ok(())
}
