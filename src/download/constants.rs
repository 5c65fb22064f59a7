//! Constants for the download module (timeouts, PDF validation).

/// Default total request timeout for a single PDF download (30 seconds).
pub const DOWNLOAD_TIMEOUT_SECS: u64 = 30;

/// Upper bound accepted for a configured download timeout (1 hour).
pub const MAX_DOWNLOAD_TIMEOUT_SECS: u64 = 3600;

/// Substring a `Content-Type` header must contain for a response to be saved.
pub const PDF_CONTENT_TYPE_MARKER: &str = "application/pdf";
