//! Source page acquisition with a local text cache.
//!
//! Both entry points degrade instead of failing: a network or cache error is
//! logged and the caller gets an empty string, which yields zero links.

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::download::HttpClient;
use crate::storage;

/// Fetches the page at `url`, returning `""` on any transport failure.
#[instrument(skip(client))]
pub async fn fetch_page(client: &HttpClient, url: &str) -> String {
    match client.fetch_page_text(url).await {
        Ok(text) => {
            debug!(bytes = text.len(), "page fetched");
            text
        }
        Err(error) => {
            warn!(%error, "page fetch failed, continuing with empty content");
            String::new()
        }
    }
}

/// Returns the cached page at `cache_path`, fetching and caching it first
/// when the cache file does not exist yet.
///
/// An empty fetch result is not cached, so the next run tries the network
/// again. If the cache cannot be written, the freshly fetched text is used
/// for this run.
#[instrument(skip(client, cache_path), fields(cache = %cache_path.display()))]
pub async fn load_or_fetch_page(client: &HttpClient, url: &str, cache_path: &Path) -> String {
    if storage::file_exists(cache_path).await {
        debug!("using cached page");
    } else {
        let page = fetch_page(client, url).await;
        if page.is_empty() {
            warn!("page is empty, not writing cache");
            return page;
        }
        if let Err(error) = storage::append_text(cache_path, &page).await {
            warn!(%error, "could not write page cache");
            return page;
        }
        info!(bytes = page.len(), "page cached");
    }

    match storage::read_text(cache_path).await {
        Ok(text) => text,
        Err(error) => {
            warn!(%error, "could not read page cache");
            String::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use crate::test_support::socket_guard::{closed_local_base_url, start_mock_server_or_skip};
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[tokio::test]
    async fn test_cached_page_is_used_without_request() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let temp = TempDir::new().unwrap();
        let cache = temp.path().join("page.html");
        std::fs::write(&cache, "cached https://ex.com/a.pdf").unwrap();

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("fresh"))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = HttpClient::new().unwrap();
        let url = format!("{}/sds", mock_server.uri());
        let page = load_or_fetch_page(&client, &url, &cache).await;
        assert_eq!(page, "cached https://ex.com/a.pdf");
    }

    #[tokio::test]
    async fn test_missing_cache_fetches_and_writes_once() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let temp = TempDir::new().unwrap();
        let cache = temp.path().join("page.html");

        Mock::given(method("GET"))
            .and(path("/sds"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<a>x</a>"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = HttpClient::new().unwrap();
        let url = format!("{}/sds", mock_server.uri());

        let first = load_or_fetch_page(&client, &url, &cache).await;
        assert_eq!(first, "<a>x</a>\n");
        let second = load_or_fetch_page(&client, &url, &cache).await;
        assert_eq!(second, first);
        assert_eq!(std::fs::read_to_string(&cache).unwrap(), "<a>x</a>\n");
    }

    #[tokio::test]
    async fn test_unreachable_page_yields_empty_and_no_cache() {
        let Some(base) = closed_local_base_url() else {
            return;
        };

        let temp = TempDir::new().unwrap();
        let cache = temp.path().join("page.html");
        let client = HttpClient::new().unwrap();

        let page = load_or_fetch_page(&client, &format!("{base}/sds"), &cache).await;
        assert!(page.is_empty());
        assert!(!cache.exists());
    }

    #[tokio::test]
    async fn test_unwritable_cache_still_returns_fetched_page() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let temp = TempDir::new().unwrap();
        let cache = temp.path().join("no-such-dir").join("page.html");

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("https://ex.com/a.pdf"))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new().unwrap();
        let page = load_or_fetch_page(&client, &mock_server.uri(), &cache).await;
        assert_eq!(page, "https://ex.com/a.pdf");
        assert!(!cache.exists());
    }
}
