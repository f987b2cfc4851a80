//! HTTP document fetching
//!
//! One attempt per address, no caching. `file://` addresses are read from
//! disk so local snapshots can be processed the same way as live pages.

use super::validate::UrlValidator;
use super::Fetcher;
use crate::error::FetchError;
use std::time::Duration;
use tracing::{debug, instrument};

/// Configuration for the HTTP fetcher
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Whole-request timeout in milliseconds (default: 30000)
    pub timeout_ms: u64,
    /// User agent string (None = crate default)
    pub user_agent: Option<String>,
    /// Maximum redirects followed (default: 10)
    pub max_redirects: usize,
    /// Accept invalid TLS certificates (default: false)
    pub accept_invalid_certs: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30000,
            user_agent: None,
            max_redirects: 10,
            accept_invalid_certs: false,
        }
    }
}

impl FetchConfig {
    /// Create a new config builder
    pub fn builder() -> FetchConfigBuilder {
        FetchConfigBuilder::default()
    }
}

/// Builder for FetchConfig
#[derive(Default)]
pub struct FetchConfigBuilder {
    config: FetchConfig,
}

impl FetchConfigBuilder {
    /// Set request timeout
    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.config.timeout_ms = ms;
        self
    }

    /// Set user agent
    pub fn user_agent<S: Into<String>>(mut self, ua: S) -> Self {
        self.config.user_agent = Some(ua.into());
        self
    }

    /// Set redirect limit
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.config.max_redirects = max;
        self
    }

    /// Accept invalid certificates
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.config.accept_invalid_certs = accept;
        self
    }

    /// Build the config
    pub fn build(self) -> FetchConfig {
        self.config
    }
}

/// Default user agent
pub fn default_user_agent() -> String {
    format!("{}/{}", crate::NAME, crate::VERSION)
}

/// Fetcher backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    config: FetchConfig,
}

impl HttpFetcher {
    /// Build a fetcher from config
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(default_user_agent);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .user_agent(user_agent)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Active configuration
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    fn map_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.config.timeout_ms)
        } else {
            FetchError::from(err)
        }
    }
}

impl Fetcher for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, uri: &str) -> Result<String, FetchError> {
        let url = UrlValidator::validate(uri).map_err(FetchError::InvalidUrl)?;

        if url.scheme() == "file" {
            let path = url
                .to_file_path()
                .map_err(|_| FetchError::InvalidUrl(format!("not a local path: {uri}")))?;
            debug!("Reading {}", path.display());
            return tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| FetchError::File {
                    path: path.display().to_string(),
                    source,
                });
        }

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                uri: url.to_string(),
            });
        }

        let body = response.text().await.map_err(|e| self.map_error(e))?;
        debug!("Fetched {} bytes (status {})", body.len(), status.as_u16());
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout_ms, 30000);
        assert_eq!(config.max_redirects, 10);
        assert!(config.user_agent.is_none());
        assert!(!config.accept_invalid_certs);
    }

    #[test]
    fn test_fetch_config_builder() {
        let config = FetchConfig::builder()
            .timeout_ms(5000)
            .user_agent("TestBot/1.0")
            .max_redirects(2)
            .accept_invalid_certs(true)
            .build();
        assert_eq!(config.timeout_ms, 5000);
        assert_eq!(config.user_agent.as_deref(), Some("TestBot/1.0"));
        assert_eq!(config.max_redirects, 2);
        assert!(config.accept_invalid_certs);
    }

    #[test]
    fn test_default_user_agent() {
        assert!(default_user_agent().starts_with("webattr/"));
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected_before_request() {
        let fetcher = HttpFetcher::new(FetchConfig::default()).unwrap();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_file_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, "<title>Local</title>").unwrap();
        let uri = url::Url::from_file_path(&path).unwrap().to_string();

        let fetcher = HttpFetcher::new(FetchConfig::default()).unwrap();
        assert_eq!(fetcher.fetch(&uri).await.unwrap(), "<title>Local</title>");

        let missing = uri.replace("page.html", "missing.html");
        assert!(matches!(
            fetcher.fetch(&missing).await,
            Err(FetchError::File { .. })
        ));
    }
}
