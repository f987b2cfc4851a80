//! Address validation

use url::Url;

/// Longest address accepted
pub const MAX_URL_LEN: usize = 2048;

/// URL validation utilities
pub struct UrlValidator;

impl UrlValidator {
    /// Validate an address before fetching it
    pub fn validate(uri: &str) -> std::result::Result<Url, String> {
        if uri.trim().is_empty() {
            return Err("URL cannot be empty".to_string());
        }

        if uri.len() > MAX_URL_LEN {
            return Err(format!(
                "URL exceeds maximum length of {MAX_URL_LEN} characters"
            ));
        }

        let url = Url::parse(uri.trim()).map_err(|e| format!("{uri}: {e}"))?;
        match url.scheme() {
            "http" | "https" => {
                if url.host_str().is_none() {
                    return Err(format!("URL has no host: {uri}"));
                }
                Ok(url)
            }
            "file" => Ok(url),
            other => Err(format!(
                "URL must use http://, https://, or file:// (got {other}://): {uri}"
            )),
        }
    }
}
