//! URL resolution against the broadcast server base URL

use url::Url;

use crate::error::{AppError, Result};

/// Resolves REST paths, WebSocket channels and media URLs against one base URL
#[derive(Debug, Clone)]
pub struct EndpointResolver {
    base: Url,
}

impl EndpointResolver {
    /// Create a new resolver from an `http://` or `https://` base URL
    pub fn new(base_url: &str) -> Result<Self> {
        // Ensure base URL doesn't end with slash
        let base = Url::parse(base_url.trim_end_matches('/'))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(AppError::InvalidRequest(format!(
                "Base URL must be http or https: {}",
                base_url
            )));
        }
        Ok(Self { base })
    }

    /// Absolute URL for a server path such as `/api/news`
    pub fn http(&self, path: &str) -> String {
        format!("{}{}", self.prefix(), ensure_leading_slash(path))
    }

    /// WebSocket URL for a channel path, under the same base path as `http`.
    /// `http` maps to `ws`, `https` to `wss`.
    pub fn ws(&self, path: &str) -> Result<String> {
        let mut url = self.base.clone();
        let scheme = if self.base.scheme() == "https" { "wss" } else { "ws" };
        url.set_scheme(scheme)
            .map_err(|_| AppError::InvalidRequest(format!("Cannot derive {} URL", scheme)))?;
        let joined = format!(
            "{}{}",
            self.base.path().trim_end_matches('/'),
            ensure_leading_slash(path)
        );
        url.set_path(&joined);
        Ok(url.to_string())
    }

    /// Scheme, host and port only, as a page origin
    pub fn origin(&self) -> String {
        self.base.origin().ascii_serialization()
    }

    /// Turn a server-relative media URL into an absolute one.
    /// Already absolute URLs are returned unchanged.
    pub fn absolute_media_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("{}{}", self.origin(), ensure_leading_slash(url))
        }
    }

    /// Base URL without a trailing slash
    pub fn prefix(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }
}

fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}
