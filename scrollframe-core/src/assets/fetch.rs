use std::{
    future::Future,
    path::{Path, PathBuf},
};

use crate::foundation::error::{ScrollframeError, ScrollframeResult};

/// Retrieves the encoded bytes behind a frame URL.
///
/// Implementations run on the tokio runtime, one task per frame, so the returned future must
/// be `Send`.
pub trait FrameFetcher: Send + Sync + 'static {
    /// Fetch the raw bytes for `url`.
    fn fetch(&self, url: &str) -> impl Future<Output = ScrollframeResult<Vec<u8>>> + Send;
}

#[derive(Clone, Debug)]
/// Reads frames from a directory; site-absolute URLs (`/images/a.jpg`) resolve under `root`.
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    /// Serve frames from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full filesystem path for `url`.
    pub fn resolve(&self, url: &str) -> ScrollframeResult<PathBuf> {
        let rel = url.strip_prefix("file://").unwrap_or(url);
        let rel = rel.trim_start_matches(['/', '\\']);
        Ok(self.root.join(normalize_rel_path(rel)?))
    }
}

impl FrameFetcher for FsFetcher {
    async fn fetch(&self, url: &str) -> ScrollframeResult<Vec<u8>> {
        let path = self.resolve(url)?;
        tokio::fs::read(&path)
            .await
            .map_err(|e| ScrollframeError::fetch(format!("read '{}': {e}", path.display())))
    }
}

/// Normalize a relative frame path: forward slashes, no `.`/empty parts, no `..`.
pub fn normalize_rel_path(source: &str) -> ScrollframeResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(ScrollframeError::asset("frame paths must be relative"));
    }
    if s.is_empty() {
        return Err(ScrollframeError::asset("frame path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(ScrollframeError::asset("frame paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(ScrollframeError::asset("frame path must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(feature = "http")]
#[derive(Clone, Debug)]
/// Fetches frames over HTTP(S); relative URLs are joined onto `base`.
pub struct HttpFetcher {
    base: String,
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpFetcher {
    /// Fetch relative frame URLs from under `base` (e.g. `https://example.com/`).
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Absolute URL for `url`.
    pub fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_string();
        }
        format!(
            "{}/{}",
            self.base.trim_end_matches('/'),
            url.trim_start_matches('/')
        )
    }
}

#[cfg(feature = "http")]
impl FrameFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> ScrollframeResult<Vec<u8>> {
        let full = self.resolve(url);
        let response = self
            .client
            .get(&full)
            .send()
            .await
            .map_err(|e| ScrollframeError::fetch(format!("request {full}: {e}")))?;

        if !response.status().is_success() {
            return Err(ScrollframeError::fetch(format!(
                "HTTP {} from {full}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ScrollframeError::fetch(format!("read body of {full}: {e}")))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fetch.rs"]
mod tests;
