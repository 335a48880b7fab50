//! Content fetching service.
//!
//! Pages may declare an opaque content locator (typically a URL whose body
//! is injected into the mount container). The fetch itself is the only
//! suspension point in a navigation, so it sits behind an async trait that
//! tests can replace with canned or gated responses.

use async_trait::async_trait;

/// Failure to load a page's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
	reason: String,
}

impl FetchError {
	/// Creates a fetch error with the given reason.
	pub fn new(reason: impl Into<String>) -> Self {
		Self {
			reason: reason.into(),
		}
	}

	/// Returns the failure reason.
	pub fn reason(&self) -> &str {
		&self.reason
	}
}

impl std::fmt::Display for FetchError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.reason)
	}
}

impl std::error::Error for FetchError {}

/// Resolves a content locator into text to inject into the container.
///
/// Futures are `?Send`: navigation runs on one logical thread of control
/// (the browser main thread on wasm32, a current-thread executor in tests).
#[async_trait(?Send)]
pub trait ContentFetcher {
	/// Fetches the content behind `url`.
	///
	/// A non-success response is a failure, not an empty success.
	async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// [`ContentFetcher`] over the browser's HTTP stack.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct HttpFetcher;

#[cfg(target_arch = "wasm32")]
impl HttpFetcher {
	/// Creates a new HTTP-backed fetcher.
	pub fn new() -> Self {
		Self
	}
}

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl ContentFetcher for HttpFetcher {
	async fn fetch(&self, url: &str) -> Result<String, FetchError> {
		// Same-origin locators are relative; the HTTP client wants an
		// absolute URL.
		let absolute = match web_sys::window().and_then(|w| w.location().origin().ok()) {
			Some(origin) if url.starts_with('/') => format!("{origin}{url}"),
			_ => url.to_string(),
		};

		let response = reqwest::get(&absolute)
			.await
			.map_err(|e| FetchError::new(e.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			return Err(FetchError::new(format!("HTTP {status}")));
		}

		response
			.text()
			.await
			.map_err(|e| FetchError::new(e.to_string()))
	}
}
