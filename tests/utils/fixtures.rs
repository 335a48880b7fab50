//! In-memory fakes for the router's collaborator services.
//!
//! Each fake records the calls the controller makes against it so tests
//! can assert on fetch counts, history pushes, active-link marking and
//! container contents without a browser.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use wayfarer::Router;
use wayfarer::dom::{Container, Dom};
use wayfarer::events::LinkInterceptor;
use wayfarer::fetch::{ContentFetcher, FetchError};
use wayfarer::history::{HistoryProvider, NavigateCallback};

/// Fake location + history: a path cell, a push log, and a manually
/// fireable popstate subscription.
pub struct FakeHistory {
	path: Mutex<String>,
	pushes: Mutex<Vec<String>>,
	popstate: Mutex<Option<NavigateCallback>>,
}

impl FakeHistory {
	pub fn at(path: &str) -> Arc<Self> {
		Arc::new(Self {
			path: Mutex::new(path.to_string()),
			pushes: Mutex::new(Vec::new()),
			popstate: Mutex::new(None),
		})
	}

	pub fn pushes(&self) -> Vec<String> {
		self.pushes.lock().unwrap().clone()
	}

	/// Simulates a back/forward navigation: the location moves first, then
	/// the subscription fires.
	pub fn fire_popstate(&self, path: &str) {
		*self.path.lock().unwrap() = path.to_string();
		let guard = self.popstate.lock().unwrap();
		let callback = guard.as_ref().expect("popstate subscription installed");
		callback(path.to_string());
	}

	pub fn has_popstate_subscription(&self) -> bool {
		self.popstate.lock().unwrap().is_some()
	}
}

impl HistoryProvider for FakeHistory {
	fn current_path(&self) -> String {
		self.path.lock().unwrap().clone()
	}

	fn push(&self, path: &str) {
		*self.path.lock().unwrap() = path.to_string();
		self.pushes.lock().unwrap().push(path.to_string());
	}

	fn on_popstate(&self, callback: NavigateCallback) {
		*self.popstate.lock().unwrap() = Some(callback);
	}
}

/// Fake document: one container behind a fixed selector, plus a log of
/// active-link markings.
pub struct FakeDom {
	selector: String,
	present: Mutex<bool>,
	content: Arc<Mutex<String>>,
	active: Mutex<Vec<String>>,
}

impl FakeDom {
	pub fn new(selector: &str) -> Arc<Self> {
		Arc::new(Self {
			selector: selector.to_string(),
			present: Mutex::new(true),
			content: Arc::new(Mutex::new(String::new())),
			active: Mutex::new(Vec::new()),
		})
	}

	pub fn content(&self) -> String {
		self.content.lock().unwrap().clone()
	}

	/// Makes the mount container disappear from the document.
	pub fn remove_container(&self) {
		*self.present.lock().unwrap() = false;
	}

	pub fn active_markings(&self) -> Vec<String> {
		self.active.lock().unwrap().clone()
	}
}

impl Dom for FakeDom {
	fn container(&self, selector: &str) -> Option<Box<dyn Container>> {
		if selector == self.selector && *self.present.lock().unwrap() {
			Some(Box::new(FakeContainer {
				content: Arc::clone(&self.content),
			}))
		} else {
			None
		}
	}

	fn mark_active_links(&self, href: &str) {
		self.active.lock().unwrap().push(href.to_string());
	}
}

struct FakeContainer {
	content: Arc<Mutex<String>>,
}

impl Container for FakeContainer {
	fn set_content(&self, html: &str) {
		*self.content.lock().unwrap() = html.to_string();
	}
}

/// Fake fetcher with canned per-URL responses and a call log.
pub struct FakeFetcher {
	responses: Mutex<HashMap<String, Result<String, String>>>,
	calls: Mutex<Vec<String>>,
}

impl FakeFetcher {
	pub fn new() -> Arc<Self> {
		Arc::new(Self {
			responses: Mutex::new(HashMap::new()),
			calls: Mutex::new(Vec::new()),
		})
	}

	pub fn respond(&self, url: &str, body: &str) {
		self.responses
			.lock()
			.unwrap()
			.insert(url.to_string(), Ok(body.to_string()));
	}

	pub fn fail(&self, url: &str, reason: &str) {
		self.responses
			.lock()
			.unwrap()
			.insert(url.to_string(), Err(reason.to_string()));
	}

	pub fn call_count(&self) -> usize {
		self.calls.lock().unwrap().len()
	}
}

#[async_trait(?Send)]
impl ContentFetcher for FakeFetcher {
	async fn fetch(&self, url: &str) -> Result<String, FetchError> {
		self.calls.lock().unwrap().push(url.to_string());
		match self.responses.lock().unwrap().get(url) {
			Some(Ok(body)) => Ok(body.clone()),
			Some(Err(reason)) => Err(FetchError::new(reason.clone())),
			None => Err(FetchError::new(format!("no canned response for {url}"))),
		}
	}
}

/// Fetcher that parks one URL's fetch until the test opens the gate,
/// for exercising overlapping in-flight navigations.
pub struct GatedFetcher {
	inner: Arc<FakeFetcher>,
	gated_url: String,
	gate: tokio::sync::Notify,
}

impl GatedFetcher {
	pub fn new(inner: Arc<FakeFetcher>, gated_url: &str) -> Arc<Self> {
		Arc::new(Self {
			inner,
			gated_url: gated_url.to_string(),
			gate: tokio::sync::Notify::new(),
		})
	}

	pub fn open(&self) {
		self.gate.notify_one();
	}
}

#[async_trait(?Send)]
impl ContentFetcher for GatedFetcher {
	async fn fetch(&self, url: &str) -> Result<String, FetchError> {
		if url == self.gated_url {
			self.gate.notified().await;
		}
		self.inner.fetch(url).await
	}
}

/// Fake link interceptor exposing the installed callback as a `click`.
pub struct FakeLinks {
	callback: Mutex<Option<NavigateCallback>>,
}

impl FakeLinks {
	pub fn new() -> Arc<Self> {
		Arc::new(Self {
			callback: Mutex::new(None),
		})
	}

	pub fn click(&self, href: &str) {
		let guard = self.callback.lock().unwrap();
		let callback = guard.as_ref().expect("link interceptor installed");
		callback(href.to_string());
	}

	pub fn is_installed(&self) -> bool {
		self.callback.lock().unwrap().is_some()
	}
}

impl LinkInterceptor for FakeLinks {
	fn install(&self, on_navigate: NavigateCallback) {
		*self.callback.lock().unwrap() = Some(on_navigate);
	}
}

/// One router plus the full set of fakes it is wired to.
pub struct Harness {
	pub history: Arc<FakeHistory>,
	pub dom: Arc<FakeDom>,
	pub fetcher: Arc<FakeFetcher>,
	pub links: Arc<FakeLinks>,
}

pub const MOUNT: &str = "#app";

impl Harness {
	pub fn new() -> Self {
		Self {
			history: FakeHistory::at("/"),
			dom: FakeDom::new(MOUNT),
			fetcher: FakeFetcher::new(),
			links: FakeLinks::new(),
		}
	}

	pub fn router(&self) -> Router {
		Router::with_services(
			MOUNT,
			self.history.clone(),
			self.dom.clone(),
			self.fetcher.clone(),
			self.links.clone(),
		)
	}
}
