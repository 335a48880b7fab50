//! Navigation controller.
//!
//! [`Router`] owns the route table and the single-slot navigation state
//! (current path + current cleanup). All transitions go through
//! [`Router::navigate`]: tear down the previous view, resolve the route,
//! load content, run the new page's setup and record its teardown.
//!
//! Browser services (history, DOM, fetch, link interception) are injected
//! trait objects, so the controller runs unmodified against in-memory
//! fakes in native tests.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::dom::Dom;
use crate::error::RouterError;
use crate::events::LinkInterceptor;
use crate::fetch::ContentFetcher;
use crate::history::HistoryProvider;
use crate::route::{Page, RouteTable, Teardown};

/// Maps a destination path to the canonical `href` that navigation links
/// are compared against when marking them active.
///
/// This encodes a UI convention, not a routing invariant, so it is
/// configurable via [`Router::active_link_policy`].
pub type ActiveLinkPolicy = Arc<dyn Fn(&str) -> String>;

/// Shown in the container when a page's content fails to load.
pub const DEFAULT_ERROR_PLACEHOLDER: &str = "<p>Failed to load page</p>";

/// Default active-link policy: the first three `/`-separated components of
/// the path, so `/users/42/edit` activates a link to `/users/42`.
fn prefix_policy(path: &str) -> String {
	path.split('/').take(3).collect::<Vec<_>>().join("/")
}

/// Normalizes the location's initial path: an empty location is the root.
fn normalize_path(path: &str) -> String {
	if path.is_empty() {
		"/".to_string()
	} else {
		path.to_string()
	}
}

/// Per-router mutable navigation state. `Idle` is simply "no navigation
/// yet": `current_path` and `cleanup` both unset.
struct NavigationState {
	/// Path of the last committed navigation.
	current_path: Option<String>,
	/// Teardown returned by the active view's setup.
	cleanup: Option<Teardown>,
	/// Sequence number of the latest navigation that passed the duplicate
	/// check. Continuations resumed after the fetch suspension must still
	/// hold this number to commit.
	seq: u64,
}

/// The client-side router.
///
/// # Example
///
/// ```no_run
/// # use std::sync::Arc;
/// use wayfarer::route::Page;
/// use wayfarer::router::Router;
/// # fn services() -> (Arc<dyn wayfarer::history::HistoryProvider>, Arc<dyn wayfarer::dom::Dom>, Arc<dyn wayfarer::fetch::ContentFetcher>, Arc<dyn wayfarer::events::LinkInterceptor>) { unimplemented!() }
///
/// let (history, dom, fetcher, links) = services();
/// let router = Arc::new(
///     Router::with_services("#app", history, dom, fetcher, links)
///         .route("/", Page::new().content("/pages/home.html"))
///         .route("/users/:id", Page::new().content("/pages/user.html")),
/// );
/// router.init();
/// ```
pub struct Router {
	/// Registered routes, in registration order.
	routes: RouteTable,
	/// Selector of the mount container.
	mount_point: String,
	history: Arc<dyn HistoryProvider>,
	dom: Arc<dyn Dom>,
	fetcher: Arc<dyn ContentFetcher>,
	links: Arc<dyn LinkInterceptor>,
	active_link: ActiveLinkPolicy,
	error_placeholder: String,
	state: Mutex<NavigationState>,
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("mount_point", &self.mount_point)
			.field("routes_count", &self.routes.len())
			.finish()
	}
}

impl Router {
	/// Creates a router bound to the browser's history, document, HTTP
	/// stack and click events.
	#[cfg(target_arch = "wasm32")]
	pub fn new(mount_point: impl Into<String>) -> Self {
		Self::with_services(
			mount_point,
			Arc::new(crate::history::BrowserHistory::new()),
			Arc::new(crate::dom::BrowserDom::new()),
			Arc::new(crate::fetch::HttpFetcher::new()),
			Arc::new(crate::events::AnchorInterceptor::new()),
		)
	}

	/// Creates a router with explicitly injected services.
	pub fn with_services(
		mount_point: impl Into<String>,
		history: Arc<dyn HistoryProvider>,
		dom: Arc<dyn Dom>,
		fetcher: Arc<dyn ContentFetcher>,
		links: Arc<dyn LinkInterceptor>,
	) -> Self {
		Self {
			routes: RouteTable::new(),
			mount_point: mount_point.into(),
			history,
			dom,
			fetcher,
			links,
			active_link: Arc::new(prefix_policy),
			error_placeholder: DEFAULT_ERROR_PLACEHOLDER.to_string(),
			state: Mutex::new(NavigationState {
				current_path: None,
				cleanup: None,
				seq: 0,
			}),
		}
	}

	/// Registers a route. Registration order is resolution order.
	pub fn route(mut self, template: &str, page: Page) -> Self {
		self.routes.register(template, page);
		self
	}

	/// Replaces the active-link canonicalization policy.
	pub fn active_link_policy<F>(mut self, policy: F) -> Self
	where
		F: Fn(&str) -> String + 'static,
	{
		self.active_link = Arc::new(policy);
		self
	}

	/// Replaces the markup shown when content loading fails.
	pub fn error_placeholder(mut self, html: impl Into<String>) -> Self {
		self.error_placeholder = html.into();
		self
	}

	/// Returns the path of the last committed navigation, if any.
	pub fn current_path(&self) -> Option<String> {
		self.state().current_path.clone()
	}

	/// Returns the number of registered routes.
	pub fn route_count(&self) -> usize {
		self.routes.len()
	}

	fn state(&self) -> MutexGuard<'_, NavigationState> {
		// Single logical thread of control; a poisoned lock can only mean
		// a panic in user setup/teardown code, whose state is still valid.
		self.state.lock().unwrap_or_else(|e| e.into_inner())
	}

	fn is_current(&self, seq: u64) -> bool {
		self.state().seq == seq
	}

	/// Navigates to `path`, reporting failures through the diagnostic log.
	///
	/// Failures never cross this boundary: route-not-found, mount-not-found
	/// and content errors are terminal for this navigation but leave the
	/// router fully usable.
	pub async fn navigate(&self, path: &str) {
		match self.try_navigate(path).await {
			Ok(()) => {}
			Err(RouterError::Superseded(p)) => {
				crate::info_log!("navigation to {} superseded", p);
			}
			Err(err) => {
				crate::error_log!("{}", err);
			}
		}
	}

	/// Navigates to `path`, returning the failure cause.
	///
	/// Steps, in order: duplicate suppression, previous-view teardown,
	/// route resolution, path/history bookkeeping, active-link marking,
	/// mount lookup, content load, setup. The teardown in step two runs
	/// unconditionally once the duplicate check passes, even if every
	/// later step fails.
	pub async fn try_navigate(&self, path: &str) -> Result<(), RouterError> {
		// Re-navigation to the current path is a no-op: no fetch, no
		// history push, no setup. Repeated popstate notifications for the
		// same path must not re-run the page.
		let (previous_cleanup, seq) = {
			let mut state = self.state();
			if state.current_path.as_deref() == Some(path) {
				return Ok(());
			}
			state.seq += 1;
			(state.cleanup.take(), state.seq)
		};

		if let Some(cleanup) = previous_cleanup {
			cleanup();
		}

		let Some(matched) = self.routes.resolve(path) else {
			return Err(RouterError::RouteNotFound(path.to_string()));
		};

		self.state().current_path = Some(path.to_string());

		// The controller itself may be consuming a path it already pushed
		// (or one reported by popstate); only push when the location lags.
		if self.history.current_path() != path {
			self.history.push(path);
		}

		self.dom.mark_active_links(&(self.active_link)(path));

		let Some(container) = self.dom.container(&self.mount_point) else {
			return Err(RouterError::MountNotFound(self.mount_point.clone()));
		};

		if let Some(url) = matched.page.content_url() {
			// The only suspension point. A navigation that started while
			// this one was parked here owns the state now.
			match self.fetcher.fetch(url).await {
				Ok(html) => {
					if !self.is_current(seq) {
						return Err(RouterError::Superseded(path.to_string()));
					}
					container.set_content(&html);
				}
				Err(err) => {
					if !self.is_current(seq) {
						return Err(RouterError::Superseded(path.to_string()));
					}
					container.set_content(&self.error_placeholder);
					return Err(RouterError::ContentLoadFailed {
						url: url.to_string(),
						reason: err.to_string(),
					});
				}
			}
		}

		let cleanup = matched.page.mount(container.as_ref(), &matched.params);

		let mut state = self.state();
		if state.seq == seq {
			state.cleanup = cleanup;
			Ok(())
		} else {
			drop(state);
			// A setup that navigated re-entrantly owns the slot now;
			// release this view immediately.
			if let Some(cleanup) = cleanup {
				cleanup();
			}
			Err(RouterError::Superseded(path.to_string()))
		}
	}

	/// Wires the router to its event sources and performs the first
	/// navigation.
	///
	/// Computes the initial path from the current location (empty
	/// normalized to `/`), navigates to it, then subscribes to history
	/// back/forward notifications and intercepted link clicks, both of
	/// which re-enter [`Router::navigate`].
	pub fn init(self: &Arc<Self>) {
		#[cfg(feature = "console_error_panic_hook")]
		console_error_panic_hook::set_once();

		let initial = normalize_path(&self.history.current_path());
		Self::dispatch(Arc::clone(self), initial);

		let router = Arc::clone(self);
		self.history
			.on_popstate(Box::new(move |path| Self::dispatch(Arc::clone(&router), path)));

		let router = Arc::clone(self);
		self.links
			.install(Box::new(move |path| Self::dispatch(Arc::clone(&router), path)));
	}

	/// Hands a navigation to the platform's executor.
	fn dispatch(router: Arc<Self>, path: String) {
		#[cfg(target_arch = "wasm32")]
		wasm_bindgen_futures::spawn_local(async move {
			router.navigate(&path).await;
		});

		#[cfg(not(target_arch = "wasm32"))]
		futures::executor::block_on(router.navigate(&path));
	}
}
