//! Route registration and resolution.
//!
//! A [`RouteTable`] is an ordered sequence of compiled patterns paired
//! with their [`Page`] handlers. Registration order is semantically
//! significant: resolution scans in order and the first match wins.

use std::sync::Arc;

use crate::dom::Container;
use crate::pattern::{Params, PathPattern};

/// A view's release function, invoked before the next view mounts.
pub type Teardown = Box<dyn FnOnce()>;

/// A page's setup function: receives the mount container and the extracted
/// parameters, and may return a teardown to run on the next navigation.
pub type SetupFn = Arc<dyn Fn(&dyn Container, &Params) -> Option<Teardown>>;

/// The capability bundle behind a route.
///
/// Both capabilities are optional: a page may declare a content source (a
/// URL fetched and injected into the container before setup), a setup
/// function, neither, or both.
///
/// # Example
///
/// ```no_run
/// use wayfarer::route::Page;
///
/// let page = Page::new()
///     .content("/pages/user.html")
///     .setup(|_container, params| {
///         let id = params.get("id").cloned();
///         Some(Box::new(move || drop(id)))
///     });
/// ```
#[derive(Clone, Default)]
pub struct Page {
	/// Optional content locator fetched before setup.
	content: Option<String>,
	/// Optional setup invoked after the content is in place.
	setup: Option<SetupFn>,
}

impl Page {
	/// Creates an empty page.
	pub fn new() -> Self {
		Self::default()
	}

	/// Declares the page's content source.
	pub fn content(mut self, url: impl Into<String>) -> Self {
		self.content = Some(url.into());
		self
	}

	/// Declares the page's setup function.
	pub fn setup<F>(mut self, setup: F) -> Self
	where
		F: Fn(&dyn Container, &Params) -> Option<Teardown> + 'static,
	{
		self.setup = Some(Arc::new(setup));
		self
	}

	/// Returns the content locator, if any.
	pub fn content_url(&self) -> Option<&str> {
		self.content.as_deref()
	}

	/// Returns whether a setup function is declared.
	pub fn has_setup(&self) -> bool {
		self.setup.is_some()
	}

	/// Runs the setup function, if any, returning its teardown.
	pub(crate) fn mount(&self, container: &dyn Container, params: &Params) -> Option<Teardown> {
		self.setup.as_ref().and_then(|setup| setup(container, params))
	}
}

impl std::fmt::Debug for Page {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Page")
			.field("content", &self.content)
			.field("has_setup", &self.setup.is_some())
			.finish()
	}
}

/// A resolved navigation: the owning page and its extracted parameters.
#[derive(Debug, Clone)]
pub struct RouteMatch {
	/// The page registered for the matching route.
	pub page: Arc<Page>,
	/// Parameters captured from the path.
	pub params: Params,
}

/// One registered route.
#[derive(Debug)]
struct RouteEntry {
	pattern: PathPattern,
	page: Arc<Page>,
}

/// Ordered collection of routes with first-match-wins resolution.
#[derive(Debug, Default)]
pub struct RouteTable {
	entries: Vec<RouteEntry>,
}

impl RouteTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Compiles `template` and appends it to the table.
	///
	/// Re-registering an equal template does not deduplicate: both entries
	/// persist, and the earlier one always wins.
	pub fn register(&mut self, template: &str, page: Page) {
		self.entries.push(RouteEntry {
			pattern: PathPattern::new(template),
			page: Arc::new(page),
		});
	}

	/// Resolves a concrete path to its page and parameters.
	///
	/// Scans entries in registration order and returns on the first
	/// matcher success. `None` means no route, which is distinct from a
	/// navigation error.
	pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
		self.entries.iter().find_map(|entry| {
			entry.pattern.matches(path).map(|params| RouteMatch {
				page: Arc::clone(&entry.page),
				params,
			})
		})
	}

	/// Returns the number of registered routes.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns whether the table has no routes.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
