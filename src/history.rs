//! Location and history service.
//!
//! Abstracts the browser's History API as a small trait: query the current
//! path, push a path without a reload, and subscribe to external
//! back/forward navigations. The wasm32 [`BrowserHistory`] binds to
//! `window.history`; tests substitute an in-memory fake.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};

/// Callback invoked with the destination path of an externally triggered
/// navigation (popstate or an intercepted link click).
pub type NavigateCallback = Box<dyn Fn(String)>;

/// Location + history access needed by the navigation controller.
pub trait HistoryProvider {
	/// Returns the current location's path.
	fn current_path(&self) -> String;

	/// Pushes a path into the history without a full reload.
	fn push(&self, path: &str);

	/// Subscribes to back/forward navigations. The callback receives the
	/// path the location reports after the history moved.
	fn on_popstate(&self, callback: NavigateCallback);
}

/// [`HistoryProvider`] over the browser History API.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct BrowserHistory;

#[cfg(target_arch = "wasm32")]
impl BrowserHistory {
	/// Creates a new browser-backed history service.
	pub fn new() -> Self {
		Self
	}

	fn location_path() -> String {
		web_sys::window()
			.and_then(|w| w.location().pathname().ok())
			.unwrap_or_else(|| "/".to_string())
	}
}

#[cfg(target_arch = "wasm32")]
impl HistoryProvider for BrowserHistory {
	fn current_path(&self) -> String {
		Self::location_path()
	}

	fn push(&self, path: &str) {
		let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
			crate::warn_log!("history API unavailable, cannot push {}", path);
			return;
		};
		// Null state: the path string is the only state this router carries.
		if history
			.push_state_with_url(&JsValue::NULL, "", Some(path))
			.is_err()
		{
			crate::warn_log!("pushState failed for {}", path);
		}
	}

	fn on_popstate(&self, callback: NavigateCallback) {
		let Some(window) = web_sys::window() else {
			crate::warn_log!("window unavailable, popstate not wired");
			return;
		};

		let listener = Closure::<dyn FnMut(web_sys::PopStateEvent)>::new(
			move |_event: web_sys::PopStateEvent| {
				callback(Self::location_path());
			},
		);

		if window
			.add_event_listener_with_callback("popstate", listener.as_ref().unchecked_ref())
			.is_err()
		{
			crate::warn_log!("failed to attach popstate listener");
		}

		// The listener lives for the page's lifetime.
		listener.forget();
	}
}
