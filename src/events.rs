//! Link-click interception.
//!
//! Same-origin anchor clicks are turned into router navigations instead of
//! full page loads. The wasm32 [`AnchorInterceptor`] installs a single
//! document-level click listener; tests substitute a fake that exposes the
//! registered callback directly.

use crate::history::NavigateCallback;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::Closure;

/// Source of intercepted in-app link navigations.
pub trait LinkInterceptor {
	/// Installs the interceptor. Every intercepted click invokes the
	/// callback with the anchor's declared target path instead of letting
	/// the host perform a full navigation.
	fn install(&self, on_navigate: NavigateCallback);
}

/// [`LinkInterceptor`] over document-level click events.
///
/// Only anchors whose `href` starts with `/` are intercepted; absolute
/// URLs, fragment links and modified-target anchors fall through to the
/// browser's default behavior.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct AnchorInterceptor;

#[cfg(target_arch = "wasm32")]
impl AnchorInterceptor {
	/// Creates a new click interceptor.
	pub fn new() -> Self {
		Self
	}
}

#[cfg(target_arch = "wasm32")]
impl LinkInterceptor for AnchorInterceptor {
	fn install(&self, on_navigate: NavigateCallback) {
		let Some(document) = web_sys::window().and_then(|w| w.document()) else {
			crate::warn_log!("document unavailable, link interception not wired");
			return;
		};

		let listener =
			Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |event: web_sys::MouseEvent| {
				let Some(target) = event.target() else { return };
				let Some(element) = target.dyn_ref::<web_sys::Element>() else {
					return;
				};

				if !element.matches("a[href^='/']").unwrap_or(false) {
					return;
				}

				if let Some(href) = element.get_attribute("href") {
					event.prevent_default();
					on_navigate(href);
				}
			});

		if document
			.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
			.is_err()
		{
			crate::warn_log!("failed to attach click listener");
		}

		// The listener lives for the page's lifetime.
		listener.forget();
	}
}
