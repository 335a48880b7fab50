//! Mount-target and active-link services.
//!
//! The router never touches the document directly; it talks to a [`Dom`]
//! service that locates the configured mount container and marks matching
//! navigation links as active. On wasm32 the [`BrowserDom`] implementation
//! binds to the real document; tests substitute in-memory fakes.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

/// An attach point for resolved view content.
pub trait Container {
	/// Replaces the container's contents with the given markup.
	fn set_content(&self, html: &str);
}

/// Document access needed by the navigation controller.
pub trait Dom {
	/// Locates the container for a mount-point selector.
	///
	/// Returns `None` when the selector matches nothing in the current
	/// document.
	fn container(&self, selector: &str) -> Option<Box<dyn Container>>;

	/// Marks navigation links whose declared target equals `href` as
	/// active, and clears the marker from all others.
	///
	/// `href` is already canonicalized by the router's active-link policy.
	/// This is a UI nicety; failures here never abort a navigation.
	fn mark_active_links(&self, href: &str);
}

/// [`Dom`] implementation over the browser document.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct BrowserDom;

#[cfg(target_arch = "wasm32")]
impl BrowserDom {
	/// Creates a new browser-backed DOM service.
	pub fn new() -> Self {
		Self
	}
}

#[cfg(target_arch = "wasm32")]
impl Dom for BrowserDom {
	fn container(&self, selector: &str) -> Option<Box<dyn Container>> {
		let document = web_sys::window()?.document()?;
		let element = document.query_selector(selector).ok().flatten()?;
		Some(Box::new(BrowserContainer { element }))
	}

	fn mark_active_links(&self, href: &str) {
		let Some(document) = web_sys::window().and_then(|w| w.document()) else {
			return;
		};
		let Ok(links) = document.query_selector_all("nav a") else {
			return;
		};

		for i in 0..links.length() {
			let Some(node) = links.item(i) else { continue };
			let Some(element) = node.dyn_ref::<web_sys::Element>() else {
				continue;
			};
			let is_active = element.get_attribute("href").as_deref() == Some(href);
			let _ = element.class_list().toggle_with_force("active", is_active);
		}
	}
}

/// A [`Container`] wrapping a concrete document element.
#[cfg(target_arch = "wasm32")]
pub struct BrowserContainer {
	element: web_sys::Element,
}

#[cfg(target_arch = "wasm32")]
impl Container for BrowserContainer {
	fn set_content(&self, html: &str) {
		self.element.set_inner_html(html);
	}
}
