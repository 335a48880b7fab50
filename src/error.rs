//! Error types for navigation.

/// Why a navigation stopped short of mounting its view.
///
/// Every variant is terminal for that navigation and non-fatal for the
/// router: the controller remains usable and the next [`navigate`] call
/// proceeds normally.
///
/// [`navigate`]: crate::router::Router::navigate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
	/// No registered pattern matches the requested path.
	RouteNotFound(String),
	/// The configured mount-point selector matched nothing.
	MountNotFound(String),
	/// The page's content source could not be loaded; the container shows
	/// the error placeholder and setup was skipped.
	ContentLoadFailed {
		/// The content locator that failed.
		url: String,
		/// The underlying failure.
		reason: String,
	},
	/// A newer navigation started while this one was suspended at the
	/// content fetch; nothing was committed.
	Superseded(String),
}

impl std::fmt::Display for RouterError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::RouteNotFound(path) => write!(f, "Route not found: {}", path),
			Self::MountNotFound(selector) => {
				write!(f, "Mount point not found: {}", selector)
			}
			Self::ContentLoadFailed { url, reason } => {
				write!(f, "Failed to load content from {}: {}", url, reason)
			}
			Self::Superseded(path) => {
				write!(f, "Navigation to {} superseded by a newer one", path)
			}
		}
	}
}

impl std::error::Error for RouterError {}
