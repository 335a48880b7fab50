//! Path template compilation and matching.
//!
//! A template is a `/`-separated sequence of segments. A segment starting
//! with `:` is a named parameter capturing exactly one path segment; every
//! other segment matches literally.

use std::collections::HashMap;

use regex::Regex;

/// Parameters extracted from a matched path, keyed by placeholder name.
///
/// Built fresh for every resolved navigation and handed to the page's
/// setup function.
pub type Params = HashMap<String, String>;

/// A compiled path template.
///
/// Compilation anchors the whole candidate path (start to end) against the
/// template's segments. Each `:name` placeholder matches one or more
/// non-`/` characters, so a parameter never spans path segments.
///
/// Literal segments are inserted into the underlying expression verbatim:
/// regex metacharacters in a literal segment keep their regex meaning.
/// This is a documented limitation, not corrected silently.
///
/// # Example
///
/// ```
/// use wayfarer::pattern::PathPattern;
///
/// let pattern = PathPattern::new("/users/:id/edit");
/// let params = pattern.matches("/users/42/edit").unwrap();
/// assert_eq!(params.get("id"), Some(&"42".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct PathPattern {
	/// The original template string.
	template: String,
	/// Anchored matcher compiled from the template.
	regex: Regex,
	/// Parameter names in the order their placeholders appear.
	param_names: Vec<String>,
}

impl PathPattern {
	/// Compiles a template into a pattern.
	///
	/// # Panics
	///
	/// Panics if a literal segment's metacharacters make the compiled
	/// expression invalid (for example an unbalanced `(`). Templates are
	/// developer-authored constants, so this fails at registration time
	/// rather than being a runtime error.
	pub fn new(template: &str) -> Self {
		let mut param_names = Vec::new();

		let source: Vec<String> = template
			.split('/')
			.map(|segment| {
				if let Some(name) = segment.strip_prefix(':') {
					param_names.push(name.to_string());
					"([^/]+)".to_string()
				} else {
					segment.to_string()
				}
			})
			.collect();

		let anchored = format!("^{}$", source.join("/"));
		let regex = Regex::new(&anchored)
			.unwrap_or_else(|e| panic!("invalid route template {template:?}: {e}"));

		Self {
			template: template.to_string(),
			regex,
			param_names,
		}
	}

	/// Tests a concrete path against this pattern.
	///
	/// On a match, returns the captured value for each placeholder, zipped
	/// positionally with the parameter names. Returns `None` when the path
	/// does not match.
	pub fn matches(&self, path: &str) -> Option<Params> {
		let captures = self.regex.captures(path)?;

		// Positional correspondence between captures and names is an
		// internal invariant; a mismatch means the template itself
		// introduced extra groups through unescaped literal segments.
		debug_assert_eq!(
			captures.len() - 1,
			self.param_names.len(),
			"capture count diverged from parameter names for {:?}",
			self.template
		);

		let params = self
			.param_names
			.iter()
			.enumerate()
			.filter_map(|(i, name)| {
				captures
					.get(i + 1)
					.map(|m| (name.clone(), m.as_str().to_string()))
			})
			.collect();

		Some(params)
	}

	/// Substitutes parameters back into the template to build a concrete
	/// path.
	///
	/// Returns `None` if any placeholder is missing from `params`.
	pub fn reverse(&self, params: &Params) -> Option<String> {
		let segments: Option<Vec<String>> = self
			.template
			.split('/')
			.map(|segment| match segment.strip_prefix(':') {
				Some(name) => params.get(name).cloned(),
				None => Some(segment.to_string()),
			})
			.collect();

		segments.map(|s| s.join("/"))
	}

	/// Returns the original template string.
	pub fn template(&self) -> &str {
		&self.template
	}

	/// Returns the parameter names in placeholder order.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}
}
