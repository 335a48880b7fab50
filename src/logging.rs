//! Logging macros for WASM and native targets.
//!
//! `info_log!` and `warn_log!` compile to no-ops in release builds;
//! `error_log!` is always on, since route and content failures are
//! reported through it rather than propagated to callers.
//!
//! On wasm32 the macros write to the browser console, elsewhere to stderr.

/// Logs an info message (requires `debug_assertions`).
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		web_sys::console::info_1(&format!($($arg)*).into());
	}};
}

/// Logs an info message (requires `debug_assertions`).
#[macro_export]
#[cfg(all(debug_assertions, not(target_arch = "wasm32")))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		eprintln!("[INFO] {}", format!($($arg)*));
	}};
}

/// No-op info_log in release builds.
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! info_log {
	($($arg:tt)*) => {{}};
}

/// Logs a warning message (requires `debug_assertions`).
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		web_sys::console::warn_1(&format!($($arg)*).into());
	}};
}

/// Logs a warning message (requires `debug_assertions`).
#[macro_export]
#[cfg(all(debug_assertions, not(target_arch = "wasm32")))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		eprintln!("[WARN] {}", format!($($arg)*));
	}};
}

/// No-op warn_log in release builds.
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! warn_log {
	($($arg:tt)*) => {{}};
}

/// Logs an error message. Always compiled in: navigation failures are
/// reported here and must survive release builds.
#[macro_export]
#[cfg(target_arch = "wasm32")]
macro_rules! error_log {
	($($arg:tt)*) => {{
		web_sys::console::error_1(&format!($($arg)*).into());
	}};
}

/// Logs an error message. Always compiled in.
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! error_log {
	($($arg:tt)*) => {{
		eprintln!("[ERROR] {}", format!($($arg)*));
	}};
}
