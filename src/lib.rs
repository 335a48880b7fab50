//! Wayfarer - Client-Side Navigation Core
//!
//! A small router for single-page WASM applications: registered path
//! templates with named parameters, first-match-wins resolution, and a
//! single-slot navigation state machine that guarantees the previous
//! view's teardown runs before the next view mounts.
//!
//! ## Architecture
//!
//! - [`pattern`]: path template compilation and matching (`/users/:id`)
//! - [`route`]: route table and [`Page`](route::Page) handler bundles
//! - [`router`]: the navigation controller and bootstrap wiring
//! - [`history`], [`dom`], [`fetch`], [`events`]: browser services behind
//!   injectable traits, with wasm32 implementations and native test seams
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wayfarer::{Page, Router};
//!
//! let router = Arc::new(
//!     Router::new("#app")
//!         .route("/", Page::new().content("/pages/home.html"))
//!         .route("/users/:id", Page::new()
//!             .content("/pages/user.html")
//!             .setup(|container, params| {
//!                 let id = params["id"].clone();
//!                 // wire the view, return its teardown
//!                 Some(Box::new(move || drop(id)))
//!             })),
//! );
//! router.init();
//! ```
//!
//! Navigation is idempotent on the current path, tears the previous view
//! down before anything else can fail, and serializes overlapping
//! navigations with a per-navigation sequence number: a navigation that
//! finishes its content fetch after being superseded commits nothing.

pub mod dom;
pub mod error;
pub mod events;
pub mod fetch;
pub mod history;
pub mod logging;
pub mod pattern;
pub mod route;
pub mod router;

pub use error::RouterError;
pub use pattern::{Params, PathPattern};
pub use route::{Page, RouteMatch, RouteTable, Teardown};
pub use router::{DEFAULT_ERROR_PLACEHOLDER, Router};
