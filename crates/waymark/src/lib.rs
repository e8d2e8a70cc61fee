//! Host-aware radix-trie request router.
//!
//! waymark matches request paths (optionally qualified by host) against
//! patterns registered up front, with:
//!
//! - **Radix-trie matching** — one byte-wise walk per request, no per-route
//!   scanning
//! - **Single-segment captures** — `{id}` binds one path segment, with typed
//!   accessors for ints, floats, bools and date-times
//! - **Tail catch-alls** — `/static/*filepath` binds the rest of the path
//! - **Host patterns** — `api.example.com/users/{id}` matches host and path
//!   together, with a plain-path fallback
//! - **Canonical-form redirects** — trailing-slash mismatches and uncleaned
//!   paths answer with a 301 to the registered form
//!
//! # Quick Start
//!
//! ```
//! use waymark::prelude::*;
//!
//! let mut router = Router::new();
//! router
//!     .insert("GET", "/users/{id}", |_req: &Request, params: &Params| {
//!         Response::ok().body_text(format!("user {}", params.get_int64("id")))
//!     })
//!     .unwrap();
//! router
//!     .insert("GET", "/static/*filepath", |_req: &Request, params: &Params| {
//!         Response::ok().body_text(params.get_string("filepath").to_owned())
//!     })
//!     .unwrap();
//!
//! let resp = router.serve(&Request::new("GET", "/users/42"));
//! assert_eq!(resp.body(), b"user 42");
//! ```
//!
//! # Crate Structure
//!
//! - [`waymark_core`] — Request and response types shared across the stack
//! - [`waymark_router`] — The trie, the router boundary and typed parameters

#![forbid(unsafe_code)]

// Re-export crates
pub use waymark_core as core;
pub use waymark_router as router;

// Re-export commonly used types
pub use waymark_core::{Body, Headers, Request, Response, StatusCode, Version};
pub use waymark_router::{
    Handler, MethodTable, Param, ParamError, Params, RouteError, RouteInfo, RouteLookup,
    RouteMatch, Router,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        Handler, Param, ParamError, Params, Request, Response, RouteError, RouteLookup, Router,
        StatusCode,
    };
}
