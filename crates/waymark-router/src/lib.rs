//! Host-aware radix-trie request router.
//!
//! Patterns are registered against a method list and matched byte-by-byte
//! through a radix trie. A pattern mixes literal text with single-segment
//! `{param}` captures and a tail `*catchall`; a pattern that does not start
//! with `/` is host-qualified and matched against `host + path`. At every
//! trie position literal text wins over a parameter, which wins over a
//! catch-all.
//!
//! [`Router`] is the usual entry point:
//!
//! ```
//! use waymark_router::{Params, Router};
//! use waymark_core::{Request, Response};
//!
//! let mut router = Router::new();
//! router
//!     .insert("GET", "/users/{id}", |_req: &Request, params: &Params| {
//!         Response::ok().body_text(format!("user {}", params.get_string("id")))
//!     })
//!     .unwrap();
//!
//! let resp = router.serve(&Request::new("GET", "/users/42"));
//! assert_eq!(resp.body(), b"user 42");
//! ```

#![forbid(unsafe_code)]

mod error;
mod params;
mod router;
mod trie;

pub use error::{ParamError, RouteError};
pub use params::{Param, Params};
pub use router::{Handler, RouteInfo, RouteLookup, RouteMatch, Router};
pub use trie::MethodTable;
