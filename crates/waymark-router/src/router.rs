//! Boundary router wrapping the trie.
//!
//! [`Router`] owns the trie root, translates raw lookup outcomes into
//! responses (trailing-slash redirects, 405 with `Allow`, a configurable
//! not-found handler) and recycles per-request parameter buffers. The
//! contract is build-then-serve: registration takes `&mut self`, serving
//! takes `&self`, so a router published behind an `Arc` cannot race a
//! half-built trie.

use crate::error::RouteError;
use crate::params::Params;
use crate::trie::{LookupResult, MethodTable, Node, Tsr};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use waymark_core::{Request, Response, StatusCode};

/// Cap on recycled parameter buffers kept around between requests.
const POOL_LIMIT: usize = 64;

/// A registered request handler.
///
/// Implemented for any `Fn(&Request, &Params) -> Response` closure or
/// function.
pub trait Handler: Send + Sync {
    /// Produce the response for a matched request.
    fn call(&self, req: &Request, params: &Params) -> Response;
}

impl<F> Handler for F
where
    F: Fn(&Request, &Params) -> Response + Send + Sync,
{
    fn call(&self, req: &Request, params: &Params) -> Response {
        self(req, params)
    }
}

/// A successfully registered route, as listed by [`Router::routes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    /// The method list exactly as registered (may be comma-separated or
    /// the `"*"` wildcard).
    pub method: String,
    /// The pattern exactly as registered.
    pub pattern: String,
}

/// A matched pattern together with its captures and method table.
pub struct RouteMatch<'r> {
    /// The literal pattern text that matched.
    pub pattern: &'r str,
    /// The captured parameters, in pattern order.
    pub params: Params,
    table: &'r MethodTable<Arc<dyn Handler>>,
}

impl RouteMatch<'_> {
    /// The handler registered for `method`, falling back to a `"*"`
    /// wildcard registration.
    #[must_use]
    pub fn handler_for(&self, method: &str) -> Option<&Arc<dyn Handler>> {
        self.table.handler_for(method)
    }

    /// The sorted, comma-joined `Allow` value for this pattern.
    #[must_use]
    pub fn allowed(&self) -> &str {
        self.table.allow()
    }
}

/// Raw outcome of matching a host and path against the trie.
pub enum RouteLookup<'r> {
    /// A pattern matched; dispatch by method through the [`RouteMatch`].
    Match(RouteMatch<'r>),
    /// No pattern matched, but the canonical trailing-slash form is
    /// registered at `location`.
    Redirect {
        /// The canonical path to redirect to.
        location: String,
    },
    /// Nothing matched.
    NotFound,
}

/// Host-aware radix-trie request router.
///
/// Patterns are registered up front with [`insert`](Router::insert); every
/// request is then resolved with [`serve`](Router::serve) (full response
/// pipeline) or [`route`](Router::route) (raw outcome).
pub struct Router {
    root: Node<Arc<dyn Handler>>,
    /// Set once any registered pattern carries a host expression; lookups
    /// then try `host+path` before falling back to the path alone.
    hosts: bool,
    not_found: Arc<dyn Handler>,
    routes: Vec<RouteInfo>,
    pool: Mutex<Vec<Params>>,
}

impl Router {
    /// Create an empty router with the default not-found handler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Node::default(),
            hosts: false,
            not_found: Arc::new(default_not_found),
            routes: Vec::new(),
            pool: Mutex::new(Vec::new()),
        }
    }

    /// Register `handler` for the comma-separated `method` list (or `"*"`)
    /// and `pattern`.
    ///
    /// A pattern whose first character is not `/` is treated as
    /// host-qualified and switches the router into host-aware matching.
    pub fn insert(
        &mut self,
        method: &str,
        pattern: &str,
        handler: impl Handler + 'static,
    ) -> Result<(), RouteError> {
        if pattern.is_empty() {
            return Err(RouteError::EmptyPattern);
        }
        if method.is_empty() {
            return Err(RouteError::EmptyMethod);
        }
        if !pattern.starts_with('/') {
            self.hosts = true;
        }

        let handler: Arc<dyn Handler> = Arc::new(handler);
        self.root.insert(method, pattern, &handler)?;
        self.routes.push(RouteInfo {
            method: method.to_owned(),
            pattern: pattern.to_owned(),
        });
        Ok(())
    }

    /// Replace the not-found handler invoked when no pattern matches.
    pub fn set_not_found(&mut self, handler: impl Handler + 'static) {
        self.not_found = Arc::new(handler);
    }

    /// Every successful registration, in registration order.
    #[must_use]
    pub fn routes(&self) -> &[RouteInfo] {
        &self.routes
    }

    /// Resolve a host and path to the raw match/redirect/no-match outcome.
    #[must_use]
    pub fn route(&self, host: &str, path: &str) -> RouteLookup<'_> {
        let mut ps = Params::new();
        let res = self.resolve(host, path, &mut ps);
        if let Some(table) = res.table {
            return RouteLookup::Match(RouteMatch {
                pattern: res.pattern,
                params: ps,
                table,
            });
        }
        match res.tsr {
            Tsr::AddSlash => RouteLookup::Redirect {
                location: format!("{path}/"),
            },
            Tsr::RemoveSlash => RouteLookup::Redirect {
                location: path.strip_suffix('/').unwrap_or(path).to_owned(),
            },
            Tsr::None => RouteLookup::NotFound,
        }
    }

    /// Run the full request pipeline and produce a response.
    ///
    /// Handles the asterisk-form request target, trailing-slash redirects,
    /// method-not-allowed reporting and the not-found fallback.
    #[must_use]
    pub fn serve(&self, req: &Request) -> Response {
        if req.target() == "*" {
            let resp = Response::bad_request();
            return if req.version().at_least(1, 1) {
                resp.header("connection", b"close".to_vec())
            } else {
                resp
            };
        }

        let mut ps = self.checkout();
        let res = self.resolve(req.host(), req.path(), &mut ps);

        let resp = if let Some(table) = res.table {
            dispatch(table, req, &ps)
        } else {
            match res.tsr {
                Tsr::AddSlash => Response::redirect(
                    format!("{}/", req.path()),
                    StatusCode::MOVED_PERMANENTLY,
                ),
                Tsr::RemoveSlash => Response::redirect(
                    req.path().strip_suffix('/').unwrap_or(req.path()).to_owned(),
                    StatusCode::MOVED_PERMANENTLY,
                ),
                Tsr::None => {
                    ps.clear();
                    self.not_found.call(req, &ps)
                }
            }
        };

        self.checkin(ps);
        resp
    }

    /// Walk the trie, host-qualified first when the router is host-aware.
    ///
    /// The host-qualified attempt is abandoned in favor of a path-only walk
    /// only when it failed outright, with no trailing-slash hint pending.
    fn resolve<'r>(
        &'r self,
        host: &str,
        path: &str,
        ps: &mut Params,
    ) -> LookupResult<'r, Arc<dyn Handler>> {
        let mut res = LookupResult::miss(Tsr::None);
        if self.hosts {
            let key = [host, path].concat();
            res = self.root.lookup(&key, ps);
        }
        if res.table.is_none() && res.tsr == Tsr::None {
            res = self.root.lookup(path, ps);
        }
        res
    }

    fn checkout(&self) -> Params {
        self.pool
            .lock()
            .pop()
            .unwrap_or_else(|| Params::with_capacity(usize::from(self.root.max_params())))
    }

    fn checkin(&self, mut ps: Params) {
        ps.clear();
        let mut pool = self.pool.lock();
        if pool.len() < POOL_LIMIT {
            pool.push(ps);
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// Dispatch a matched method table: exact method, then the `"*"` wildcard,
/// then 405 with `Allow` (an OPTIONS probe gets the header without an error
/// body).
fn dispatch(table: &MethodTable<Arc<dyn Handler>>, req: &Request, params: &Params) -> Response {
    if let Some(handler) = table.handler_for(req.method()) {
        return handler.call(req, params);
    }

    let resp = if req.method() == "OPTIONS" {
        Response::ok()
    } else {
        Response::with_status(StatusCode::METHOD_NOT_ALLOWED).body_text("Method Not Allowed\n")
    };
    resp.header("allow", table.allow().as_bytes().to_vec())
}

/// Default not-found behavior: redirect to the canonical path when it
/// differs from the request path and from the referring page, otherwise a
/// plain 404.
fn default_not_found(req: &Request, _params: &Params) -> Response {
    if req.method() != "CONNECT" {
        let clean = clean_path(req.path());
        if clean != req.path() && req.referer() != Some(clean.as_str()) {
            return Response::redirect(clean, StatusCode::MOVED_PERMANENTLY);
        }
    }
    Response::not_found()
}

/// Canonicalize a URL path: collapse duplicate separators and resolve `.`
/// and `..` segments, preserving a trailing separator.
fn clean_path(p: &str) -> String {
    if p.is_empty() {
        return "/".to_owned();
    }
    let trailing = p.ends_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for seg in p.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            seg => segments.push(seg),
        }
    }

    let mut out = String::with_capacity(p.len() + 1);
    for seg in &segments {
        out.push('/');
        out.push_str(seg);
    }
    if out.is_empty() {
        out.push('/');
    }
    if trailing && out != "/" {
        out.push('/');
    }
    out
}
