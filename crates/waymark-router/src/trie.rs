//! Radix trie storing registered patterns.
//!
//! The trie is generic over the handler payload so the matching machinery
//! can be exercised with plain values in tests; the boundary
//! [`Router`](crate::Router) instantiates it with `Arc<dyn Handler>`.
//!
//! Nodes hold a static edge (a contiguous byte run), first-byte indices into
//! the static children, at most one parameter branch and at most one
//! catch-all branch. Matching precedence at every position is static edge >
//! parameter > catch-all, by construction of the lookup loop: branches seen
//! on the way down are remembered together with the input position, static
//! descent is attempted first, and the most recent remembered branch is the
//! fallback when it fails.

use crate::error::RouteError;
use crate::params::Params;
use std::collections::HashMap;

/// Per-node table mapping an HTTP method name to a handler.
///
/// `"*"` is a wildcard entry consulted only when no exact method matches.
/// The table also carries the derived `Allow` value: the sorted,
/// comma-joined concrete methods, excluding the wildcard.
#[derive(Debug)]
pub struct MethodTable<H> {
    handlers: HashMap<String, H>,
    allow: String,
}

impl<H> Default for MethodTable<H> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
            allow: String::new(),
        }
    }
}

impl<H> MethodTable<H> {
    /// The handler for `method`, falling back to the `"*"` wildcard entry.
    #[must_use]
    pub fn handler_for(&self, method: &str) -> Option<&H> {
        self.handlers.get(method).or_else(|| self.handlers.get("*"))
    }

    /// The sorted, comma-joined method list for the `Allow` header.
    #[must_use]
    pub fn allow(&self) -> &str {
        &self.allow
    }

    pub(crate) fn is_set(&self) -> bool {
        !self.handlers.is_empty()
    }

    /// Register `handler` for every token in the comma-separated `method`
    /// list, then refresh the derived allow string.
    fn set(&mut self, method: &str, handler: &H) -> Result<(), RouteError>
    where
        H: Clone,
    {
        for m in method.split(',') {
            if m.is_empty() {
                return Err(RouteError::MissingMethod);
            }
            if self.handlers.contains_key(m) {
                return Err(RouteError::MethodConflict(m.to_owned()));
            }
            self.handlers.insert(m.to_owned(), handler.clone());
        }

        let mut methods: Vec<&str> = self
            .handlers
            .keys()
            .map(String::as_str)
            .filter(|m| *m != "*")
            .collect();
        methods.sort_unstable();
        self.allow = methods.join(",");
        Ok(())
    }
}

/// Trailing-slash redirect hint produced by a failed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tsr {
    /// No canonical trailing-slash form is registered.
    None,
    /// The path with a separator appended is registered.
    AddSlash,
    /// The path minus its trailing separator is registered.
    RemoveSlash,
}

/// Outcome of a raw trie walk.
pub(crate) struct LookupResult<'t, H> {
    pub table: Option<&'t MethodTable<H>>,
    pub pattern: &'t str,
    pub tsr: Tsr,
}

impl<'t, H> LookupResult<'t, H> {
    fn hit(table: &'t MethodTable<H>, pattern: &'t str) -> Self {
        Self {
            table: Some(table),
            pattern,
            tsr: Tsr::None,
        }
    }

    pub(crate) fn miss(tsr: Tsr) -> Self {
        Self {
            table: None,
            pattern: "",
            tsr,
        }
    }
}

/// Single-segment parameter branch attached to a node.
///
/// `start` is the byte that must immediately precede the captured value
/// (the last byte of the owning node's edge) and `end` the byte that ends
/// the capture; zero means no such delimiter is configured and the capture
/// runs to a path separator or end of input.
#[derive(Debug)]
struct ParamBranch<H> {
    name: String,
    start: u8,
    end: u8,
    pattern: String,
    table: MethodTable<H>,
    child: Option<Box<Node<H>>>,
}

impl<H> ParamBranch<H> {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            start: 0,
            end: 0,
            pattern: String::new(),
            table: MethodTable::default(),
            child: None,
        }
    }
}

/// Tail catch-all branch. Always terminal.
#[derive(Debug)]
struct CatchAllBranch<H> {
    name: String,
    pattern: String,
    table: MethodTable<H>,
}

impl<H> Default for CatchAllBranch<H> {
    fn default() -> Self {
        Self {
            name: String::new(),
            pattern: String::new(),
            table: MethodTable::default(),
        }
    }
}

/// A trie node: static edge, first-byte-indexed static children, optional
/// parameter and catch-all branches, and the method table of a pattern
/// terminating exactly here.
#[derive(Debug)]
pub(crate) struct Node<H> {
    edge: String,
    pattern: String,
    table: MethodTable<H>,
    max_params: u8,

    /// First byte of each entry in `children`, scanned for dispatch.
    indices: Vec<u8>,
    children: Vec<Node<H>>,
    param: Option<Box<ParamBranch<H>>>,
    catchall: Option<Box<CatchAllBranch<H>>>,
}

impl<H> Default for Node<H> {
    fn default() -> Self {
        Self {
            edge: String::new(),
            pattern: String::new(),
            table: MethodTable::default(),
            max_params: 0,
            indices: Vec::new(),
            children: Vec::new(),
            param: None,
            catchall: None,
        }
    }
}

impl<H> Node<H> {
    /// Upper bound on parameters any pattern below this node captures.
    pub(crate) fn max_params(&self) -> u8 {
        self.max_params
    }

    /// Register `handler` under `method` for `pattern`, growing the trie.
    ///
    /// Walks the pattern one token class at a time: catch-all and parameter
    /// tokens attach to (or reconcile with) their single branch slot, static
    /// runs descend through the children, splitting an edge when the run
    /// diverges in the middle of it.
    pub(crate) fn insert(&mut self, method: &str, pattern: &str, handler: &H) -> Result<(), RouteError>
    where
        H: Clone,
    {
        let mut cur = self;
        let mut pat = pattern;
        let mut max_params = count_params(pattern);

        loop {
            if pat.is_empty() {
                cur.pattern = pattern.to_owned();
                return cur.table.set(method, handler);
            }

            if max_params > cur.max_params {
                cur.max_params = max_params;
            }

            let first = pat.as_bytes()[0];

            // Catch-all token: always the final one.
            if first == b'*' {
                let branch = cur.catchall.get_or_insert_with(Box::default);
                branch.table.set(method, handler)?;
                // Name and pattern stick from the first registration.
                if branch.pattern.is_empty() {
                    branch.name = pat[1..].to_owned();
                    branch.pattern = pattern.to_owned();
                }
                return Ok(());
            }

            // Parameter token.
            if first == b'{' {
                let close =
                    memchr::memchr(b'}', pat.as_bytes()).ok_or(RouteError::UnclosedParam)?;
                let name = &pat[1..close];

                let mut start = cur.edge.as_bytes().last().copied().unwrap_or(0);
                let mut end = *pat.as_bytes().get(close + 1).unwrap_or(&0);

                let branch = cur
                    .param
                    .get_or_insert_with(|| Box::new(ParamBranch::new(name)));

                if branch.name != name {
                    return Err(RouteError::ParamNameConflict {
                        new: name.to_owned(),
                        existing: branch.name.clone(),
                    });
                }
                // An unset delimiter adopts the other registration's value;
                // two different set delimiters conflict.
                if start != branch.start {
                    if start != 0 && branch.start != 0 {
                        return Err(RouteError::SeparatorConflict {
                            new: start as char,
                            existing: branch.start as char,
                        });
                    }
                    if start == 0 {
                        start = branch.start;
                    }
                }
                if end != branch.end {
                    if end != 0 && branch.end != 0 {
                        return Err(RouteError::SeparatorConflict {
                            new: end as char,
                            existing: branch.end as char,
                        });
                    }
                    if end == 0 {
                        end = branch.end;
                    }
                }
                branch.start = start;
                branch.end = end;

                pat = &pat[close + 1..];
                if pat.is_empty() {
                    branch.pattern = pattern.to_owned();
                    return branch.table.set(method, handler);
                }

                max_params -= 1;
                cur = branch.child.get_or_insert_with(Box::default);
                continue;
            }

            // Static run: descend through a child sharing the first byte,
            // splitting its edge when the run diverges partway through.
            if let Some(i) = cur
                .children
                .iter()
                .position(|n| !n.edge.is_empty() && n.edge.as_bytes()[0] == first)
            {
                let pl = common_prefix_len(&cur.children[i].edge, pat);
                if pl < cur.children[i].edge.len() {
                    let mut old = std::mem::take(&mut cur.children[i]);
                    let prefix = old.edge[..pl].to_owned();
                    let suffix = old.edge[pl..].to_owned();
                    let suffix_first = suffix.as_bytes()[0];
                    old.edge = suffix;
                    cur.children[i] = Node {
                        edge: prefix,
                        indices: vec![suffix_first],
                        children: vec![old],
                        ..Node::default()
                    };
                }
                pat = &pat[pl..];
                cur = &mut cur.children[i];
                continue;
            }

            // No shared first byte: append a fresh leaf for the run up to
            // the next token.
            let cut = memchr::memchr2(b'{', b'*', pat.as_bytes()).unwrap_or(pat.len());
            let (edge, rest) = pat.split_at(cut);
            pat = rest;

            cur.indices.push(edge.as_bytes()[0]);
            cur.children.push(Node {
                edge: edge.to_owned(),
                max_params,
                ..Node::default()
            });
            let last = cur.children.len() - 1;
            cur = &mut cur.children[last];
        }
    }

    /// Walk `key` through the trie, appending captures to `ps`.
    ///
    /// On any miss `ps` is left empty and the result carries the
    /// trailing-slash hint, if one applies.
    pub(crate) fn lookup<'t>(&'t self, key: &str, ps: &mut Params) -> LookupResult<'t, H> {
        ps.clear();

        let mut nd = self;
        let mut path = key;
        let mut prev: Option<&Node<H>> = None;
        // Branches observed on the way down, with the input position at
        // which they were seen. A node's parameter branch shadows any
        // remembered catch-all and vice versa, so at most one is pending.
        let mut pending_param: Option<(&'t Node<H>, &str)> = None;
        let mut pending_catchall: Option<(&'t Node<H>, &str)> = None;

        loop {
            if path.is_empty() || path == nd.edge {
                if nd.table.is_set() {
                    return LookupResult::hit(&nd.table, &nd.pattern);
                }
                if nd.edge == "/" && prev.is_some_and(|p| p.table.is_set()) {
                    ps.clear();
                    return LookupResult::miss(Tsr::RemoveSlash);
                }
                ps.clear();
                return Self::recommend(Some(nd), path);
            }

            if nd.catchall.is_some() {
                pending_param = None;
                pending_catchall = Some((nd, path));
            }
            if nd.param.is_some() {
                pending_catchall = None;
                pending_param = Some((nd, path));
            }

            // Static continuation: first-byte dispatch, then full-edge
            // comparison. This is what makes a literal segment outrank a
            // parameter registered at the same position.
            let c = path.as_bytes()[0];
            if let Some(i) = memchr::memchr(c, &nd.indices) {
                let n = &nd.children[i];
                if path.starts_with(n.edge.as_str()) {
                    path = &path[n.edge.len()..];
                    prev = Some(nd);
                    nd = n;
                    continue;
                }
            }

            // Parameter fallback, resuming from the remembered position.
            if let Some((pnode, ppath)) = pending_param {
                if let Some(branch) = pnode.param.as_deref() {
                    path = ppath;
                    let edge = pnode.edge.as_bytes();
                    let start_ok = match edge.last() {
                        None => branch.start == 0,
                        Some(&last) => last == branch.start,
                    };
                    if start_ok {
                        let bytes = path.as_bytes();
                        let cut = if branch.end == 0 {
                            memchr::memchr(b'/', bytes)
                        } else {
                            memchr::memchr2(branch.end, b'/', bytes)
                        }
                        .unwrap_or(bytes.len());

                        ps.push(&branch.name, &path[..cut]);
                        path = &path[cut..];

                        if path.is_empty() {
                            if branch.table.is_set() {
                                return LookupResult::hit(&branch.table, &branch.pattern);
                            }
                            ps.clear();
                            return Self::recommend(branch.child.as_deref(), path);
                        }
                        match branch.child.as_deref() {
                            None => {
                                let canonical = path == "/" && branch.table.is_set();
                                ps.clear();
                                return LookupResult::miss(if canonical {
                                    Tsr::RemoveSlash
                                } else {
                                    Tsr::None
                                });
                            }
                            Some(child) => {
                                prev = Some(pnode);
                                nd = child;
                                pending_param = None;
                                pending_catchall = None;
                                continue;
                            }
                        }
                    }
                }
            }

            // Catch-all fallback: greedy over the whole remainder.
            if let Some((cnode, cpath)) = pending_catchall {
                if let Some(branch) = cnode.catchall.as_deref() {
                    ps.push(&branch.name, cpath);
                    if branch.table.is_set() {
                        return LookupResult::hit(&branch.table, &branch.pattern);
                    }
                    ps.clear();
                    return LookupResult::miss(Tsr::None);
                }
            }

            break;
        }

        let canonical = path == "/" && nd.table.is_set();
        ps.clear();
        if canonical {
            return LookupResult::miss(Tsr::RemoveSlash);
        }
        Self::recommend(Some(nd), path)
    }

    /// Probe whether `path` with a separator appended lands on a child edge
    /// carrying a set method table.
    fn recommend<'t>(nd: Option<&'t Node<H>>, path: &str) -> LookupResult<'t, H> {
        if path.is_empty() || !path.ends_with('/') {
            if let Some(nd) = nd {
                for n in &nd.children {
                    if n.edge.len() == path.len() + 1
                        && n.edge.as_bytes()[path.len()] == b'/'
                        && n.edge.starts_with(path)
                        && n.table.is_set()
                    {
                        return LookupResult::miss(Tsr::AddSlash);
                    }
                }
            }
        }
        LookupResult::miss(Tsr::None)
    }
}

/// Number of parameters a pattern captures; a catch-all counts as one and
/// ends the pattern.
fn count_params(pattern: &str) -> u8 {
    let mut n: u8 = 0;
    for &b in pattern.as_bytes() {
        if b == b'*' {
            return n.saturating_add(1);
        }
        if b == b'{' {
            n = n.saturating_add(1);
        }
    }
    n
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.as_bytes()
        .iter()
        .zip(b.as_bytes())
        .take_while(|(x, y)| x == y)
        .count()
}
