//! Boundary value types for the waymark router.
//!
//! This crate provides the minimal request/response surface the matching
//! engine dispatches into:
//!
//! - [`Request`] — method, host, path and headers as seen by the router
//! - [`Response`] — status, headers and body produced by handlers
//! - [`Headers`] — case-insensitive header collection
//! - [`StatusCode`] — status codes with canonical reason phrases
//!
//! No I/O happens here; transports construct a [`Request`] and write out the
//! returned [`Response`].

#![forbid(unsafe_code)]

mod request;
mod response;

pub use request::{Body, Headers, Request, Version};
pub use response::{Response, StatusCode};
