//! Registration and parameter-access errors.

use std::fmt;
use std::num::{ParseFloatError, ParseIntError};
use std::str::ParseBoolError;

/// Error returned when a route registration is rejected.
///
/// Registration errors are fatal for the route being added: the trie is not
/// modified past the point of failure and the error identifies the
/// conflicting values so the route table can be fixed at the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The pattern string was empty.
    EmptyPattern,
    /// The method string was empty.
    EmptyMethod,
    /// A `{param}` was missing its closing brace.
    UnclosedParam,
    /// Two patterns disagree on a parameter name at the same trie position.
    ParamNameConflict {
        /// The name in the pattern being registered.
        new: String,
        /// The name already registered at this position.
        existing: String,
    },
    /// Two patterns disagree on a parameter delimiter at the same position.
    SeparatorConflict {
        /// The delimiter in the pattern being registered.
        new: char,
        /// The delimiter already registered at this position.
        existing: char,
    },
    /// The same method was registered twice for one terminal pattern.
    MethodConflict(String),
    /// A comma-separated method list contained an empty token.
    MissingMethod,
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPattern => write!(f, "empty pattern"),
            Self::EmptyMethod => write!(f, "empty method"),
            Self::UnclosedParam => write!(f, "missing closing curly brace '}}'"),
            Self::ParamNameConflict { new, existing } => write!(
                f,
                "the param name {new:?} conflicts with the param name {existing:?} \
                 in the same segment of a previously registered pattern"
            ),
            Self::SeparatorConflict { new, existing } => write!(
                f,
                "the param separator '{new}' conflicts with the separator '{existing}' \
                 in the same location of a previously registered pattern"
            ),
            Self::MethodConflict(method) => {
                write!(f, "a handler for the {method:?} method is already registered")
            }
            Self::MissingMethod => write!(f, "missing method"),
        }
    }
}

impl std::error::Error for RouteError {}

/// Error returned by the typed [`Params`](crate::Params) accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// No parameter with the requested name was captured.
    NotFound(String),
    /// The value could not be parsed as a bool.
    ParseBool {
        /// The parameter name.
        key: String,
        /// The underlying parse failure.
        source: ParseBoolError,
    },
    /// The value could not be parsed as an integer.
    ParseInt {
        /// The parameter name.
        key: String,
        /// The underlying parse failure, including range/syntax detail.
        source: ParseIntError,
    },
    /// The value could not be parsed as a float.
    ParseFloat {
        /// The parameter name.
        key: String,
        /// The underlying parse failure.
        source: ParseFloatError,
    },
    /// The value could not be parsed as a date-time.
    ParseTime {
        /// The parameter name.
        key: String,
        /// The underlying parse failure.
        source: chrono::ParseError,
    },
}

impl ParamError {
    /// The parameter name the failure refers to.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::NotFound(key)
            | Self::ParseBool { key, .. }
            | Self::ParseInt { key, .. }
            | Self::ParseFloat { key, .. }
            | Self::ParseTime { key, .. } => key,
        }
    }

    /// Whether this is the absent-parameter case.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(key) => write!(f, "no param for {key}"),
            Self::ParseBool { key, source } => {
                write!(f, "param {key:?} is not a valid bool: {source}")
            }
            Self::ParseInt { key, source } => {
                write!(f, "param {key:?} is not a valid integer: {source}")
            }
            Self::ParseFloat { key, source } => {
                write!(f, "param {key:?} is not a valid float: {source}")
            }
            Self::ParseTime { key, source } => {
                write!(f, "param {key:?} is not a valid date-time: {source}")
            }
        }
    }
}

impl std::error::Error for ParamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::ParseBool { source, .. } => Some(source),
            Self::ParseInt { source, .. } => Some(source),
            Self::ParseFloat { source, .. } => Some(source),
            Self::ParseTime { source, .. } => Some(source),
        }
    }
}
