//! Error types.
//!
//! - [`PatternError`] and [`DefinitionError`] are raised while routes are
//!   compiled at startup. They describe configuration bugs and should abort
//!   boot.
//! - [`AssembleError`] is raised when building a URL and is returned to the
//!   caller.
//!
//! A path that does not match a route is not an error: matching returns
//! `None` and the router moves on to the next route.

use thiserror::Error;

/// A route pattern could not be compiled.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The pattern scanner itself could not run.
    #[error("seriously malformed route pattern: {0}")]
    Malformed(String),

    /// A `{` or `}` that is not part of a `{name}` placeholder. Names are
    /// letters and digits only.
    #[error("malformed placeholder at byte {at}, expected `{{name}}` with letters and digits only")]
    MalformedVariable { at: usize },

    #[error(transparent)]
    UnbalancedBrackets(#[from] UnbalancedBrackets),

    /// The same placeholder name is used twice in one pattern.
    #[error("placeholder `{{{0}}}` appears more than once in the pattern")]
    DuplicateVariable(String),

    #[error("failed to compile route matcher: {0}")]
    Regex(#[from] regex::Error),
}

/// Optional group brackets are not properly nested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UnbalancedBrackets {
    /// `at` is the index of the offending token.
    #[error("found closing bracket without matching opening bracket at token {at}")]
    ClosingWithoutOpening { at: usize },

    #[error("found unbalanced brackets, {depth} optional group(s) left open")]
    Unclosed { depth: usize },
}

/// A route definition could not be turned into a route.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("route \"{route}\" definition must contain a \"{key}\" key, but it is not there")]
    MissingKey { route: String, key: &'static str },

    #[error("route \"{route}\" requests an unknown type of a route: \"{kind}\"")]
    UnknownRouteType { route: String, kind: String },

    #[error("route \"{route}\" parameter \"{name}\" must be a string, number or boolean")]
    InvalidParameterValue { route: String, name: String },

    #[error("route \"{route}\" has an invalid pattern: {source}")]
    Pattern {
        route: String,
        #[source]
        source: PatternError,
    },

    #[error("route named \"{0}\" is already registered")]
    DuplicateRouteName(String),

    #[error("failed to parse route definitions: {0}")]
    Json(#[from] serde_json::Error),
}

/// A URL could not be assembled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssembleError {
    /// A placeholder outside every optional group has no value.
    #[error("missing parameter \"{0}\"")]
    MissingRequiredParameter(String),

    #[error("route named \"{0}\" is unknown")]
    UnknownRouteName(String),
}
