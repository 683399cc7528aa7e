//! Routing error types.

use thiserror::Error;

/// Errors raised while parsing a path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Patterns are absolute.
    #[error("pattern `{0}` must start with '/'")]
    MissingLeadingSlash(String),

    /// `//` inside a pattern.
    #[error("pattern `{0}` contains an empty segment")]
    EmptySegment(String),

    /// `:` or `*` without a name, or a name with characters outside `[A-Za-z0-9_]`.
    #[error("pattern `{pattern}` has an invalid parameter name `{name}`")]
    InvalidParamName { pattern: String, name: String },

    /// The same parameter name appears twice.
    #[error("pattern `{pattern}` declares parameter `{name}` more than once")]
    DuplicateParam { pattern: String, name: String },

    /// A catch-all segment followed by more segments.
    #[error("pattern `{0}` has a catch-all segment that is not last")]
    CatchAllNotLast(String),
}

/// Errors raised while building a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error("route `{route}`: {source}")]
    InvalidPattern {
        route: String,
        #[source]
        source: PatternError,
    },

    #[error("duplicate route name `{0}`")]
    DuplicateName(String),

    #[error("route `{second}` repeats the path of route `{first}`")]
    DuplicatePath { first: String, second: String },

    #[error("not-found fallback name `{0}` collides with a declared route")]
    FallbackCollision(String),
}

/// Errors surfaced by reverse lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("unknown route name `{0}`")]
    UnknownRouteName(String),

    #[error("route `{route}` requires parameter `{param}`")]
    MissingParameter { route: String, param: String },
}

/// Result type for reverse lookups.
pub type ResolveResult<T> = Result<T, ResolveError>;
