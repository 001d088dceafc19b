//! Error types for routing.

use switchyard_match::{Method, PatternError};
use thiserror::Error;

/// Router-specific errors.
#[derive(Debug, Error)]
pub enum RouterError {
    /// An argument outside the accepted domain, such as an error handler
    /// for a status code other than 404 or 405.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No route matched the request and no 404 handler is registered.
    #[error("route not found: {method} {path}")]
    RouteNotFound { method: Method, path: String },

    /// The path matched under other methods and no 405 handler is registered.
    #[error("method not allowed: {method} for {path}")]
    MethodNotAllowed {
        method: Method,
        path: String,
        allowed: Vec<Method>,
    },

    /// A controller reference was dispatched but no container is configured.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A controller reference names a component the container does not know.
    #[error("bad route parameter: {0}")]
    BadRouteParameter(String),

    /// A handler is not an inline function or a well-formed controller reference.
    #[error("bad handler type: {0}")]
    BadHandlerType(String),

    /// A registered pattern failed to compile.
    #[error(transparent)]
    InvalidPattern(#[from] PatternError),

    /// A failure raised by handler code.
    #[error("handler failed: {0}")]
    Handler(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RouterError {
    /// Wraps an error raised inside a handler or container.
    pub fn handler(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Handler(err.into())
    }
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;
