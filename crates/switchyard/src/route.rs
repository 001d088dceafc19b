//! Registered routes.

use switchyard_match::{Method, RouteDef};

use crate::handler::Handler;

/// Methods registered by `any`.
pub const ANY_METHODS: [Method; 4] = [Method::Get, Method::Post, Method::Put, Method::Delete];

/// A single route definition.
pub struct Route<T> {
    /// HTTP methods the route answers.
    methods: Vec<Method>,
    /// Normalized pattern.
    pattern: String,
    /// Request handler.
    handler: Handler<T>,
}

impl<T> Route<T> {
    /// Creates a route from an already-normalized pattern.
    pub(crate) fn new(methods: Vec<Method>, pattern: String, handler: Handler<T>) -> Self {
        Self {
            methods,
            pattern,
            handler,
        }
    }

    /// Methods this route answers.
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// The normalized pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The handler invoked on match.
    pub const fn handler(&self) -> &Handler<T> {
        &self.handler
    }

    /// The view handed to a matching engine.
    pub fn def(&self) -> RouteDef<'_> {
        RouteDef {
            methods: &self.methods,
            pattern: &self.pattern,
        }
    }
}

impl<T> Clone for Route<T> {
    fn clone(&self) -> Self {
        Self {
            methods: self.methods.clone(),
            pattern: self.pattern.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Route<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("methods", &self.methods)
            .field("pattern", &self.pattern)
            .field("handler", &self.handler)
            .finish()
    }
}
