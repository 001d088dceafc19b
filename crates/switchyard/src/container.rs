//! The dependency container seam used by controller handlers.

use switchyard_match::PathParams;

use crate::error::Result;
use crate::handler::ControllerRef;

/// Resolves components by name and invokes methods on them.
///
/// The router only asks two things of a container: whether it knows a
/// component, and to call a method on it with the extracted path variables.
///
/// # Example
///
/// ```
/// use switchyard::{Container, ControllerRef, PathParams, Result, RouterError};
///
/// struct Greeter;
///
/// impl Container<String> for Greeter {
///     fn has(&self, component: &str) -> bool {
///         component == "Greeter"
///     }
///
///     fn call(&self, target: &ControllerRef, params: &PathParams) -> Result<String> {
///         match target.method.as_str() {
///             "hello" => Ok(format!("hello {}", params.get("name").unwrap_or("world"))),
///             other => Err(RouterError::BadRouteParameter(format!("no method {other}"))),
///         }
///     }
/// }
/// ```
pub trait Container<T>: Send + Sync {
    /// True when the container can resolve `component`.
    fn has(&self, component: &str) -> bool;

    /// Invokes `target.method` on the resolved `target.controller`.
    fn call(&self, target: &ControllerRef, params: &PathParams) -> Result<T>;
}
