//! Handler invocation.

use switchyard_match::PathParams;
use tracing::debug;

use crate::container::Container;
use crate::error::{Result, RouterError};
use crate::handler::{ControllerRef, Handler};

/// Invokes handlers, resolving controller references through an optional
/// container.
pub struct Dispatcher<'c, T> {
    container: Option<&'c dyn Container<T>>,
}

impl<'c, T> Dispatcher<'c, T> {
    /// Creates a dispatcher over `container`.
    pub fn new(container: Option<&'c dyn Container<T>>) -> Self {
        Self { container }
    }

    /// Invokes `handler` with `params` and returns its result unchanged.
    pub fn dispatch(&self, handler: &Handler<T>, params: &PathParams) -> Result<T> {
        match handler {
            Handler::Inline(f) => f(params),
            Handler::Controller(target) => self.call_controller(target, params),
        }
    }

    fn call_controller(&self, target: &ControllerRef, params: &PathParams) -> Result<T> {
        let container = self.container.ok_or_else(|| {
            RouterError::Configuration(format!(
                "route is bound to {target} but no container was provided"
            ))
        })?;

        if !target.is_well_formed() {
            return Err(RouterError::BadHandlerType(format!(
                "controller handler needs a component and a method name, got {target:?}"
            )));
        }

        if !container.has(&target.controller) {
            return Err(RouterError::BadRouteParameter(format!(
                "container has no component named {}",
                target.controller
            )));
        }

        debug!(controller = %target.controller, method = %target.method, "Dispatching to controller");
        container.call(target, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Known;

    impl Container<String> for Known {
        fn has(&self, component: &str) -> bool {
            component == "Users"
        }

        fn call(&self, target: &ControllerRef, params: &PathParams) -> Result<String> {
            Ok(format!("{target} {}", params.get("id").unwrap_or("-")))
        }
    }

    fn known() -> Option<&'static dyn Container<String>> {
        Some(&Known)
    }

    fn params() -> PathParams {
        [("id", "9")].into_iter().collect()
    }

    #[test]
    fn test_inline_result_passes_through() {
        let handler = Handler::inline(|p: &PathParams| Ok(p.get("id").map(str::to_owned)));
        let out = Dispatcher::new(None).dispatch(&handler, &params()).unwrap();
        assert_eq!(out, Some("9".to_string()));
    }

    #[test]
    fn test_inline_error_propagates() {
        let handler: Handler<()> =
            Handler::inline(|_| Err(RouterError::handler("database unavailable")));
        let err = Dispatcher::new(None).dispatch(&handler, &params()).unwrap_err();
        assert_eq!(err.to_string(), "handler failed: database unavailable");
    }

    #[test]
    fn test_controller_without_container() {
        let handler = Handler::<String>::controller("X", "y");
        let err = Dispatcher::new(None).dispatch(&handler, &params()).unwrap_err();
        assert!(matches!(err, RouterError::Configuration(_)));
    }

    #[test]
    fn test_controller_unknown_component() {
        let handler = Handler::controller("Ghost", "show");
        let err = Dispatcher::new(known())
            .dispatch(&handler, &params())
            .unwrap_err();
        assert!(matches!(err, RouterError::BadRouteParameter(_)));
    }

    #[test]
    fn test_controller_call() {
        let handler = Handler::controller("Users", "show");
        let out = Dispatcher::new(known())
            .dispatch(&handler, &params())
            .unwrap();
        assert_eq!(out, "Users@show 9");
    }

    #[test]
    fn test_malformed_controller_rejected_before_lookup() {
        let handler = Handler::<String>::controller("Users", "");
        let err = Dispatcher::new(known())
            .dispatch(&handler, &params())
            .unwrap_err();
        assert!(matches!(err, RouterError::BadHandlerType(_)));
    }

    #[test]
    fn test_missing_container_reported_before_malformed_reference() {
        let handler = Handler::<String>::controller("X", "");
        let err = Dispatcher::new(None).dispatch(&handler, &params()).unwrap_err();
        assert!(matches!(err, RouterError::Configuration(_)));
    }
}
