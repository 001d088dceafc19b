//! Route handlers.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde_json::Value;
use switchyard_match::PathParams;

use crate::error::{Result, RouterError};

/// A boxed inline handler function.
pub type InlineFn<T> = Arc<dyn Fn(&PathParams) -> Result<T> + Send + Sync>;

/// A named method on a component resolved through a [`Container`](crate::Container).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControllerRef {
    /// Component name looked up in the container.
    pub controller: String,
    /// Method invoked on the component.
    pub method: String,
}

impl ControllerRef {
    /// Creates a controller reference.
    pub fn new(controller: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            method: method.into(),
        }
    }

    /// True when both names are present.
    pub fn is_well_formed(&self) -> bool {
        !self.controller.trim().is_empty() && !self.method.trim().is_empty()
    }
}

impl fmt::Display for ControllerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.controller, self.method)
    }
}

impl FromStr for ControllerRef {
    type Err = RouterError;

    /// Parses `Component@method`.
    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('@') {
            Some((controller, method)) if !controller.is_empty() && !method.is_empty() => {
                Ok(Self::new(controller, method))
            }
            _ => Err(RouterError::BadHandlerType(format!(
                "expected Component@method, got {s:?}"
            ))),
        }
    }
}

/// What a route invokes when it matches.
pub enum Handler<T> {
    /// A function called with the extracted path variables.
    Inline(InlineFn<T>),
    /// A component method resolved through the container.
    Controller(ControllerRef),
}

impl<T> Handler<T> {
    /// Wraps a closure as an inline handler.
    ///
    /// ```
    /// use switchyard::Handler;
    ///
    /// let handler: Handler<String> = Handler::inline(|params| {
    ///     Ok(format!("user {}", params.get("id").unwrap_or("?")))
    /// });
    /// assert!(handler.is_inline());
    /// ```
    pub fn inline<F>(f: F) -> Self
    where
        F: Fn(&PathParams) -> Result<T> + Send + Sync + 'static,
    {
        Self::Inline(Arc::new(f))
    }

    /// Creates a controller handler.
    pub fn controller(controller: impl Into<String>, method: impl Into<String>) -> Self {
        Self::Controller(ControllerRef::new(controller, method))
    }

    /// True for inline handlers.
    pub const fn is_inline(&self) -> bool {
        matches!(self, Self::Inline(_))
    }
}

impl<T> Clone for Handler<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Inline(f) => Self::Inline(Arc::clone(f)),
            Self::Controller(r) => Self::Controller(r.clone()),
        }
    }
}

impl<T> fmt::Debug for Handler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inline(_) => f.write_str("Handler::Inline(..)"),
            Self::Controller(r) => f.debug_tuple("Handler::Controller").field(r).finish(),
        }
    }
}

impl<T> From<ControllerRef> for Handler<T> {
    fn from(r: ControllerRef) -> Self {
        Self::Controller(r)
    }
}

impl<T> From<(&str, &str)> for Handler<T> {
    fn from((controller, method): (&str, &str)) -> Self {
        Self::controller(controller, method)
    }
}

impl<T> TryFrom<&Value> for Handler<T> {
    type Error = RouterError;

    /// Reads a handler described in data.
    ///
    /// Accepts `"Component@method"` or `{"controller": .., "method": ..}`.
    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => s.parse::<ControllerRef>().map(Self::Controller),
            Value::Object(map) => {
                let controller = map.get("controller").and_then(Value::as_str);
                let method = map.get("method").and_then(Value::as_str);
                match (controller, method) {
                    (Some(c), Some(m)) => Ok(Self::controller(c, m)),
                    _ => Err(RouterError::BadHandlerType(format!(
                        "controller handler needs string `controller` and `method` keys, got {value}"
                    ))),
                }
            }
            other => Err(RouterError::BadHandlerType(format!(
                "unsupported handler shape: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_controller_string() {
        let r: ControllerRef = "Users@show".parse().unwrap();
        assert_eq!(r, ControllerRef::new("Users", "show"));
        assert_eq!(r.to_string(), "Users@show");
        assert!(matches!(
            "Users".parse::<ControllerRef>(),
            Err(RouterError::BadHandlerType(_))
        ));
        assert!(matches!(
            "@show".parse::<ControllerRef>(),
            Err(RouterError::BadHandlerType(_))
        ));
    }

    #[test]
    fn test_handler_from_json_shapes() {
        let h = Handler::<()>::try_from(&json!("Pages@home")).unwrap();
        assert!(matches!(h, Handler::Controller(ref r) if r.controller == "Pages"));

        let h = Handler::<()>::try_from(&json!({"controller": "Pages", "method": "about"})).unwrap();
        assert!(matches!(h, Handler::Controller(ref r) if r.method == "about"));
    }

    #[test]
    fn test_handler_from_json_rejects_other_shapes() {
        for value in [json!(42), json!(null), json!(["Pages", "home"]), json!({"controller": "Pages"})] {
            assert!(matches!(
                Handler::<()>::try_from(&value),
                Err(RouterError::BadHandlerType(_))
            ));
        }
    }

    #[test]
    fn test_well_formed() {
        assert!(ControllerRef::new("A", "b").is_well_formed());
        assert!(!ControllerRef::new("", "b").is_well_formed());
        assert!(!ControllerRef::new("A", " ").is_well_formed());
    }
}
