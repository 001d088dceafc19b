//! Fallback handlers for unmatched requests.

use crate::error::{Result, RouterError};
use crate::handler::Handler;

/// Status code answered when no route matches the path.
pub const NOT_FOUND: u16 = 404;
/// Status code answered when the path matches under other methods only.
pub const METHOD_NOT_ALLOWED: u16 = 405;

/// Handlers for 404 and 405, at most one each.
pub struct ErrorHandlers<T> {
    not_found: Option<Handler<T>>,
    method_not_allowed: Option<Handler<T>>,
}

impl<T> Default for ErrorHandlers<T> {
    fn default() -> Self {
        Self {
            not_found: None,
            method_not_allowed: None,
        }
    }
}

impl<T> ErrorHandlers<T> {
    /// Registers the handler for `code`, replacing any previous one.
    ///
    /// Only 404 and 405 are accepted; anything else fails without
    /// touching the registry.
    pub fn set(&mut self, code: u16, handler: Handler<T>) -> Result<()> {
        let slot = match code {
            NOT_FOUND => &mut self.not_found,
            METHOD_NOT_ALLOWED => &mut self.method_not_allowed,
            other => {
                return Err(RouterError::InvalidArgument(format!(
                    "error handlers can only be set for 404 or 405, got {other}"
                )))
            }
        };
        *slot = Some(handler);
        Ok(())
    }

    /// The handler registered for `code`, if any.
    pub const fn get(&self, code: u16) -> Option<&Handler<T>> {
        match code {
            NOT_FOUND => self.not_found.as_ref(),
            METHOD_NOT_ALLOWED => self.method_not_allowed.as_ref(),
            _ => None,
        }
    }
}

impl<T> Clone for ErrorHandlers<T> {
    fn clone(&self) -> Self {
        Self {
            not_found: self.not_found.clone(),
            method_not_allowed: self.method_not_allowed.clone(),
        }
    }
}

impl<T> std::fmt::Debug for ErrorHandlers<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorHandlers")
            .field("not_found", &self.not_found)
            .field("method_not_allowed", &self.method_not_allowed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_other_codes_without_mutation() {
        let mut handlers = ErrorHandlers::<u16>::default();
        for code in [200, 400, 403, 500] {
            let err = handlers.set(code, Handler::inline(|_| Ok(1))).unwrap_err();
            assert!(matches!(err, RouterError::InvalidArgument(_)));
        }
        assert!(handlers.get(NOT_FOUND).is_none());
        assert!(handlers.get(METHOD_NOT_ALLOWED).is_none());
    }

    #[test]
    fn test_second_registration_overwrites() {
        let mut handlers = ErrorHandlers::<u16>::default();
        handlers.set(404, Handler::controller("Old", "show")).unwrap();
        handlers.set(404, Handler::controller("New", "show")).unwrap();
        match handlers.get(404) {
            Some(Handler::Controller(r)) => assert_eq!(r.controller, "New"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(handlers.get(405).is_none());
    }
}
