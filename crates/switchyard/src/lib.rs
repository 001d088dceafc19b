//! # switchyard
//!
//! A small HTTP request router.
//!
//! This crate provides:
//! - Route registration per HTTP method, or for several at once with `any`
//! - Route groups sharing a path prefix, nestable to any depth
//! - Optional trailing slashes: `/users` and `/users/` reach the same route
//! - Fallback handlers for "not found" (404) and "method not allowed" (405)
//! - Inline handlers and controller handlers resolved through a container
//!
//! Pattern matching itself is done by a [`MatchEngine`]; the default
//! [`RegexEngine`] comes from `switchyard-match`.
//!
//! ## Quick Start
//!
//! ```
//! use switchyard::{Handler, RequestContext, Router};
//!
//! let mut router: Router<String> = Router::new();
//! router.get("/", Handler::inline(|_| Ok("Hello, World!".to_string())));
//! router.group("api", |api| {
//!     api.get("users/{id}", Handler::inline(|params| {
//!         Ok(format!("user {}", params.get("id").unwrap_or_default()))
//!     }));
//! });
//!
//! let out = router.run(&RequestContext::get("/api/users/123/")).unwrap();
//! assert_eq!(out, "user 123");
//! ```
//!
//! ## Controllers
//!
//! A route can name a component method instead of carrying a closure. The
//! component is resolved through a [`Container`] when the route matches:
//!
//! ```
//! use switchyard::{Container, ControllerRef, PathParams, RequestContext, Result, Router};
//!
//! struct Users;
//!
//! impl Container<String> for Users {
//!     fn has(&self, component: &str) -> bool {
//!         component == "Users"
//!     }
//!
//!     fn call(&self, target: &ControllerRef, params: &PathParams) -> Result<String> {
//!         Ok(format!("{target} {}", params.get("id").unwrap_or_default()))
//!     }
//! }
//!
//! let mut router: Router<String> = Router::new().with_container(Users);
//! router.get("/users/{id}", ("Users", "show"));
//!
//! let out = router.run(&RequestContext::get("/users/7")).unwrap();
//! assert_eq!(out, "Users@show 7");
//! ```
//!
//! ## Error Handlers
//!
//! ```
//! use switchyard::{Handler, RequestContext, Router, RouterError};
//!
//! let mut router: Router<u16> = Router::new();
//! assert!(router.run(&RequestContext::get("/missing")).is_err());
//!
//! router.set_error(404, Handler::inline(|params| {
//!     assert!(params.is_empty());
//!     Ok(404)
//! }))?;
//! assert_eq!(router.run(&RequestContext::get("/missing"))?, 404);
//!
//! assert!(matches!(
//!     router.set_error(500, Handler::inline(|_| Ok(500))),
//!     Err(RouterError::InvalidArgument(_))
//! ));
//! # Ok::<(), RouterError>(())
//! ```

mod config;
mod container;
mod dispatch;
mod error;
mod fallback;
mod group;
mod handler;
pub mod normalize;
mod request;
mod route;
mod router;

pub use config::{RouterConfig, TrailingSlash};
pub use container::Container;
pub use dispatch::Dispatcher;
pub use error::{Result, RouterError};
pub use fallback::{ErrorHandlers, METHOD_NOT_ALLOWED, NOT_FOUND};
pub use handler::{ControllerRef, Handler, InlineFn};
pub use request::RequestContext;
pub use route::{Route, ANY_METHODS};
pub use router::Router;
pub use switchyard_match::{
    CompiledRoutes, Lookup, MatchEngine, Method, PathParams, PatternError, RegexEngine, RouteDef,
};
