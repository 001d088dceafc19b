//! # switchyard-match
//!
//! The route matching engine used by `switchyard`.
//!
//! This crate provides:
//! - Pattern compilation into anchored regexes
//! - Path variable extraction (`{id}`, `{id:\d+}`, `:id`, `{*rest}`)
//! - Optional trailing parts (`/posts[/{page}]`)
//! - Method-aware lookup reporting found / not found / method not allowed
//!
//! ## Quick Start
//!
//! ```
//! use switchyard_match::{Lookup, MatchEngine, Method, RegexEngine, RouteDef};
//!
//! let routes = [
//!     RouteDef { methods: &[Method::Get], pattern: "/users[/]" },
//!     RouteDef { methods: &[Method::Get], pattern: "/users/{id}[/]" },
//! ];
//! let table = RegexEngine.compile(&routes).unwrap();
//!
//! match table.lookup(Method::Get, "/users/7") {
//!     Lookup::Found { route, params } => {
//!         assert_eq!(route, 1);
//!         assert_eq!(params.get("id"), Some("7"));
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

mod engine;
mod error;
mod method;
mod params;
mod pattern;

pub use engine::{CompiledRoutes, Lookup, MatchEngine, RegexEngine, RegexRoutes, RouteDef};
pub use error::{PatternError, Result};
pub use method::{Method, UnknownMethod};
pub use params::PathParams;
pub use pattern::PathPattern;
