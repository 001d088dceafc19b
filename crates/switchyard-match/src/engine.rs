//! The matching engine contract and its regex-backed implementation.

use tracing::debug;

use crate::error::Result;
use crate::method::Method;
use crate::params::PathParams;
use crate::pattern::PathPattern;

/// A route as seen by a matching engine: the methods it answers and its pattern.
#[derive(Debug, Clone, Copy)]
pub struct RouteDef<'a> {
    /// Methods the route accepts.
    pub methods: &'a [Method],
    /// Normalized pattern string.
    pub pattern: &'a str,
}

/// Outcome of resolving a request against a compiled table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// A route matched by path and method.
    Found {
        /// Index of the route in the table handed to [`MatchEngine::compile`].
        route: usize,
        /// Extracted path variables.
        params: PathParams,
    },
    /// Path matched, but not under the request method.
    MethodNotAllowed {
        /// Methods the path does accept, in registration order.
        allowed: Vec<Method>,
    },
    /// No route matched the path.
    NotFound,
}

/// A compiled route table that can resolve requests.
pub trait CompiledRoutes: Send + Sync {
    /// Resolves a request method and path.
    fn lookup(&self, method: Method, path: &str) -> Lookup;
}

/// Compiles route tables.
///
/// The router hands over every registered route in registration order;
/// the returned table reports matches by index into that slice.
pub trait MatchEngine: Send + Sync {
    /// Compiles a route table.
    fn compile(&self, routes: &[RouteDef<'_>]) -> Result<Box<dyn CompiledRoutes>>;
}

/// Engine compiling each pattern into an anchored regex.
///
/// Routes are tried in registration order and the first route whose
/// pattern and method both match wins. `HEAD` requests fall back to `GET`
/// routes when no route accepts `HEAD` for the path.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexEngine;

impl MatchEngine for RegexEngine {
    fn compile(&self, routes: &[RouteDef<'_>]) -> Result<Box<dyn CompiledRoutes>> {
        let entries = routes
            .iter()
            .map(|def| {
                Ok(Entry {
                    methods: def.methods.to_vec(),
                    pattern: PathPattern::new(def.pattern)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(routes = entries.len(), "Compiled route table");
        Ok(Box::new(RegexRoutes { entries }))
    }
}

#[derive(Debug)]
struct Entry {
    methods: Vec<Method>,
    pattern: PathPattern,
}

/// Table produced by [`RegexEngine`].
#[derive(Debug)]
pub struct RegexRoutes {
    entries: Vec<Entry>,
}

impl RegexRoutes {
    fn find(&self, method: Method, path: &str, allowed: &mut Vec<Method>) -> Option<Lookup> {
        for (index, entry) in self.entries.iter().enumerate() {
            let Some(params) = entry.pattern.match_path(path) else {
                continue;
            };
            if entry.methods.contains(&method) {
                return Some(Lookup::Found {
                    route: index,
                    params,
                });
            }
            for m in &entry.methods {
                if !allowed.contains(m) {
                    allowed.push(*m);
                }
            }
        }
        None
    }
}

impl CompiledRoutes for RegexRoutes {
    fn lookup(&self, method: Method, path: &str) -> Lookup {
        let mut allowed = Vec::new();

        if let Some(found) = self.find(method, path, &mut allowed) {
            return found;
        }
        if method == Method::Head {
            if let Some(found) = self.find(Method::Get, path, &mut Vec::new()) {
                return found;
            }
        }

        if allowed.is_empty() {
            Lookup::NotFound
        } else {
            Lookup::MethodNotAllowed { allowed }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GET: &[Method] = &[Method::Get];
    const POST: &[Method] = &[Method::Post];
    const DELETE: &[Method] = &[Method::Delete];
    const POST_GET: &[Method] = &[Method::Post, Method::Get];

    fn table(defs: &[(&[Method], &str)]) -> Box<dyn CompiledRoutes> {
        let defs: Vec<_> = defs
            .iter()
            .map(|(methods, pattern)| RouteDef { methods, pattern })
            .collect();
        RegexEngine.compile(&defs).unwrap()
    }

    #[test]
    fn test_found_reports_index_and_params() {
        let routes = table(&[
            (GET, "/"),
            (GET, "/users/{id}[/]"),
        ]);
        match routes.lookup(Method::Get, "/users/42/") {
            Lookup::Found { route, params } => {
                assert_eq!(route, 1);
                assert_eq!(params.get("id"), Some("42"));
            }
            other => panic!("expected match, got {other:?}"),
        }
    }

    #[test]
    fn test_first_registered_wins() {
        let routes = table(&[
            (GET, "/users/{id}"),
            (GET, "/users/me"),
        ]);
        assert!(matches!(
            routes.lookup(Method::Get, "/users/me"),
            Lookup::Found { route: 0, .. }
        ));
    }

    #[test]
    fn test_method_not_allowed_lists_methods() {
        let routes = table(&[
            (GET, "/items"),
            (POST_GET, "/items"),
            (DELETE, "/other"),
        ]);
        assert_eq!(
            routes.lookup(Method::Put, "/items"),
            Lookup::MethodNotAllowed {
                allowed: vec![Method::Get, Method::Post]
            }
        );
    }

    #[test]
    fn test_not_found() {
        let routes = table(&[(GET, "/items")]);
        assert_eq!(routes.lookup(Method::Get, "/nothing"), Lookup::NotFound);
        assert_eq!(table(&[]).lookup(Method::Get, "/"), Lookup::NotFound);
    }

    #[test]
    fn test_head_falls_back_to_get() {
        let routes = table(&[(POST, "/a"), (GET, "/a")]);
        assert!(matches!(
            routes.lookup(Method::Head, "/a"),
            Lookup::Found { route: 1, .. }
        ));
    }

    #[test]
    fn test_compile_surfaces_pattern_errors() {
        let defs = [RouteDef {
            methods: GET,
            pattern: "/a[/b",
        }];
        assert!(RegexEngine.compile(&defs).is_err());
    }
}
