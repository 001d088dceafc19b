#![allow(dead_code)]

use switchyard_match::{CompiledRoutes, Lookup, MatchEngine, Method, PathParams, RegexEngine, RouteDef};

pub fn compile(defs: &[RouteDef<'_>]) -> Box<dyn CompiledRoutes> {
    RegexEngine
        .compile(defs)
        .unwrap_or_else(|e| panic!("Failed to compile table: {e}"))
}

pub fn found(table: &dyn CompiledRoutes, method: Method, path: &str) -> (usize, PathParams) {
    match table.lookup(method, path) {
        Lookup::Found { route, params } => (route, params),
        other => panic!("Expected match for {method} {path}, got {other:?}"),
    }
}
