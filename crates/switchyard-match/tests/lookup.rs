//! Lookup behavior over realistic route tables.

mod common;
use common::*;

use switchyard_match::{Lookup, Method, RouteDef};

const GET: &[Method] = &[Method::Get];
const POST: &[Method] = &[Method::Post];
const ANY: &[Method] = &[Method::Get, Method::Post, Method::Put, Method::Delete];

fn blog() -> Vec<RouteDef<'static>> {
    vec![
        RouteDef { methods: GET, pattern: "/" },
        RouteDef { methods: GET, pattern: "/posts[/]" },
        RouteDef { methods: POST, pattern: "/posts[/]" },
        RouteDef { methods: GET, pattern: r"/posts/{id:\d+}[/]" },
        RouteDef { methods: GET, pattern: "/posts/{slug}[/]" },
        RouteDef { methods: GET, pattern: "/archive[/{year}[/{month}]]" },
        RouteDef { methods: GET, pattern: "/static/{*file}" },
        RouteDef { methods: ANY, pattern: "/webhook[/]" },
    ]
}

#[test]
fn numeric_ids_win_over_slugs_by_registration_order() {
    let table = compile(&blog());
    let (route, params) = found(table.as_ref(), Method::Get, "/posts/12");
    assert_eq!(route, 3);
    assert_eq!(params.get("id"), Some("12"));

    let (route, params) = found(table.as_ref(), Method::Get, "/posts/hello-world/");
    assert_eq!(route, 4);
    assert_eq!(params.get("slug"), Some("hello-world"));
}

#[test]
fn same_pattern_different_methods() {
    let table = compile(&blog());
    assert_eq!(found(table.as_ref(), Method::Get, "/posts").0, 1);
    assert_eq!(found(table.as_ref(), Method::Post, "/posts/").0, 2);
    assert_eq!(
        table.lookup(Method::Delete, "/posts"),
        Lookup::MethodNotAllowed {
            allowed: vec![Method::Get, Method::Post]
        }
    );
}

#[test]
fn optional_tail_and_wildcard() {
    let table = compile(&blog());
    let (_, params) = found(table.as_ref(), Method::Get, "/archive/2024/02");
    assert_eq!(params.get("year"), Some("2024"));
    assert_eq!(params.get("month"), Some("02"));

    let (_, params) = found(table.as_ref(), Method::Get, "/static/css/site.css");
    assert_eq!(params.get("file"), Some("css/site.css"));
    assert_eq!(table.lookup(Method::Get, "/static/"), Lookup::NotFound);
}

#[test]
fn any_route_answers_four_methods() {
    let table = compile(&blog());
    for method in [Method::Get, Method::Post, Method::Put, Method::Delete] {
        assert_eq!(found(table.as_ref(), method, "/webhook").0, 7);
    }
    assert!(matches!(
        table.lookup(Method::Patch, "/webhook"),
        Lookup::MethodNotAllowed { .. }
    ));
}

#[test]
fn head_requests_reach_get_routes() {
    let table = compile(&blog());
    assert_eq!(found(table.as_ref(), Method::Head, "/").0, 0);
}
