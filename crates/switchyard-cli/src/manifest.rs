//! Route manifests: routers described as JSON.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use serde_json::{json, Value};
use switchyard::{
    Container, ControllerRef, Handler, Method, PathParams, Router, RouterConfig, RouterError,
};
use tracing::debug;

/// A router described in data.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Router settings.
    #[serde(default)]
    pub config: RouterConfig,
    /// Components the container resolves.
    #[serde(default)]
    pub controllers: Vec<String>,
    /// Top-level routes.
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
    /// Route groups.
    #[serde(default)]
    pub groups: Vec<GroupEntry>,
    /// Fallback handlers by status code.
    #[serde(default)]
    pub errors: BTreeMap<u16, Value>,
}

/// One route of a manifest.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteEntry {
    #[serde(default = "default_methods")]
    pub methods: Vec<Method>,
    pub path: String,
    pub handler: Value,
}

/// A group of routes sharing a prefix.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupEntry {
    pub prefix: String,
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
    #[serde(default)]
    pub groups: Vec<GroupEntry>,
}

fn default_methods() -> Vec<Method> {
    vec![Method::Get]
}

impl Manifest {
    /// Reads a manifest file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading manifest {}", path.display()))?;
        let manifest = serde_json::from_str(&raw)
            .with_context(|| format!("parsing manifest {}", path.display()))?;
        debug!(path = %path.display(), "Loaded manifest");
        Ok(manifest)
    }

    /// Builds the router the manifest describes.
    ///
    /// Controller handlers resolve through an [`EchoContainer`] that knows
    /// the manifest's `controllers`.
    pub fn build(&self) -> switchyard::Result<Router<Value>> {
        let mut router = Router::with_config(self.config.clone())
            .with_container(EchoContainer::new(self.controllers.clone()));

        register(&mut router, &self.routes, &self.groups)?;
        for (code, handler) in &self.errors {
            router.set_error(*code, Handler::try_from(handler)?)?;
        }

        router.compile()?;
        Ok(router)
    }
}

fn register(
    router: &mut Router<Value>,
    routes: &[RouteEntry],
    groups: &[GroupEntry],
) -> switchyard::Result<()> {
    for route in routes {
        router.route(&route.methods, &route.path, Handler::try_from(&route.handler)?)?;
    }
    for group in groups {
        router.group(&group.prefix, |inner| {
            register(inner, &group.routes, &group.groups)
        })?;
    }
    Ok(())
}

/// Container answering every call with a description of the call.
#[derive(Debug, Clone)]
pub struct EchoContainer {
    controllers: Vec<String>,
}

impl EchoContainer {
    pub const fn new(controllers: Vec<String>) -> Self {
        Self { controllers }
    }
}

impl Container<Value> for EchoContainer {
    fn has(&self, component: &str) -> bool {
        self.controllers.iter().any(|c| c == component)
    }

    fn call(&self, target: &ControllerRef, params: &PathParams) -> switchyard::Result<Value> {
        let params = serde_json::to_value(params).map_err(RouterError::handler)?;
        Ok(json!({
            "controller": target.controller,
            "method": target.method,
            "params": params,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use switchyard::RequestContext;

    use super::*;

    const MANIFEST: &str = r#"{
        "controllers": ["Users", "Pages"],
        "routes": [
            { "path": "/", "handler": "Pages@home" }
        ],
        "groups": [
            {
                "prefix": "api",
                "routes": [
                    { "methods": ["GET"], "path": "users", "handler": "Users@index" },
                    { "methods": ["PUT", "PATCH"], "path": "users/{id}",
                      "handler": { "controller": "Users", "method": "update" } }
                ],
                "groups": [
                    { "prefix": "v2", "routes": [ { "path": "ping", "handler": "Pages@ping" } ] }
                ]
            }
        ],
        "errors": { "404": "Pages@missing" }
    }"#;

    fn load(raw: &str) -> Manifest {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(raw.as_bytes()).unwrap();
        Manifest::load(file.path()).unwrap()
    }

    #[test]
    fn test_builds_nested_groups() {
        let router = load(MANIFEST).build().unwrap();
        let patterns: Vec<_> = router.routes().iter().map(|r| r.pattern()).collect();
        assert_eq!(
            patterns,
            vec!["/", "/api/users[/]", "/api/users/{id}[/]", "/api/v2/ping[/]"]
        );
        assert_eq!(router.prefix(), "/");
    }

    #[test]
    fn test_resolves_through_echo_container() {
        let router = load(MANIFEST).build().unwrap();

        let out = router
            .run(&RequestContext::new(Method::Patch, "/api/users/9/"))
            .unwrap();
        assert_eq!(
            out,
            json!({"controller": "Users", "method": "update", "params": {"id": "9"}})
        );

        let out = router.run(&RequestContext::get("/nope")).unwrap();
        assert_eq!(out["method"], "missing");
        assert_eq!(out["params"], json!({}));
    }

    #[test]
    fn test_bad_handler_shape_is_reported() {
        let manifest = load(r#"{ "routes": [ { "path": "/x", "handler": 7 } ] }"#);
        assert!(matches!(
            manifest.build(),
            Err(RouterError::BadHandlerType(_))
        ));
    }

    #[test]
    fn test_unsupported_error_code_is_reported() {
        let manifest = load(r#"{ "errors": { "500": "Pages@oops" } }"#);
        assert!(matches!(
            manifest.build(),
            Err(RouterError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_unknown_controller_fails_at_run() {
        let manifest = load(r#"{ "routes": [ { "path": "/x", "handler": "Ghost@show" } ] }"#);
        let router = manifest.build().unwrap();
        assert!(matches!(
            router.run(&RequestContext::get("/x")),
            Err(RouterError::BadRouteParameter(_))
        ));
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = Manifest::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("reading manifest"));
    }
}
