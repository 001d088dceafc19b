#![allow(dead_code)]

use std::sync::Mutex;

use switchyard::{Container, ControllerRef, Handler, PathParams, RequestContext, Result, Router};

/// Inline handler returning a fixed body.
pub fn body(text: &'static str) -> Handler<String> {
    Handler::inline(move |_| Ok(text.to_string()))
}

/// Inline handler echoing its variables as `name=value` pairs.
pub fn echo() -> Handler<String> {
    Handler::inline(|params: &PathParams| {
        Ok(params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(","))
    })
}

pub fn run_ok(router: &Router<String>, method: &str, uri: &str) -> String {
    let request = RequestContext::parse(method, uri)
        .unwrap_or_else(|e| panic!("bad request {method} {uri}: {e}"));
    router
        .run(&request)
        .unwrap_or_else(|e| panic!("expected {method} {uri} to route, got {e}"))
}

/// Container knowing a fixed set of components and recording every call.
pub struct RecordingContainer {
    components: Vec<&'static str>,
    pub calls: Mutex<Vec<(ControllerRef, PathParams)>>,
}

impl RecordingContainer {
    pub fn new(components: &[&'static str]) -> Self {
        Self {
            components: components.to_vec(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl Container<String> for RecordingContainer {
    fn has(&self, component: &str) -> bool {
        self.components.contains(&component)
    }

    fn call(&self, target: &ControllerRef, params: &PathParams) -> Result<String> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((target.clone(), params.clone()));
        Ok(format!("{target}"))
    }
}
