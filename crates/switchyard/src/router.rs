//! Main router implementation.

use std::sync::{Arc, OnceLock};

use switchyard_match::{
    CompiledRoutes, Lookup, MatchEngine, Method, PathParams, RegexEngine, RouteDef,
};
use tracing::{debug, warn};

use crate::config::RouterConfig;
use crate::container::Container;
use crate::dispatch::Dispatcher;
use crate::error::{Result, RouterError};
use crate::fallback::{ErrorHandlers, METHOD_NOT_ALLOWED, NOT_FOUND};
use crate::group::{GroupScope, PrefixStack};
use crate::handler::Handler;
use crate::normalize::compose;
use crate::request::RequestContext;
use crate::route::{Route, ANY_METHODS};

/// Maps requests to handlers.
///
/// A router goes through two phases. Registration takes `&mut self`:
/// routes, groups, error handlers and the container are set up. Running
/// takes `&self`, so a fully registered router can be shared between
/// threads and resolve many requests.
pub struct Router<T> {
    config: RouterConfig,
    routes: Vec<Route<T>>,
    pub(crate) prefix: PrefixStack,
    errors: ErrorHandlers<T>,
    container: Option<Arc<dyn Container<T>>>,
    engine: Arc<dyn MatchEngine>,
    /// Table compiled from `routes`; cleared by every registration.
    compiled: OnceLock<Box<dyn CompiledRoutes>>,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Router<T> {
    /// Creates a new empty router with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    /// Creates a new empty router.
    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            config,
            routes: Vec::new(),
            prefix: PrefixStack::default(),
            errors: ErrorHandlers::default(),
            container: None,
            engine: Arc::new(RegexEngine),
            compiled: OnceLock::new(),
        }
    }

    /// Replaces the matching engine.
    #[must_use]
    pub fn with_engine(mut self, engine: impl MatchEngine + 'static) -> Self {
        self.engine = Arc::new(engine);
        self.invalidate();
        self
    }

    /// Sets the container used to resolve controller handlers.
    #[must_use]
    pub fn with_container(mut self, container: impl Container<T> + 'static) -> Self {
        self.container = Some(Arc::new(container));
        self
    }

    /// Sets or clears the container used to resolve controller handlers.
    pub fn set_container(&mut self, container: Option<Arc<dyn Container<T>>>) -> &mut Self {
        self.container = container;
        self
    }

    /// The configured container.
    pub fn container(&self) -> Option<&Arc<dyn Container<T>>> {
        self.container.as_ref()
    }

    /// The router configuration.
    pub const fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Registered routes in registration order.
    pub fn routes(&self) -> &[Route<T>] {
        &self.routes
    }

    /// The prefix applied to routes registered right now.
    pub fn prefix(&self) -> &str {
        self.prefix.current()
    }

    /// Registers routes under a shared prefix.
    ///
    /// `fragment` is lower-cased and stripped of one leading and one
    /// trailing slash before being appended to the current prefix. Whatever
    /// `callback` returns is returned from `group`, and the prefix is
    /// restored afterwards even if the callback panics.
    ///
    /// ```
    /// use switchyard::{Handler, Router};
    ///
    /// let mut router: Router<&'static str> = Router::new();
    /// router.group("api", |api| {
    ///     api.group("/v1/", |v1| {
    ///         v1.get("users", Handler::inline(|_| Ok("users")));
    ///     });
    /// });
    ///
    /// assert_eq!(router.routes()[0].pattern(), "/api/v1/users[/]");
    /// assert_eq!(router.prefix(), "/");
    /// ```
    pub fn group<F, R>(&mut self, fragment: &str, callback: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        let mut scope = GroupScope::enter(self, fragment);
        callback(&mut *scope)
    }

    /// Adds a GET route.
    pub fn get(&mut self, path: &str, handler: impl Into<Handler<T>>) -> &mut Self {
        self.add_route(vec![Method::Get], path, handler.into())
    }

    /// Adds a POST route.
    pub fn post(&mut self, path: &str, handler: impl Into<Handler<T>>) -> &mut Self {
        self.add_route(vec![Method::Post], path, handler.into())
    }

    /// Adds a PUT route.
    pub fn put(&mut self, path: &str, handler: impl Into<Handler<T>>) -> &mut Self {
        self.add_route(vec![Method::Put], path, handler.into())
    }

    /// Adds a PATCH route.
    pub fn patch(&mut self, path: &str, handler: impl Into<Handler<T>>) -> &mut Self {
        self.add_route(vec![Method::Patch], path, handler.into())
    }

    /// Adds a DELETE route.
    pub fn delete(&mut self, path: &str, handler: impl Into<Handler<T>>) -> &mut Self {
        self.add_route(vec![Method::Delete], path, handler.into())
    }

    /// Adds a HEAD route.
    pub fn head(&mut self, path: &str, handler: impl Into<Handler<T>>) -> &mut Self {
        self.add_route(vec![Method::Head], path, handler.into())
    }

    /// Adds an OPTIONS route.
    pub fn options(&mut self, path: &str, handler: impl Into<Handler<T>>) -> &mut Self {
        self.add_route(vec![Method::Options], path, handler.into())
    }

    /// Adds one route answering GET, POST, PUT and DELETE.
    pub fn any(&mut self, path: &str, handler: impl Into<Handler<T>>) -> &mut Self {
        self.add_route(ANY_METHODS.to_vec(), path, handler.into())
    }

    /// Adds one route answering every method in `methods`.
    ///
    /// Fails with [`RouterError::InvalidArgument`] when `methods` is empty.
    pub fn route(
        &mut self,
        methods: &[Method],
        path: &str,
        handler: impl Into<Handler<T>>,
    ) -> Result<&mut Self> {
        let mut set = Vec::with_capacity(methods.len());
        for m in methods {
            if !set.contains(m) {
                set.push(*m);
            }
        }
        if set.is_empty() {
            return Err(RouterError::InvalidArgument(format!(
                "route {path:?} needs at least one method"
            )));
        }
        Ok(self.add_route(set, path, handler.into()))
    }

    /// Sets the handler run when no route matches (404) or when the path
    /// matches under other methods only (405).
    ///
    /// Any other code fails with [`RouterError::InvalidArgument`].
    pub fn set_error(&mut self, code: u16, handler: impl Into<Handler<T>>) -> Result<&mut Self> {
        self.errors.set(code, handler.into())?;
        debug!(code, "Registered error handler");
        Ok(self)
    }

    fn add_route(&mut self, methods: Vec<Method>, fragment: &str, handler: Handler<T>) -> &mut Self {
        let pattern = compose(self.prefix.current(), fragment, self.config.trailing_slash);
        debug!(methods = ?methods, pattern = %pattern, "Registered route");
        self.routes.push(Route::new(methods, pattern, handler));
        self.invalidate();
        self
    }

    fn invalidate(&mut self) {
        self.compiled.take();
    }

    /// Compiles the route table now, surfacing pattern errors before the
    /// first request. The result is cached unless caching is disabled.
    pub fn compile(&self) -> Result<()> {
        self.with_table(|_| ())
    }

    fn with_table<R>(&self, f: impl FnOnce(&dyn CompiledRoutes) -> R) -> Result<R> {
        if let Some(table) = self.compiled.get() {
            return Ok(f(table.as_ref()));
        }

        let defs: Vec<RouteDef<'_>> = self.routes.iter().map(Route::def).collect();
        let table = self.engine.compile(&defs)?;

        if self.config.cache_routes {
            Ok(f(self.compiled.get_or_init(|| table).as_ref()))
        } else {
            Ok(f(table.as_ref()))
        }
    }

    /// Resolves `request` and runs the handler it reaches.
    ///
    /// A match runs the route's handler with the extracted variables.
    /// Otherwise the 404 or 405 handler runs with no variables; without one
    /// the run fails with [`RouterError::RouteNotFound`] or
    /// [`RouterError::MethodNotAllowed`]. Handler errors propagate as is.
    ///
    /// ```
    /// use switchyard::{Handler, RequestContext, Router};
    ///
    /// let mut router = Router::new();
    /// router.get("/users/:id", Handler::inline(|params| {
    ///     Ok(format!("user {}", params.get("id").unwrap_or_default()))
    /// }));
    ///
    /// let out = router.run(&RequestContext::get("/users/42/")).unwrap();
    /// assert_eq!(out, "user 42");
    /// ```
    pub fn run(&self, request: &RequestContext) -> Result<T> {
        let lookup = self.with_table(|table| table.lookup(request.method, &request.path))?;
        debug!(method = %request.method, path = %request.path, outcome = ?lookup, "Resolved request");

        match lookup {
            Lookup::Found { route, params } => {
                let route = self.routes.get(route).ok_or_else(|| {
                    RouterError::Configuration(format!(
                        "matching engine returned route {route} of {}",
                        self.routes.len()
                    ))
                })?;
                self.dispatch(route.handler(), &params)
            }
            Lookup::NotFound => self.fallback(NOT_FOUND, || RouterError::RouteNotFound {
                method: request.method,
                path: request.path.clone(),
            }),
            Lookup::MethodNotAllowed { allowed } => {
                self.fallback(METHOD_NOT_ALLOWED, || RouterError::MethodNotAllowed {
                    method: request.method,
                    path: request.path.clone(),
                    allowed,
                })
            }
        }
    }

    fn fallback(&self, code: u16, unhandled: impl FnOnce() -> RouterError) -> Result<T> {
        match self.errors.get(code) {
            Some(handler) => self.dispatch(handler, &PathParams::new()),
            None => {
                let err = unhandled();
                warn!(code, error = %err, "No error handler registered");
                Err(err)
            }
        }
    }

    /// Invokes `handler` with `params`, resolving controller handlers
    /// through the configured container.
    pub fn dispatch(&self, handler: &Handler<T>, params: &PathParams) -> Result<T> {
        Dispatcher::new(self.container.as_deref()).dispatch(handler, params)
    }
}

impl<T> std::fmt::Debug for Router<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.config)
            .field("routes", &self.routes)
            .field("prefix", &self.prefix)
            .field("errors", &self.errors)
            .field("container", &self.container.is_some())
            .finish_non_exhaustive()
    }
}
