//! src/routes/registry.rs
//!
//! Every route goes through [`RouteMount`], which registers it with actix and
//! records its path and method in a [`RouteRegistry`]. `/_debug/routes` reads
//! the registry instead of poking at the router.
use actix_web::http::Method;
use actix_web::{web, FromRequest, Handler, Responder};
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RouteEntry {
    pub path: String,
    pub methods: Vec<String>,
}

/// Append-only list of mounted routes, shared by all workers.
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    entries: Arc<RwLock<Vec<RouteEntry>>>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Each worker mounts the same routes, so recording is idempotent.
    pub fn record(&self, path: &str, method: &Method) {
        let method = method.as_str().to_lowercase();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        match entries.iter_mut().find(|entry| entry.path == path) {
            Some(entry) => {
                if !entry.methods.contains(&method) {
                    entry.methods.push(method);
                }
            }
            None => entries.push(RouteEntry {
                path: path.to_string(),
                methods: vec![method],
            }),
        }
    }

    pub fn entries(&self) -> Vec<RouteEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// A set of handlers mounted under a common prefix.
pub trait RouteGroup: Send + Sync + 'static {
    fn mount(&self, routes: &mut RouteMount<'_>);
}

pub struct RouteMount<'a> {
    config: &'a mut web::ServiceConfig,
    registry: &'a RouteRegistry,
    prefix: &'a str,
}

impl<'a> RouteMount<'a> {
    pub fn new(
        config: &'a mut web::ServiceConfig,
        registry: &'a RouteRegistry,
        prefix: &'a str,
    ) -> Self {
        Self {
            config,
            registry,
            prefix,
        }
    }

    pub fn route<F, Args>(&mut self, path: &str, method: Method, handler: F) -> &mut Self
    where
        F: Handler<Args>,
        Args: FromRequest + 'static,
        F::Output: Responder + 'static,
    {
        self.registry
            .record(&format!("{}{}", self.prefix, path), &method);
        self.config.route(path, web::method(method).to(handler));
        self
    }

    pub fn get<F, Args>(&mut self, path: &str, handler: F) -> &mut Self
    where
        F: Handler<Args>,
        Args: FromRequest + 'static,
        F::Output: Responder + 'static,
    {
        self.route(path, Method::GET, handler)
    }

    pub fn post<F, Args>(&mut self, path: &str, handler: F) -> &mut Self
    where
        F: Handler<Args>,
        Args: FromRequest + 'static,
        F::Output: Responder + 'static,
    {
        self.route(path, Method::POST, handler)
    }

    pub fn patch<F, Args>(&mut self, path: &str, handler: F) -> &mut Self
    where
        F: Handler<Args>,
        Args: FromRequest + 'static,
        F::Output: Responder + 'static,
    {
        self.route(path, Method::PATCH, handler)
    }

    pub fn delete<F, Args>(&mut self, path: &str, handler: F) -> &mut Self
    where
        F: Handler<Args>,
        Args: FromRequest + 'static,
        F::Output: Responder + 'static,
    {
        self.route(path, Method::DELETE, handler)
    }

    /// Mount `group` in its own scope under `prefix`.
    pub fn group(&mut self, prefix: &str, group: &dyn RouteGroup) -> &mut Self {
        let full_prefix = format!("{}{}", self.prefix, prefix);
        let registry = self.registry;
        self.config.service(web::scope(prefix).configure(|config| {
            group.mount(&mut RouteMount::new(config, registry, &full_prefix));
        }));
        self
    }
}
