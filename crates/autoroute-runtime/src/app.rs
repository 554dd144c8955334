//! Application context.
//!
//! [`RouteApp`] owns a host router together with the registrar and its
//! registry. It applies configured per-controller overrides before
//! registration and refuses to mount the same controller twice.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use autoroute_core::{
    Controller, ControllerDescriptor, HostRouter, HttpVerb, Registrar, RouteRegistry, Trampoline,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{AutorouteConfig, ControllerConfig};
use crate::error::{RuntimeError, RuntimeResult};

/// Counts of mounted controllers and their routes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteStats {
    /// Number of mounted controllers.
    pub controllers: usize,
    /// Number of registered routes.
    pub routes: usize,
    /// Routes per HTTP verb.
    pub by_verb: BTreeMap<HttpVerb, usize>,
}

impl RouteStats {
    fn record(&mut self, verb: HttpVerb) {
        self.routes += 1;
        *self.by_verb.entry(verb).or_default() += 1;
    }

    /// Number of routes registered for `verb`.
    pub fn count(&self, verb: HttpVerb) -> usize {
        self.by_verb.get(&verb).copied().unwrap_or(0)
    }
}

impl fmt::Display for RouteStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Routes: {} total (", self.routes)?;
        for (i, (verb, count)) in self.by_verb.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{verb} {count}")?;
        }
        write!(f, ") across {} controllers", self.controllers)
    }
}

/// Router, registrar and registry of one application.
pub struct RouteApp<R> {
    router: R,
    registrar: Registrar,
    overrides: BTreeMap<String, ControllerConfig>,
    mounted: BTreeSet<String>,
    stats: RouteStats,
}

impl<R: HostRouter> RouteApp<R> {
    /// Creates an app with default configuration.
    pub fn new(router: R) -> Self {
        Self::with_config(router, &AutorouteConfig::default())
    }

    /// Creates an app using the routing settings and controller overrides
    /// of `config`.
    pub fn with_config(router: R, config: &AutorouteConfig) -> Self {
        let registrar = config.routing.template_syntax.apply(Registrar::new());
        Self {
            router,
            registrar,
            overrides: config.controllers.clone(),
            mounted: BTreeSet::new(),
            stats: RouteStats::default(),
        }
    }

    /// Mounts `controller` under its own descriptor.
    pub fn mount<C>(&mut self, controller: C) -> RuntimeResult<Arc<Trampoline<C>>>
    where
        C: Controller,
        R: HostRouter<Request = C::Request, Response = C::Response, Output = C::Output>,
    {
        self.mount_with(Arc::new(controller), C::descriptor())
    }

    /// Mounts `controller` under `descriptor`, after applying any configured
    /// override for its name.
    pub fn mount_with<C>(
        &mut self,
        controller: Arc<C>,
        descriptor: ControllerDescriptor,
    ) -> RuntimeResult<Arc<Trampoline<C>>>
    where
        C: Controller,
        R: HostRouter<Request = C::Request, Response = C::Response, Output = C::Output>,
    {
        let descriptor = match self.overrides.get(&descriptor.name) {
            Some(overrides) => {
                debug!(controller = %descriptor.name, "Applying configured overrides");
                overrides.apply(descriptor)
            }
            None => descriptor,
        };

        let name = descriptor.name.clone();
        if self.mounted.contains(&name) {
            return Err(RuntimeError::AlreadyMounted(name));
        }

        let before = self.registrar.registry().len();
        let result = self
            .registrar
            .register_with(controller, descriptor, &mut self.router);

        // Routes accepted before a failure stay registered, so count them.
        for record in self.registrar.registry().records().iter().skip(before) {
            if record.callable.controller() == name {
                self.stats.record(record.http_method);
            }
        }

        let trampoline = result.map_err(|e| RuntimeError::Router {
            controller: name.clone(),
            source: Box::new(e),
        })?;

        self.stats.controllers += 1;
        self.mounted.insert(name);
        info!(stats = %self.stats, "Controller mounted");

        Ok(trampoline)
    }

    /// Whether a controller named `name` is mounted.
    pub fn is_mounted(&self, name: &str) -> bool {
        self.mounted.contains(name)
    }

    /// Names of mounted controllers, sorted.
    pub fn mounted(&self) -> impl Iterator<Item = &str> {
        self.mounted.iter().map(String::as_str)
    }

    pub fn registry(&self) -> &RouteRegistry {
        self.registrar.registry()
    }

    pub fn registrar(&self) -> &Registrar {
        &self.registrar
    }

    pub fn stats(&self) -> &RouteStats {
        &self.stats
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut R {
        &mut self.router
    }

    /// Releases the router, e.g. to hand it to a server.
    pub fn into_router(self) -> R {
        self.router
    }
}

impl<R> fmt::Debug for RouteApp<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteApp")
            .field("registrar", &self.registrar)
            .field("mounted", &self.mounted)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TemplateSyntaxKind;
    use autoroute_core::{
        Action, ActionMethod, MemoryRouter, ParamSpec, PathArgs, RouterError,
    };

    type Router = MemoryRouter<(), (), String>;

    #[derive(Default)]
    struct OrderController;

    impl Controller for OrderController {
        type Request = ();
        type Response = ();
        type Output = String;

        fn descriptor() -> ControllerDescriptor {
            ControllerDescriptor::new("OrderController")
        }

        fn actions() -> Vec<Action<Self>> {
            vec![
                Action::<Self>::new(
                    ActionMethod::new("getAction").param(ParamSpec::typed("id", "int")),
                    |_, _, _, args| Ok(format!("order {}", args.parse::<u32>(0)?)),
                ),
                Action::<Self>::new(
                    ActionMethod::new("getRecentAction"),
                    |_, _, _, _| Ok("recent".to_string()),
                ),
                Action::<Self>::new(ActionMethod::new("deleteAction"), |_, _, _, _| {
                    Ok("deleted".to_string())
                }),
            ]
        }
    }

    #[test]
    fn test_mount_and_stats() {
        let mut app = RouteApp::new(Router::new());
        app.mount(OrderController).unwrap();

        assert!(app.is_mounted("OrderController"));
        assert_eq!(app.stats().routes, 3);
        assert_eq!(app.stats().count(HttpVerb::Get), 2);
        assert_eq!(app.stats().count(HttpVerb::Delete), 1);
        assert_eq!(app.stats().count(HttpVerb::Patch), 0);
        assert_eq!(
            app.stats().to_string(),
            "Routes: 3 total (GET 2, DELETE 1) across 1 controllers"
        );
        assert_eq!(app.registry().len(), 3);
    }

    #[test]
    fn test_refuses_double_mount() {
        let mut app = RouteApp::new(Router::new());
        app.mount(OrderController).unwrap();

        let err = app.mount(OrderController).unwrap_err();
        assert!(matches!(err, RuntimeError::AlreadyMounted(ref name) if name == "OrderController"));
        assert_eq!(app.registry().len(), 3);
        assert_eq!(app.router().len(), 3);
    }

    #[test]
    fn test_router_error_is_wrapped() {
        let mut router = Router::new();
        router
            .get(
                "/order/{id:[0-9]+}",
                autoroute_core::RouteTarget::new(
                    autoroute_core::CallableRef::for_target("Other", "getAction"),
                    Arc::new(|_: (), _: (), _: PathArgs| Ok(String::new())),
                ),
            )
            .unwrap();

        let mut app = RouteApp::new(router);
        let err = app.mount(OrderController).unwrap_err();
        assert!(matches!(
            err.router_error::<RouterError>(),
            Some(RouterError::Conflict { .. })
        ));
        assert!(!app.is_mounted("OrderController"));
    }

    #[test]
    fn test_config_overrides_and_syntax() {
        let mut config = AutorouteConfig::default();
        config.routing.template_syntax = TemplateSyntaxKind::Regex;
        config.controllers.insert(
            "OrderController".to_string(),
            ControllerConfig {
                fixed_prefix: Some("shop/orders".to_string()),
                ..ControllerConfig::default()
            },
        );

        let mut app = RouteApp::with_config(Router::new(), &config);
        app.mount(OrderController).unwrap();

        let paths: Vec<_> = app.registry().records().into_iter().map(|r| r.path).collect();
        assert_eq!(
            paths,
            [
                "^/shop/orders/(?P<id>[0-9]+)$",
                "^/shop/orders-recent$",
                "^/shop/orders$",
            ]
        );
    }

    #[test]
    fn test_into_router_dispatch() {
        let mut app = RouteApp::new(Router::new());
        app.mount(OrderController).unwrap();
        let router = app.into_router();

        let out = router
            .dispatch(
                HttpVerb::Get,
                "/order/{id:[0-9]+}",
                (),
                (),
                PathArgs::new().with("id", "12"),
            )
            .unwrap();
        assert_eq!(out, "order 12");
    }
}
