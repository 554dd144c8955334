//! Route registration.
//!
//! # Data Flow
//! ```text
//! Controller::descriptor() ─→ resolve_prefix
//! Controller::actions()    ─→ for each action, in declaration order:
//!     classify_action ── None ──→ skipped (trace)
//!         │ Some(verb)
//!         ▼
//!     build_template + TemplateSyntax::render
//!         ▼
//!     Trampoline::insert ─→ slot
//!         ▼
//!     HostRouter::route(verb, path, RouteTarget) ─→ GeneratedRouteRecord
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, trace};

use crate::callable::CallableRef;
use crate::controller::Controller;
use crate::descriptor::{ActionMethod, ControllerDescriptor};
use crate::dispatch::Trampoline;
use crate::path::{BracketSyntax, TemplateSyntax, build_template};
use crate::prefix::resolve_prefix;
use crate::registry::{GeneratedRouteRecord, RouteRegistry};
use crate::router::HostRouter;
use crate::verb::{HttpVerb, classify_action};

/// A route derived from one method, before it is handed to a router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedRoute {
    pub verb: HttpVerb,
    pub path: String,
    pub method_name: String,
}

/// Derives the route of `method`, or `None` when it is not a route method.
pub fn derive_route(
    method: &ActionMethod,
    descriptor: &ControllerDescriptor,
    prefix: &str,
    syntax: &dyn TemplateSyntax,
) -> Option<DerivedRoute> {
    let options = &descriptor.options;
    let verb = classify_action(&method.name, &options.action_suffix)?;
    Some(DerivedRoute {
        verb,
        path: build_template(method, prefix, options).render(syntax),
        method_name: method.name.clone(),
    })
}

/// Derives every route of `methods` without registering anything.
pub fn derive_routes<'a>(
    descriptor: &ControllerDescriptor,
    methods: impl IntoIterator<Item = &'a ActionMethod>,
    syntax: &dyn TemplateSyntax,
) -> Vec<DerivedRoute> {
    let prefix = resolve_prefix(descriptor);
    methods
        .into_iter()
        .filter_map(|method| derive_route(method, descriptor, &prefix, syntax))
        .collect()
}

/// Registers controller actions with a host router.
#[derive(Clone)]
pub struct Registrar {
    registry: RouteRegistry,
    syntax: Arc<dyn TemplateSyntax>,
}

impl Default for Registrar {
    fn default() -> Self {
        Self::new()
    }
}

impl Registrar {
    /// Creates a registrar with an empty registry and [`BracketSyntax`].
    pub fn new() -> Self {
        Self::with_registry(RouteRegistry::new())
    }

    /// Creates a registrar that records into `registry`.
    pub fn with_registry(registry: RouteRegistry) -> Self {
        Self {
            registry,
            syntax: Arc::new(BracketSyntax),
        }
    }

    /// Replaces the template syntax.
    pub fn with_syntax(mut self, syntax: impl TemplateSyntax + 'static) -> Self {
        self.syntax = Arc::new(syntax);
        self
    }

    pub fn syntax(&self) -> &dyn TemplateSyntax {
        &*self.syntax
    }

    pub fn registry(&self) -> &RouteRegistry {
        &self.registry
    }

    /// Registers every route method of `controller` using its own descriptor.
    pub fn register<C, R>(
        &self,
        controller: C,
        router: &mut R,
    ) -> Result<Arc<Trampoline<C>>, R::Error>
    where
        C: Controller,
        R: HostRouter<Request = C::Request, Response = C::Response, Output = C::Output>,
    {
        self.register_with(Arc::new(controller), C::descriptor(), router)
    }

    /// Registers every route method of `controller` under `descriptor`.
    ///
    /// Methods are registered in declaration order. A router failure stops
    /// registration and is returned unchanged; routes registered before it
    /// stay registered and recorded.
    pub fn register_with<C, R>(
        &self,
        controller: Arc<C>,
        descriptor: ControllerDescriptor,
        router: &mut R,
    ) -> Result<Arc<Trampoline<C>>, R::Error>
    where
        C: Controller,
        R: HostRouter<Request = C::Request, Response = C::Response, Output = C::Output>,
    {
        let prefix = resolve_prefix(&descriptor);
        let mut trampoline = Trampoline::new(controller, descriptor.name.as_str());
        let mut pending = Vec::new();

        for action in C::actions() {
            match derive_route(&action.method, &descriptor, &prefix, &*self.syntax) {
                Some(route) => {
                    let slot = trampoline.insert(action);
                    pending.push((slot, route));
                }
                None => {
                    trace!(
                        controller = %descriptor.name,
                        method = %action.method.name,
                        "Skipping non-route method"
                    );
                }
            }
        }

        let trampoline = Arc::new(trampoline);
        let count = pending.len();

        for (slot, route) in pending {
            let callable = CallableRef::for_target(descriptor.name.as_str(), &route.method_name);
            router.route(
                route.verb,
                &route.path,
                trampoline.route_target(slot, callable.clone()),
            )?;

            debug!(
                verb = %route.verb,
                path = %route.path,
                callable = %callable,
                "Registered route"
            );

            self.registry.append(GeneratedRouteRecord {
                path: route.path,
                callable,
                method_name: route.method_name,
                http_method: route.verb,
            });
        }

        info!(
            controller = %descriptor.name,
            prefix = %prefix,
            syntax = self.syntax.name(),
            routes = count,
            "Registered controller"
        );

        Ok(trampoline)
    }
}

impl fmt::Debug for Registrar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registrar")
            .field("registry", &self.registry)
            .field("syntax", &self.syntax.name())
            .finish()
    }
}
