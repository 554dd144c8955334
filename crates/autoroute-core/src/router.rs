//! Host router seam.
//!
//! The registrar never matches requests itself. It hands each derived route
//! to a [`HostRouter`] through one of the verb methods. [`MemoryRouter`] is a
//! small in-process implementation used by tests and demos.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::callable::CallableRef;
use crate::dispatch::PathArgs;
use crate::error::{DispatchResult, RouterError, RouterResult};
use crate::verb::HttpVerb;

/// Type-erased dispatch closure.
pub type BoxedTarget<Req, Res, Out> =
    Arc<dyn Fn(Req, Res, PathArgs) -> DispatchResult<Out> + Send + Sync>;

/// Route target handed to a host router.
pub struct RouteTarget<Req, Res, Out> {
    callable: CallableRef,
    handler: BoxedTarget<Req, Res, Out>,
}

impl<Req, Res, Out> RouteTarget<Req, Res, Out> {
    pub fn new(callable: CallableRef, handler: BoxedTarget<Req, Res, Out>) -> Self {
        Self { callable, handler }
    }

    /// The `Controller:entry` reference this target stands for.
    pub fn callable(&self) -> &CallableRef {
        &self.callable
    }

    /// Invokes the target.
    pub fn call(&self, request: Req, response: Res, args: PathArgs) -> DispatchResult<Out> {
        (self.handler)(request, response, args)
    }
}

impl<Req, Res, Out> Clone for RouteTarget<Req, Res, Out> {
    fn clone(&self) -> Self {
        Self {
            callable: self.callable.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<Req, Res, Out> fmt::Debug for RouteTarget<Req, Res, Out> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTarget")
            .field("callable", &self.callable)
            .finish_non_exhaustive()
    }
}

/// Route target type accepted by router `R`.
pub type Target<R> = RouteTarget<
    <R as HostRouter>::Request,
    <R as HostRouter>::Response,
    <R as HostRouter>::Output,
>;

/// Router that accepts registrations per HTTP verb.
pub trait HostRouter: Sized {
    type Request;
    type Response;
    type Output;
    type Error: Error + Send + Sync + 'static;

    fn get(&mut self, template: &str, target: Target<Self>) -> Result<(), Self::Error>;
    fn post(&mut self, template: &str, target: Target<Self>) -> Result<(), Self::Error>;
    fn put(&mut self, template: &str, target: Target<Self>) -> Result<(), Self::Error>;
    fn delete(&mut self, template: &str, target: Target<Self>) -> Result<(), Self::Error>;
    fn options(&mut self, template: &str, target: Target<Self>) -> Result<(), Self::Error>;
    fn patch(&mut self, template: &str, target: Target<Self>) -> Result<(), Self::Error>;

    /// Registers through the method matching `verb`.
    fn route(
        &mut self,
        verb: HttpVerb,
        template: &str,
        target: Target<Self>,
    ) -> Result<(), Self::Error> {
        match verb {
            HttpVerb::Get => self.get(template, target),
            HttpVerb::Post => self.post(template, target),
            HttpVerb::Put => self.put(template, target),
            HttpVerb::Delete => self.delete(template, target),
            HttpVerb::Options => self.options(template, target),
            HttpVerb::Patch => self.patch(template, target),
        }
    }
}

// =============================================================================
// MemoryRouter
// =============================================================================

/// A route held by [`MemoryRouter`].
pub struct MemoryRoute<Req, Res, Out> {
    pub verb: HttpVerb,
    pub template: String,
    pub target: RouteTarget<Req, Res, Out>,
}

impl<Req, Res, Out> fmt::Debug for MemoryRoute<Req, Res, Out> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryRoute")
            .field("verb", &self.verb)
            .field("template", &self.template)
            .field("target", &self.target)
            .finish()
    }
}

/// In-process router keyed by verb and template string.
///
/// Templates are stored as rendered; no request matching is performed.
/// Callers look routes up by their exact template.
pub struct MemoryRouter<Req, Res, Out> {
    routes: Vec<MemoryRoute<Req, Res, Out>>,
}

impl<Req, Res, Out> Default for MemoryRouter<Req, Res, Out> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<Req, Res, Out> MemoryRouter<Req, Res, Out> {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(
        &mut self,
        verb: HttpVerb,
        template: &str,
        target: RouteTarget<Req, Res, Out>,
    ) -> RouterResult<()> {
        if template.is_empty() {
            return Err(RouterError::InvalidTemplate {
                template: template.to_string(),
                reason: "template is empty".to_string(),
            });
        }
        if self.find(verb, template).is_some() {
            return Err(RouterError::Conflict {
                verb,
                template: template.to_string(),
            });
        }
        self.routes.push(MemoryRoute {
            verb,
            template: template.to_string(),
            target,
        });
        Ok(())
    }

    /// Looks up the target registered for `verb` and `template`.
    pub fn find(&self, verb: HttpVerb, template: &str) -> Option<&RouteTarget<Req, Res, Out>> {
        self.routes
            .iter()
            .find(|r| r.verb == verb && r.template == template)
            .map(|r| &r.target)
    }

    /// Dispatches to the target registered for `verb` and `template`.
    pub fn dispatch(
        &self,
        verb: HttpVerb,
        template: &str,
        request: Req,
        response: Res,
        args: PathArgs,
    ) -> RouterResult<Out> {
        let target = self
            .find(verb, template)
            .ok_or_else(|| RouterError::NotFound {
                verb,
                template: template.to_string(),
            })?;
        Ok(target.call(request, response, args)?)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Routes in registration order.
    pub fn routes(&self) -> &[MemoryRoute<Req, Res, Out>] {
        &self.routes
    }
}

impl<Req, Res, Out> HostRouter for MemoryRouter<Req, Res, Out> {
    type Request = Req;
    type Response = Res;
    type Output = Out;
    type Error = RouterError;

    fn get(&mut self, template: &str, target: Target<Self>) -> RouterResult<()> {
        self.insert(HttpVerb::Get, template, target)
    }

    fn post(&mut self, template: &str, target: Target<Self>) -> RouterResult<()> {
        self.insert(HttpVerb::Post, template, target)
    }

    fn put(&mut self, template: &str, target: Target<Self>) -> RouterResult<()> {
        self.insert(HttpVerb::Put, template, target)
    }

    fn delete(&mut self, template: &str, target: Target<Self>) -> RouterResult<()> {
        self.insert(HttpVerb::Delete, template, target)
    }

    fn options(&mut self, template: &str, target: Target<Self>) -> RouterResult<()> {
        self.insert(HttpVerb::Options, template, target)
    }

    fn patch(&mut self, template: &str, target: Target<Self>) -> RouterResult<()> {
        self.insert(HttpVerb::Patch, template, target)
    }
}

impl<Req, Res, Out> fmt::Debug for MemoryRouter<Req, Res, Out> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.routes).finish()
    }
}
