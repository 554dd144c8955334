//! Request-time dispatch.
//!
//! The host router calls a [`RouteTarget`](crate::router::RouteTarget) with
//! both handles and the path values it matched. The target forwards to the
//! controller's [`Trampoline`], which binds the values to the action's
//! declared parameters and calls the typed invoker.
//!
//! # Binding
//!
//! Values supplied by name are matched to parameters by name, so the order
//! in which a router reports named matches is irrelevant. Values supplied
//! without a name fill the remaining parameters in declaration order.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug_span, trace, warn};

use crate::callable::{CallableRef, decode_entry};
use crate::controller::{Action, Controller};
use crate::descriptor::ActionMethod;
use crate::error::{DispatchError, DispatchResult};
use crate::router::RouteTarget;

// =============================================================================
// PathArgs
// =============================================================================

/// Path values matched by the host router.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathArgs {
    named: Vec<(String, String)>,
    positional: Vec<String>,
}

impl PathArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named value (builder pattern).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds an unnamed value (builder pattern).
    pub fn with_positional(mut self, value: impl Into<String>) -> Self {
        self.push(value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.named.push((name.into(), value.into()));
    }

    pub fn push(&mut self, value: impl Into<String>) {
        self.positional.push(value.into());
    }

    /// First value supplied under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.named
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.named.len() + self.positional.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PathArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Self::new();
        for (name, value) in iter {
            args.insert(name, value);
        }
        args
    }
}

// =============================================================================
// BoundArgs
// =============================================================================

/// Path values bound to an action's path parameters, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundArgs {
    slots: Vec<(String, Option<String>)>,
}

impl BoundArgs {
    /// Binds `args` to the path parameters of `method`.
    ///
    /// Named values that match no parameter and surplus positional values
    /// are ignored.
    pub fn bind(method: &ActionMethod, args: PathArgs) -> Self {
        let PathArgs {
            mut named,
            positional,
        } = args;
        let mut positional = positional.into_iter();

        let slots = method
            .path_params()
            .map(|param| {
                let value = match named.iter().position(|(n, _)| *n == param.name) {
                    Some(at) => Some(named.remove(at).1),
                    None => positional.next(),
                };
                (param.name.clone(), value)
            })
            .collect();

        for (name, _) in &named {
            trace!(method = %method.name, param = %name, "Ignoring unknown path value");
        }
        let extra = positional.count();
        if extra > 0 {
            trace!(method = %method.name, extra, "Ignoring surplus positional values");
        }

        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Name of the parameter at `index`.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.slots.get(index).map(|(name, _)| name.as_str())
    }

    /// Raw value at `index`.
    pub fn raw(&self, index: usize) -> Option<&str> {
        self.slots.get(index).and_then(|(_, value)| value.as_deref())
    }

    /// Converts the required value at `index`.
    pub fn parse<T>(&self, index: usize) -> DispatchResult<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        match self.slots.get(index) {
            Some((name, Some(value))) => convert(name, value),
            Some((name, None)) => Err(DispatchError::MissingArgument { name: name.clone() }),
            None => Err(DispatchError::MissingArgument {
                name: format!("#{index}"),
            }),
        }
    }

    /// Converts the optional value at `index`. Absent and empty values are
    /// both `None`.
    pub fn parse_optional<T>(&self, index: usize) -> DispatchResult<Option<T>>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        match self.slots.get(index) {
            Some((name, Some(value))) if !value.is_empty() => convert(name, value).map(Some),
            _ => Ok(None),
        }
    }
}

fn convert<T>(name: &str, value: &str) -> DispatchResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.parse().map_err(|e: T::Err| DispatchError::InvalidArgument {
        name: name.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

// =============================================================================
// Trampoline
// =============================================================================

struct TrampolineEntry<C: Controller> {
    method: ActionMethod,
    invoke: crate::controller::Invoker<C>,
}

/// Single dispatch entry point for every routed action of one controller.
///
/// Built once at registration time. Route targets hold a pre-resolved slot;
/// [`Trampoline::call`] resolves an encoded entry point name instead.
pub struct Trampoline<C: Controller> {
    controller: Arc<C>,
    name: String,
    entries: Vec<TrampolineEntry<C>>,
    by_target: HashMap<String, usize>,
}

impl<C: Controller> Trampoline<C> {
    /// Creates an empty trampoline for `controller`, named `name`.
    pub fn new(controller: Arc<C>, name: impl Into<String>) -> Self {
        Self {
            controller,
            name: name.into(),
            entries: Vec::new(),
            by_target: HashMap::new(),
        }
    }

    /// Adds an action and returns its slot.
    pub fn insert(&mut self, action: Action<C>) -> usize {
        let index = self.entries.len();
        self.by_target.insert(action.method.name.clone(), index);
        self.entries.push(TrampolineEntry {
            method: action.method,
            invoke: action.invoke,
        });
        index
    }

    /// Controller name used in diagnostics.
    pub fn controller_name(&self) -> &str {
        &self.name
    }

    pub fn controller(&self) -> &Arc<C> {
        &self.controller
    }

    /// Names of the reachable target methods, in insertion order.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.method.name.as_str())
    }

    pub fn contains(&self, target: &str) -> bool {
        self.by_target.contains_key(target)
    }

    /// Dispatches through an encoded entry point name such as
    /// `callRouteMethodGetUserAction`.
    pub fn call(
        &self,
        entry: &str,
        request: C::Request,
        response: C::Response,
        args: PathArgs,
    ) -> DispatchResult<C::Output> {
        let index = decode_entry(entry)
            .and_then(|target| self.by_target.get(&target).copied())
            .ok_or_else(|| {
                warn!(controller = %self.name, entry = %entry, "Unresolvable dispatch target");
                DispatchError::unresolvable(entry, &self.name)
            })?;
        self.call_slot(index, request, response, args)
    }

    /// Dispatches to a target method by its plain name.
    pub fn call_target(
        &self,
        target: &str,
        request: C::Request,
        response: C::Response,
        args: PathArgs,
    ) -> DispatchResult<C::Output> {
        let index = self
            .by_target
            .get(target)
            .copied()
            .ok_or_else(|| {
                warn!(controller = %self.name, target = %target, "Unresolvable dispatch target");
                DispatchError::unresolvable(target, &self.name)
            })?;
        self.call_slot(index, request, response, args)
    }

    fn call_slot(
        &self,
        index: usize,
        request: C::Request,
        response: C::Response,
        args: PathArgs,
    ) -> DispatchResult<C::Output> {
        let entry = self.entries.get(index).ok_or_else(|| {
            warn!(controller = %self.name, slot = index, "Dispatch slot out of range");
            DispatchError::unresolvable(format!("slot {index}"), &self.name)
        })?;
        let _span = debug_span!("dispatch", controller = %self.name, target = %entry.method.name)
            .entered();

        let bound = BoundArgs::bind(&entry.method, args);
        (entry.invoke)(&self.controller, request, response, bound)
    }

    /// Route target bound to the action in `slot`.
    pub fn route_target(
        self: &Arc<Self>,
        slot: usize,
        callable: CallableRef,
    ) -> RouteTarget<C::Request, C::Response, C::Output> {
        let trampoline = Arc::clone(self);
        RouteTarget::new(
            callable,
            Arc::new(move |request: C::Request, response: C::Response, args: PathArgs| {
                trampoline.call_slot(slot, request, response, args)
            }),
        )
    }
}

impl<C: Controller> fmt::Debug for Trampoline<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trampoline")
            .field("controller", &self.name)
            .field("targets", &self.targets().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ControllerDescriptor, ParamSpec};

    fn method() -> ActionMethod {
        ActionMethod::new("postAction")
            .param(ParamSpec::request("req"))
            .param(ParamSpec::typed("amount", "float"))
            .param(ParamSpec::response("res"))
            .param(ParamSpec::typed("note", "String").optional())
    }

    #[test]
    fn test_bind_by_name_ignores_router_order() {
        let args = PathArgs::new().with("note", "lunch").with("amount", "12.5");
        let bound = BoundArgs::bind(&method(), args);

        assert_eq!(bound.name(0), Some("amount"));
        assert_eq!(bound.raw(0), Some("12.5"));
        assert_eq!(bound.raw(1), Some("lunch"));
    }

    #[test]
    fn test_bind_positional_in_declaration_order() {
        let args = PathArgs::new().with_positional("3").with_positional("memo");
        let bound = BoundArgs::bind(&method(), args);

        assert_eq!(bound.parse::<f64>(0), Ok(3.0));
        assert_eq!(bound.parse_optional::<String>(1), Ok(Some("memo".to_string())));
    }

    #[test]
    fn test_missing_and_invalid_values() {
        let bound = BoundArgs::bind(&method(), PathArgs::new());
        assert_eq!(
            bound.parse::<f64>(0),
            Err(DispatchError::MissingArgument {
                name: "amount".to_string()
            })
        );
        assert_eq!(bound.parse_optional::<String>(1), Ok(None));

        let bound = BoundArgs::bind(&method(), PathArgs::new().with("amount", "abc"));
        assert!(matches!(
            bound.parse::<f64>(0),
            Err(DispatchError::InvalidArgument { ref name, ref value, .. })
                if name == "amount" && value == "abc"
        ));
    }

    #[test]
    fn test_empty_optional_is_none() {
        let bound = BoundArgs::bind(
            &method(),
            PathArgs::new().with("amount", "1").with("note", ""),
        );
        assert_eq!(bound.parse_optional::<String>(1), Ok(None));
    }

    #[test]
    fn test_unknown_names_ignored() {
        let args: PathArgs = [("amount", "2"), ("extra", "x")].into_iter().collect();
        let bound = BoundArgs::bind(&method(), args);
        assert_eq!(bound.len(), 2);
        assert_eq!(bound.raw(1), None);
    }

    // A controller whose actions echo what they receive.
    struct Echo;

    impl Controller for Echo {
        type Request = &'static str;
        type Response = &'static str;
        type Output = String;

        fn descriptor() -> ControllerDescriptor {
            ControllerDescriptor::new("EchoController")
        }

        fn actions() -> Vec<Action<Self>> {
            vec![Action::<Self>::new(method(), |_, req, res, args| {
                let amount: f64 = args.parse(0)?;
                let note: Option<String> = args.parse_optional(1)?;
                Ok(format!("{req}|{res}|{amount}|{note:?}"))
            })]
        }
    }

    fn trampoline() -> Arc<Trampoline<Echo>> {
        let mut trampoline = Trampoline::new(Arc::new(Echo), "EchoController");
        for action in Echo::actions() {
            trampoline.insert(action);
        }
        Arc::new(trampoline)
    }

    #[test]
    fn test_call_through_encoded_entry() {
        let trampoline = trampoline();
        let out = trampoline
            .call(
                "callRouteMethodPostAction",
                "req",
                "res",
                PathArgs::new().with("note", "n").with("amount", "1.5"),
            )
            .unwrap();
        assert_eq!(out, "req|res|1.5|Some(\"n\")");
    }

    #[test]
    fn test_unresolvable_entry() {
        let trampoline = trampoline();
        for entry in ["callRouteMethodGetAction", "postAction", "callRouteMethod"] {
            let err = trampoline
                .call(entry, "req", "res", PathArgs::new())
                .unwrap_err();
            assert_eq!(err, DispatchError::unresolvable(entry, "EchoController"));
        }
    }

    #[test]
    fn test_route_target_uses_slot() {
        let trampoline = trampoline();
        let target = trampoline.route_target(0, CallableRef::for_target("EchoController", "postAction"));

        assert_eq!(target.callable().entry(), "callRouteMethodPostAction");
        let out = target
            .call("a", "b", PathArgs::new().with("amount", "2"))
            .unwrap();
        assert_eq!(out, "a|b|2|None");
    }

    #[test]
    fn test_call_target_by_name() {
        let trampoline = trampoline();
        assert!(trampoline.contains("postAction"));
        assert_eq!(trampoline.targets().collect::<Vec<_>>(), ["postAction"]);
        assert_eq!(
            trampoline
                .call_target("getAction", "a", "b", PathArgs::new())
                .unwrap_err(),
            DispatchError::unresolvable("getAction", "EchoController")
        );
    }

    #[test]
    fn test_route_target_with_stale_slot() {
        let trampoline = trampoline();
        let target = trampoline.route_target(5, CallableRef::for_target("EchoController", "postAction"));

        let err = target
            .call("a", "b", PathArgs::new().with("amount", "2"))
            .unwrap_err();
        assert_eq!(err, DispatchError::unresolvable("slot 5", "EchoController"));
    }
}
