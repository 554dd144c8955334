//! # Autoroute Core
//!
//! The convention-to-route derivation engine.
//!
//! Controllers declare public methods whose names follow a convention
//! (`getUserAction`, `postAction`, ...). At startup the [`Registrar`] turns
//! each eligible method into one route on a [`HostRouter`], dispatched
//! through a per-controller [`Trampoline`].
//!
//! ## Building Blocks
//!
//! - **Slugifier**: camelCase to hyphenated lowercase ([`slugify`])
//! - **Verb Classifier**: HTTP verb from a method name ([`classify_action`], [`HttpVerb`])
//! - **Pattern Resolver**: parameter validation regexes ([`PatternTable`])
//! - **Prefix Resolver**: controller URL prefix ([`resolve_prefix`])
//! - **Path Builder**: route templates and their syntaxes ([`build_template`], [`TemplateSyntax`])
//! - **Registrar**: registration plus the [`RouteRegistry`] of generated routes
//! - **Trampoline**: request-time argument binding and invocation
//!
//! ## Registration Flow
//!
//! ```text
//! ┌────────────┐     ┌───────────┐     ┌────────────┐
//! │ Controller │────▶│ Registrar │────▶│ HostRouter │
//! │ (actions)  │     │           │──┐  └─────┬──────┘
//! └────────────┘     └───────────┘  │        │ request
//!                                   ▼        ▼
//!                          ┌──────────┐  ┌────────────┐
//!                          │ Registry │  │ Trampoline │──▶ method
//!                          └──────────┘  └────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use autoroute_core::{MemoryRouter, Registrar};
//!
//! let registrar = Registrar::new();
//! let mut router = MemoryRouter::new();
//! registrar.register(UserController::default(), &mut router)?;
//!
//! for record in registrar.registry().records() {
//!     println!("{} {} -> {}", record.http_method, record.path, record.callable);
//! }
//! ```

pub mod callable;
pub mod controller;
pub mod descriptor;
pub mod dispatch;
pub mod error;
pub mod path;
pub mod pattern;
pub mod prefix;
pub mod registrar;
pub mod registry;
pub mod router;
pub mod slug;
pub mod verb;

pub use callable::{CALL_FUNCTION_PREFIX, CallableRef, ParseCallableError, decode_entry, encode_entry};
pub use controller::{Action, Controller, Invoker};
pub use descriptor::{ActionMethod, ControllerDescriptor, ControllerOptions, ParamSpec, ParamType};
pub use dispatch::{BoundArgs, PathArgs, Trampoline};
pub use error::{DispatchError, DispatchResult, RouterError, RouterResult};
pub use path::{
    BracketSyntax, PathParam, RegexSyntax, RouteTemplate, TemplateSyntax, action_label,
    build_path, build_template,
};
pub use pattern::{FLOAT_PATTERN, FLOAT_TYPE, INT_PATTERN, INT_TYPE, PatternTable};
pub use prefix::{CONTROLLER_TOKEN, resolve_prefix};
pub use registrar::{DerivedRoute, Registrar, derive_route, derive_routes};
pub use registry::{GeneratedRouteRecord, RouteRegistry};
pub use router::{BoxedTarget, HostRouter, MemoryRoute, MemoryRouter, RouteTarget, Target};
pub use slug::{DEFAULT_SEPARATOR, lower_camel_case, slugify, slugify_with};
pub use verb::{
    DEFAULT_ACTION_SUFFIX, HttpVerb, UnknownVerb, classify, classify_action, contains_ignore_case,
    is_route_method, remove_ignore_case,
};
