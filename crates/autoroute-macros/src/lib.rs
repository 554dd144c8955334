//! Procedural macros for autoroute.
//!
//! This crate provides:
//!
//! - `#[controller(...)]` - Implements `Controller` for an inherent `impl` block
//!
//! # Controller Attribute
//!
//! ```rust,ignore
//! use autoroute::prelude::*;
//!
//! pub struct UserController;
//!
//! #[controller(request = Request, response = Response, output = Reply)]
//! impl UserController {
//!     // GET /user-user/{id:[0-9]+}
//!     pub fn get_user_action(&self, req: Request, res: Response, id: u64) -> Reply {
//!         Reply::text(format!("user {id}"))
//!     }
//!
//!     // POST /user/{amount:...}[/{note}]
//!     pub fn post_action(&self, req: Request, res: Response, amount: f64, note: Option<String>) -> Reply {
//!         Reply::text("created")
//!     }
//!
//!     // Not a route: no suffix, no verb.
//!     pub fn helper_internal(&self) {}
//! }
//! ```

mod controller;

use proc_macro::TokenStream;
use syn::{ItemImpl, parse_macro_input};

/// Implements `autoroute::core::Controller` for the annotated `impl` block.
///
/// The block is emitted unchanged. Every `pub fn` taking `&self` whose
/// lowerCamelCase name contains the action suffix and an HTTP verb token
/// becomes an action with a generated invoker.
///
/// # Attributes
///
/// | Key | Example | Required | Description |
/// |-----|---------|----------|-------------|
/// | `output` | `Reply` | **Yes** | Action return type; method results are converted with `Into` |
/// | `request` | `HttpRequest` | No | Request handle type (default: `Request`) |
/// | `response` | `HttpResponse` | No | Response handle type (default: `Response`) |
/// | `name` | `"UserController"` | No | Controller name (default: the type name) |
/// | `prefix` | `"api-"` | No | Prepended to the name-derived prefix |
/// | `fixed_prefix` | `"v1/users"` | No | Used verbatim as the prefix |
/// | `suffix` | `"Route"` | No | Action suffix (default: `"Action"`) |
/// | `type_patterns(...)` | `type_patterns(int = "\\d+")` | No | Replaces the type pattern table |
/// | `name_patterns(...)` | `name_patterns(slug = "[a-z-]+")` | No | Replaces the name pattern table |
///
/// # Parameters
///
/// - Parameters whose type is the request or response type are handles.
///   They are passed through and never appear in the path.
/// - `Option<T>` parameters produce optional segments.
/// - Integer primitives declare type `int`, `f32` and `f64` declare
///   `float`, and any other type declares its last path segment.
/// - Path parameter types must implement `FromStr`.
#[proc_macro_attribute]
pub fn controller(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut args = controller::ControllerArgs::default();
    let parser = syn::meta::parser(|meta| args.parse(meta));
    parse_macro_input!(attr with parser);
    let item = parse_macro_input!(item as ItemImpl);

    match controller::expand(args, item) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
