//! # Autoroute
//!
//! Derive HTTP routes from controller method naming conventions.
//!
//! ## Overview
//!
//! A controller's public methods are scanned once at startup. Methods whose
//! names contain the action suffix and an HTTP verb token become routes:
//!
//! | Method | Route |
//! |--------|-------|
//! | `get_user_action(&self, req, res, id: u64)` | `GET /user-user/{id:[0-9]+}` |
//! | `post_action(&self, req, res, amount: f64, note: Option<String>)` | `POST /user/{amount:...}[/{note}]` |
//! | `helper_internal(&self)` | *(not routed)* |
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌───────────┐     ┌────────────┐
//! │ #[controller]│────▶│ Registrar │────▶│ HostRouter │──▶ Trampoline ──▶ method
//! │  impl block  │     │           │     └────────────┘
//! └──────────────┘     └─────┬─────┘
//!                            ▼
//!                      RouteRegistry
//! ```
//!
//! - **core**: the derivation engine, the `Controller` and `HostRouter` traits
//! - **runtime**: configuration, logging and the `RouteApp` context
//! - **macros**: the `#[controller]` attribute
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use autoroute::prelude::*;
//!
//! pub struct Request;
//! pub struct Response;
//!
//! pub struct UserController;
//!
//! #[controller(output = String)]
//! impl UserController {
//!     pub fn get_user_action(&self, _req: Request, _res: Response, id: u64) -> String {
//!         format!("user {id}")
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut app = RouteApp::new(MemoryRouter::new());
//!     app.mount(UserController)?;
//!     println!("{}", app.registry().to_json()?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `toml-config`: TOML configuration files (default)
//! - `yaml-config`: YAML configuration files
//! - `json-log`: JSON log output

pub use autoroute_core as core;
pub use autoroute_runtime as runtime;

pub use autoroute_macros::controller;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use autoroute::prelude::*;
/// ```
pub mod prelude {
    // Controller definition
    pub use autoroute_core::{Action, ActionMethod, Controller, ControllerDescriptor, ParamSpec};
    pub use autoroute_macros::controller;

    // Registration and dispatch
    pub use autoroute_core::{
        DispatchError, HostRouter, HttpVerb, MemoryRouter, PathArgs, Registrar, RouteRegistry,
        RouteTarget, Target,
    };

    // Application context
    pub use autoroute_runtime::{ConfigLoader, RouteApp, RuntimeError};
}
