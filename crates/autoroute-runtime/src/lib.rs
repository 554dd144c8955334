//! Autoroute Runtime - configuration, logging and the application context.
//!
//! This crate provides:
//! - Layered configuration loading (`ConfigLoader`, `AutorouteConfig`)
//! - Logging setup (`LoggingBuilder`, `init_from_config`)
//! - The `RouteApp` context owning a host router and its route registry
//!
//! ```rust,ignore
//! use autoroute_core::MemoryRouter;
//! use autoroute_runtime::{ConfigLoader, RouteApp, logging};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::new().load()?;
//!     logging::init_from_config(&config.logging)?;
//!
//!     let mut app = RouteApp::with_config(MemoryRouter::new(), &config);
//!     app.mount(UserController::default())?;
//!     println!("{}", app.stats());
//!
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod logging;

// Re-exports
pub use app::{RouteApp, RouteStats};
pub use config::{AutorouteConfig, ConfigError, ConfigLoader, ConfigResult, ControllerConfig};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::{LoggingBuilder, init_from_config};

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
///
/// This provides all the commonly used logging macros:
/// - `trace!`, `debug!`, `info!`, `warn!`, `error!`
/// - `span`, `event`
/// - `instrument` attribute
/// - `Level` for span creation
pub mod prelude {
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}
