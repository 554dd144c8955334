//! Runtime error types.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while assembling a [`RouteApp`](crate::RouteApp).
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Configuration could not be loaded or validated.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The host router rejected a route.
    #[error("Router rejected a route of controller [{controller}]: {source}")]
    Router {
        controller: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The controller is already mounted on this app.
    #[error("Controller already mounted: {0}")]
    AlreadyMounted(String),
}

impl RuntimeError {
    /// The router's own error, when it has type `E`.
    pub fn router_error<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            Self::Router { source, .. } => source.downcast_ref::<E>(),
            _ => None,
        }
    }
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
