//! Error types for the autoroute engine.
//!
//! Unrecognised method names are not errors: they are skipped during
//! registration. Host router failures are the router's own error type and
//! pass through the registrar untouched.

use thiserror::Error;

use crate::verb::HttpVerb;

// =============================================================================
// Dispatch Errors
// =============================================================================

/// Errors raised while forwarding a request to a controller method.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The encoded target does not name an action of the controller.
    #[error("bad dispatch target: {target} method does not exist on controller [{controller}]")]
    UnresolvableTarget {
        /// The name the trampoline was invoked with.
        target: String,
        /// The controller the lookup ran against.
        controller: String,
    },

    /// A required path parameter had no value.
    #[error("missing path parameter '{name}'")]
    MissingArgument {
        /// Parameter name.
        name: String,
    },

    /// A path value could not be converted to the declared type.
    #[error("invalid value '{value}' for path parameter '{name}': {reason}")]
    InvalidArgument {
        /// Parameter name.
        name: String,
        /// Raw value received from the router.
        value: String,
        /// Conversion failure.
        reason: String,
    },
}

impl DispatchError {
    /// Creates an unresolvable target error.
    pub fn unresolvable(target: impl Into<String>, controller: impl Into<String>) -> Self {
        Self::UnresolvableTarget {
            target: target.into(),
            controller: controller.into(),
        }
    }
}

// =============================================================================
// Router Errors
// =============================================================================

/// Errors reported by [`MemoryRouter`](crate::router::MemoryRouter).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// The same verb and template were registered twice.
    #[error("route {verb} {template} is already registered")]
    Conflict { verb: HttpVerb, template: String },

    /// The template is empty.
    #[error("invalid route template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    /// No route is registered for the verb and template.
    #[error("no route registered for {verb} {template}")]
    NotFound { verb: HttpVerb, template: String },

    /// The matched route failed to dispatch.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Result type for [`MemoryRouter`](crate::router::MemoryRouter) operations.
pub type RouterResult<T> = Result<T, RouterError>;
