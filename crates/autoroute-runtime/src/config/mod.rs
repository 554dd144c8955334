//! Configuration module for the autoroute runtime.
//!
//! This module provides layered configuration loading and validation for
//! logging, route generation and per-controller overrides.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile};
pub use schema::{
    AutorouteConfig, ControllerConfig, LogFormat, LogLevel, LogOutput, LogRotation, LoggingConfig,
    RoutingConfig, SpanEventConfig, TemplateSyntaxKind,
};
pub use validation::validate_config;
