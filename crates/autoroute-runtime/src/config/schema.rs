//! Configuration schema definitions.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use autoroute_core::{
    BracketSyntax, ControllerDescriptor, RegexSyntax, Registrar, TemplateSyntax,
};
use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AutorouteConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Route generation settings shared by all controllers.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Per-controller overrides, keyed by controller name.
    #[serde(default)]
    pub controllers: BTreeMap<String, ControllerConfig>,
}

// =============================================================================
// Logging
// =============================================================================

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| s.to_string())
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Pretty,
    /// Requires the `json-log` feature.
    #[cfg(feature = "json-log")]
    Json,
}

/// Log destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
    File,
}

/// Log file rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    #[default]
    Never,
    Hourly,
    Daily,
}

/// Which span lifecycle events are logged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpanEventConfig {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub enter: bool,
    #[serde(default)]
    pub exit: bool,
    #[serde(default)]
    pub close: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Base level: trace, debug, info, warn or error.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    #[serde(default)]
    pub output: LogOutput,

    #[serde(default)]
    pub span_events: SpanEventConfig,

    /// Include thread ids.
    #[serde(default)]
    pub thread_ids: bool,

    /// Include file names and line numbers.
    #[serde(default)]
    pub file_location: bool,

    /// Log file for `output = "file"`.
    #[serde(default)]
    pub file_path: Option<PathBuf>,

    #[serde(default)]
    pub rotation: LogRotation,

    /// Per-module levels, e.g. `autoroute_core = "debug"`.
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
}

fn default_log_level() -> String {
    LogLevel::Info.as_str().to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            output: LogOutput::default(),
            span_events: SpanEventConfig::default(),
            thread_ids: false,
            file_location: false,
            file_path: None,
            rotation: LogRotation::default(),
            filters: BTreeMap::new(),
        }
    }
}

// =============================================================================
// Routing
// =============================================================================

/// Template syntax handed to the host router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateSyntaxKind {
    /// `/{id:[0-9]+}[/{note}]`
    #[default]
    Bracket,
    /// `^/(?P<id>[0-9]+)(?:/(?P<note>[^/]+))?$`
    Regex,
}

impl TemplateSyntaxKind {
    /// Configures `registrar` with this syntax.
    pub fn apply(self, registrar: Registrar) -> Registrar {
        match self {
            Self::Bracket => registrar.with_syntax(BracketSyntax),
            Self::Regex => registrar.with_syntax(RegexSyntax),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Bracket => BracketSyntax.name(),
            Self::Regex => RegexSyntax.name(),
        }
    }
}

/// Route generation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutingConfig {
    #[serde(default)]
    pub template_syntax: TemplateSyntaxKind,
}

// =============================================================================
// Controllers
// =============================================================================

/// Overrides for one controller. Unset fields keep the controller's own
/// conventions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    #[serde(default)]
    pub fixed_prefix: Option<String>,

    #[serde(default)]
    pub prefix: Option<String>,

    #[serde(default)]
    pub action_suffix: Option<String>,

    /// Replaces the whole type pattern mapping.
    #[serde(default)]
    pub type_patterns: Option<BTreeMap<String, String>>,

    /// Replaces the whole parameter name pattern mapping.
    #[serde(default)]
    pub name_patterns: Option<BTreeMap<String, String>>,
}

impl ControllerConfig {
    /// Applies the overrides to `descriptor`.
    pub fn apply(&self, mut descriptor: ControllerDescriptor) -> ControllerDescriptor {
        let options = &mut descriptor.options;
        if let Some(fixed) = &self.fixed_prefix {
            options.fixed_prefix = Some(fixed.clone());
        }
        if let Some(prefix) = &self.prefix {
            options.prefix.clone_from(prefix);
        }
        if let Some(suffix) = &self.action_suffix {
            options.action_suffix.clone_from(suffix);
        }
        if let Some(patterns) = &self.type_patterns {
            options.patterns = options.patterns.clone().with_type_patterns(patterns.clone());
        }
        if let Some(patterns) = &self.name_patterns {
            options.patterns = options.patterns.clone().with_name_patterns(patterns.clone());
        }
        descriptor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoroute_core::{INT_PATTERN, ParamSpec};

    #[test]
    fn test_log_level_parse() {
        assert_eq!("DEBUG".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!("warn".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_controller_overrides() {
        let config = ControllerConfig {
            prefix: Some("api-".to_string()),
            name_patterns: Some(BTreeMap::from([(
                "slug".to_string(),
                "[a-z-]+".to_string(),
            )])),
            ..ControllerConfig::default()
        };
        let descriptor = config.apply(ControllerDescriptor::new("UserController"));

        assert_eq!(descriptor.options.prefix, "api-");
        assert_eq!(descriptor.options.action_suffix, "Action");
        let patterns = &descriptor.options.patterns;
        assert_eq!(patterns.resolve(&ParamSpec::untyped("slug")), Some("[a-z-]+"));
        // The name mapping was replaced, so `id` falls back to its type.
        assert_eq!(patterns.resolve(&ParamSpec::untyped("id")), None);
        assert_eq!(patterns.resolve(&ParamSpec::typed("id", "int")), Some(INT_PATTERN));
    }

    #[test]
    fn test_syntax_kind_names() {
        assert_eq!(TemplateSyntaxKind::default().name(), "bracket");
        assert_eq!(TemplateSyntaxKind::Regex.name(), "regex");
    }
}
