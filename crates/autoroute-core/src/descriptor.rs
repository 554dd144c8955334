//! Controller and action metadata.
//!
//! These types are what the registrar inspects instead of runtime
//! reflection. The `#[controller]` macro generates them from an `impl`
//! block; hand-written [`Controller`](crate::Controller) implementations can
//! build them directly.

use serde::{Deserialize, Serialize};

use crate::pattern::PatternTable;
use crate::verb::DEFAULT_ACTION_SUFFIX;

/// Declared type of an action parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// The request handle. Never part of the path.
    Request,
    /// The response handle. Never part of the path.
    Response,
    /// A named type such as `int`, `float` or `String`.
    Named(String),
    /// No declared type.
    Untyped,
}

/// One declared parameter of an action method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamSpec {
    pub name: String,
    pub ty: ParamType,
    /// Whether the parameter may be absent, making its segment optional.
    pub optional: bool,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
        }
    }

    /// A parameter with a named type.
    pub fn typed(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Named(type_name.into()))
    }

    /// A parameter without a declared type.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Untyped)
    }

    /// The request handle parameter.
    pub fn request(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Request)
    }

    /// The response handle parameter.
    pub fn response(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Response)
    }

    /// Marks the parameter as optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Whether this is a request or response handle.
    pub fn is_handle(&self) -> bool {
        matches!(self.ty, ParamType::Request | ParamType::Response)
    }

    /// Declared type name, if the parameter has a named type.
    pub fn type_name(&self) -> Option<&str> {
        match &self.ty {
            ParamType::Named(name) => Some(name),
            _ => None,
        }
    }
}

/// A public method of a controller, as seen by the registrar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMethod {
    /// Method name in lowerCamelCase, e.g. `getUserAction`.
    pub name: String,
    /// Declared parameters in declaration order.
    pub params: Vec<ParamSpec>,
}

impl ActionMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    /// Appends a parameter (builder pattern).
    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Parameters that become path segments, in declaration order.
    pub fn path_params(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params.iter().filter(|p| !p.is_handle())
    }
}

/// Per-controller routing conventions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerOptions {
    /// Used verbatim as the prefix when set and non-empty.
    #[serde(default)]
    pub fixed_prefix: Option<String>,

    /// Prepended to the name-derived prefix.
    #[serde(default)]
    pub prefix: String,

    /// Token a method name must contain to become a route.
    #[serde(default = "default_action_suffix")]
    pub action_suffix: String,

    /// Validation patterns.
    #[serde(default)]
    pub patterns: PatternTable,
}

fn default_action_suffix() -> String {
    DEFAULT_ACTION_SUFFIX.to_string()
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            fixed_prefix: None,
            prefix: String::new(),
            action_suffix: default_action_suffix(),
            patterns: PatternTable::default(),
        }
    }
}

/// Identity and conventions of one controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerDescriptor {
    /// Short name, e.g. `UserController`.
    pub name: String,
    pub options: ControllerOptions,
}

impl ControllerDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: ControllerOptions::default(),
        }
    }

    /// Descriptor named after the short type name of `T`.
    pub fn of<T: ?Sized>() -> Self {
        Self::new(short_type_name(std::any::type_name::<T>()))
    }

    pub fn with_options(mut self, options: ControllerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn fixed_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.fixed_prefix = Some(prefix.into());
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.prefix = prefix.into();
        self
    }

    pub fn action_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.options.action_suffix = suffix.into();
        self
    }

    pub fn patterns(mut self, patterns: PatternTable) -> Self {
        self.options.patterns = patterns;
        self
    }
}

/// `my_app::controllers::UserController<T>` → `UserController`.
fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UserController;

    #[test]
    fn test_descriptor_of_type() {
        assert_eq!(ControllerDescriptor::of::<UserController>().name, "UserController");
        assert_eq!(short_type_name("a::b::Thing<c::D>"), "Thing");
        assert_eq!(short_type_name("Plain"), "Plain");
    }

    #[test]
    fn test_path_params_skip_handles() {
        let method = ActionMethod::new("getUserAction")
            .param(ParamSpec::typed("id", "int"))
            .param(ParamSpec::request("req"))
            .param(ParamSpec::untyped("tab").optional())
            .param(ParamSpec::response("res"));

        let names: Vec<_> = method.path_params().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["id", "tab"]);
    }

    #[test]
    fn test_default_options() {
        let options = ControllerOptions::default();
        assert_eq!(options.action_suffix, "Action");
        assert!(options.fixed_prefix.is_none());
        assert!(options.prefix.is_empty());
    }
}
