//! Route path construction.
//!
//! # Data Flow
//! ```text
//! ActionMethod + prefix + ControllerOptions
//!     → strip convention tokens from the method name
//!     → slugify the remainder into the literal base (`/user-user`)
//!     → one PathParam per non-handle parameter (pattern resolved)
//!     → RouteTemplate
//!     → TemplateSyntax::render (bracket syntax, regex, ...)
//! ```
//!
//! Building and rendering are split so that targeting another host router
//! only means swapping the [`TemplateSyntax`].

mod syntax;

pub use syntax::{BracketSyntax, RegexSyntax, TemplateSyntax};

use crate::descriptor::{ActionMethod, ControllerOptions};
use crate::slug::slugify;
use crate::verb::{HttpVerb, remove_ignore_case};

/// A path parameter placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParam {
    pub name: String,
    /// Validation pattern; `None` matches anything.
    pub pattern: Option<String>,
    /// Rendered as an optional trailing segment.
    pub optional: bool,
}

/// A structured route template, independent of any router syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplate {
    /// Literal part, always starting with `/`.
    pub base: String,
    /// Placeholders in declaration order.
    pub params: Vec<PathParam>,
}

impl RouteTemplate {
    /// Renders the template with the given syntax.
    pub fn render(&self, syntax: &dyn TemplateSyntax) -> String {
        syntax.render(self)
    }

    /// Parameter names in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }
}

/// Removes the action suffix and every verb token from a method name.
///
/// `getUserAction` → `User`, `postAction` → empty.
pub fn action_label(method_name: &str, action_suffix: &str) -> String {
    let mut label = remove_ignore_case(method_name, action_suffix);
    for verb in HttpVerb::PRIORITY {
        label = remove_ignore_case(&label, verb.as_str());
    }
    label
}

/// Builds the template of one action method under `prefix`.
pub fn build_template(
    method: &ActionMethod,
    prefix: &str,
    options: &ControllerOptions,
) -> RouteTemplate {
    let mut base = format!("/{prefix}");

    let label = action_label(&method.name, &options.action_suffix);
    if !label.is_empty() {
        base.push('-');
        base.push_str(&slugify(&label));
    }

    let params = method
        .path_params()
        .map(|param| PathParam {
            name: param.name.clone(),
            pattern: options.patterns.resolve(param).map(str::to_string),
            optional: param.optional,
        })
        .collect();

    RouteTemplate { base, params }
}

/// Builds and renders the template with [`BracketSyntax`].
pub fn build_path(method: &ActionMethod, prefix: &str, options: &ControllerOptions) -> String {
    build_template(method, prefix, options).render(&BracketSyntax)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ParamSpec;
    use crate::pattern::{FLOAT_PATTERN, PatternTable};

    fn options() -> ControllerOptions {
        ControllerOptions::default()
    }

    #[test]
    fn test_action_label() {
        assert_eq!(action_label("getUserAction", "Action"), "User");
        assert_eq!(action_label("postAction", "Action"), "");
        assert_eq!(action_label("userGetProfileAction", "Action"), "userProfile");
        assert_eq!(action_label("getPutAction", "Action"), "");
        // "target" loses its "get".
        assert_eq!(action_label("getTargetAction", "Action"), "Tar");
    }

    #[test]
    fn test_get_user_with_id() {
        let method = ActionMethod::new("getUserAction").param(ParamSpec::typed("id", "int"));
        assert_eq!(build_path(&method, "user", &options()), "/user-user/{id:[0-9]+}");
    }

    #[test]
    fn test_post_with_optional_note() {
        let method = ActionMethod::new("postAction")
            .param(ParamSpec::typed("amount", "float"))
            .param(ParamSpec::typed("note", "String").optional());
        assert_eq!(
            build_path(&method, "user", &options()),
            format!("/user/{{amount:{FLOAT_PATTERN}}}[/{{note}}]")
        );
    }

    #[test]
    fn test_handles_excluded_anywhere() {
        let method = ActionMethod::new("deleteItemAction")
            .param(ParamSpec::response("res"))
            .param(ParamSpec::typed("id", "int"))
            .param(ParamSpec::request("req"))
            .param(ParamSpec::untyped("reason"));
        assert_eq!(
            build_path(&method, "cart", &options()),
            "/cart-item/{id:[0-9]+}/{reason}"
        );
    }

    #[test]
    fn test_multi_word_label() {
        let method = ActionMethod::new("getRecentOrdersAction");
        assert_eq!(build_path(&method, "shop", &options()), "/shop-recent-orders");
    }

    #[test]
    fn test_custom_suffix_and_patterns() {
        let options = ControllerOptions {
            action_suffix: "Route".to_string(),
            patterns: PatternTable::empty().name_pattern("slug", "[a-z-]+"),
            ..ControllerOptions::default()
        };
        let method = ActionMethod::new("getPostRoute")
            .param(ParamSpec::untyped("slug"))
            .param(ParamSpec::typed("id", "int"));
        // Both verb tokens are stripped, leaving no label.
        assert_eq!(
            build_path(&method, "blog", &options),
            "/blog/{slug:[a-z-]+}/{id}"
        );
    }

    #[test]
    fn test_template_structure() {
        let method = ActionMethod::new("patchProfileAction")
            .param(ParamSpec::request("req"))
            .param(ParamSpec::typed("id", "int"))
            .param(ParamSpec::untyped("field").optional());
        let template = build_template(&method, "user", &options());

        assert_eq!(template.base, "/user-profile");
        assert_eq!(template.param_names().collect::<Vec<_>>(), ["id", "field"]);
        assert!(template.params[1].optional);
        assert_eq!(template.params[1].pattern, None);
    }
}
