//! Template serialization for different host routers.

use std::fmt::Write;

use super::{PathParam, RouteTemplate};

/// Serializes a [`RouteTemplate`] into the string a host router expects.
pub trait TemplateSyntax: Send + Sync {
    /// Short name used in logs and configuration.
    fn name(&self) -> &'static str;

    /// Renders the full template.
    fn render(&self, template: &RouteTemplate) -> String;
}

/// `/{name}`, `/{name:pattern}` and optional `[/{name:pattern}]` segments.
///
/// This is the default syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketSyntax;

impl BracketSyntax {
    fn segment(param: &PathParam) -> String {
        match &param.pattern {
            Some(pattern) => format!("/{{{}:{}}}", param.name, pattern),
            None => format!("/{{{}}}", param.name),
        }
    }
}

impl TemplateSyntax for BracketSyntax {
    fn name(&self) -> &'static str {
        "bracket"
    }

    fn render(&self, template: &RouteTemplate) -> String {
        let mut out = template.base.clone();
        for param in &template.params {
            let segment = Self::segment(param);
            if param.optional {
                out.push('[');
                out.push_str(&segment);
                out.push(']');
            } else {
                out.push_str(&segment);
            }
        }
        out
    }
}

/// An anchored regular expression with named capture groups.
///
/// Unconstrained parameters capture `[^/]+`; optional parameters become
/// non-capturing optional groups.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexSyntax;

const UNCONSTRAINED: &str = "[^/]+";

impl TemplateSyntax for RegexSyntax {
    fn name(&self) -> &'static str {
        "regex"
    }

    fn render(&self, template: &RouteTemplate) -> String {
        let mut out = String::from("^");
        out.push_str(&escape_literal(&template.base));
        for param in &template.params {
            let pattern = param.pattern.as_deref().unwrap_or(UNCONSTRAINED);
            if param.optional {
                let _ = write!(out, "(?:/(?P<{}>{}))?", param.name, pattern);
            } else {
                let _ = write!(out, "/(?P<{}>{})", param.name, pattern);
            }
        }
        out.push('$');
        out
    }
}

fn escape_literal(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    for ch in literal.chars() {
        if matches!(
            ch,
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$'
        ) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> RouteTemplate {
        RouteTemplate {
            base: "/user-user".to_string(),
            params: vec![
                PathParam {
                    name: "id".to_string(),
                    pattern: Some("[0-9]+".to_string()),
                    optional: false,
                },
                PathParam {
                    name: "note".to_string(),
                    pattern: None,
                    optional: true,
                },
            ],
        }
    }

    #[test]
    fn test_bracket_syntax() {
        assert_eq!(template().render(&BracketSyntax), "/user-user/{id:[0-9]+}[/{note}]");
    }

    #[test]
    fn test_regex_syntax() {
        assert_eq!(
            template().render(&RegexSyntax),
            "^/user-user/(?P<id>[0-9]+)(?:/(?P<note>[^/]+))?$"
        );
    }

    #[test]
    fn test_regex_escapes_literal_base() {
        let template = RouteTemplate {
            base: "/v1.0/items".to_string(),
            params: Vec::new(),
        };
        assert_eq!(template.render(&RegexSyntax), "^/v1\\.0/items$");
    }

    #[test]
    fn test_syntax_names() {
        assert_eq!(BracketSyntax.name(), "bracket");
        assert_eq!(RegexSyntax.name(), "regex");
    }
}
