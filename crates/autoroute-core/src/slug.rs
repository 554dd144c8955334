//! Identifier case conversions.
//!
//! [`slugify`] turns a concatenated-words identifier such as `UserProfile`
//! into `user-profile`. It is used for controller prefixes and for the
//! action part of a route path.

/// Separator used by [`slugify`].
pub const DEFAULT_SEPARATOR: &str = "-";

/// Slugifies an identifier with the default `-` separator.
///
/// ```
/// use autoroute_core::slug::slugify;
///
/// assert_eq!(slugify("UserController"), "user-controller");
/// assert_eq!(slugify("userProfile"), "user-profile");
/// ```
pub fn slugify(input: &str) -> String {
    slugify_with(input, DEFAULT_SEPARATOR)
}

/// Slugifies an identifier with a custom separator.
///
/// The separator is inserted before every ASCII uppercase letter, the result
/// is lowercased, and leading separator characters are stripped. Non-ASCII
/// characters are left untouched.
pub fn slugify_with(input: &str, separator: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 2);
    for ch in input.chars() {
        if ch.is_ascii_uppercase() {
            out.push_str(separator);
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch.to_ascii_lowercase());
        }
    }

    if separator.is_empty() {
        return out;
    }
    out.trim_start_matches(|c| separator.contains(c)).to_string()
}

/// Converts a snake_case Rust identifier into lowerCamelCase.
///
/// `get_user_action` becomes `getUserAction`. Leading underscores and a
/// `r#` raw-identifier marker are dropped.
pub fn lower_camel_case(ident: &str) -> String {
    let ident = ident.strip_prefix("r#").unwrap_or(ident);
    let mut out = String::with_capacity(ident.len());
    let mut upper_next = false;

    for ch in ident.chars() {
        if ch == '_' {
            upper_next = !out.is_empty();
            continue;
        }
        if upper_next {
            out.push(ch.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Uppercases the first character of `s`.
pub(crate) fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercases the first character of `s`.
pub(crate) fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_words() {
        assert_eq!(slugify("UserController"), "user-controller");
        assert_eq!(slugify("OrderLineItem"), "order-line-item");
        assert_eq!(slugify("user"), "user");
    }

    #[test]
    fn test_slugify_no_leading_separator() {
        assert_eq!(slugify("User"), "user");
        assert_eq!(slugify("-User"), "user");
        assert!(!slugify("ABC").starts_with('-'));
    }

    #[test]
    fn test_slugify_idempotent_on_slugs() {
        for slug in ["user", "user-profile", "a-b-c", "v2-items"] {
            assert_eq!(slugify(slug), slug);
            assert_eq!(slugify(&slugify(slug)), slug);
        }
    }

    #[test]
    fn test_slugify_consecutive_capitals() {
        assert_eq!(slugify("HTMLPage"), "h-t-m-l-page");
    }

    #[test]
    fn test_slugify_custom_separator() {
        assert_eq!(slugify_with("UserProfile", "_"), "user_profile");
        assert_eq!(slugify_with("UserProfile", ""), "userprofile");
    }

    #[test]
    fn test_lower_camel_case() {
        assert_eq!(lower_camel_case("get_user_action"), "getUserAction");
        assert_eq!(lower_camel_case("post_action"), "postAction");
        assert_eq!(lower_camel_case("_private_get"), "privateGet");
        assert_eq!(lower_camel_case("r#delete_action"), "deleteAction");
        assert_eq!(lower_camel_case("getUserAction"), "getUserAction");
    }

    #[test]
    fn test_first_char_case() {
        assert_eq!(upper_first("getUserAction"), "GetUserAction");
        assert_eq!(lower_first("GetUserAction"), "getUserAction");
        assert_eq!(upper_first(""), "");
    }
}
