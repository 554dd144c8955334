//! HTTP verb classification from method names.
//!
//! A method name encodes its verb as a plain substring: `getUserAction` is
//! a GET route, `deleteAction` a DELETE route. Matching is ASCII
//! case-insensitive and checks the verbs in a fixed priority order, so a
//! name containing several verb tokens always resolves to the one listed
//! first in [`HttpVerb::PRIORITY`], wherever it sits in the name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default token a method name must contain to be considered a route.
pub const DEFAULT_ACTION_SUFFIX: &str = "Action";

/// The HTTP verbs a route method can encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
    Options,
    Patch,
}

impl HttpVerb {
    /// Verbs in classification priority order.
    pub const PRIORITY: [HttpVerb; 6] = [
        HttpVerb::Get,
        HttpVerb::Post,
        HttpVerb::Put,
        HttpVerb::Delete,
        HttpVerb::Options,
        HttpVerb::Patch,
    ];

    /// Returns the uppercase method name, e.g. `"GET"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown verb name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown HTTP verb: {0}")]
pub struct UnknownVerb(pub String);

impl FromStr for HttpVerb {
    type Err = UnknownVerb;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::PRIORITY
            .into_iter()
            .find(|verb| verb.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVerb(s.to_string()))
    }
}

/// Returns the verb encoded in `method_name`, if any.
///
/// ```
/// use autoroute_core::verb::{HttpVerb, classify};
///
/// assert_eq!(classify("getUserAction"), Some(HttpVerb::Get));
/// assert_eq!(classify("updatePutAction"), Some(HttpVerb::Put));
/// // POST is checked before PUT.
/// assert_eq!(classify("putPostAction"), Some(HttpVerb::Post));
/// assert_eq!(classify("helperInternal"), None);
/// ```
pub fn classify(method_name: &str) -> Option<HttpVerb> {
    HttpVerb::PRIORITY
        .into_iter()
        .find(|verb| contains_ignore_case(method_name, verb.as_str()))
}

/// Returns the verb of `method_name` when it is a route method.
///
/// A route method contains `action_suffix` and a verb token. Names that
/// fail either check yield `None`; they are skipped, never rejected.
pub fn classify_action(method_name: &str, action_suffix: &str) -> Option<HttpVerb> {
    if !contains_ignore_case(method_name, action_suffix) {
        return None;
    }
    classify(method_name)
}

/// Whether `method_name` should become a route.
pub fn is_route_method(method_name: &str, action_suffix: &str) -> bool {
    classify_action(method_name, action_suffix).is_some()
}

/// ASCII case-insensitive substring test. An empty needle always matches.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    find_ignore_case(haystack.as_bytes(), needle.as_bytes(), 0).is_some()
}

/// Removes every ASCII case-insensitive occurrence of `needle`.
///
/// Occurrences are removed left to right without overlap. An empty needle
/// leaves the input unchanged.
pub fn remove_ignore_case(haystack: &str, needle: &str) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }

    let bytes = haystack.as_bytes();
    let mut out = String::with_capacity(haystack.len());
    let mut cursor = 0;
    while let Some(at) = find_ignore_case(bytes, needle.as_bytes(), cursor) {
        out.push_str(&haystack[cursor..at]);
        cursor = at + needle.len();
    }
    out.push_str(&haystack[cursor..]);
    out
}

fn find_ignore_case(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() {
        return Some(from);
    }
    if haystack.len() < needle.len() {
        return None;
    }
    (from..=haystack.len() - needle.len())
        .find(|&i| haystack[i..i + needle.len()].eq_ignore_ascii_case(needle))
}
