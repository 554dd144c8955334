//! Callable references registered with the host router.
//!
//! A callable names a controller and a trampoline entry point. The entry
//! point name encodes the target method: `getUserAction` is reached through
//! `callRouteMethodGetUserAction`, and decoding reverses the transform.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::slug::{lower_first, upper_first};

/// Marker prepended to the target name to form an entry point name.
pub const CALL_FUNCTION_PREFIX: &str = "callRouteMethod";

/// Encodes a target method name into an entry point name.
pub fn encode_entry(target: &str) -> String {
    format!("{CALL_FUNCTION_PREFIX}{}", upper_first(target))
}

/// Recovers the target method name from an entry point name.
///
/// Returns `None` when the name does not carry the marker or names nothing.
pub fn decode_entry(entry: &str) -> Option<String> {
    entry
        .strip_prefix(CALL_FUNCTION_PREFIX)
        .filter(|rest| !rest.is_empty())
        .map(lower_first)
}

/// `Controller:entry` reference to one routed action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallableRef {
    controller: String,
    entry: String,
}

impl CallableRef {
    /// References `target` on `controller` through the trampoline.
    pub fn for_target(controller: impl Into<String>, target: &str) -> Self {
        Self {
            controller: controller.into(),
            entry: encode_entry(target),
        }
    }

    pub fn controller(&self) -> &str {
        &self.controller
    }

    /// Entry point name, e.g. `callRouteMethodGetUserAction`.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Target method name decoded from the entry point.
    pub fn target(&self) -> Option<String> {
        decode_entry(&self.entry)
    }
}

impl fmt::Display for CallableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.controller, self.entry)
    }
}

/// Error returned when parsing a malformed callable string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed callable reference '{0}', expected `Controller:entry`")]
pub struct ParseCallableError(pub String);

impl FromStr for CallableRef {
    type Err = ParseCallableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((controller, entry)) if !controller.is_empty() && !entry.is_empty() => Ok(Self {
                controller: controller.to_string(),
                entry: entry.to_string(),
            }),
            _ => Err(ParseCallableError(s.to_string())),
        }
    }
}

impl Serialize for CallableRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
