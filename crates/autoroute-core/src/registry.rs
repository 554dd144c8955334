//! Record of every route the registrar has generated.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::callable::CallableRef;
use crate::verb::HttpVerb;

/// One generated route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRouteRecord {
    /// Rendered route template.
    pub path: String,
    /// `Controller:entry` reference registered with the router.
    pub callable: CallableRef,
    /// Source method name, e.g. `getUserAction`.
    pub method_name: String,
    pub http_method: HttpVerb,
}

/// Append-only, shared list of generated routes.
///
/// Clones share the same underlying list. Registering the same controller
/// twice appends its records twice.
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    records: Arc<RwLock<Vec<GeneratedRouteRecord>>>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&self, record: GeneratedRouteRecord) {
        self.records.write().push(record);
    }

    /// Snapshot of all records in registration order.
    pub fn records(&self) -> Vec<GeneratedRouteRecord> {
        self.records.read().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Records generated for `controller`.
    pub fn for_controller(&self, controller: &str) -> Vec<GeneratedRouteRecord> {
        self.records
            .read()
            .iter()
            .filter(|r| r.callable.controller() == controller)
            .cloned()
            .collect()
    }

    /// Serializes all records as a JSON array.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&*self.records.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(controller: &str, method: &str, verb: HttpVerb) -> GeneratedRouteRecord {
        GeneratedRouteRecord {
            path: "/x".to_string(),
            callable: CallableRef::for_target(controller, method),
            method_name: method.to_string(),
            http_method: verb,
        }
    }

    #[test]
    fn test_clones_share_records() {
        let registry = RouteRegistry::new();
        let shared = registry.clone();
        assert!(shared.is_empty());

        registry.append(record("AController", "getAction", HttpVerb::Get));
        registry.append(record("BController", "postAction", HttpVerb::Post));
        registry.append(record("AController", "getAction", HttpVerb::Get));

        assert_eq!(shared.len(), 3);
        assert_eq!(shared.for_controller("AController").len(), 2);
        assert_eq!(shared.records()[1].method_name, "postAction");
    }

    #[test]
    fn test_json_shape() {
        let registry = RouteRegistry::new();
        registry.append(record("UserController", "getUserAction", HttpVerb::Get));

        let value: serde_json::Value = serde_json::from_str(&registry.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "path": "/x",
                "callable": "UserController:callRouteMethodGetUserAction",
                "methodName": "getUserAction",
                "httpMethod": "GET"
            }])
        );
    }
}
