//! Backend service descriptors.
//!
//! Each descriptor is parsed by the proxy when it builds its routes. The
//! config layer only carries them through.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque description of one service fronted by the gateway.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ServiceDescriptor(Value);

impl ServiceDescriptor {
    /// Parse a descriptor given as a JSON object string.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw).map(Self)
    }

    /// The `name` entry, if the descriptor has one. Used for logging.
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for ServiceDescriptor {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json() {
        let svc = ServiceDescriptor::from_json(
            r#"{"name": "weather", "hostregexp": "^weather\\.", "price": 10}"#,
        )
        .unwrap();
        assert_eq!(svc.name(), Some("weather"));
        assert_eq!(svc.as_value()["price"], json!(10));
    }

    #[test]
    fn test_shape_is_not_checked() {
        let svc = ServiceDescriptor::from(json!(["not", "an", "object"]));
        assert_eq!(svc.name(), None);
        assert!(ServiceDescriptor::from_json("{broken").is_err());
    }

    #[test]
    fn test_from_toml_table() {
        #[derive(Deserialize)]
        struct Wrapper {
            services: Vec<ServiceDescriptor>,
        }

        let w: Wrapper = toml::from_str(
            r#"
            [[services]]
            name = "a"
            price = 1

            [[services]]
            name = "b"
            "#,
        )
        .unwrap();
        let names: Vec<_> = w.services.iter().filter_map(ServiceDescriptor::name).collect();
        assert_eq!(names, ["a", "b"]);
    }
}
