//! Request-shaped input record

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The three namespaces of one request.
///
/// Path parameters are strings, query values are strings or arrays of
/// strings, and the body is any JSON value (`Null` when the request had
/// none). After a successful validation the same type carries the
/// normalized values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestInput {
    #[serde(default)]
    pub params: Map<String, Value>,
    #[serde(default)]
    pub query: Map<String, Value>,
    #[serde(default)]
    pub body: Value,
}

impl RequestInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), Value::String(value.into()));
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    /// Builds the query map from raw `key=value` pairs.
    ///
    /// A key seen once keeps a string; a repeated key collects an array in
    /// arrival order.
    pub fn query_from_pairs<I, K, V>(pairs: I) -> Map<String, Value>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut query = Map::new();
        for (key, value) in pairs {
            let key: String = key.into();
            let value = Value::String(value.into());
            match query.get_mut(&key) {
                Some(Value::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
                None => {
                    query.insert(key, value);
                }
            }
        }
        query
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).and_then(Value::as_str)
    }

    pub fn body_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_pairs_collect_repeated_keys() {
        let query = RequestInput::query_from_pairs(vec![
            ("branch", "cse"),
            ("semester", "3"),
            ("branch", "ece"),
            ("branch", "me"),
        ]);
        assert_eq!(query["semester"], json!("3"));
        assert_eq!(query["branch"], json!(["cse", "ece", "me"]));
    }

    #[test]
    fn test_body_as_typed_struct() {
        #[derive(Deserialize)]
        struct Login {
            email: String,
            password: String,
        }

        let input = RequestInput::new()
            .with_body(json!({"email": "dean@college.edu", "password": "s3cret-pass"}));
        let login: Login = input.body_as().unwrap();
        assert_eq!(login.email, "dean@college.edu");
        assert_eq!(login.password, "s3cret-pass");
    }

    #[test]
    fn test_missing_namespaces_deserialize_to_defaults() {
        let input: RequestInput = serde_json::from_value(json!({"params": {"id": "x"}})).unwrap();
        assert_eq!(input.param("id"), Some("x"));
        assert!(input.query.is_empty());
        assert!(input.body.is_null());
    }
}
