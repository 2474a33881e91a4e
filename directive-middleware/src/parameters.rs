//! Literal directive arguments bound to one chain entry.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Arguments written at a directive use site, e.g. `@first(name: "a param")`.
///
/// Always a JSON object; a directive used without arguments binds the empty object.
/// Cloning is cheap: every invocation of the chain shares the same map.
#[derive(Clone, Default, PartialEq)]
pub struct Parameters {
    values: Arc<Map<String, Value>>,
}

impl Parameters {
    pub fn new(values: Map<String, Value>) -> Self {
        Self {
            values: Arc::new(values),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.values.as_ref().clone())
    }

    /// Deserializes the parameters into a typed struct.
    ///
    /// ```rust
    /// use directive_middleware::Parameters;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Auth {
    ///     requires: String,
    /// }
    ///
    /// let params = Parameters::try_from(serde_json::json!({ "requires": "ADMIN" })).unwrap();
    /// let auth: Auth = params.deserialize().unwrap();
    /// assert_eq!(auth.requires, "ADMIN");
    /// ```
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.to_value())
    }
}

impl fmt::Debug for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.values.as_ref(), f)
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.values.as_ref().clone()))
    }
}

impl From<Map<String, Value>> for Parameters {
    fn from(values: Map<String, Value>) -> Self {
        Self::new(values)
    }
}

impl TryFrom<Value> for Parameters {
    type Error = Value;

    /// Accepts objects only; `null` maps to the empty parameters. Anything else is handed back.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self::new(map)),
            Value::Null => Ok(Self::default()),
            other => Err(other),
        }
    }
}

impl PartialEq<Value> for Parameters {
    fn eq(&self, other: &Value) -> bool {
        matches!(other, Value::Object(map) if map == self.values.as_ref())
    }
}
