/*!
# JSON Value

Defines the value tree produced by the parser.

Objects are backed by a [`HashMap`]: iteration order of keys is unspecified
and a later duplicate key overwrites an earlier one.
*/
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Display;

/// A node of a parsed JSON document.
#[derive(PartialEq, Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// The `null` literal
    Null,
    /// `true` or `false`
    Bool(bool),
    /// A numeric literal without a `.`
    Int(i64),
    /// A numeric literal containing a `.`
    Float(f64),
    /// String contents, without the quotes
    String(String),
    /// Ordered sequence of values
    Array(Vec<Value>),
    /// String keys mapped to values
    Object(HashMap<String, Value>),
}

impl Value {
    /// Compute the nesting depth of the value. Scalars have depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Array(items) => {
                1 + items.iter().map(Self::depth).max().unwrap_or(0)
            }
            Self::Object(map) => {
                1 + map.values().map(Self::depth).max().unwrap_or(0)
            }
            Self::Null
            | Self::Bool(_)
            | Self::Int(_)
            | Self::Float(_)
            | Self::String(_) => 1,
        }
    }

    /// Name of the variant, as shown to users.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Look up `key` if this is an object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Convert to compact JSON string
    ///
    /// # Errors
    ///
    /// Fails if `serde_json` cannot render the value.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = self.to_json().map_err(|_| std::fmt::Error)?;
        write!(f, "{text}")
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(int) => Self::Int(int),
                None => Self::Float(number.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(str) => Self::String(str),
            serde_json::Value::Array(values) => {
                Self::Array(values.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                let members = map.into_iter().map(|(k, v)| (k, Self::from(v)));
                Self::Object(members.collect())
            }
        }
    }
}
