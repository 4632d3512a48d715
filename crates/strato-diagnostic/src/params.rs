//! Parameter lists: the configuration surface diagnostics are built from.

use crate::error::ConfigError;
use indexmap::IndexMap;

/// A single configuration value.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    /// A string value.
    Str(String),
    /// An integer value.
    Int(i64),
    /// A floating-point value.
    Real(f64),
    /// A boolean value.
    Bool(bool),
}

impl ParamValue {
    /// The type name used in wrong-type errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "integer",
            Self::Real(_) => "real",
            Self::Bool(_) => "boolean",
        }
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// An ordered key/value parameter block.
///
/// Keys keep their insertion order, so error reporting and iteration are
/// deterministic. Typed getters distinguish a missing key from a key of
/// the wrong type; both are configuration errors the caller surfaces
/// before any field resolution is attempted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterList {
    entries: IndexMap<String, ParamValue>,
}

impl ParameterList {
    /// Create an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value for the key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Raw access to a value.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    /// A required string parameter.
    pub fn get_str(&self, key: &str) -> Result<&str, ConfigError> {
        match self.entries.get(key) {
            Some(ParamValue::Str(s)) => Ok(s),
            Some(other) => Err(ConfigError::WrongType {
                key: key.to_string(),
                expected: "string",
                actual: other.type_name(),
            }),
            None => Err(ConfigError::MissingKey {
                key: key.to_string(),
            }),
        }
    }

    /// An optional string parameter: `Ok(None)` when the key is absent.
    pub fn opt_str(&self, key: &str) -> Result<Option<&str>, ConfigError> {
        match self.entries.get(key) {
            Some(ParamValue::Str(s)) => Ok(Some(s)),
            Some(other) => Err(ConfigError::WrongType {
                key: key.to_string(),
                expected: "string",
                actual: other.type_name(),
            }),
            None => Ok(None),
        }
    }

    /// A required integer parameter.
    pub fn get_int(&self, key: &str) -> Result<i64, ConfigError> {
        match self.entries.get(key) {
            Some(ParamValue::Int(v)) => Ok(*v),
            Some(other) => Err(ConfigError::WrongType {
                key: key.to_string(),
                expected: "integer",
                actual: other.type_name(),
            }),
            None => Err(ConfigError::MissingKey {
                key: key.to_string(),
            }),
        }
    }

    /// A required real parameter.
    pub fn get_real(&self, key: &str) -> Result<f64, ConfigError> {
        match self.entries.get(key) {
            Some(ParamValue::Real(v)) => Ok(*v),
            Some(other) => Err(ConfigError::WrongType {
                key: key.to_string(),
                expected: "real",
                actual: other.type_name(),
            }),
            None => Err(ConfigError::MissingKey {
                key: key.to_string(),
            }),
        }
    }

    /// A required boolean parameter.
    pub fn get_bool(&self, key: &str) -> Result<bool, ConfigError> {
        match self.entries.get(key) {
            Some(ParamValue::Bool(v)) => Ok(*v),
            Some(other) => Err(ConfigError::WrongType {
                key: key.to_string(),
                expected: "boolean",
                actual: other.type_name(),
            }),
            None => Err(ConfigError::MissingKey {
                key: key.to_string(),
            }),
        }
    }

    /// Iterator over the keys, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list holds no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
