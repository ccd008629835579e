//! Intermediate value tree produced by serializing a bean.
//!
//! [`Value`] is what the marshaller sees of a Rust value: every scalar already rendered
//! as its string form, sequences split into fixed-size [`Value::Array`] (tuples, arrays)
//! and resizable [`Value::Collection`] (vectors, sets), serde maps as [`Value::Map`] and
//! structs as [`Value::Bean`] with their properties in declaration order.
//!
//! ```rust
//! use serde::Serialize;
//! use serde_inibean::{to_value, Value};
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, tags: Vec<String> }
//!
//! let value = to_value(&Point { x: 1, tags: vec!["a".into()] }).unwrap();
//! let bean = value.as_bean().unwrap();
//! assert_eq!(bean.name(), "Point");
//! assert_eq!(bean.get("x").and_then(Value::as_str), Some("1"));
//! ```

use indexmap::IndexMap;

/// A dynamically-typed view of one serialized property value.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// `None`, `()` and unit structs
    #[default]
    Null,
    /// Anything with a single-string form: booleans, numbers, chars, strings, unit variants
    Scalar(String),
    /// Fixed-size sequence (tuples and arrays)
    Array(Vec<Value>),
    /// Resizable sequence (vectors, sets, byte buffers)
    Collection(Vec<Value>),
    /// String-keyed map
    Map(IndexMap<String, Value>),
    /// Struct with named properties
    Bean(Bean),
}

/// A serialized struct: its serde type name and its properties in declaration order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Bean {
    name: &'static str,
    properties: Vec<(&'static str, Value)>,
}

impl Bean {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Bean {
            name,
            properties: Vec::new(),
        }
    }

    /// The serde container name, used to look up type-level documentation.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn push(&mut self, property: &'static str, value: Value) {
        self.properties.push((property, value));
    }

    #[must_use]
    pub fn get(&self, property: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, value)| value)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.properties.iter().map(|(name, value)| (*name, value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_bean(&self) -> bool {
        matches!(self, Value::Bean(_))
    }

    /// Arrays, collections and maps: values INI cannot hold inside another list or map.
    #[inline]
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Collection(_) | Value::Map(_))
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bean(&self) -> Option<&Bean> {
        match self {
            Value::Bean(bean) => Some(bean),
            _ => None,
        }
    }

    /// Elements of an array or collection.
    #[inline]
    #[must_use]
    pub fn as_elements(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) | Value::Collection(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Short human description used in error messages.
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Scalar(_) => "a scalar",
            Value::Array(_) => "an array",
            Value::Collection(_) => "a collection",
            Value::Map(_) => "a map",
            Value::Bean(_) => "a struct",
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Scalar(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Scalar(value)
    }
}

impl From<Bean> for Value {
    fn from(value: Bean) -> Self {
        Value::Bean(value)
    }
}
