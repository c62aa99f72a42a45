//! Simple features: an identifier, named attributes and an optional geometry

use crate::writer::non_finite_lexical;
use crate::{Crs, Geometry};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-geometric attribute value
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Integer(i64),
    Double(f64),
    Text(String),
}

impl AttributeValue {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }
}

impl fmt::Display for AttributeValue {
    /// Text content of the value as written in markup
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Null => Ok(()),
            AttributeValue::Bool(b) => write!(f, "{}", b),
            AttributeValue::Integer(i) => write!(f, "{}", i),
            AttributeValue::Double(d) => match non_finite_lexical(*d) {
                Some(lexical) => f.write_str(lexical),
                None => write!(f, "{}", d),
            },
            AttributeValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Integer(value.into())
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Double(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(AttributeValue::Null, Into::into)
    }
}

/// A single geographic entity
///
/// The encoder only reads features; attribute order is preserved as given.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Feature {
    /// Identifier written as the feature's `gml:id`
    pub id: String,
    /// Named attribute values, in declaration order
    #[cfg_attr(feature = "serde", serde(default))]
    pub properties: Vec<(String, AttributeValue)>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub geometry: Option<Geometry>,
    /// Reference system of the geometry
    #[cfg_attr(feature = "serde", serde(default))]
    pub crs: Option<Crs>,
}

impl Feature {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            properties: Vec::new(),
            geometry: None,
            crs: None,
        }
    }

    /// Append an attribute
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.properties.push((name.into(), value.into()));
        self
    }

    /// Set the geometry and its reference system
    pub fn with_geometry(mut self, geometry: Geometry, crs: Option<Crs>) -> Self {
        self.geometry = Some(geometry);
        self.crs = crs;
        self
    }

    /// Value of the first attribute called `name`
    pub fn property(&self, name: &str) -> Option<&AttributeValue> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_order() {
        let feature = Feature::new("f.1")
            .with_property("b", 1)
            .with_property("a", "x");
        let names: Vec<&str> = feature.properties.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(feature.property("a"), Some(&AttributeValue::Text("x".into())));
        assert_eq!(feature.property("missing"), None);
    }

    #[test]
    fn test_value_text() {
        assert_eq!(AttributeValue::from(true).to_string(), "true");
        assert_eq!(AttributeValue::from(42).to_string(), "42");
        assert_eq!(AttributeValue::from(2.5).to_string(), "2.5");
        assert_eq!(AttributeValue::Null.to_string(), "");
        assert_eq!(AttributeValue::from(f64::INFINITY).to_string(), "INF");
        assert_eq!(AttributeValue::from(f64::NEG_INFINITY).to_string(), "-INF");
        assert_eq!(AttributeValue::from(f64::NAN).to_string(), "NaN");
        assert!(AttributeValue::from(None::<i64>).is_null());
    }
}
