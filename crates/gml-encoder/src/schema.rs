//! Feature type descriptions and declared-property introspection

use crate::{AttributeValue, EncodeError, Feature, QualifiedName, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A property declared by a feature type
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropertyDescriptor {
    pub name: String,
    /// Whether the property may be absent or null
    pub nillable: bool,
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<String>, nillable: bool) -> Self {
        Self {
            name: name.into(),
            nillable,
        }
    }
}

/// Schema element information for the features of one collection
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeatureTypeInfo {
    /// Local name of the feature element
    pub type_name: String,
    /// Namespace of the feature element and its properties
    pub namespace: String,
    /// Prefix bound to `namespace` in the output
    pub prefix: String,
    /// Name of the property element holding the geometry
    pub geometry_property: String,
    /// Declared properties in schema order; empty means "whatever the feature has"
    pub declared: Vec<PropertyDescriptor>,
}

impl FeatureTypeInfo {
    pub fn new(
        type_name: impl Into<String>,
        namespace: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            namespace: namespace.into(),
            prefix: prefix.into(),
            geometry_property: "geometry".to_string(),
            declared: Vec::new(),
        }
    }

    pub fn with_geometry_property(mut self, name: impl Into<String>) -> Self {
        self.geometry_property = name.into();
        self
    }

    pub fn with_declared(mut self, declared: Vec<PropertyDescriptor>) -> Self {
        self.declared = declared;
        self
    }

    /// Qualified name of the feature element
    pub fn element_name(&self) -> QualifiedName {
        self.property_name(&self.type_name)
    }

    /// Qualified name of a property element of this type
    pub fn property_name(&self, local_name: &str) -> QualifiedName {
        QualifiedName::new(
            self.namespace.clone(),
            local_name.to_string(),
            self.prefix.clone(),
        )
    }
}

/// Enumerates the (name, value) pairs a feature declares
pub trait SchemaIntrospector: Send + Sync {
    /// # Errors
    ///
    /// Returns [`EncodeError::SchemaIntrospection`] when the feature does not
    /// satisfy its declared type.
    fn declared_properties<'f>(
        &self,
        feature: &'f Feature,
        element: &FeatureTypeInfo,
    ) -> Result<Vec<(&'f str, &'f AttributeValue)>>;
}

/// Introspector following [`FeatureTypeInfo::declared`]
///
/// The geometry property is never returned since it is encoded separately.
/// Null values are skipped; a non-nillable declared property that is missing
/// or null is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredPropertyIntrospector;

impl SchemaIntrospector for DeclaredPropertyIntrospector {
    fn declared_properties<'f>(
        &self,
        feature: &'f Feature,
        element: &FeatureTypeInfo,
    ) -> Result<Vec<(&'f str, &'f AttributeValue)>> {
        let is_geometry = |name: &str| name == element.geometry_property;

        if element.declared.is_empty() {
            return Ok(feature
                .properties
                .iter()
                .filter(|(name, value)| !is_geometry(name.as_str()) && !value.is_null())
                .map(|(name, value)| (name.as_str(), value))
                .collect());
        }

        let mut properties = Vec::with_capacity(element.declared.len());
        for descriptor in element.declared.iter().filter(|d| !is_geometry(d.name.as_str())) {
            let found = feature
                .properties
                .iter()
                .find(|(name, _)| *name == descriptor.name);
            match found {
                Some((name, value)) if !value.is_null() => properties.push((name.as_str(), value)),
                _ if descriptor.nillable => {}
                _ => {
                    return Err(EncodeError::SchemaIntrospection {
                        feature_id: feature.id.clone(),
                        reason: format!("required property '{}' is missing", descriptor.name),
                    });
                }
            }
        }
        Ok(properties)
    }
}
