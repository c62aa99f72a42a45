//! Attribute sets and the encoding-time attribute builders

use crate::{Crs, CrsUriResolver, GML_NAMESPACE, QualifiedName, Result, SrsSyntax};
use std::sync::Arc;

const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// A single attribute to be written on an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: QualifiedName,
    pub value: String,
}

/// Ordered attributes of one element
///
/// A set belongs to exactly one element: create a fresh set per feature and
/// per geometry instead of reusing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    attributes: Vec<Attribute>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute
    pub fn add(&mut self, name: QualifiedName, value: impl Into<String>) {
        self.attributes.push(Attribute {
            name,
            value: value.into(),
        });
    }

    /// Overwrite the value of an existing attribute
    ///
    /// Returns `false` when no attribute called `name` exists.
    pub fn set_value(&mut self, name: &QualifiedName, value: impl Into<String>) -> bool {
        match self.attributes.iter_mut().find(|a| a.name == *name) {
            Some(attribute) => {
                attribute.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Append an `xmlns:prefix="uri"` declaration
    pub fn declare_namespace(&mut self, prefix: &str, uri: &str) {
        self.add(
            QualifiedName::new(XMLNS_NAMESPACE, prefix.to_string(), "xmlns"),
            uri,
        );
    }

    pub fn get(&self, name: &QualifiedName) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == *name)
            .map(|a| a.value.as_str())
    }

    /// Number of attributes called `name`
    pub fn count(&self, name: &QualifiedName) -> usize {
        self.attributes.iter().filter(|a| a.name == *name).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Builds the `srsName`, `srsDimension` and `gml:id` attributes
///
/// None of the builders write markup; they only populate an [`AttributeSet`].
#[derive(Clone)]
pub struct AttributeSynthesizer {
    srs_syntax: SrsSyntax,
    gml_id: QualifiedName,
    resolver: Arc<dyn CrsUriResolver>,
}

impl std::fmt::Debug for AttributeSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeSynthesizer")
            .field("srs_syntax", &self.srs_syntax)
            .field("gml_id", &self.gml_id.qualified())
            .finish_non_exhaustive()
    }
}

impl AttributeSynthesizer {
    pub fn new(srs_syntax: SrsSyntax, gml_prefix: &str, resolver: Arc<dyn CrsUriResolver>) -> Self {
        Self {
            srs_syntax,
            gml_id: QualifiedName::new(GML_NAMESPACE, "id", gml_prefix.to_string()),
            resolver,
        }
    }

    /// Name of the `gml:id` attribute for this session
    #[inline]
    pub fn gml_id_name(&self) -> &QualifiedName {
        &self.gml_id
    }

    #[inline]
    pub fn srs_syntax(&self) -> SrsSyntax {
        self.srs_syntax
    }

    /// Add `srsName` with the CRS rendered in the session's syntax
    ///
    /// # Errors
    ///
    /// Propagates [`EncodeError::CrsUriResolution`](crate::EncodeError::CrsUriResolution);
    /// nothing is added in that case.
    pub fn set_srs_name(&self, attrs: &mut AttributeSet, crs: &Crs) -> Result<()> {
        let uri = self.resolver.to_uri(crs, self.srs_syntax)?;
        attrs.add(QualifiedName::unqualified("srsName"), uri);
        Ok(())
    }

    /// Add `srsDimension` as decimal text
    pub fn set_geometry_dimension(&self, attrs: &mut AttributeSet, dimension: u32) {
        attrs.add(QualifiedName::unqualified("srsDimension"), dimension.to_string());
    }

    /// Reserve the `gml:id` slot with an empty value
    ///
    /// The caller fills in the identifier with [`AttributeSet::set_value`].
    pub fn init_feature_id_attribute(&self, attrs: &mut AttributeSet) {
        attrs.add(self.gml_id.clone(), "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AuthorityUriResolver, EncodeError};

    fn synthesizer() -> AttributeSynthesizer {
        AttributeSynthesizer::new(SrsSyntax::OgcUrn, "gml", Arc::new(AuthorityUriResolver))
    }

    struct FixedResolver;

    impl CrsUriResolver for FixedResolver {
        fn to_uri(&self, _crs: &Crs, _syntax: SrsSyntax) -> Result<String> {
            Ok("urn:test:crs".to_string())
        }
    }

    #[test]
    fn test_srs_name_uses_resolver_value() {
        let synth = AttributeSynthesizer::new(SrsSyntax::EpsgCode, "gml", Arc::new(FixedResolver));
        let mut attrs = AttributeSet::new();
        synth.set_srs_name(&mut attrs, &Crs::epsg(3857)).unwrap();

        let srs_name = QualifiedName::unqualified("srsName");
        assert_eq!(attrs.count(&srs_name), 1);
        assert_eq!(attrs.get(&srs_name), Some("urn:test:crs"));
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn test_srs_name_failure_appends_nothing() {
        let mut attrs = AttributeSet::new();
        let result = synthesizer().set_srs_name(&mut attrs, &Crs::unidentified("engineering"));
        assert!(matches!(result, Err(EncodeError::CrsUriResolution { .. })));
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_geometry_dimension_text() {
        let synth = synthesizer();
        let dimension = QualifiedName::unqualified("srsDimension");

        let mut attrs = AttributeSet::new();
        synth.set_geometry_dimension(&mut attrs, 3);
        assert_eq!(attrs.get(&dimension), Some("3"));

        let mut attrs = AttributeSet::new();
        synth.set_geometry_dimension(&mut attrs, 2);
        assert_eq!(attrs.get(&dimension), Some("2"));
    }

    #[test]
    fn test_feature_id_placeholder_then_overwrite() {
        let synth = AttributeSynthesizer::new(SrsSyntax::OgcUrn, "g32", Arc::new(AuthorityUriResolver));
        let mut attrs = AttributeSet::new();
        synth.init_feature_id_attribute(&mut attrs);

        let id = synth.gml_id_name().clone();
        assert_eq!(id.qualified(), "g32:id");
        assert_eq!(id.namespace(), GML_NAMESPACE);
        assert_eq!(attrs.get(&id), Some(""));

        assert!(attrs.set_value(&id, "roads.1"));
        assert_eq!(attrs.get(&id), Some("roads.1"));
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn test_set_value_on_missing_attribute() {
        let mut attrs = AttributeSet::new();
        assert!(!attrs.set_value(&QualifiedName::unqualified("srsName"), "x"));
        assert!(attrs.is_empty());
    }
}
