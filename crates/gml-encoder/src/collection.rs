//! FeatureCollectionEncoder - Streams a feature collection as one document
//!
//! The engine opens the collection root, then for every feature asks the
//! delegate for the member wrapping, the feature's attributes and the
//! geometry encoder of the feature's shape kind. It has no per-shape or
//! per-schema logic of its own.

use crate::encoder::GeometryContext;
use crate::writer::MarkupWriter;
use crate::{
    AttributeSet, EncodingDelegate, Feature, FeatureTypeInfo, Gml32Delegate, GmlConfiguration,
    NamespaceContext, QualifiedName, Result, ShapeKind, WFS_NAMESPACE, WFS_SCHEMA_LOCATION,
    WfsConfiguration, WrappingState, WrappingStep, XSI_NAMESPACE,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What one call to [`FeatureCollectionEncoder::encode`] wrote
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EncodeSummary {
    /// Number of features written
    pub features: usize,
    /// Number of geometries written, per shape kind
    pub geometries: BTreeMap<ShapeKind, usize>,
}

impl EncodeSummary {
    /// Total number of geometries across all kinds
    pub fn geometry_count(&self) -> usize {
        self.geometries.values().sum()
    }
}

/// Streaming feature collection engine parameterized by an [`EncodingDelegate`]
#[derive(Debug, Clone)]
pub struct FeatureCollectionEncoder<D: EncodingDelegate> {
    delegate: D,
    namespaces: NamespaceContext,
    collection: WfsConfiguration,
    encode_bounds: bool,
}

impl FeatureCollectionEncoder<Gml32Delegate> {
    /// GML 3.2 encoder with the default namespace bindings
    pub fn gml32(configuration: &GmlConfiguration) -> Self {
        let namespaces = NamespaceContext::default();
        let delegate = Gml32Delegate::new(&namespaces, configuration, configuration.srs_syntax);
        let collection = WfsConfiguration {
            gml: Some(configuration.clone()),
            ..WfsConfiguration::default()
        };
        Self::new(delegate, namespaces, collection)
    }

    /// GML 3.2 encoder whose settings come from a WFS configuration
    ///
    /// Precision and GML options are taken from the configuration's GML
    /// dependency, or the defaults when it has none.
    pub fn wfs(configuration: &WfsConfiguration, namespaces: NamespaceContext) -> Self {
        let srs_syntax = configuration.gml_or_default().srs_syntax;
        let delegate = Gml32Delegate::new(&namespaces, configuration, srs_syntax);
        Self::new(delegate, namespaces, configuration.clone())
    }
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl<D: EncodingDelegate> FeatureCollectionEncoder<D> {
    pub fn new(delegate: D, namespaces: NamespaceContext, collection: WfsConfiguration) -> Self {
        let encode_bounds = collection.gml_or_default().encode_feature_bounds;
        Self {
            delegate,
            namespaces,
            collection,
            encode_bounds,
        }
    }

    #[inline]
    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    /// Write `features` as one collection document
    ///
    /// Features are written in iteration order, each inside the member
    /// element of the delegate.
    ///
    /// # Errors
    ///
    /// The first failure of any collaborator (writer, schema introspection,
    /// CRS resolution, geometry encoding) aborts the document. Markup already
    /// written is not retracted.
    pub fn encode<'f, I>(
        &self,
        features: I,
        feature_type: &FeatureTypeInfo,
        writer: &mut dyn MarkupWriter,
    ) -> Result<EncodeSummary>
    where
        I: IntoIterator<Item = &'f Feature>,
        I::IntoIter: ExactSizeIterator,
    {
        #[cfg(feature = "profiling")]
        profiling::scope!("collection::encode");

        let features = features.into_iter();
        let count = features.len();
        let mut state = WrappingState::default();
        let mut summary = EncodeSummary::default();

        writer.start_document()?;
        let root = self.open_collection(feature_type, count, writer)?;

        self.delegate.start_features(writer)?;
        advance(&mut state, WrappingStep::StartFeatures);

        for feature in features {
            self.delegate.start_feature(writer)?;
            advance(&mut state, WrappingStep::StartFeature);

            self.encode_feature(feature, feature_type, writer, &mut summary)?;

            self.delegate.end_feature(writer)?;
            advance(&mut state, WrappingStep::EndFeature);
            summary.features += 1;
        }

        self.delegate.end_features(writer)?;
        advance(&mut state, WrappingStep::EndFeatures);

        writer.end_element(&root)?;
        writer.end_document()?;

        tracing::info!(
            "Encoded {} features with {} geometries as {}",
            summary.features,
            summary.geometry_count(),
            self.delegate.schema()
        );
        Ok(summary)
    }

    /// Open the collection root with its namespace declarations and counts
    ///
    /// Every prefix is declared once. The feature type's binding must not
    /// clash with the bindings already in use.
    fn open_collection(
        &self,
        feature_type: &FeatureTypeInfo,
        count: usize,
        writer: &mut dyn MarkupWriter,
    ) -> Result<QualifiedName> {
        let mut namespaces = NamespaceContext::empty();
        for (prefix, uri) in self.namespaces.iter() {
            namespaces.try_bind(prefix, uri)?;
        }
        let schema = self.delegate.schema();
        if namespaces.prefix_for(schema.namespace()).is_none() {
            namespaces.try_bind(self.delegate.gml_prefix(), schema.namespace())?;
        }
        if namespaces.prefix_for(WFS_NAMESPACE).is_none() {
            namespaces.try_bind("wfs", WFS_NAMESPACE)?;
        }
        namespaces.try_bind(&feature_type.prefix, &feature_type.namespace)?;

        let wfs_prefix = namespaces.prefix_for(WFS_NAMESPACE).unwrap_or("wfs");
        let root = self.collection.collection_name(wfs_prefix);

        let mut attrs = AttributeSet::new();
        for (prefix, uri) in namespaces.iter() {
            attrs.declare_namespace(prefix, uri);
        }
        if let Some(xsi) = namespaces.prefix_for(XSI_NAMESPACE) {
            let locations = format!(
                "{} {} {} {}",
                WFS_NAMESPACE,
                WFS_SCHEMA_LOCATION,
                schema.namespace(),
                schema.schema_location()
            );
            attrs.add(
                QualifiedName::new(XSI_NAMESPACE, "schemaLocation", xsi.to_string()),
                locations,
            );
        }
        attrs.add(QualifiedName::unqualified("numberMatched"), count.to_string());
        attrs.add(QualifiedName::unqualified("numberReturned"), count.to_string());

        writer.start_element(&root, Some(&attrs))?;
        Ok(root)
    }

    fn encode_feature(
        &self,
        feature: &Feature,
        feature_type: &FeatureTypeInfo,
        writer: &mut dyn MarkupWriter,
        summary: &mut EncodeSummary,
    ) -> Result<()> {
        tracing::trace!("Encoding feature {}", feature.id);
        let delegate = &self.delegate;

        let mut attrs = AttributeSet::new();
        delegate.init_feature_id_attribute(&mut attrs);
        attrs.set_value(delegate.attributes().gml_id_name(), feature.id.as_str());

        let element = feature_type.element_name();
        writer.start_element(&element, Some(&attrs))?;

        if self.encode_bounds {
            if let Some(geometry) = &feature.geometry {
                delegate.envelope_encoder().encode(
                    geometry,
                    feature.crs.as_ref(),
                    writer,
                    &delegate.session().formatter(),
                )?;
            }
        }

        for (name, value) in delegate.feature_properties(feature, feature_type)? {
            let property = feature_type.property_name(name);
            writer.start_element(&property, None)?;
            writer.characters(&value.to_string())?;
            writer.end_element(&property)?;
        }

        if let Some(geometry) = &feature.geometry {
            let property = feature_type.property_name(&feature_type.geometry_property);
            let id = format!("{}.geom", feature.id);

            let mut geometry_attrs = AttributeSet::new();
            geometry_attrs.add(delegate.attributes().gml_id_name().clone(), id.as_str());
            match &feature.crs {
                Some(crs) => delegate.set_srs_name(&mut geometry_attrs, crs)?,
                None => tracing::warn!("Feature {} has a geometry but no CRS", feature.id),
            }
            delegate.set_geometry_dimension(&mut geometry_attrs, geometry.dimension());

            writer.start_element(&property, None)?;
            let mut ctx = GeometryContext {
                writer: &mut *writer,
                wrapping: delegate,
                formatter: delegate.session().formatter(),
            };
            delegate
                .geometry_encoders()
                .encode(geometry, geometry_attrs, &id, &mut ctx)?;
            writer.end_element(&property)?;

            *summary.geometries.entry(geometry.kind()).or_default() += 1;
        }

        writer.end_element(&element)
    }
}

/// Move the wrapping state machine; an illegal step is an engine bug
fn advance(state: &mut WrappingState, step: WrappingStep) {
    let next = state.advance(step);
    debug_assert!(
        next.is_some(),
        "wrapping step {:?} is not allowed in state {:?}",
        step,
        state
    );
    if let Some(next) = next {
        *state = next;
    }
}
