//! EncodingDelegate - Schema-specific side of the feature collection encoder
//!
//! The collection engine is generic; everything that depends on the schema
//! profile (prefix, precision, geometry markup, member wrapping, attribute
//! synthesis) is asked of an [`EncodingDelegate`].

use crate::encoder::{EnvelopeEncoder, GmlNames};
use crate::writer::MarkupWriter;
use crate::{
    AttributeSet, AttributeSynthesizer, AttributeValue, AuthorityUriResolver, Configuration, Crs,
    CrsUriResolver, DeclaredPropertyIntrospector, Feature, FeatureTypeInfo, FeatureWrapping,
    GeometryEncoderRegistry, NamespaceContext, Result, SchemaIntrospector, SchemaProfile,
    SessionContext, SrsSyntax,
};
use std::sync::Arc;

/// Everything the collection engine needs from a schema profile
///
/// All accessors are fixed for the lifetime of the delegate.
pub trait EncodingDelegate: FeatureWrapping + Send + Sync {
    /// Values resolved when the session started
    fn session(&self) -> &SessionContext;

    /// Builders for the `srsName`, `srsDimension` and `gml:id` attributes
    fn attributes(&self) -> &AttributeSynthesizer;

    /// Encoder for every supported shape kind
    fn geometry_encoders(&self) -> &GeometryEncoderRegistry;

    /// Encoder for per-feature `gml:boundedBy`
    fn envelope_encoder(&self) -> &EnvelopeEncoder;

    /// Declared (name, value) pairs of `feature`, in schema order
    ///
    /// # Errors
    ///
    /// Propagates the failure of the schema introspection collaborator.
    fn feature_properties<'f>(
        &self,
        feature: &'f Feature,
        element: &FeatureTypeInfo,
    ) -> Result<Vec<(&'f str, &'f AttributeValue)>>;

    fn gml_prefix(&self) -> &str {
        self.session().gml_prefix()
    }

    fn schema(&self) -> SchemaProfile {
        self.session().profile()
    }

    fn num_decimals(&self) -> u32 {
        self.session().num_decimals()
    }

    /// Whether whole ordinates keep a decimal point (`1.0` rather than `1`)
    fn force_decimal_encoding(&self) -> bool {
        self.session().force_decimal()
    }

    fn set_srs_name(&self, attrs: &mut AttributeSet, crs: &Crs) -> Result<()> {
        self.attributes().set_srs_name(attrs, crs)
    }

    fn set_geometry_dimension(&self, attrs: &mut AttributeSet, dimension: u32) {
        self.attributes().set_geometry_dimension(attrs, dimension)
    }

    fn init_feature_id_attribute(&self, attrs: &mut AttributeSet) {
        self.attributes().init_feature_id_attribute(attrs)
    }
}

/// GML 3.2 delegate
///
/// Features are wrapped in `<gml:member>`, coordinates are written inline
/// (no tuple elements) and whole ordinates carry no decimal point.
#[derive(Clone)]
pub struct Gml32Delegate {
    session: SessionContext,
    attributes: AttributeSynthesizer,
    encoders: Arc<GeometryEncoderRegistry>,
    envelope: EnvelopeEncoder,
    introspector: Arc<dyn SchemaIntrospector>,
}

impl std::fmt::Debug for Gml32Delegate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gml32Delegate")
            .field("session", &self.session)
            .field("encoders", &self.encoders)
            .finish_non_exhaustive()
    }
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Gml32Delegate {
    /// Delegate with the default CRS resolver and schema introspector
    pub fn new(
        namespaces: &NamespaceContext,
        configuration: &dyn Configuration,
        srs_syntax: SrsSyntax,
    ) -> Self {
        Self::with_collaborators(
            namespaces,
            configuration,
            srs_syntax,
            Arc::new(AuthorityUriResolver),
            Arc::new(DeclaredPropertyIntrospector),
        )
    }

    /// Delegate with caller-supplied CRS resolution and schema introspection
    pub fn with_collaborators(
        namespaces: &NamespaceContext,
        configuration: &dyn Configuration,
        srs_syntax: SrsSyntax,
        resolver: Arc<dyn CrsUriResolver>,
        introspector: Arc<dyn SchemaIntrospector>,
    ) -> Self {
        let session = SessionContext::new(
            SchemaProfile::Gml32,
            namespaces,
            configuration,
            srs_syntax,
            false,
        );
        let attributes = AttributeSynthesizer::new(srs_syntax, session.gml_prefix(), resolver);
        let encoders = Arc::new(GeometryEncoderRegistry::build(&session));
        let envelope = EnvelopeEncoder::new(GmlNames::new(&session), attributes.clone());

        tracing::debug!(
            "Started {} session: prefix '{}', {} decimals, {} srsName syntax",
            session.profile(),
            session.gml_prefix(),
            session.num_decimals(),
            session.srs_syntax()
        );

        Self {
            session,
            attributes,
            encoders,
            envelope,
            introspector,
        }
    }

    /// Reuse an existing registry instead of the one built for this session
    ///
    /// The registry must have been built for the same GML prefix.
    pub fn with_geometry_encoders(mut self, encoders: Arc<GeometryEncoderRegistry>) -> Self {
        self.encoders = encoders;
        self
    }

    /// Handle to the registry for sharing with other sessions
    pub fn shared_geometry_encoders(&self) -> Arc<GeometryEncoderRegistry> {
        Arc::clone(&self.encoders)
    }
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl FeatureWrapping for Gml32Delegate {
    fn start_features(&self, _writer: &mut dyn MarkupWriter) -> Result<()> {
        Ok(())
    }

    fn start_feature(&self, writer: &mut dyn MarkupWriter) -> Result<()> {
        writer.start_element(self.session.member(), None)
    }

    fn end_feature(&self, writer: &mut dyn MarkupWriter) -> Result<()> {
        writer.end_element(self.session.member())
    }

    fn end_features(&self, _writer: &mut dyn MarkupWriter) -> Result<()> {
        Ok(())
    }

    fn supports_tuples(&self) -> bool {
        false
    }

    fn start_tuple(&self, _writer: &mut dyn MarkupWriter) -> Result<()> {
        Ok(())
    }

    fn end_tuple(&self, _writer: &mut dyn MarkupWriter) -> Result<()> {
        Ok(())
    }
}

impl EncodingDelegate for Gml32Delegate {
    #[inline]
    fn session(&self) -> &SessionContext {
        &self.session
    }

    #[inline]
    fn attributes(&self) -> &AttributeSynthesizer {
        &self.attributes
    }

    #[inline]
    fn geometry_encoders(&self) -> &GeometryEncoderRegistry {
        &self.encoders
    }

    #[inline]
    fn envelope_encoder(&self) -> &EnvelopeEncoder {
        &self.envelope
    }

    fn feature_properties<'f>(
        &self,
        feature: &'f Feature,
        element: &FeatureTypeInfo,
    ) -> Result<Vec<(&'f str, &'f AttributeValue)>> {
        self.introspector.declared_properties(feature, element)
    }
}
