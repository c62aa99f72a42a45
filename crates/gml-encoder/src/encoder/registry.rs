//! Shape kind to encoder dispatch table

use super::{
    CurveEncoder, GeometryContext, GeometryEncoder, GmlNames, LineStringEncoder, LinearRingEncoder,
    MultiLineStringEncoder, MultiPointEncoder, MultiPolygonEncoder, PointEncoder, PolygonEncoder,
};
use crate::{AttributeSet, EncodeError, Geometry, Result, SessionContext, ShapeKind};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// One [`GeometryEncoder`] per [`ShapeKind`]
///
/// Fully populated by [`GeometryEncoderRegistry::build`] and never modified
/// afterwards, so a registry can be shared between sessions behind an `Arc`.
#[derive(Clone)]
pub struct GeometryEncoderRegistry {
    encoders: HashMap<ShapeKind, Arc<dyn GeometryEncoder>>,
}

impl fmt::Debug for GeometryEncoderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeometryEncoderRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

impl GeometryEncoderRegistry {
    /// Encoders for every shape kind, bound to the session's GML prefix
    pub fn build(session: &SessionContext) -> Self {
        let names = GmlNames::new(session);
        let curves: Arc<dyn GeometryEncoder> = Arc::new(CurveEncoder::new(names.clone()));

        let encoders = ShapeKind::ALL
            .into_iter()
            .map(|kind| {
                let encoder: Arc<dyn GeometryEncoder> = match kind {
                    ShapeKind::Point => Arc::new(PointEncoder::new(names.clone())),
                    ShapeKind::MultiPoint => Arc::new(MultiPointEncoder::new(names.clone())),
                    ShapeKind::LineString => Arc::new(LineStringEncoder::new(names.clone())),
                    ShapeKind::LinearRing => Arc::new(LinearRingEncoder::new(names.clone())),
                    ShapeKind::MultiLineString => {
                        Arc::new(MultiLineStringEncoder::new(names.clone()))
                    }
                    ShapeKind::Polygon => Arc::new(PolygonEncoder::new(names.clone())),
                    ShapeKind::MultiPolygon => Arc::new(MultiPolygonEncoder::new(names.clone())),
                    ShapeKind::CircularString
                    | ShapeKind::CompoundCurve
                    | ShapeKind::CircularRing
                    | ShapeKind::CompoundRing => Arc::clone(&curves),
                };
                (kind, encoder)
            })
            .collect();

        tracing::debug!(
            "Registered geometry encoders for {} shape kinds with prefix '{}'",
            ShapeKind::ALL.len(),
            session.gml_prefix()
        );
        Self { encoders }
    }

    /// Registry holding exactly the given encoders
    pub fn from_encoders(
        encoders: impl IntoIterator<Item = (ShapeKind, Arc<dyn GeometryEncoder>)>,
    ) -> Self {
        Self {
            encoders: encoders.into_iter().collect(),
        }
    }

    /// # Errors
    ///
    /// [`EncodeError::UnsupportedGeometryKind`] when nothing is registered
    /// for `kind`.
    pub fn get(&self, kind: ShapeKind) -> Result<&dyn GeometryEncoder> {
        self.encoders
            .get(&kind)
            .map(|encoder| encoder.as_ref())
            .ok_or(EncodeError::UnsupportedGeometryKind(kind))
    }

    /// Dispatch `geometry` to the encoder of its kind
    pub fn encode(
        &self,
        geometry: &Geometry,
        attributes: AttributeSet,
        id: &str,
        ctx: &mut GeometryContext<'_>,
    ) -> Result<()> {
        self.get(geometry.kind())?.encode(geometry, attributes, id, ctx)
    }

    /// Registered kinds in [`ShapeKind`] order
    pub fn kinds(&self) -> Vec<ShapeKind> {
        let mut kinds: Vec<ShapeKind> = self.encoders.keys().copied().collect();
        kinds.sort();
        kinds
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.encoders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{InlineTuples, session};
    use super::*;
    use crate::writer::{CoordinateFormatter, RecordingWriter};
    use crate::{GML_NAMESPACE, GmlConfiguration, NamespaceContext, SchemaProfile, SrsSyntax};
    use geo::point;

    #[test]
    fn test_every_kind_is_registered() {
        let registry = GeometryEncoderRegistry::build(&session());
        assert_eq!(registry.len(), ShapeKind::ALL.len());
        assert_eq!(registry.kinds(), ShapeKind::ALL.to_vec());
        for kind in ShapeKind::ALL {
            assert_eq!(registry.get(kind).unwrap().gml_prefix(), "gml");
        }
    }

    #[test]
    fn test_encoders_are_bound_to_the_session_prefix() {
        let namespaces = NamespaceContext::empty().with_binding("gml32", GML_NAMESPACE);
        let session = SessionContext::new(
            SchemaProfile::Gml32,
            &namespaces,
            &GmlConfiguration::default(),
            SrsSyntax::OgcUrn,
            false,
        );
        let registry = GeometryEncoderRegistry::build(&session);
        assert!(
            ShapeKind::ALL
                .iter()
                .all(|kind| registry.get(*kind).unwrap().gml_prefix() == "gml32")
        );
    }

    #[test]
    fn test_curve_kinds_share_one_encoder() {
        let registry = GeometryEncoderRegistry::build(&session());
        let circular = registry.encoders[&ShapeKind::CircularString].clone();
        let compound = registry.encoders[&ShapeKind::CompoundRing].clone();
        assert!(Arc::ptr_eq(&circular, &compound));
    }

    #[test]
    fn test_missing_kind_is_unsupported() {
        let registry = GeometryEncoderRegistry::from_encoders(Vec::new());
        assert!(registry.is_empty());
        assert!(matches!(
            registry.get(ShapeKind::Polygon),
            Err(EncodeError::UnsupportedGeometryKind(ShapeKind::Polygon))
        ));

        let mut writer = RecordingWriter::new();
        let mut ctx = GeometryContext {
            writer: &mut writer,
            wrapping: &InlineTuples,
            formatter: CoordinateFormatter::new(6, false),
        };
        let result = registry.encode(
            &Geometry::Point(point!(x: 1.0, y: 1.0)),
            AttributeSet::new(),
            "p",
            &mut ctx,
        );
        assert!(matches!(
            result,
            Err(EncodeError::UnsupportedGeometryKind(ShapeKind::Point))
        ));
        assert!(writer.events.is_empty());
    }

    #[test]
    fn test_dispatch_by_kind() {
        let registry = GeometryEncoderRegistry::build(&session());
        let mut writer = RecordingWriter::new();
        let mut ctx = GeometryContext {
            writer: &mut writer,
            wrapping: &InlineTuples,
            formatter: CoordinateFormatter::new(6, false),
        };
        registry
            .encode(&Geometry::Point(point!(x: 1.0, y: 1.0)), AttributeSet::new(), "p", &mut ctx)
            .unwrap();
        assert_eq!(writer.started(), vec!["gml:Point", "gml:pos"]);
    }
}
