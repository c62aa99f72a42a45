//! Shape-specific GML 3.2 geometry encoders
//!
//! Every [`ShapeKind`](crate::ShapeKind) maps to one [`GeometryEncoder`] in a
//! [`GeometryEncoderRegistry`]. Encoders are built once per session, bound to
//! the session's GML prefix, and are read-only afterwards.

mod curve;
mod envelope;
mod line;
mod point;
mod polygon;
mod registry;

pub use curve::CurveEncoder;
pub use envelope::EnvelopeEncoder;
pub use line::{LineStringEncoder, LinearRingEncoder, MultiLineStringEncoder};
pub use point::{MultiPointEncoder, PointEncoder};
pub use polygon::{MultiPolygonEncoder, PolygonEncoder};
pub use registry::GeometryEncoderRegistry;

use crate::writer::{CoordinateFormatter, MarkupWriter};
use crate::{AttributeSet, EncodeError, FeatureWrapping, Geometry, QualifiedName, Result, SessionContext};
use geo::Coord;

/// Everything an encoder writes through for one geometry
pub struct GeometryContext<'a> {
    pub writer: &'a mut dyn MarkupWriter,
    pub wrapping: &'a dyn FeatureWrapping,
    pub formatter: CoordinateFormatter,
}

/// Writes the markup of one shape kind
pub trait GeometryEncoder: Send + Sync {
    /// Prefix of the GML namespace this encoder writes with
    fn gml_prefix(&self) -> &str;

    /// Write `geometry` as a complete element
    ///
    /// `attributes` go on the root element; `id` is the root's `gml:id` and
    /// the base for the ids of nested geometries.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::InvalidGeometry`] when handed a geometry of
    /// another kind, and propagates writer failures.
    fn encode(
        &self,
        geometry: &Geometry,
        attributes: AttributeSet,
        id: &str,
        ctx: &mut GeometryContext<'_>,
    ) -> Result<()>;
}

/// GML element and attribute names resolved for one session
#[derive(Debug, Clone)]
pub(crate) struct GmlNames {
    pub prefix: String,
    pub id: QualifiedName,
    pub point: QualifiedName,
    pub pos: QualifiedName,
    pub pos_list: QualifiedName,
    pub multi_point: QualifiedName,
    pub point_member: QualifiedName,
    pub line_string: QualifiedName,
    pub linear_ring: QualifiedName,
    pub multi_curve: QualifiedName,
    pub curve_member: QualifiedName,
    pub polygon: QualifiedName,
    pub exterior: QualifiedName,
    pub interior: QualifiedName,
    pub multi_surface: QualifiedName,
    pub surface_member: QualifiedName,
    pub curve: QualifiedName,
    pub segments: QualifiedName,
    pub line_string_segment: QualifiedName,
    pub arc_string: QualifiedName,
    pub bounded_by: QualifiedName,
    pub envelope: QualifiedName,
    pub lower_corner: QualifiedName,
    pub upper_corner: QualifiedName,
    pub null: QualifiedName,
}

impl GmlNames {
    pub fn new(session: &SessionContext) -> Self {
        Self {
            prefix: session.gml_prefix().to_string(),
            id: session.gml_name("id"),
            point: session.gml_name("Point"),
            pos: session.gml_name("pos"),
            pos_list: session.gml_name("posList"),
            multi_point: session.gml_name("MultiPoint"),
            point_member: session.gml_name("pointMember"),
            line_string: session.gml_name("LineString"),
            linear_ring: session.gml_name("LinearRing"),
            multi_curve: session.gml_name("MultiCurve"),
            curve_member: session.gml_name("curveMember"),
            polygon: session.gml_name("Polygon"),
            exterior: session.gml_name("exterior"),
            interior: session.gml_name("interior"),
            multi_surface: session.gml_name("MultiSurface"),
            surface_member: session.gml_name("surfaceMember"),
            curve: session.gml_name("Curve"),
            segments: session.gml_name("segments"),
            line_string_segment: session.gml_name("LineStringSegment"),
            arc_string: session.gml_name("ArcString"),
            bounded_by: session.gml_name("boundedBy"),
            envelope: session.gml_name("Envelope"),
            lower_corner: session.gml_name("lowerCorner"),
            upper_corner: session.gml_name("upperCorner"),
            null: session.gml_name("Null"),
        }
    }

    /// Attributes holding only a `gml:id`
    pub fn id_attributes(&self, id: &str) -> AttributeSet {
        let mut attrs = AttributeSet::new();
        attrs.add(self.id.clone(), id);
        attrs
    }
}

/// `<gml:pos>x y</gml:pos>`
pub(crate) fn write_pos(ctx: &mut GeometryContext<'_>, names: &GmlNames, coord: &Coord<f64>) -> Result<()> {
    ctx.writer.start_element(&names.pos, None)?;
    write_tuples(ctx, std::slice::from_ref(coord))?;
    ctx.writer.end_element(&names.pos)
}

/// `<gml:posList>x1 y1 x2 y2 ...</gml:posList>`
pub(crate) fn write_pos_list(
    ctx: &mut GeometryContext<'_>,
    names: &GmlNames,
    coords: &[Coord<f64>],
) -> Result<()> {
    ctx.writer.start_element(&names.pos_list, None)?;
    write_tuples(ctx, coords)?;
    ctx.writer.end_element(&names.pos_list)
}

/// Coordinates inline, or one wrapped tuple each when the profile asks for it
fn write_tuples(ctx: &mut GeometryContext<'_>, coords: &[Coord<f64>]) -> Result<()> {
    if !ctx.wrapping.supports_tuples() {
        let text = ctx.formatter.format_coords(coords);
        return ctx.writer.characters(&text);
    }
    for coord in coords {
        ctx.wrapping.start_tuple(ctx.writer)?;
        let text = ctx.formatter.format_coord(coord);
        ctx.writer.characters(&text)?;
        ctx.wrapping.end_tuple(ctx.writer)?;
    }
    Ok(())
}

pub(crate) fn wrong_kind(encoder: &str, geometry: &Geometry) -> EncodeError {
    EncodeError::InvalidGeometry(format!("{} cannot write a {}", encoder, geometry.kind()))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::writer::RecordingWriter;
    use crate::{GmlConfiguration, NamespaceContext, SchemaProfile, SrsSyntax};

    /// Wrapping without tuples, like GML 3.2
    pub struct InlineTuples;

    impl FeatureWrapping for InlineTuples {
        fn start_features(&self, _: &mut dyn MarkupWriter) -> Result<()> {
            Ok(())
        }
        fn start_feature(&self, _: &mut dyn MarkupWriter) -> Result<()> {
            Ok(())
        }
        fn end_feature(&self, _: &mut dyn MarkupWriter) -> Result<()> {
            Ok(())
        }
        fn end_features(&self, _: &mut dyn MarkupWriter) -> Result<()> {
            Ok(())
        }
        fn supports_tuples(&self) -> bool {
            false
        }
        fn start_tuple(&self, _: &mut dyn MarkupWriter) -> Result<()> {
            Ok(())
        }
        fn end_tuple(&self, _: &mut dyn MarkupWriter) -> Result<()> {
            Ok(())
        }
    }

    pub fn session() -> SessionContext {
        SessionContext::new(
            SchemaProfile::Gml32,
            &NamespaceContext::default(),
            &GmlConfiguration::default(),
            SrsSyntax::OgcUrn,
            false,
        )
    }

    pub fn names() -> GmlNames {
        GmlNames::new(&session())
    }

    /// Encode and return the recorded events as a compact string, e.g.
    /// `<gml:Point gml:id="p"><gml:pos>1 2</gml:pos></gml:Point>`
    pub fn render(encoder: &dyn GeometryEncoder, geometry: &Geometry, id: &str) -> Result<String> {
        let names = names();
        let mut writer = RecordingWriter::new();
        let mut ctx = GeometryContext {
            writer: &mut writer,
            wrapping: &InlineTuples,
            formatter: session().formatter(),
        };
        encoder.encode(geometry, names.id_attributes(id), id, &mut ctx)?;
        Ok(to_markup(&writer))
    }

    pub fn to_markup(writer: &RecordingWriter) -> String {
        use crate::writer::MarkupEvent;
        let mut out = String::new();
        for event in &writer.events {
            match event {
                MarkupEvent::Start(name, attrs) => {
                    out.push('<');
                    out.push_str(&name.qualified());
                    for a in attrs.iter() {
                        out.push_str(&format!(" {}=\"{}\"", a.name.qualified(), a.value));
                    }
                    out.push('>');
                }
                MarkupEvent::End(name) => out.push_str(&format!("</{}>", name.qualified())),
                MarkupEvent::Text(text) => out.push_str(text),
            }
        }
        out
    }
}
