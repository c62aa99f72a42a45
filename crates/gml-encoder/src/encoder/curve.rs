//! Curved line encoder
//!
//! Circular strings, compound curves and their closed variants all become a
//! `gml:Curve` whose `gml:segments` hold one `gml:ArcString` or
//! `gml:LineStringSegment` per piece.

use super::{GeometryContext, GeometryEncoder, GmlNames, write_pos_list, wrong_kind};
use crate::{AttributeSet, CircularString, CurveSegment, Geometry, Result};

/// Shared by the four curve kinds
#[derive(Debug, Clone)]
pub struct CurveEncoder {
    names: GmlNames,
}

impl CurveEncoder {
    pub(crate) fn new(names: GmlNames) -> Self {
        Self { names }
    }

    fn write_arcs(&self, ctx: &mut GeometryContext<'_>, arcs: &CircularString) -> Result<()> {
        ctx.writer.start_element(&self.names.arc_string, None)?;
        write_pos_list(ctx, &self.names, arcs.control_points())?;
        ctx.writer.end_element(&self.names.arc_string)
    }

    fn write_segment(&self, ctx: &mut GeometryContext<'_>, segment: &CurveSegment) -> Result<()> {
        match segment {
            CurveSegment::Circular(arcs) => self.write_arcs(ctx, arcs),
            CurveSegment::Linear(line) => {
                ctx.writer.start_element(&self.names.line_string_segment, None)?;
                write_pos_list(ctx, &self.names, &line.0)?;
                ctx.writer.end_element(&self.names.line_string_segment)
            }
        }
    }
}

impl GeometryEncoder for CurveEncoder {
    fn gml_prefix(&self) -> &str {
        &self.names.prefix
    }

    fn encode(
        &self,
        geometry: &Geometry,
        attributes: AttributeSet,
        _id: &str,
        ctx: &mut GeometryContext<'_>,
    ) -> Result<()> {
        if !geometry.kind().is_curve() {
            return Err(wrong_kind("CurveEncoder", geometry));
        }

        let names = &self.names;
        ctx.writer.start_element(&names.curve, Some(&attributes))?;
        ctx.writer.start_element(&names.segments, None)?;
        match geometry {
            Geometry::CircularString(arcs) => self.write_arcs(ctx, arcs)?,
            Geometry::CircularRing(ring) => self.write_arcs(ctx, ring.arcs())?,
            Geometry::CompoundCurve(curve) => {
                for segment in curve.segments() {
                    self.write_segment(ctx, segment)?;
                }
            }
            Geometry::CompoundRing(ring) => {
                for segment in ring.curve().segments() {
                    self.write_segment(ctx, segment)?;
                }
            }
            _ => return Err(wrong_kind("CurveEncoder", geometry)),
        }
        ctx.writer.end_element(&names.segments)?;
        ctx.writer.end_element(&names.curve)
    }
}
