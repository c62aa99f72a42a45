//! LineString, LinearRing and MultiLineString encoders

use super::{GeometryContext, GeometryEncoder, GmlNames, write_pos_list, wrong_kind};
use crate::{AttributeSet, Geometry, QualifiedName, Result};
use geo::LineString;

/// `<element attributes><gml:posList/></element>`
pub(crate) fn write_line(
    ctx: &mut GeometryContext<'_>,
    names: &GmlNames,
    element: &QualifiedName,
    line: &LineString<f64>,
    attributes: Option<&AttributeSet>,
) -> Result<()> {
    ctx.writer.start_element(element, attributes)?;
    write_pos_list(ctx, names, &line.0)?;
    ctx.writer.end_element(element)
}

/// `gml:LineString` with a `gml:posList`
#[derive(Debug, Clone)]
pub struct LineStringEncoder {
    names: GmlNames,
}

impl LineStringEncoder {
    pub(crate) fn new(names: GmlNames) -> Self {
        Self { names }
    }
}

impl GeometryEncoder for LineStringEncoder {
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
        let Geometry::LineString(line) = geometry else {
            return Err(wrong_kind("LineStringEncoder", geometry));
        };
        write_line(ctx, &self.names, &self.names.line_string, line, Some(&attributes))
    }
}

/// `gml:LinearRing` with a `gml:posList`
#[derive(Debug, Clone)]
pub struct LinearRingEncoder {
    names: GmlNames,
}

impl LinearRingEncoder {
    pub(crate) fn new(names: GmlNames) -> Self {
        Self { names }
    }
}

impl GeometryEncoder for LinearRingEncoder {
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
        let Geometry::LinearRing(ring) = geometry else {
            return Err(wrong_kind("LinearRingEncoder", geometry));
        };
        write_line(
            ctx,
            &self.names,
            &self.names.linear_ring,
            ring.line(),
            Some(&attributes),
        )
    }
}

/// `gml:MultiCurve` with one `gml:curveMember/gml:LineString` per line
#[derive(Debug, Clone)]
pub struct MultiLineStringEncoder {
    names: GmlNames,
}

impl MultiLineStringEncoder {
    pub(crate) fn new(names: GmlNames) -> Self {
        Self { names }
    }
}

impl GeometryEncoder for MultiLineStringEncoder {
    fn gml_prefix(&self) -> &str {
        &self.names.prefix
    }

    fn encode(
        &self,
        geometry: &Geometry,
        attributes: AttributeSet,
        id: &str,
        ctx: &mut GeometryContext<'_>,
    ) -> Result<()> {
        let Geometry::MultiLineString(lines) = geometry else {
            return Err(wrong_kind("MultiLineStringEncoder", geometry));
        };
        let names = &self.names;
        ctx.writer.start_element(&names.multi_curve, Some(&attributes))?;
        for (i, line) in lines.iter().enumerate() {
            ctx.writer.start_element(&names.curve_member, None)?;
            let member_attrs = names.id_attributes(&format!("{}.{}", id, i + 1));
            write_line(ctx, names, &names.line_string, line, Some(&member_attrs))?;
            ctx.writer.end_element(&names.curve_member)?;
        }
        ctx.writer.end_element(&names.multi_curve)
    }
}
