//! Polygon and MultiPolygon encoders

use super::line::write_line;
use super::{GeometryContext, GeometryEncoder, GmlNames, wrong_kind};
use crate::{AttributeSet, Geometry, Result};
use geo::Polygon;

pub(crate) fn write_polygon(
    ctx: &mut GeometryContext<'_>,
    names: &GmlNames,
    polygon: &Polygon<f64>,
    attributes: &AttributeSet,
) -> Result<()> {
    ctx.writer.start_element(&names.polygon, Some(attributes))?;

    ctx.writer.start_element(&names.exterior, None)?;
    write_line(ctx, names, &names.linear_ring, polygon.exterior(), None)?;
    ctx.writer.end_element(&names.exterior)?;

    for interior in polygon.interiors() {
        ctx.writer.start_element(&names.interior, None)?;
        write_line(ctx, names, &names.linear_ring, interior, None)?;
        ctx.writer.end_element(&names.interior)?;
    }

    ctx.writer.end_element(&names.polygon)
}

/// `gml:Polygon` with `gml:exterior` and `gml:interior` linear rings
#[derive(Debug, Clone)]
pub struct PolygonEncoder {
    names: GmlNames,
}

impl PolygonEncoder {
    pub(crate) fn new(names: GmlNames) -> Self {
        Self { names }
    }
}

impl GeometryEncoder for PolygonEncoder {
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
        let Geometry::Polygon(polygon) = geometry else {
            return Err(wrong_kind("PolygonEncoder", geometry));
        };
        write_polygon(ctx, &self.names, polygon, &attributes)
    }
}

/// `gml:MultiSurface` with one `gml:surfaceMember/gml:Polygon` per polygon
#[derive(Debug, Clone)]
pub struct MultiPolygonEncoder {
    names: GmlNames,
}

impl MultiPolygonEncoder {
    pub(crate) fn new(names: GmlNames) -> Self {
        Self { names }
    }
}

impl GeometryEncoder for MultiPolygonEncoder {
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
        let Geometry::MultiPolygon(polygons) = geometry else {
            return Err(wrong_kind("MultiPolygonEncoder", geometry));
        };
        let names = &self.names;
        ctx.writer.start_element(&names.multi_surface, Some(&attributes))?;
        for (i, polygon) in polygons.iter().enumerate() {
            ctx.writer.start_element(&names.surface_member, None)?;
            let member_id = format!("{}.{}", id, i + 1);
            write_polygon(ctx, names, polygon, &names.id_attributes(&member_id))?;
            ctx.writer.end_element(&names.surface_member)?;
        }
        ctx.writer.end_element(&names.multi_surface)
    }
}
