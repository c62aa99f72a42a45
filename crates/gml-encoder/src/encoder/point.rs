//! Point and MultiPoint encoders

use super::{GeometryContext, GeometryEncoder, GmlNames, write_pos, wrong_kind};
use crate::{AttributeSet, Geometry, Result};
use geo::Point;

/// `gml:Point` with a single `gml:pos`
#[derive(Debug, Clone)]
pub struct PointEncoder {
    names: GmlNames,
}

impl PointEncoder {
    pub(crate) fn new(names: GmlNames) -> Self {
        Self { names }
    }
}

pub(crate) fn write_point(
    ctx: &mut GeometryContext<'_>,
    names: &GmlNames,
    point: &Point<f64>,
    attributes: &AttributeSet,
) -> Result<()> {
    ctx.writer.start_element(&names.point, Some(attributes))?;
    write_pos(ctx, names, &point.0)?;
    ctx.writer.end_element(&names.point)
}

impl GeometryEncoder for PointEncoder {
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
        let Geometry::Point(point) = geometry else {
            return Err(wrong_kind("PointEncoder", geometry));
        };
        write_point(ctx, &self.names, point, &attributes)
    }
}

/// `gml:MultiPoint` with one `gml:pointMember` per point
#[derive(Debug, Clone)]
pub struct MultiPointEncoder {
    names: GmlNames,
}

impl MultiPointEncoder {
    pub(crate) fn new(names: GmlNames) -> Self {
        Self { names }
    }
}

impl GeometryEncoder for MultiPointEncoder {
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
        let Geometry::MultiPoint(points) = geometry else {
            return Err(wrong_kind("MultiPointEncoder", geometry));
        };
        let names = &self.names;
        ctx.writer.start_element(&names.multi_point, Some(&attributes))?;
        for (i, point) in points.iter().enumerate() {
            ctx.writer.start_element(&names.point_member, None)?;
            let member_id = format!("{}.{}", id, i + 1);
            write_point(ctx, names, point, &names.id_attributes(&member_id))?;
            ctx.writer.end_element(&names.point_member)?;
        }
        ctx.writer.end_element(&names.multi_point)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{names, render};
    use super::*;
    use geo::{MultiPoint, point};

    #[test]
    fn test_point_markup() {
        let encoder = PointEncoder::new(names());
        let xml = render(&encoder, &Geometry::Point(point!(x: 1.5, y: -2.0)), "f.geom").unwrap();
        assert_eq!(
            xml,
            r#"<gml:Point gml:id="f.geom"><gml:pos>1.5 -2</gml:pos></gml:Point>"#
        );
    }

    #[test]
    fn test_multi_point_members_get_derived_ids() {
        let encoder = MultiPointEncoder::new(names());
        let points = MultiPoint::new(vec![point!(x: 0.0, y: 0.0), point!(x: 1.0, y: 1.0)]);
        let xml = render(&encoder, &Geometry::MultiPoint(points), "f.geom").unwrap();
        assert_eq!(
            xml,
            concat!(
                r#"<gml:MultiPoint gml:id="f.geom">"#,
                r#"<gml:pointMember><gml:Point gml:id="f.geom.1"><gml:pos>0 0</gml:pos></gml:Point></gml:pointMember>"#,
                r#"<gml:pointMember><gml:Point gml:id="f.geom.2"><gml:pos>1 1</gml:pos></gml:Point></gml:pointMember>"#,
                r#"</gml:MultiPoint>"#
            )
        );
    }

    #[test]
    fn test_wrong_kind_is_rejected() {
        let encoder = PointEncoder::new(names());
        let points = Geometry::MultiPoint(MultiPoint::new(vec![point!(x: 0.0, y: 0.0)]));
        assert!(render(&encoder, &points, "x").is_err());
    }
}
