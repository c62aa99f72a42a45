//! Feature bounds as `gml:boundedBy`

use super::GmlNames;
use crate::writer::{CoordinateFormatter, MarkupWriter};
use crate::{AttributeSet, AttributeSynthesizer, Crs, Geometry, Result};
use geo::Rect;

/// Writes `gml:boundedBy` with an `gml:Envelope`, or `gml:Null` when the
/// geometry has no extent
#[derive(Debug, Clone)]
pub struct EnvelopeEncoder {
    names: GmlNames,
    attributes: AttributeSynthesizer,
}

impl EnvelopeEncoder {
    pub(crate) fn new(names: GmlNames, attributes: AttributeSynthesizer) -> Self {
        Self { names, attributes }
    }

    pub fn gml_prefix(&self) -> &str {
        &self.names.prefix
    }

    /// Bounds of `geometry` in `crs`
    ///
    /// # Errors
    ///
    /// Fails when `crs` cannot be written in the session's SRS syntax, or on
    /// writer failures.
    pub fn encode(
        &self,
        geometry: &Geometry,
        crs: Option<&Crs>,
        writer: &mut dyn MarkupWriter,
        formatter: &CoordinateFormatter,
    ) -> Result<()> {
        let names = &self.names;
        writer.start_element(&names.bounded_by, None)?;
        match geometry.bounding_rect() {
            Some(rect) => self.write_envelope(&rect, geometry.dimension(), crs, writer, formatter)?,
            None => {
                writer.start_element(&names.null, None)?;
                writer.characters("unknown")?;
                writer.end_element(&names.null)?;
            }
        }
        writer.end_element(&names.bounded_by)
    }

    fn write_envelope(
        &self,
        rect: &Rect<f64>,
        dimension: u32,
        crs: Option<&Crs>,
        writer: &mut dyn MarkupWriter,
        formatter: &CoordinateFormatter,
    ) -> Result<()> {
        let names = &self.names;
        let mut attrs = AttributeSet::new();
        if let Some(crs) = crs {
            self.attributes.set_srs_name(&mut attrs, crs)?;
        }
        self.attributes.set_geometry_dimension(&mut attrs, dimension);

        writer.start_element(&names.envelope, Some(&attrs))?;
        writer.start_element(&names.lower_corner, None)?;
        writer.characters(&formatter.format_coord(&rect.min()))?;
        writer.end_element(&names.lower_corner)?;
        writer.start_element(&names.upper_corner, None)?;
        writer.characters(&formatter.format_coord(&rect.max()))?;
        writer.end_element(&names.upper_corner)?;
        writer.end_element(&names.envelope)
    }
}
