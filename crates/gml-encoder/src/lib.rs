//! GML Encoder - Streaming GML 3.2 encoding of simple feature collections
//!
//! This library writes collections of simple features (named attributes plus an
//! optional geometry) as GML 3.2 markup, one feature at a time, through a
//! streaming markup writer. The schema-specific parts of the output are supplied
//! by an [`EncodingDelegate`], so the collection engine itself never branches on
//! geometry type or schema version.
//!
//! # Architecture
//!
//! - **[`resolve_num_decimals`]**: Decimal precision from a layered [`Configuration`]
//! - **[`AttributeSynthesizer`]**: `srsName`, `srsDimension` and `gml:id` attributes
//! - **[`GeometryEncoderRegistry`]**: One [`GeometryEncoder`] per [`ShapeKind`]
//! - **[`FeatureWrapping`]**: Member and tuple open/close protocol
//! - **[`Gml32Delegate`]**: The GML 3.2 delegate composing all of the above
//! - **[`FeatureCollectionEncoder`]**: The engine driving the document
//!
//! # Example
//!
//! ```
//! use gml_encoder::{
//!     Crs, Feature, FeatureCollectionEncoder, FeatureTypeInfo, Geometry, GmlConfiguration,
//!     XmlMarkupWriter,
//! };
//!
//! let features = vec![
//!     Feature::new("roads.1")
//!         .with_property("name", "Main street")
//!         .with_geometry(Geometry::Point(geo::Point::new(1.5, 2.25)), Some(Crs::epsg(4326))),
//! ];
//! let feature_type = FeatureTypeInfo::new("roads", "http://example.com/roads", "ex");
//!
//! let encoder = FeatureCollectionEncoder::gml32(&GmlConfiguration::default());
//! let mut writer = XmlMarkupWriter::new(Vec::new());
//! encoder.encode(&features, &feature_type, &mut writer).unwrap();
//!
//! let xml = String::from_utf8(writer.into_inner()).unwrap();
//! assert!(xml.contains("<gml:pos>1.5 2.25</gml:pos>"));
//! ```

mod attributes;
mod collection;
mod config;
mod crs;
mod delegate;
pub mod encoder;
mod feature;
mod geometry;
mod namespace;
mod qname;
mod schema;
mod session;
mod wrapping;
pub mod writer;

// Public API exports
pub use attributes::{Attribute, AttributeSet, AttributeSynthesizer};
pub use collection::{EncodeSummary, FeatureCollectionEncoder};
pub use config::{
    Configuration, DEFAULT_NUM_DECIMALS, GmlConfiguration, PrecisionAware, WfsConfiguration,
    resolve_num_decimals,
};
pub use crs::{AuthorityUriResolver, Crs, CrsUriResolver, SrsSyntax};
pub use delegate::{EncodingDelegate, Gml32Delegate};
pub use encoder::{GeometryContext, GeometryEncoder, GeometryEncoderRegistry};
pub use feature::{AttributeValue, Feature};
pub use geometry::{
    CircularRing, CircularString, CompoundCurve, CompoundRing, CurveSegment, Geometry, LinearRing,
    ShapeKind,
};
pub use namespace::{
    GML_NAMESPACE, NamespaceContext, WFS_NAMESPACE, WFS_SCHEMA_LOCATION, XSI_NAMESPACE,
};
pub use qname::QualifiedName;
pub use schema::{DeclaredPropertyIntrospector, FeatureTypeInfo, PropertyDescriptor, SchemaIntrospector};
pub use session::{SchemaProfile, SessionContext};
pub use wrapping::{FeatureWrapping, WrappingState, WrappingStep};
pub use writer::{CoordinateFormatter, MAX_NUM_DECIMALS, MarkupWriter, XmlMarkupWriter};

/// Error types for the encoder
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("No geometry encoder registered for {0}")]
    UnsupportedGeometryKind(ShapeKind),

    #[error("Cannot express CRS {crs} as a URI using the {syntax} syntax")]
    CrsUriResolution { crs: String, syntax: SrsSyntax },

    #[error("Schema introspection failed for feature {feature_id}: {reason}")]
    SchemaIntrospection { feature_id: String, reason: String },

    #[error("Cannot bind prefix '{prefix}' to {namespace}: {reason}")]
    NamespaceBinding {
        prefix: String,
        namespace: String,
        reason: String,
    },

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Write error: {0}")]
    Write(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EncodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        // Verify that all public types are accessible
        let _: fn(&GmlConfiguration) -> FeatureCollectionEncoder<Gml32Delegate> =
            FeatureCollectionEncoder::gml32;
        let _: fn() -> GmlConfiguration = GmlConfiguration::default;
    }

    #[test]
    fn test_error_messages_identify_the_culprit() {
        let err = EncodeError::UnsupportedGeometryKind(ShapeKind::CompoundRing);
        assert!(err.to_string().contains("CompoundRing"));

        let err = EncodeError::CrsUriResolution {
            crs: "local-grid".to_string(),
            syntax: SrsSyntax::OgcUrn,
        };
        assert!(err.to_string().contains("local-grid"));
    }
}
