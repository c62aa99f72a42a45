//! Layered encoder configuration and decimal precision resolution

use crate::{QualifiedName, SrsSyntax, WFS_NAMESPACE};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Decimal digits used when no configuration provides a precision
pub const DEFAULT_NUM_DECIMALS: u32 = 6;

/// A configuration that knows how many decimals to write for coordinates
pub trait PrecisionAware {
    fn num_decimals(&self) -> u32;
}

/// An encoder configuration, possibly layered on a more specific one
pub trait Configuration {
    /// This configuration seen as a precision-aware one, if it is one
    fn as_precision_aware(&self) -> Option<&dyn PrecisionAware> {
        None
    }

    /// The precision-aware configuration this one depends on, if any
    fn dependency(&self) -> Option<&dyn PrecisionAware> {
        None
    }
}

/// Resolve the coordinate precision of a configuration
///
/// The configuration itself wins over its dependency; when neither is
/// precision-aware the result is [`DEFAULT_NUM_DECIMALS`].
pub fn resolve_num_decimals(configuration: &dyn Configuration) -> u32 {
    if let Some(direct) = configuration.as_precision_aware() {
        return direct.num_decimals();
    }
    match configuration.dependency() {
        Some(dependency) => dependency.num_decimals(),
        None => DEFAULT_NUM_DECIMALS,
    }
}

/// GML encoding settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GmlConfiguration {
    /// Decimal digits written for each ordinate
    pub num_decimals: u32,
    /// How CRS identifiers are spelled in `srsName`
    pub srs_syntax: SrsSyntax,
    /// Write a `gml:boundedBy` envelope in front of each feature's properties
    pub encode_feature_bounds: bool,
    /// Indent the output, one level per nesting depth
    ///
    /// Read by [`XmlMarkupWriter::from_config`](crate::XmlMarkupWriter::from_config).
    pub indent: bool,
}

impl Default for GmlConfiguration {
    fn default() -> Self {
        Self {
            num_decimals: DEFAULT_NUM_DECIMALS,
            srs_syntax: SrsSyntax::OgcUrn,
            encode_feature_bounds: false,
            indent: false,
        }
    }
}

impl PrecisionAware for GmlConfiguration {
    fn num_decimals(&self) -> u32 {
        self.num_decimals
    }
}

impl Configuration for GmlConfiguration {
    fn as_precision_aware(&self) -> Option<&dyn PrecisionAware> {
        Some(self)
    }
}

/// Feature collection settings layered on a GML configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WfsConfiguration {
    /// Local name of the collection root element in the WFS namespace
    pub collection_element: String,
    /// The GML settings this configuration depends on
    pub gml: Option<GmlConfiguration>,
}

impl Default for WfsConfiguration {
    fn default() -> Self {
        Self {
            collection_element: "FeatureCollection".to_string(),
            gml: Some(GmlConfiguration::default()),
        }
    }
}

impl WfsConfiguration {
    /// Collection root element name with the given WFS prefix
    pub fn collection_name(&self, prefix: &str) -> QualifiedName {
        QualifiedName::new(WFS_NAMESPACE, self.collection_element.clone(), prefix.to_string())
    }

    /// The GML settings, or the defaults when there is no dependency
    pub fn gml_or_default(&self) -> GmlConfiguration {
        self.gml.clone().unwrap_or_default()
    }
}

impl Configuration for WfsConfiguration {
    fn dependency(&self) -> Option<&dyn PrecisionAware> {
        self.gml.as_ref().map(|gml| gml as &dyn PrecisionAware)
    }
}
