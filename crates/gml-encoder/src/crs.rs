//! Coordinate reference systems and their URI spellings

use crate::{EncodeError, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// A coordinate reference system as seen by the encoder
///
/// Only the identifier matters for encoding; the full CRS model lives
/// elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Crs {
    /// A CRS identified by an authority code, e.g. EPSG:4326
    Identified { authority: String, code: String },
    /// A CRS without any authority identifier
    Unidentified { name: String },
}

impl Crs {
    /// An EPSG CRS
    pub fn epsg(code: u32) -> Self {
        Crs::Identified {
            authority: "EPSG".to_string(),
            code: code.to_string(),
        }
    }

    pub fn identified(authority: impl Into<String>, code: impl Into<String>) -> Self {
        Crs::Identified {
            authority: authority.into(),
            code: code.into(),
        }
    }

    pub fn unidentified(name: impl Into<String>) -> Self {
        Crs::Unidentified { name: name.into() }
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Crs::Identified { authority, code } => write!(f, "{}:{}", authority, code),
            Crs::Unidentified { name } => write!(f, "{}", name),
        }
    }
}

/// Textual convention used to render a CRS identifier in `srsName`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SrsSyntax {
    /// `EPSG:4326`
    EpsgCode,
    /// `http://www.opengis.net/gml/srs/epsg.xml#4326`
    OgcHttpUrl,
    /// `urn:x-ogc:def:crs:EPSG:4326`
    OgcUrnExperimental,
    /// `urn:ogc:def:crs:EPSG::4326`
    #[default]
    OgcUrn,
    /// `http://www.opengis.net/def/crs/EPSG/0/4326`
    OgcHttpUri,
}

impl SrsSyntax {
    pub const ALL: [SrsSyntax; 5] = [
        SrsSyntax::EpsgCode,
        SrsSyntax::OgcHttpUrl,
        SrsSyntax::OgcUrnExperimental,
        SrsSyntax::OgcUrn,
        SrsSyntax::OgcHttpUri,
    ];

    /// Render an authority code, or `None` when this syntax cannot express it
    pub fn format(self, authority: &str, code: &str) -> Option<String> {
        match self {
            SrsSyntax::EpsgCode => Some(format!("{}:{}", authority, code)),
            SrsSyntax::OgcHttpUrl if authority.eq_ignore_ascii_case("EPSG") => Some(format!(
                "http://www.opengis.net/gml/srs/epsg.xml#{}",
                code
            )),
            SrsSyntax::OgcHttpUrl => None,
            SrsSyntax::OgcUrnExperimental => {
                Some(format!("urn:x-ogc:def:crs:{}:{}", authority, code))
            }
            SrsSyntax::OgcUrn => Some(format!("urn:ogc:def:crs:{}::{}", authority, code)),
            SrsSyntax::OgcHttpUri => Some(format!(
                "http://www.opengis.net/def/crs/{}/0/{}",
                authority, code
            )),
        }
    }
}

impl fmt::Display for SrsSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SrsSyntax::EpsgCode => "EPSG code",
            SrsSyntax::OgcHttpUrl => "OGC HTTP URL",
            SrsSyntax::OgcUrnExperimental => "OGC experimental URN",
            SrsSyntax::OgcUrn => "OGC URN",
            SrsSyntax::OgcHttpUri => "OGC HTTP URI",
        };
        f.write_str(name)
    }
}

/// Renders a CRS as the URI used in `srsName`
pub trait CrsUriResolver: Send + Sync {
    /// # Errors
    ///
    /// Returns [`EncodeError::CrsUriResolution`] when the CRS cannot be
    /// expressed with `syntax`.
    fn to_uri(&self, crs: &Crs, syntax: SrsSyntax) -> Result<String>;
}

/// Resolves identified CRSs by formatting their authority code
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorityUriResolver;

impl CrsUriResolver for AuthorityUriResolver {
    fn to_uri(&self, crs: &Crs, syntax: SrsSyntax) -> Result<String> {
        let uri = match crs {
            Crs::Identified { authority, code } => syntax.format(authority, code),
            Crs::Unidentified { .. } => None,
        };
        uri.ok_or_else(|| EncodeError::CrsUriResolution {
            crs: crs.to_string(),
            syntax,
        })
    }
}
