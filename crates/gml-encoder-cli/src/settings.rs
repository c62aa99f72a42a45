use clap::{Parser, ValueEnum};
use gml_encoder::{
    FeatureTypeInfo, GML_NAMESPACE, GmlConfiguration, NamespaceContext, SrsSyntax, WfsConfiguration,
};
use std::path::PathBuf;

/// Spelling of CRS identifiers in `srsName`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SrsSyntaxArg {
    /// EPSG:4326
    EpsgCode,
    /// http://www.opengis.net/gml/srs/epsg.xml#4326
    OgcHttpUrl,
    /// urn:x-ogc:def:crs:EPSG:4326
    OgcUrnExperimental,
    /// urn:ogc:def:crs:EPSG::4326
    OgcUrn,
    /// http://www.opengis.net/def/crs/EPSG/0/4326
    OgcHttpUri,
}

impl From<SrsSyntaxArg> for SrsSyntax {
    fn from(arg: SrsSyntaxArg) -> Self {
        match arg {
            SrsSyntaxArg::EpsgCode => SrsSyntax::EpsgCode,
            SrsSyntaxArg::OgcHttpUrl => SrsSyntax::OgcHttpUrl,
            SrsSyntaxArg::OgcUrnExperimental => SrsSyntax::OgcUrnExperimental,
            SrsSyntaxArg::OgcUrn => SrsSyntax::OgcUrn,
            SrsSyntaxArg::OgcHttpUri => SrsSyntax::OgcHttpUri,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// GML Encode - Writes a JSON feature collection as a GML 3.2 document
pub struct Settings {
    /// JSON file with the features to encode
    #[clap(value_name = "FILE")]
    pub input: PathBuf,

    /// Where to write the document (stdout when absent)
    #[clap(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// How CRS identifiers are written in srsName
    #[clap(long, value_enum, default_value = "ogc-urn")]
    pub srs_syntax: SrsSyntaxArg,

    /// Decimal digits written for each ordinate
    #[clap(short = 'd', long, default_value = "6")]
    pub num_decimals: u32,

    /// Prefix bound to the GML namespace
    #[clap(long, default_value = "gml")]
    pub gml_prefix: String,

    /// Feature type name, unless the input file declares one
    #[clap(long, default_value = "features")]
    pub type_name: String,

    /// Feature type namespace URI, unless the input file declares one
    #[clap(long, default_value = "http://example.com/features")]
    pub type_namespace: String,

    /// Prefix for the feature type namespace, unless the input file declares one
    #[clap(long, default_value = "ex")]
    pub type_prefix: String,

    /// Name of the geometry property element
    #[clap(long, default_value = "geometry")]
    pub geometry_property: String,

    /// Write a gml:boundedBy envelope for every feature
    #[clap(long)]
    pub bounds: bool,

    /// Indent the output
    #[clap(long)]
    pub indent: bool,
}

impl Settings {
    pub fn from_cli() -> Self {
        match Settings::try_parse() {
            Ok(args) => args,
            Err(e) => e.exit(),
        }
    }

    /// Encoder configuration for these settings
    pub fn wfs_configuration(&self) -> WfsConfiguration {
        WfsConfiguration {
            gml: Some(GmlConfiguration {
                num_decimals: self.num_decimals,
                srs_syntax: self.srs_syntax.into(),
                encode_feature_bounds: self.bounds,
                indent: self.indent,
            }),
            ..WfsConfiguration::default()
        }
    }

    pub fn namespaces(&self) -> NamespaceContext {
        NamespaceContext::default().with_binding(self.gml_prefix.clone(), GML_NAMESPACE)
    }

    /// Feature type used when the input does not declare one
    pub fn feature_type(&self) -> FeatureTypeInfo {
        FeatureTypeInfo::new(
            self.type_name.clone(),
            self.type_namespace.clone(),
            self.type_prefix.clone(),
        )
        .with_geometry_property(self.geometry_property.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gml_encoder::resolve_num_decimals;

    #[test]
    fn test_defaults() {
        let settings = Settings::try_parse_from(["gml-encode", "in.json"]).unwrap();
        assert_eq!(settings.input, PathBuf::from("in.json"));
        assert!(settings.output.is_none());
        assert_eq!(settings.srs_syntax, SrsSyntaxArg::OgcUrn);
        assert!(!settings.bounds);

        let config = settings.wfs_configuration();
        assert_eq!(resolve_num_decimals(&config), 6);
        assert_eq!(settings.namespaces().prefix_for(GML_NAMESPACE), Some("gml"));
    }

    #[test]
    fn test_arguments_reach_the_configuration() {
        let settings = Settings::try_parse_from([
            "gml-encode",
            "in.json",
            "-o",
            "out.gml",
            "--srs-syntax",
            "epsg-code",
            "-d",
            "3",
            "--gml-prefix",
            "g",
            "--geometry-property",
            "shape",
            "--bounds",
        ])
        .unwrap();

        let gml = settings.wfs_configuration().gml_or_default();
        assert_eq!(gml.num_decimals, 3);
        assert_eq!(gml.srs_syntax, SrsSyntax::EpsgCode);
        assert!(gml.encode_feature_bounds);
        assert!(!gml.indent);
        assert_eq!(settings.output, Some(PathBuf::from("out.gml")));
        assert_eq!(settings.namespaces().prefix_for(GML_NAMESPACE), Some("g"));
        assert_eq!(settings.feature_type().geometry_property, "shape");
    }

    #[test]
    fn test_unknown_syntax_is_rejected() {
        let result = Settings::try_parse_from(["gml-encode", "in.json", "--srs-syntax", "wkt"]);
        assert!(result.is_err());
    }
}
