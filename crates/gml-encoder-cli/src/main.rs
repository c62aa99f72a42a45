mod input;
mod logging;
mod settings;

use gml_encoder::{
    EncodeSummary, Feature, FeatureCollectionEncoder, FeatureTypeInfo, Gml32Delegate,
    GmlConfiguration, XmlMarkupWriter,
};
use input::{CliError, FeatureDocument};
use settings::Settings;
use std::io::{BufWriter, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    logging::setup_logging();
    let settings = Settings::from_cli();

    match run(&settings) {
        Ok(summary) => {
            tracing::info!(
                "Wrote {} features ({} geometries)",
                summary.features,
                summary.geometry_count()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings) -> Result<EncodeSummary, CliError> {
    let document = FeatureDocument::read(&settings.input)?;
    let feature_type = document
        .feature_type
        .unwrap_or_else(|| settings.feature_type());
    let configuration = settings.wfs_configuration();
    let gml = configuration.gml_or_default();
    let encoder = FeatureCollectionEncoder::wfs(&configuration, settings.namespaces());

    match &settings.output {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            encode_to(&encoder, &document.features, &feature_type, BufWriter::new(file), &gml)
        }
        None => {
            let stdout = std::io::stdout().lock();
            encode_to(&encoder, &document.features, &feature_type, BufWriter::new(stdout), &gml)
        }
    }
}

fn encode_to<W: Write>(
    encoder: &FeatureCollectionEncoder<Gml32Delegate>,
    features: &[Feature],
    feature_type: &FeatureTypeInfo,
    out: W,
    configuration: &GmlConfiguration,
) -> Result<EncodeSummary, CliError> {
    let mut writer = XmlMarkupWriter::from_config(out, configuration);
    let summary = encoder.encode(features, feature_type, &mut writer)?;
    writer.into_inner().flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_encode_document_to_buffer() {
        let json = r#"[{
            "id": "roads.1",
            "properties": [["name", "Main"]],
            "geometry": {"LineString": [{"x": 0.25, "y": 1}, {"x": 2, "y": 3.5}]},
            "crs": {"authority": "EPSG", "code": "4326"}
        }]"#;
        let document = FeatureDocument::from_json(json).unwrap();
        let settings = Settings::try_parse_from(["gml-encode", "in.json", "--srs-syntax", "epsg-code"]).unwrap();
        let encoder = FeatureCollectionEncoder::wfs(&settings.wfs_configuration(), settings.namespaces());

        let mut out = Vec::new();
        let summary = encode_to(
            &encoder,
            &document.features,
            &settings.feature_type(),
            &mut out,
            &settings.wfs_configuration().gml_or_default(),
        )
        .unwrap();
        let xml = String::from_utf8(out).unwrap();

        assert_eq!(summary.features, 1);
        assert!(xml.contains(r#"<ex:features gml:id="roads.1"><ex:name>Main</ex:name>"#));
        assert!(xml.contains(r#"<gml:LineString gml:id="roads.1.geom" srsName="EPSG:4326" srsDimension="2"><gml:posList>0.25 1 2 3.5</gml:posList>"#));
    }

    #[test]
    fn test_indent_flag_reaches_the_writer() {
        let document = FeatureDocument::from_json(r#"[{"id": "roads.1"}]"#).unwrap();
        let settings = Settings::try_parse_from(["gml-encode", "in.json", "--indent"]).unwrap();
        let configuration = settings.wfs_configuration();
        let encoder = FeatureCollectionEncoder::wfs(&configuration, settings.namespaces());

        let mut out = Vec::new();
        encode_to(
            &encoder,
            &document.features,
            &settings.feature_type(),
            &mut out,
            &configuration.gml_or_default(),
        )
        .unwrap();
        let xml = String::from_utf8(out).unwrap();

        assert!(xml.contains("\n  <gml:member>"));
        assert!(xml.ends_with("\n</wfs:FeatureCollection>"));
    }
}
