//! Streaming markup output
//!
//! The encoder talks to a [`MarkupWriter`]; [`XmlMarkupWriter`] is the
//! `quick-xml` backed implementation and [`RecordingWriter`] keeps the calls
//! as events for inspection.

use crate::{AttributeSet, GmlConfiguration, QualifiedName, Result};
use geo::Coord;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;

/// Minimal streaming writer interface used by the encoder
pub trait MarkupWriter {
    /// Open an element, writing `attributes` on it
    fn start_element(&mut self, name: &QualifiedName, attributes: Option<&AttributeSet>)
    -> Result<()>;

    /// Close the most recently opened element called `name`
    fn end_element(&mut self, name: &QualifiedName) -> Result<()>;

    /// Write escaped text content
    fn characters(&mut self, text: &str) -> Result<()>;

    fn start_document(&mut self) -> Result<()> {
        Ok(())
    }

    fn end_document(&mut self) -> Result<()> {
        Ok(())
    }
}

/// XML output on any [`std::io::Write`]
pub struct XmlMarkupWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlMarkupWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: Writer::new(inner),
        }
    }

    /// Indent nested elements by two spaces per level
    pub fn new_indented(inner: W) -> Self {
        Self {
            writer: Writer::new_with_indent(inner, b' ', 2),
        }
    }

    /// Writer laid out as `configuration` asks, indented or not
    pub fn from_config(inner: W, configuration: &GmlConfiguration) -> Self {
        if configuration.indent {
            Self::new_indented(inner)
        } else {
            Self::new(inner)
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write> MarkupWriter for XmlMarkupWriter<W> {
    fn start_element(
        &mut self,
        name: &QualifiedName,
        attributes: Option<&AttributeSet>,
    ) -> Result<()> {
        let mut start = BytesStart::new(name.qualified());
        if let Some(attributes) = attributes {
            for attribute in attributes.iter() {
                let key = attribute.name.qualified();
                start.push_attribute((key.as_str(), attribute.value.as_str()));
            }
        }
        self.writer.write_event(Event::Start(start))?;
        Ok(())
    }

    fn end_element(&mut self, name: &QualifiedName) -> Result<()> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name.qualified())))?;
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<()> {
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    fn start_document(&mut self) -> Result<()> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(())
    }

    fn end_document(&mut self) -> Result<()> {
        self.writer.get_mut().flush()?;
        Ok(())
    }
}

/// One call made on a [`RecordingWriter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupEvent {
    Start(QualifiedName, AttributeSet),
    End(QualifiedName),
    Text(String),
}

/// Keeps every writer call as a [`MarkupEvent`]
#[derive(Debug, Default)]
pub struct RecordingWriter {
    pub events: Vec<MarkupEvent>,
}

impl RecordingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Qualified names of the opened elements, in order
    pub fn started(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                MarkupEvent::Start(name, _) => Some(name.qualified()),
                _ => None,
            })
            .collect()
    }
}

impl MarkupWriter for RecordingWriter {
    fn start_element(
        &mut self,
        name: &QualifiedName,
        attributes: Option<&AttributeSet>,
    ) -> Result<()> {
        self.events.push(MarkupEvent::Start(
            name.clone(),
            attributes.cloned().unwrap_or_default(),
        ));
        Ok(())
    }

    fn end_element(&mut self, name: &QualifiedName) -> Result<()> {
        self.events.push(MarkupEvent::End(name.clone()));
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<()> {
        self.events.push(MarkupEvent::Text(text.to_string()));
        Ok(())
    }
}

/// Largest precision that changes the output
///
/// Every finite `f64` has an exact decimal expansion of at most this many
/// fractional digits.
pub const MAX_NUM_DECIMALS: u32 = 1074;

/// `xs:double` spelling of a NaN or infinite value
pub(crate) fn non_finite_lexical(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value.is_infinite() {
        Some(if value > 0.0 { "INF" } else { "-INF" })
    } else {
        None
    }
}

/// Renders ordinates with a fixed number of decimals
///
/// Trailing zeros are dropped, so `1.50` becomes `1.5` and `2.000` becomes
/// `2` (or `2.0` when decimals are forced). Precisions above
/// [`MAX_NUM_DECIMALS`] are clamped to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateFormatter {
    num_decimals: u32,
    force_decimal: bool,
}

impl CoordinateFormatter {
    pub fn new(num_decimals: u32, force_decimal: bool) -> Self {
        Self {
            num_decimals: num_decimals.min(MAX_NUM_DECIMALS),
            force_decimal,
        }
    }

    #[inline]
    pub fn num_decimals(&self) -> u32 {
        self.num_decimals
    }

    /// Append one ordinate to `out`
    pub fn write_ordinate(&self, out: &mut String, value: f64) {
        if let Some(lexical) = non_finite_lexical(value) {
            out.push_str(lexical);
            return;
        }

        let start = out.len();
        out.push_str(&format!("{:.*}", self.num_decimals as usize, value));
        if out[start..].contains('.') {
            let trimmed = out[start..].trim_end_matches('0').trim_end_matches('.').len();
            out.truncate(start + trimmed);
        }
        if &out[start..] == "-0" {
            out.truncate(start);
            out.push('0');
        }
        if self.force_decimal && !out[start..].contains('.') {
            out.push_str(".0");
        }
    }

    pub fn format(&self, value: f64) -> String {
        let mut out = String::new();
        self.write_ordinate(&mut out, value);
        out
    }

    /// A single position, `x y`
    pub fn format_coord(&self, coord: &Coord<f64>) -> String {
        let mut out = String::new();
        self.write_coord(&mut out, coord);
        out
    }

    /// Space separated positions, `x1 y1 x2 y2 ...`
    pub fn format_coords<'a>(&self, coords: impl IntoIterator<Item = &'a Coord<f64>>) -> String {
        let mut out = String::new();
        for coord in coords {
            if !out.is_empty() {
                out.push(' ');
            }
            self.write_coord(&mut out, coord);
        }
        out
    }

    fn write_coord(&self, out: &mut String, coord: &Coord<f64>) {
        self.write_ordinate(out, coord.x);
        out.push(' ');
        self.write_ordinate(out, coord.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GML_NAMESPACE, SrsSyntax, AttributeSynthesizer, AuthorityUriResolver};
    use geo::coord;
    use std::sync::Arc;

    #[test]
    fn test_formatter_trims_trailing_zeros() {
        let f = CoordinateFormatter::new(6, false);
        assert_eq!(f.format(1.5), "1.5");
        assert_eq!(f.format(2.0), "2");
        assert_eq!(f.format(0.1234567), "0.123457");
        assert_eq!(f.format(-0.0000001), "0");
        assert_eq!(f.format(-12.25), "-12.25");
    }

    #[test]
    fn test_formatter_zero_decimals() {
        let f = CoordinateFormatter::new(0, false);
        assert_eq!(f.format(12.7), "13");
        assert_eq!(f.format(100.0), "100");
    }

    #[test]
    fn test_formatter_forced_decimal() {
        let f = CoordinateFormatter::new(3, true);
        assert_eq!(f.format(2.0), "2.0");
        assert_eq!(f.format(2.5), "2.5");
        assert_eq!(f.format(-0.0), "0.0");
    }

    #[test]
    fn test_formatter_non_finite() {
        let f = CoordinateFormatter::new(2, false);
        assert_eq!(f.format(f64::NAN), "NaN");
        assert_eq!(f.format(f64::INFINITY), "INF");
        assert_eq!(f.format(f64::NEG_INFINITY), "-INF");
    }

    #[test]
    fn test_formatter_huge_precision_is_clamped() {
        let f = CoordinateFormatter::new(70_000, false);
        assert_eq!(f.num_decimals(), MAX_NUM_DECIMALS);
        assert_eq!(f.format(1.5), "1.5");
        assert_eq!(f.format(-3.0), "-3");

        let f = CoordinateFormatter::new(u32::MAX, true);
        assert_eq!(f.format(2.0), "2.0");
        let tiny = f.format(5e-324);
        assert!(tiny.starts_with("0.0000"));
        assert!(!tiny.ends_with('0'));
    }

    #[test]
    fn test_format_coords() {
        let f = CoordinateFormatter::new(2, false);
        let coords = [coord! { x: 1.0, y: 2.005 }, coord! { x: -3.333, y: 4.0 }];
        assert_eq!(f.format_coords(coords.iter()), "1 2 -3.33 4");
        assert_eq!(f.format_coord(&coords[0]), "1 2");
    }

    #[test]
    fn test_xml_writer_escapes_and_writes_attributes() {
        let synth = AttributeSynthesizer::new(SrsSyntax::OgcUrn, "gml", Arc::new(AuthorityUriResolver));
        let mut attrs = AttributeSet::new();
        synth.init_feature_id_attribute(&mut attrs);
        attrs.set_value(synth.gml_id_name(), "a<b");

        let name = QualifiedName::new(GML_NAMESPACE, "name", "gml");
        let mut writer = XmlMarkupWriter::new(Vec::new());
        writer.start_element(&name, Some(&attrs)).unwrap();
        writer.characters("Fish & Chips").unwrap();
        writer.end_element(&name).unwrap();

        let xml = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(xml, r#"<gml:name gml:id="a&lt;b">Fish &amp; Chips</gml:name>"#);
    }

    #[test]
    fn test_writer_layout_follows_configuration() {
        let outer = QualifiedName::new(GML_NAMESPACE, "member", "gml");
        let inner = QualifiedName::new(GML_NAMESPACE, "name", "gml");
        let render = |configuration: &GmlConfiguration| {
            let mut writer = XmlMarkupWriter::from_config(Vec::new(), configuration);
            writer.start_element(&outer, None).unwrap();
            writer.start_element(&inner, None).unwrap();
            writer.characters("x").unwrap();
            writer.end_element(&inner).unwrap();
            writer.end_element(&outer).unwrap();
            String::from_utf8(writer.into_inner()).unwrap()
        };

        let flat = render(&GmlConfiguration::default());
        assert_eq!(flat, "<gml:member><gml:name>x</gml:name></gml:member>");

        let indented = render(&GmlConfiguration {
            indent: true,
            ..GmlConfiguration::default()
        });
        assert_eq!(indented, "<gml:member>\n  <gml:name>x</gml:name>\n</gml:member>");
    }

    #[test]
    fn test_recording_writer_keeps_order() {
        let name = QualifiedName::new(GML_NAMESPACE, "pos", "gml");
        let mut writer = RecordingWriter::new();
        writer.start_element(&name, None).unwrap();
        writer.characters("1 2").unwrap();
        writer.end_element(&name).unwrap();

        assert_eq!(writer.started(), vec!["gml:pos"]);
        assert_eq!(writer.events.len(), 3);
        assert_eq!(writer.events[1], MarkupEvent::Text("1 2".to_string()));
    }
}
