//! Map rendering (text, XML, JSON)

use crate::domain::Report;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

pub mod json;
pub mod text;
pub mod walk;
pub mod xml;

pub use json::JsonMapWriter;
pub use text::TextMapWriter;
pub use walk::{walk, MapVisitor, Section};
pub use xml::XmlMapWriter;

/// A renderer that owns its destination.
///
/// Call [`MapWriter::write_map`] once per report, then [`MapWriter::finish`]
/// to flush and release the destination.
pub trait MapWriter {
    fn write_map(&mut self, report: &Report) -> Result<()>;

    fn finish(self: Box<Self>) -> Result<()>;
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MapFormat {
    #[default]
    Text,
    Xml,
    Json,
}

impl MapFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            MapFormat::Text => "text",
            MapFormat::Xml => "xml",
            MapFormat::Json => "json",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            MapFormat::Text => "txt",
            MapFormat::Xml => "xml",
            MapFormat::Json => "json",
        }
    }
}

impl fmt::Display for MapFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Select the renderer for `format`, writing into `destination`.
pub fn map_writer<'w, W: Write + 'w>(format: MapFormat, destination: W) -> Box<dyn MapWriter + 'w> {
    match format {
        MapFormat::Text => Box::new(TextMapWriter::new(destination)),
        MapFormat::Xml => Box::new(XmlMapWriter::new(destination)),
        MapFormat::Json => Box::new(JsonMapWriter::new(destination)),
    }
}

/// Render `report` into `destination` and finish the writer.
pub fn render_map<W: Write>(format: MapFormat, report: &Report, destination: W) -> Result<()> {
    let mut writer = map_writer(format, destination);
    writer.write_map(report)?;
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClassEntry, MemberEntry, MethodKey, ResourceEntry, TypedKey};

    fn report() -> Report {
        let mut report = Report::new();
        report.add_class(
            ClassEntry::renamed("Widget", "A")
                .with_method(MethodKey::new("Compute", ["Int", "Int"]), MemberEntry::renamed("Compute", "Run"))
                .with_field(TypedKey::new("count", "Int"), MemberEntry::skipped("count", "public")),
        );
        report.add_resource(ResourceEntry::renamed("Widget.resources", "A.resources"));
        report.add_hidden_string("0", "say \"hi\"\n");
        report
    }

    #[test]
    fn same_report_renders_identically_across_instances() {
        for format in [MapFormat::Text, MapFormat::Xml, MapFormat::Json] {
            let mut first = Vec::new();
            let mut second = Vec::new();
            render_map(format, &report(), &mut first).expect("first");
            render_map(format, &report(), &mut second).expect("second");
            assert!(!first.is_empty());
            assert_eq!(first, second, "{format} output differs between runs");
        }
    }

    #[test]
    fn format_names_round_trip_through_serde() {
        let parsed: MapFormat = serde_json::from_str("\"xml\"").expect("parse");
        assert_eq!(parsed, MapFormat::Xml);
        assert_eq!(serde_json::to_string(&MapFormat::Json).expect("json"), "\"json\"");
    }
}
