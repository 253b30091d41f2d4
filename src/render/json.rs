//! JSON map rendering.
//!
//! Written line by line with two-space indentation rather than through a
//! serializer, so member order and layout match the text and XML maps.
//! Resources are not part of this format.

use super::walk::{self, ClassView, MapVisitor, Member, MemberGroup, MemberKey, Outcome, Section};
use super::MapWriter;
use crate::domain::Report;
use crate::error::Result;
use serde_json::Value;
use std::io::Write;

const SECTIONS: [Section; 3] =
    [Section::RenamedTypes, Section::SkippedTypes, Section::HiddenStrings];

pub struct JsonMapWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonMapWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Flush and hand back the destination.
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_line(&mut self, depth: usize, content: &str) -> Result<()> {
        writeln!(self.writer, "{}{}", indent(depth), content)?;
        Ok(())
    }

    /// Write pre-rendered `"key": value` entries, one per line, comma separated.
    fn write_entries(&mut self, depth: usize, entries: &[String]) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }
        let separator = format!(",\n{}", indent(depth));
        self.write_line(depth, &entries.join(&separator))
    }

    fn write_group(&mut self, label: &str, group: &MemberGroup<'_>, last: bool) -> Result<()> {
        self.write_line(3, &format!("\"{label}\": {{"))?;
        let entries: Vec<String> = group
            .iter()
            .map(|member| {
                format!("{}: {}", quote(&member_key(member)), quote(member.outcome.text()))
            })
            .collect();
        self.write_entries(4, &entries)?;
        self.write_line(3, if last { "}" } else { "}," })
    }
}

fn indent(depth: usize) -> String {
    " ".repeat(depth * 2)
}

fn quote(s: &str) -> String {
    Value::from(s).to_string()
}

fn member_key(member: &Member<'_>) -> String {
    match member.key {
        MemberKey::Method(key) => format!("{}({})", member.name, key.param_types.join(", ")),
        MemberKey::Typed(key) => key.name.clone(),
    }
}

impl<W: Write> MapVisitor for JsonMapWriter<W> {
    fn sections(&self) -> &'static [Section] {
        &SECTIONS
    }

    fn begin_map(&mut self) -> Result<()> {
        self.write_line(0, "{")
    }

    fn begin_section(&mut self, section: Section, _len: usize) -> Result<()> {
        let label = match section {
            Section::RenamedTypes => "Renamed Types",
            Section::SkippedTypes => "Skipped Types",
            Section::HiddenStrings => "Hided Strings",
            Section::RenamedResources | Section::SkippedResources => return Ok(()),
        };
        self.write_line(1, &format!("\"{label}\": {{"))
    }

    fn class(&mut self, class: &ClassView<'_>, last: bool) -> Result<()> {
        self.write_line(2, &format!("{}: {{", quote(class.name)))?;
        let status = match class.outcome {
            Outcome::Renamed { new_name } => format!("\"NewName\": {},", quote(new_name)),
            Outcome::Skipped { reason } => format!("\"Reason\": {},", quote(reason)),
        };
        self.write_line(3, &status)?;

        self.write_group("Methods", &class.methods, false)?;
        self.write_group("Fields", &class.fields, false)?;
        self.write_group("Properties", &class.properties, false)?;
        self.write_group("Events", &class.events, true)?;

        self.write_line(2, if last { "}" } else { "}," })
    }

    fn hidden_string(&mut self, key: &str, value: &str, last: bool) -> Result<()> {
        let value = value.replace("\r\n", "\n");
        let comma = if last { "" } else { "," };
        self.write_line(2, &format!("{}: {}{}", quote(key), quote(&value), comma))
    }

    fn end_section(&mut self, section: Section, _len: usize) -> Result<()> {
        match section {
            Section::HiddenStrings => self.write_line(1, "}"),
            _ => self.write_line(1, "},"),
        }
    }

    fn end_map(&mut self) -> Result<()> {
        self.write_line(0, "}")
    }
}

impl<W: Write> MapWriter for JsonMapWriter<W> {
    fn write_map(&mut self, report: &Report) -> Result<()> {
        walk::walk(report, self)
    }

    fn finish(self: Box<Self>) -> Result<()> {
        self.into_inner().map(drop)
    }
}
