//! XML map rendering.
//!
//! The document has no declaration and no indentation. A `\r\n` text node
//! follows the close of every member, class and section element and the root,
//! keeping the line structure existing mapping consumers expect. Empty
//! elements use quick-xml's `<x/>` spelling.

use super::walk::{
    self, ClassView, MapVisitor, Member, MemberKey, MemberKind, Outcome, ResourceView, Section,
};
use super::MapWriter;
use crate::domain::Report;
use crate::error::Result;
use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::Writer;
use std::borrow::Cow;
use std::io::Write;

const LINE_BREAK: &str = "\r\n";

const SECTIONS: [Section; 4] = [
    Section::RenamedTypes,
    Section::SkippedTypes,
    Section::RenamedResources,
    Section::SkippedResources,
];

pub struct XmlMapWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlMapWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer: Writer::new(writer) }
    }

    /// Flush and hand back the destination.
    pub fn into_inner(self) -> Result<W> {
        let mut inner = self.writer.into_inner();
        inner.flush()?;
        Ok(inner)
    }

    fn line_break(&mut self) -> Result<()> {
        self.writer.write_event(Event::Text(BytesText::new(LINE_BREAK)))?;
        Ok(())
    }

    fn write_member(&mut self, kind: MemberKind, member: &Member<'_>) -> Result<()> {
        let name = match member.key {
            MemberKey::Method(key) => format!("{}({})", member.name, key.param_types.join(",")),
            MemberKey::Typed(_) => member.name.to_string(),
        };
        let tag = member_tag(kind, member.outcome);
        let element = outcome_element(&tag, &name, member.outcome);
        self.writer.write_event(Event::Empty(element))?;
        self.line_break()
    }
}

fn section_tag(section: Section) -> &'static str {
    match section {
        Section::RenamedTypes => "renamedTypes",
        Section::SkippedTypes => "skippedTypes",
        Section::RenamedResources => "renamedResources",
        Section::SkippedResources => "skippedResources",
        Section::HiddenStrings => "hiddenStrings",
    }
}

fn member_tag(kind: MemberKind, outcome: Outcome<'_>) -> String {
    let prefix = if outcome.is_renamed() { "renamed" } else { "skipped" };
    let suffix = match kind {
        MemberKind::Method => "Method",
        MemberKind::Field => "Field",
        MemberKind::Property => "Property",
        MemberKind::Event => "Event",
    };
    format!("{prefix}{suffix}")
}

/// Escaped attribute. CR, LF and tab become character references so a
/// reader's attribute-value normalization does not turn them into spaces.
fn attribute(key: &'static str, value: &str) -> Attribute<'static> {
    let escaped =
        escape(value).replace('\r', "&#xD;").replace('\n', "&#xA;").replace('\t', "&#x9;");
    Attribute { key: QName(key.as_bytes()), value: Cow::Owned(escaped.into_bytes()) }
}

/// Start tag carrying `oldName`/`newName` or `name`/`reason`.
fn outcome_element<'a>(tag: &'a str, name: &str, outcome: Outcome<'_>) -> BytesStart<'a> {
    let mut element = BytesStart::new(tag);
    match outcome {
        Outcome::Renamed { new_name } => {
            element.push_attribute(attribute("oldName", name));
            element.push_attribute(attribute("newName", new_name));
        }
        Outcome::Skipped { reason } => {
            element.push_attribute(attribute("name", name));
            element.push_attribute(attribute("reason", reason));
        }
    }
    element
}

impl<W: Write> MapVisitor for XmlMapWriter<W> {
    fn sections(&self) -> &'static [Section] {
        &SECTIONS
    }

    fn begin_map(&mut self) -> Result<()> {
        self.writer.write_event(Event::Start(BytesStart::new("mapping")))?;
        Ok(())
    }

    fn begin_section(&mut self, section: Section, len: usize) -> Result<()> {
        let tag = section_tag(section);
        if len == 0 {
            self.writer.write_event(Event::Empty(BytesStart::new(tag)))?;
            return self.line_break();
        }
        self.writer.write_event(Event::Start(BytesStart::new(tag)))?;
        Ok(())
    }

    fn class(&mut self, class: &ClassView<'_>, _last: bool) -> Result<()> {
        let tag = if class.outcome.is_renamed() { "renamedClass" } else { "skippedClass" };
        let element = outcome_element(tag, class.name, class.outcome);
        if !class.has_members() {
            self.writer.write_event(Event::Empty(element))?;
            return self.line_break();
        }

        self.writer.write_event(Event::Start(element))?;
        for group in class.groups() {
            for member in group.iter() {
                self.write_member(group.kind, member)?;
            }
        }
        self.writer.write_event(Event::End(BytesEnd::new(tag)))?;
        self.line_break()
    }

    fn resource(&mut self, resource: &ResourceView<'_>, _last: bool) -> Result<()> {
        let tag =
            if resource.outcome.is_renamed() { "renamedResource" } else { "skippedResource" };
        let element = outcome_element(tag, resource.name, resource.outcome);
        self.writer.write_event(Event::Empty(element))?;
        Ok(())
    }

    fn end_section(&mut self, section: Section, len: usize) -> Result<()> {
        if len == 0 {
            return Ok(());
        }
        self.writer.write_event(Event::End(BytesEnd::new(section_tag(section))))?;
        self.line_break()
    }

    fn end_map(&mut self) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new("mapping")))?;
        self.line_break()
    }
}

impl<W: Write> MapWriter for XmlMapWriter<W> {
    fn write_map(&mut self, report: &Report) -> Result<()> {
        walk::walk(report, self)
    }

    fn finish(self: Box<Self>) -> Result<()> {
        self.into_inner().map(drop)
    }
}
