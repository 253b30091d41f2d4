//! Plain-text map rendering.

use super::walk::{
    self, ClassView, MapVisitor, Member, MemberGroup, MemberKey, Outcome, ResourceView, Section,
};
use super::MapWriter;
use crate::domain::Report;
use crate::error::Result;
use std::io::Write;

/// Line-oriented report with one tab of indentation for members.
pub struct TextMapWriter<W: Write> {
    writer: W,
}

impl<W: Write> TextMapWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Flush and hand back the destination.
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_group(&mut self, group: &MemberGroup<'_>) -> Result<()> {
        for member in &group.renamed {
            self.write_member(member)?;
        }
        if group.is_mixed() {
            writeln!(self.writer)?;
        }
        for member in &group.skipped {
            self.write_member(member)?;
        }
        Ok(())
    }

    fn write_member(&mut self, member: &Member<'_>) -> Result<()> {
        match member.key {
            MemberKey::Method(key) => {
                write!(self.writer, "\t{}(", member.name)?;
                for (i, param) in key.param_types.iter().enumerate() {
                    let sep = if i > 0 { ", " } else { " " };
                    write!(self.writer, "{}{}", sep, param)?;
                }
                write!(self.writer, " )")?;
            }
            MemberKey::Typed(key) => {
                write!(self.writer, "\t{} {}", key.type_name, member.name)?;
            }
        }
        self.write_outcome(member.outcome)
    }

    fn write_outcome(&mut self, outcome: Outcome<'_>) -> Result<()> {
        match outcome {
            Outcome::Renamed { new_name } => writeln!(self.writer, " -> {}", new_name)?,
            Outcome::Skipped { reason } => writeln!(self.writer, " skipped: {}", reason)?,
        }
        Ok(())
    }
}

impl<W: Write> MapVisitor for TextMapWriter<W> {
    fn sections(&self) -> &'static [Section] {
        &Section::ALL
    }

    fn begin_section(&mut self, section: Section, _len: usize) -> Result<()> {
        match section {
            Section::RenamedTypes => writeln!(self.writer, "Renamed Types:")?,
            Section::SkippedTypes => writeln!(self.writer, "Skipped Types:")?,
            Section::RenamedResources => write!(self.writer, "Renamed Resources:\n\n")?,
            Section::SkippedResources => write!(self.writer, "Skipped Resources:\n\n")?,
            Section::HiddenStrings => write!(self.writer, "Hided Strings:\n\n")?,
        }
        Ok(())
    }

    fn class(&mut self, class: &ClassView<'_>, _last: bool) -> Result<()> {
        writeln!(self.writer)?;
        write!(self.writer, "{}", class.name)?;
        self.write_outcome(class.outcome)?;
        writeln!(self.writer, "{{")?;

        self.write_group(&class.methods)?;
        if !class.methods.is_empty() && !class.fields.is_empty() {
            writeln!(self.writer)?;
        }
        self.write_group(&class.fields)?;
        if !class.properties.is_empty() {
            writeln!(self.writer)?;
        }
        self.write_group(&class.properties)?;
        if !class.events.is_empty() {
            writeln!(self.writer)?;
        }
        self.write_group(&class.events)?;

        writeln!(self.writer, "}}")?;
        Ok(())
    }

    fn resource(&mut self, resource: &ResourceView<'_>, _last: bool) -> Result<()> {
        match resource.outcome {
            Outcome::Renamed { new_name } => writeln!(self.writer, "{} -> {}", resource.name, new_name)?,
            Outcome::Skipped { reason } => writeln!(self.writer, "{} ({})", resource.name, reason)?,
        }
        Ok(())
    }

    fn hidden_string(&mut self, key: &str, value: &str, _last: bool) -> Result<()> {
        write!(self.writer, "=>{key}:\n{value}\n=>END OF {key}\n\n")?;
        Ok(())
    }

    fn end_section(&mut self, section: Section, _len: usize) -> Result<()> {
        if section != Section::HiddenStrings {
            writeln!(self.writer)?;
        }
        Ok(())
    }
}

impl<W: Write> MapWriter for TextMapWriter<W> {
    fn write_map(&mut self, report: &Report) -> Result<()> {
        walk::walk(report, self)
    }

    fn finish(self: Box<Self>) -> Result<()> {
        self.into_inner().map(drop)
    }
}
