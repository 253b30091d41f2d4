//! Shared traversal for every map format.
//!
//! [`walk`] validates the report, partitions each collection into renamed and
//! skipped groups, and then drives a [`MapVisitor`] through the sections in a
//! fixed order. Formats only decide how each piece is spelled.

use crate::domain::{ClassEntry, MemberEntry, MethodKey, OrderedMap, Report, Status, TypedKey};
use crate::error::{RenderError, Result};

/// Top-level report regions, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    RenamedTypes,
    SkippedTypes,
    RenamedResources,
    SkippedResources,
    HiddenStrings,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::RenamedTypes,
        Section::SkippedTypes,
        Section::RenamedResources,
        Section::SkippedResources,
        Section::HiddenStrings,
    ];
}

/// A validated decision for one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<'a> {
    Renamed { new_name: &'a str },
    Skipped { reason: &'a str },
}

impl<'a> Outcome<'a> {
    fn of(symbol: &str, status: Status, text: &'a str) -> Result<Self> {
        match status {
            Status::Renamed => Ok(Outcome::Renamed { new_name: text }),
            Status::Skipped => Ok(Outcome::Skipped { reason: text }),
            other => Err(RenderError::UnexpectedStatus { symbol: symbol.to_string(), status: other }),
        }
    }

    pub fn is_renamed(&self) -> bool {
        matches!(self, Outcome::Renamed { .. })
    }

    /// The new name or the skip reason.
    pub fn text(&self) -> &'a str {
        match *self {
            Outcome::Renamed { new_name } => new_name,
            Outcome::Skipped { reason } => reason,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Method,
    Field,
    Property,
    Event,
}

#[derive(Debug, Clone, Copy)]
pub enum MemberKey<'a> {
    Method(&'a MethodKey),
    Typed(&'a TypedKey),
}

#[derive(Debug, Clone, Copy)]
pub struct Member<'a> {
    pub key: MemberKey<'a>,
    pub name: &'a str,
    pub outcome: Outcome<'a>,
}

/// One member kind of a class, split into renamed and skipped sub-groups.
#[derive(Debug, Clone)]
pub struct MemberGroup<'a> {
    pub kind: MemberKind,
    pub renamed: Vec<Member<'a>>,
    pub skipped: Vec<Member<'a>>,
}

impl<'a> MemberGroup<'a> {
    fn build<K>(
        kind: MemberKind,
        class: &str,
        members: &'a OrderedMap<K, MemberEntry>,
        key_of: impl Fn(&'a K) -> MemberKey<'a>,
    ) -> Result<Self> {
        let mut group = MemberGroup { kind, renamed: Vec::new(), skipped: Vec::new() };
        for (key, entry) in members.iter() {
            let symbol = format!("{}::{}", class, entry.name);
            let member = Member {
                key: key_of(key),
                name: &entry.name,
                outcome: Outcome::of(&symbol, entry.status, &entry.status_text)?,
            };
            if member.outcome.is_renamed() {
                group.renamed.push(member);
            } else {
                group.skipped.push(member);
            }
        }
        Ok(group)
    }

    pub fn len(&self) -> usize {
        self.renamed.len() + self.skipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Both sub-groups have entries.
    pub fn is_mixed(&self) -> bool {
        !self.renamed.is_empty() && !self.skipped.is_empty()
    }

    /// Renamed members followed by skipped members.
    pub fn iter(&self) -> impl Iterator<Item = &Member<'a>> {
        self.renamed.iter().chain(self.skipped.iter())
    }
}

#[derive(Debug, Clone)]
pub struct ClassView<'a> {
    pub name: &'a str,
    pub outcome: Outcome<'a>,
    pub methods: MemberGroup<'a>,
    pub fields: MemberGroup<'a>,
    pub properties: MemberGroup<'a>,
    pub events: MemberGroup<'a>,
}

impl<'a> ClassView<'a> {
    fn build(class: &'a ClassEntry) -> Result<Self> {
        let name = class.name.as_str();
        Ok(ClassView {
            name,
            outcome: Outcome::of(name, class.status, &class.status_text)?,
            methods: MemberGroup::build(MemberKind::Method, name, &class.methods, MemberKey::Method)?,
            fields: MemberGroup::build(MemberKind::Field, name, &class.fields, MemberKey::Typed)?,
            properties: MemberGroup::build(
                MemberKind::Property,
                name,
                &class.properties,
                MemberKey::Typed,
            )?,
            events: MemberGroup::build(MemberKind::Event, name, &class.events, MemberKey::Typed)?,
        })
    }

    /// Member groups in output order: methods, fields, properties, events.
    pub fn groups(&self) -> [&MemberGroup<'a>; 4] {
        [&self.methods, &self.fields, &self.properties, &self.events]
    }

    pub fn has_members(&self) -> bool {
        self.groups().iter().any(|g| !g.is_empty())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ResourceView<'a> {
    pub name: &'a str,
    pub outcome: Outcome<'a>,
}

/// Validated, partitioned view over a whole report.
struct MapView<'a> {
    renamed_types: Vec<ClassView<'a>>,
    skipped_types: Vec<ClassView<'a>>,
    renamed_resources: Vec<ResourceView<'a>>,
    skipped_resources: Vec<ResourceView<'a>>,
    hidden_strings: Vec<(&'a str, &'a str)>,
}

impl<'a> MapView<'a> {
    fn build(report: &'a Report) -> Result<Self> {
        let mut view = MapView {
            renamed_types: Vec::new(),
            skipped_types: Vec::new(),
            renamed_resources: Vec::new(),
            skipped_resources: Vec::new(),
            hidden_strings: report.hidden_strings().collect(),
        };

        for class in report.classes() {
            let class_view = ClassView::build(class)?;
            if class_view.outcome.is_renamed() {
                view.renamed_types.push(class_view);
            } else {
                view.skipped_types.push(class_view);
            }
        }

        for resource in report.resources() {
            let resource_view = ResourceView {
                name: &resource.name,
                outcome: Outcome::of(&resource.name, resource.status, &resource.status_text)?,
            };
            if resource_view.outcome.is_renamed() {
                view.renamed_resources.push(resource_view);
            } else {
                view.skipped_resources.push(resource_view);
            }
        }

        Ok(view)
    }
}

/// Per-format hooks driven by [`walk`].
///
/// `last` tells the visitor whether the item is the final one of its section.
pub trait MapVisitor {
    /// Sections this format emits. Order is ignored; [`walk`] always emits in
    /// [`Section::ALL`] order.
    fn sections(&self) -> &'static [Section];

    fn begin_map(&mut self) -> Result<()> {
        Ok(())
    }

    fn begin_section(&mut self, section: Section, len: usize) -> Result<()>;

    fn class(&mut self, class: &ClassView<'_>, last: bool) -> Result<()>;

    fn resource(&mut self, _resource: &ResourceView<'_>, _last: bool) -> Result<()> {
        Ok(())
    }

    fn hidden_string(&mut self, _key: &str, _value: &str, _last: bool) -> Result<()> {
        Ok(())
    }

    fn end_section(&mut self, section: Section, len: usize) -> Result<()>;

    fn end_map(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Render `report` through `visitor` in one pass.
///
/// The whole report is validated before the first hook runs, so a report with
/// an unfinished status produces no output at all.
pub fn walk<V: MapVisitor + ?Sized>(report: &Report, visitor: &mut V) -> Result<()> {
    let view = MapView::build(report)?;
    tracing::debug!(
        renamed_types = view.renamed_types.len(),
        skipped_types = view.skipped_types.len(),
        renamed_resources = view.renamed_resources.len(),
        skipped_resources = view.skipped_resources.len(),
        hidden_strings = view.hidden_strings.len(),
        "walking obfuscation map"
    );

    let wanted = visitor.sections();
    visitor.begin_map()?;
    for section in Section::ALL {
        if !wanted.contains(&section) {
            continue;
        }
        match section {
            Section::RenamedTypes => emit_classes(visitor, section, &view.renamed_types)?,
            Section::SkippedTypes => emit_classes(visitor, section, &view.skipped_types)?,
            Section::RenamedResources => {
                emit_resources(visitor, section, &view.renamed_resources)?
            }
            Section::SkippedResources => {
                emit_resources(visitor, section, &view.skipped_resources)?
            }
            Section::HiddenStrings => {
                let len = view.hidden_strings.len();
                visitor.begin_section(section, len)?;
                for (i, (key, value)) in view.hidden_strings.iter().enumerate() {
                    visitor.hidden_string(key, value, i + 1 == len)?;
                }
                visitor.end_section(section, len)?;
            }
        }
    }
    visitor.end_map()
}

fn emit_classes<V: MapVisitor + ?Sized>(
    visitor: &mut V,
    section: Section,
    classes: &[ClassView<'_>],
) -> Result<()> {
    let len = classes.len();
    visitor.begin_section(section, len)?;
    for (i, class) in classes.iter().enumerate() {
        visitor.class(class, i + 1 == len)?;
    }
    visitor.end_section(section, len)
}

fn emit_resources<V: MapVisitor + ?Sized>(
    visitor: &mut V,
    section: Section,
    resources: &[ResourceView<'_>],
) -> Result<()> {
    let len = resources.len();
    visitor.begin_section(section, len)?;
    for (i, resource) in resources.iter().enumerate() {
        visitor.resource(resource, i + 1 == len)?;
    }
    visitor.end_section(section, len)
}
