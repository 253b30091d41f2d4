//! Core data model for obfuscation rename maps.
//!
//! A [`Report`] is produced by the obfuscation engine and handed to a map
//! writer fully populated. Nothing in this crate mutates it while rendering.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Lifecycle state of a symbol in the obfuscation engine.
///
/// Only [`Status::Renamed`] and [`Status::Skipped`] are valid once a report
/// is complete; the other states belong to a pass that has not finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Unknown,
    WillRename,
    Renamed,
    Skipped,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Unknown => "Unknown",
            Status::WillRename => "WillRename",
            Status::Renamed => "Renamed",
            Status::Skipped => "Skipped",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single renaming decision: the original name, its status, and either the
/// new name (renamed) or the reason it was left alone (skipped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberEntry {
    pub name: String,
    pub status: Status,
    pub status_text: String,
}

impl MemberEntry {
    pub fn new(name: impl Into<String>, status: Status, status_text: impl Into<String>) -> Self {
        Self { name: name.into(), status, status_text: status_text.into() }
    }

    pub fn renamed(name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self::new(name, Status::Renamed, new_name)
    }

    pub fn skipped(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(name, Status::Skipped, reason)
    }
}

/// Resources carry the same shape as members.
pub type ResourceEntry = MemberEntry;

/// Identifies a method by name and parameter types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodKey {
    pub name: String,
    pub param_types: Vec<String>,
}

impl MethodKey {
    pub fn new<I, S>(name: impl Into<String>, param_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { name: name.into(), param_types: param_types.into_iter().map(Into::into).collect() }
    }

    pub fn arity(&self) -> usize {
        self.param_types.len()
    }
}

/// Identifies a field, property or event by name and declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypedKey {
    pub name: String,
    pub type_name: String,
}

impl TypedKey {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self { name: name.into(), type_name: type_name.into() }
    }
}

pub type FieldKey = TypedKey;
pub type PropertyKey = TypedKey;
pub type EventKey = TypedKey;

/// Map that iterates in insertion order.
///
/// Re-inserting an existing key replaces the value but keeps its position.
/// Lookups go through a hash index into the entry list.
#[derive(Debug, Clone)]
pub struct OrderedMap<K, V> {
    entries: Vec<(K, V)>,
    index: HashMap<K, usize>,
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self { entries: Vec::new(), index: HashMap::new() }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq, V: Eq> Eq for OrderedMap<K, V> {}

impl<K, V> OrderedMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<K: Eq + Hash + Clone, V> OrderedMap<K, V> {
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.index.get(&key) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }
}

impl<K: Eq + Hash + Clone, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// Renaming decisions for one type and all of its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassEntry {
    pub name: String,
    pub status: Status,
    pub status_text: String,
    pub methods: OrderedMap<MethodKey, MemberEntry>,
    pub fields: OrderedMap<FieldKey, MemberEntry>,
    pub properties: OrderedMap<PropertyKey, MemberEntry>,
    pub events: OrderedMap<EventKey, MemberEntry>,
}

impl ClassEntry {
    pub fn new(name: impl Into<String>, status: Status, status_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status,
            status_text: status_text.into(),
            methods: OrderedMap::new(),
            fields: OrderedMap::new(),
            properties: OrderedMap::new(),
            events: OrderedMap::new(),
        }
    }

    pub fn renamed(name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self::new(name, Status::Renamed, new_name)
    }

    pub fn skipped(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(name, Status::Skipped, reason)
    }

    pub fn with_method(mut self, key: MethodKey, entry: MemberEntry) -> Self {
        self.methods.insert(key, entry);
        self
    }

    pub fn with_field(mut self, key: FieldKey, entry: MemberEntry) -> Self {
        self.fields.insert(key, entry);
        self
    }

    pub fn with_property(mut self, key: PropertyKey, entry: MemberEntry) -> Self {
        self.properties.insert(key, entry);
        self
    }

    pub fn with_event(mut self, key: EventKey, entry: MemberEntry) -> Self {
        self.events.insert(key, entry);
        self
    }
}

/// The complete outcome of one obfuscation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    classes: OrderedMap<String, ClassEntry>,
    resources: Vec<ResourceEntry>,
    hidden_strings: OrderedMap<String, String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class keyed by its name. A class with the same name is replaced
    /// in its original position.
    pub fn add_class(&mut self, class: ClassEntry) {
        self.classes.insert(class.name.clone(), class);
    }

    pub fn add_resource(&mut self, resource: ResourceEntry) {
        self.resources.push(resource);
    }

    pub fn add_hidden_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.hidden_strings.insert(key.into(), value.into());
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassEntry> {
        self.classes.values()
    }

    pub fn class(&self, name: &str) -> Option<&ClassEntry> {
        self.classes.get(name)
    }

    pub fn resources(&self) -> &[ResourceEntry] {
        &self.resources
    }

    pub fn hidden_strings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.hidden_strings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn summary(&self) -> ReportSummary {
        let mut summary = ReportSummary::default();
        for class in self.classes() {
            summary.types.record(class.status);
            for entry in class.methods.values() {
                summary.methods.record(entry.status);
            }
            for entry in class.fields.values() {
                summary.fields.record(entry.status);
            }
            for entry in class.properties.values() {
                summary.properties.record(entry.status);
            }
            for entry in class.events.values() {
                summary.events.record(entry.status);
            }
        }
        for resource in &self.resources {
            summary.resources.record(resource.status);
        }
        summary.hidden_strings = self.hidden_strings.len();
        summary
    }
}

/// Renamed/skipped tally for one category of symbols.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub renamed: usize,
    pub skipped: usize,
}

impl StatusCounts {
    fn record(&mut self, status: Status) {
        match status {
            Status::Renamed => self.renamed += 1,
            Status::Skipped => self.skipped += 1,
            Status::Unknown | Status::WillRename => {}
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub types: StatusCounts,
    pub methods: StatusCounts,
    pub fields: StatusCounts,
    pub properties: StatusCounts,
    pub events: StatusCounts,
    pub resources: StatusCounts,
    pub hidden_strings: usize,
}
