//! On-disk shape of a report document.
//!
//! Every collection is a sequence so that insertion order survives JSON and
//! YAML round trips.

use crate::domain::{ClassEntry, MemberEntry, MethodKey, Report, ResourceEntry, Status, TypedKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ReportDocument {
    #[serde(default)]
    pub classes: Vec<ClassDocument>,
    #[serde(default)]
    pub resources: Vec<SymbolDocument>,
    #[serde(default)]
    pub hidden_strings: Vec<HiddenStringDocument>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassDocument {
    pub name: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub status_text: String,
    #[serde(default)]
    pub methods: Vec<MethodDocument>,
    #[serde(default)]
    pub fields: Vec<TypedMemberDocument>,
    #[serde(default)]
    pub properties: Vec<TypedMemberDocument>,
    #[serde(default)]
    pub events: Vec<TypedMemberDocument>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MethodDocument {
    pub name: String,
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub status_text: String,
}

/// A field, property or event.
#[derive(Debug, Serialize, Deserialize)]
pub struct TypedMemberDocument {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub status_text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SymbolDocument {
    pub name: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub status_text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HiddenStringDocument {
    pub key: String,
    pub value: String,
}

impl TypedMemberDocument {
    fn into_pair(self) -> (TypedKey, MemberEntry) {
        let key = TypedKey::new(self.name.clone(), self.type_name);
        (key, MemberEntry::new(self.name, self.status, self.status_text))
    }
}

impl From<ClassDocument> for ClassEntry {
    fn from(doc: ClassDocument) -> Self {
        let mut class = ClassEntry::new(doc.name, doc.status, doc.status_text);
        for method in doc.methods {
            let key = MethodKey::new(method.name.clone(), method.params);
            let entry = MemberEntry::new(method.name, method.status, method.status_text);
            class.methods.insert(key, entry);
        }
        for (key, entry) in doc.fields.into_iter().map(TypedMemberDocument::into_pair) {
            class.fields.insert(key, entry);
        }
        for (key, entry) in doc.properties.into_iter().map(TypedMemberDocument::into_pair) {
            class.properties.insert(key, entry);
        }
        for (key, entry) in doc.events.into_iter().map(TypedMemberDocument::into_pair) {
            class.events.insert(key, entry);
        }
        class
    }
}

impl From<ReportDocument> for Report {
    fn from(doc: ReportDocument) -> Self {
        let mut report = Report::new();
        for class in doc.classes {
            report.add_class(class.into());
        }
        for resource in doc.resources {
            report.add_resource(ResourceEntry::new(
                resource.name,
                resource.status,
                resource.status_text,
            ));
        }
        for hidden in doc.hidden_strings {
            report.add_hidden_string(hidden.key, hidden.value);
        }
        report
    }
}
