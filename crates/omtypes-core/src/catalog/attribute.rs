//! Attribute definitions for type definitions.

use super::types::{AttributeKind, PrimitiveKind};
use super::TypeStatus;
use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// An attribute declared on an entity, relationship or classification type.
#[derive(
    Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct Attribute {
    /// Attribute name (unique within the declaring type).
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// GUID of the documentation entry describing this attribute.
    pub description_guid: Option<String>,
    /// Declared value kind.
    pub kind: AttributeKind,
    /// Active or deprecated.
    pub status: TypeStatus,
    /// Name of the attribute that supersedes this one on the same type.
    pub replaced_by: Option<String>,
    /// Whether values must be unique across instances.
    pub unique: bool,
    /// Whether repositories should index this attribute.
    pub indexable: bool,
}

impl Attribute {
    /// Create a new active attribute.
    pub fn new(name: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            description_guid: None,
            kind,
            status: TypeStatus::Active,
            replaced_by: None,
            unique: false,
            indexable: true,
        }
    }

    /// Create a new active attribute of a primitive kind.
    pub fn primitive(name: impl Into<String>, kind: PrimitiveKind) -> Self {
        Self::new(name, AttributeKind::Primitive(kind))
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the documentation GUID.
    pub fn with_description_guid(mut self, guid: impl Into<String>) -> Self {
        self.description_guid = Some(guid.into());
        self
    }

    /// Mark values as unique.
    pub fn with_unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Exclude this attribute from repository indexes.
    pub fn without_index(mut self) -> Self {
        self.indexable = false;
        self
    }

    /// Deprecate this attribute in favour of another attribute on the same type.
    pub fn deprecated_by(mut self, replacement: impl Into<String>) -> Self {
        self.status = TypeStatus::Deprecated;
        self.replaced_by = Some(replacement.into());
        self
    }

    /// Deprecate this attribute without naming a replacement.
    pub fn deprecated(mut self) -> Self {
        self.status = TypeStatus::Deprecated;
        self
    }

    /// Check if the attribute is active.
    pub fn is_active(&self) -> bool {
        self.status == TypeStatus::Active
    }

    /// Check if the attribute is deprecated.
    pub fn is_deprecated(&self) -> bool {
        self.status == TypeStatus::Deprecated
    }
}

/// Merge `updates` into `existing` by attribute name.
///
/// A matching name replaces the stored attribute in place; a new name is
/// appended in the order it appears in `updates`.
pub(crate) fn merge_attributes(existing: &mut Vec<Attribute>, updates: &[Attribute]) {
    for update in updates {
        match existing.iter_mut().find(|a| a.name == update.name) {
            Some(slot) => *slot = update.clone(),
            None => existing.push(update.clone()),
        }
    }
}
