//! Classification type definitions.

use super::attribute::Attribute;
use super::typedef::{Definition, TypeCategory, TypeDefHeader, TypeRef};
use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// A classification type definition.
#[derive(
    Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct ClassificationDef {
    /// Shared header.
    pub header: TypeDefHeader,
    /// Entity types this classification may attach to. Never empty once registered.
    pub valid_entity_types: Vec<TypeRef>,
    /// Whether the classification propagates across relationships.
    pub propagatable: bool,
    /// Own attributes, in declaration order.
    pub attributes: Vec<Attribute>,
}

impl ClassificationDef {
    /// Create a new classification type definition.
    pub fn new(
        guid: impl Into<String>,
        name: impl Into<String>,
        valid_entity_types: Vec<TypeRef>,
    ) -> Self {
        Self {
            header: TypeDefHeader::new(guid, name),
            valid_entity_types,
            propagatable: false,
            attributes: Vec::new(),
        }
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Add multiple attributes.
    pub fn with_attributes(mut self, attributes: impl IntoIterator<Item = Attribute>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// Mark the classification as propagatable.
    pub fn with_propagatable(mut self) -> Self {
        self.propagatable = true;
        self
    }

    /// Check if the classification names the given entity type directly.
    pub fn can_attach_to(&self, entity_type: &str) -> bool {
        self.valid_entity_types.iter().any(|t| t.name == entity_type)
    }
}

impl Definition for ClassificationDef {
    fn header(&self) -> &TypeDefHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut TypeDefHeader {
        &mut self.header
    }

    fn category(&self) -> TypeCategory {
        TypeCategory::Classification
    }
}
