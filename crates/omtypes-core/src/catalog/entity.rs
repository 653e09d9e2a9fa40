//! Entity type definitions.

use super::attribute::Attribute;
use super::typedef::{Definition, TypeCategory, TypeDefHeader};
use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// An entity type definition.
#[derive(
    Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct EntityDef {
    /// Shared header.
    pub header: TypeDefHeader,
    /// Own attributes, in declaration order.
    pub attributes: Vec<Attribute>,
}

impl EntityDef {
    /// Create a new entity type definition.
    pub fn new(guid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            header: TypeDefHeader::new(guid, name),
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

    /// Get an attribute by name.
    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

impl Definition for EntityDef {
    fn header(&self) -> &TypeDefHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut TypeDefHeader {
        &mut self.header
    }

    fn category(&self) -> TypeCategory {
        TypeCategory::Entity
    }
}
