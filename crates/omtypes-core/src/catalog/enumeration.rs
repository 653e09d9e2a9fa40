//! Enumeration type definitions.

use super::typedef::{Definition, TypeCategory, TypeDefHeader};
use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// One value of an enumeration type.
#[derive(
    Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct EnumElement {
    /// Ordinal, unique within the enumeration.
    pub ordinal: u32,
    /// Symbolic value name.
    pub value: String,
    /// Human-readable description.
    pub description: String,
    /// GUID of the documentation entry describing this value.
    pub description_guid: Option<String>,
    /// Whether this is the enumeration's default value.
    pub is_default: bool,
}

impl EnumElement {
    /// Create a non-default element.
    pub fn new(ordinal: u32, value: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            ordinal,
            value: value.into(),
            description: description.into(),
            description_guid: None,
            is_default: false,
        }
    }

    /// Flag this element as the default.
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Set the documentation GUID.
    pub fn with_description_guid(mut self, guid: impl Into<String>) -> Self {
        self.description_guid = Some(guid.into());
        self
    }
}

/// An enumeration type definition.
#[derive(
    Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct EnumDef {
    /// Shared header. Enumerations never carry a supertype.
    pub header: TypeDefHeader,
    /// Elements, in declaration order.
    pub elements: Vec<EnumElement>,
    /// Whether exactly one element must be flagged default.
    pub default_required: bool,
}

impl EnumDef {
    /// Create a new enumeration that requires a default element.
    pub fn new(guid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            header: TypeDefHeader::new(guid, name),
            elements: Vec::new(),
            default_required: true,
        }
    }

    /// Add an element.
    pub fn with_element(mut self, element: EnumElement) -> Self {
        self.elements.push(element);
        self
    }

    /// Add multiple elements.
    pub fn with_elements(mut self, elements: impl IntoIterator<Item = EnumElement>) -> Self {
        self.elements.extend(elements);
        self
    }

    /// Accept an enumeration with no default element.
    pub fn without_default(mut self) -> Self {
        self.default_required = false;
        self
    }

    /// The default element, if exactly one is flagged.
    pub fn default_element(&self) -> Option<&EnumElement> {
        let mut defaults = self.elements.iter().filter(|e| e.is_default);
        match (defaults.next(), defaults.next()) {
            (Some(element), None) => Some(element),
            _ => None,
        }
    }

    /// Get an element by ordinal.
    pub fn element(&self, ordinal: u32) -> Option<&EnumElement> {
        self.elements.iter().find(|e| e.ordinal == ordinal)
    }

    /// Get an element by value name.
    pub fn element_by_value(&self, value: &str) -> Option<&EnumElement> {
        self.elements.iter().find(|e| e.value == value)
    }
}

impl Definition for EnumDef {
    fn header(&self) -> &TypeDefHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut TypeDefHeader {
        &mut self.header
    }

    fn category(&self) -> TypeCategory {
        TypeCategory::Enumeration
    }
}
