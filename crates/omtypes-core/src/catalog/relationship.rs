//! Relationship type definitions.

use super::attribute::Attribute;
use super::typedef::{Definition, TypeCategory, TypeDefHeader, TypeRef};
use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// How many instances may sit at one end of a relationship.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Archive,
    Serialize,
    Deserialize,
    SerdeSerialize,
    SerdeDeserialize,
)]
pub enum EndCardinality {
    /// Zero or one.
    AtMostOne,
    /// Zero or more.
    AnyNumber,
}

/// Direction in which classifications flow across a relationship.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Archive,
    Serialize,
    Deserialize,
    SerdeSerialize,
    SerdeDeserialize,
)]
pub enum PropagationRule {
    /// Classifications do not propagate.
    #[default]
    None,
    /// From the end 1 entity to the end 2 entity.
    OneToTwo,
    /// From the end 2 entity to the end 1 entity.
    TwoToOne,
    /// In both directions.
    Both,
}

/// A resolved end of a relationship type.
#[derive(
    Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct RelationshipEnd {
    /// Entity type at this end.
    pub entity_type: TypeRef,
    /// Role name under which the opposite entity sees this end.
    pub attribute_name: String,
    /// Description of the role.
    pub attribute_description: String,
    /// GUID of the documentation entry describing the role.
    pub description_guid: Option<String>,
    /// Cardinality of this end.
    pub cardinality: EndCardinality,
}

/// An end declared by entity type name, before resolution.
///
/// The definition factory and the patch engine turn this into a
/// [`RelationshipEnd`] by looking the entity type up in the registry.
#[derive(
    Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct EndSpec {
    /// Name of the entity type at this end.
    pub entity_type: String,
    /// Role name.
    pub attribute_name: String,
    /// Description of the role.
    pub attribute_description: String,
    /// GUID of the documentation entry describing the role.
    pub description_guid: Option<String>,
    /// Cardinality of this end.
    pub cardinality: EndCardinality,
}

impl EndSpec {
    /// Declare an end.
    pub fn new(
        entity_type: impl Into<String>,
        attribute_name: impl Into<String>,
        cardinality: EndCardinality,
    ) -> Self {
        Self {
            entity_type: entity_type.into(),
            attribute_name: attribute_name.into(),
            attribute_description: String::new(),
            description_guid: None,
            cardinality,
        }
    }

    /// Set the role description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.attribute_description = description.into();
        self
    }

    /// Set the documentation GUID.
    pub fn with_description_guid(mut self, guid: impl Into<String>) -> Self {
        self.description_guid = Some(guid.into());
        self
    }

    /// Attach the resolved entity type link.
    pub fn resolve(self, entity_type: TypeRef) -> RelationshipEnd {
        RelationshipEnd {
            entity_type,
            attribute_name: self.attribute_name,
            attribute_description: self.attribute_description,
            description_guid: self.description_guid,
            cardinality: self.cardinality,
        }
    }
}

/// A relationship type definition.
#[derive(
    Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct RelationshipDef {
    /// Shared header.
    pub header: TypeDefHeader,
    /// First end.
    pub end1: RelationshipEnd,
    /// Second end.
    pub end2: RelationshipEnd,
    /// Own attributes, in declaration order.
    pub attributes: Vec<Attribute>,
    /// Classification propagation rule.
    pub propagation: PropagationRule,
    /// Whether the same pair of entities may be linked more than once.
    pub multi_link: bool,
}

impl RelationshipDef {
    /// Create a new relationship type definition.
    pub fn new(
        guid: impl Into<String>,
        name: impl Into<String>,
        end1: RelationshipEnd,
        end2: RelationshipEnd,
    ) -> Self {
        Self {
            header: TypeDefHeader::new(guid, name),
            end1,
            end2,
            attributes: Vec::new(),
            propagation: PropagationRule::None,
            multi_link: false,
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

    /// Set the propagation rule.
    pub fn with_propagation(mut self, propagation: PropagationRule) -> Self {
        self.propagation = propagation;
        self
    }

    /// Allow multiple links between the same pair of entities.
    pub fn with_multi_link(mut self) -> Self {
        self.multi_link = true;
        self
    }

    /// Both ends.
    pub fn ends(&self) -> [&RelationshipEnd; 2] {
        [&self.end1, &self.end2]
    }

    /// Check if either end targets the given entity type.
    pub fn connects(&self, entity_type: &str) -> bool {
        self.ends().iter().any(|e| e.entity_type.name == entity_type)
    }
}

impl Definition for RelationshipDef {
    fn header(&self) -> &TypeDefHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut TypeDefHeader {
        &mut self.header
    }

    fn category(&self) -> TypeCategory {
        TypeCategory::Relationship
    }
}
