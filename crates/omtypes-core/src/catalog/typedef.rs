//! Common type definition header and the tagged union of all kinds.

use super::{Attribute, ClassificationDef, EntityDef, EnumDef, RelationshipDef};
use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};
use std::fmt;

/// Lifecycle status of a type or attribute.
///
/// Definitions are never removed; deprecation is the terminal state.
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
pub enum TypeStatus {
    /// In use.
    #[default]
    Active,
    /// Retained for historical data; should not be used by new instances.
    Deprecated,
}

/// The four kinds of type definition.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Archive,
    Serialize,
    Deserialize,
    SerdeSerialize,
    SerdeDeserialize,
)]
pub enum TypeCategory {
    /// Entity type.
    Entity,
    /// Relationship type.
    Relationship,
    /// Classification type.
    Classification,
    /// Enumeration type.
    Enumeration,
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeCategory::Entity => write!(f, "entity type"),
            TypeCategory::Relationship => write!(f, "relationship type"),
            TypeCategory::Classification => write!(f, "classification type"),
            TypeCategory::Enumeration => write!(f, "enumeration type"),
        }
    }
}

/// A resolved link to a registered type.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Archive,
    Serialize,
    Deserialize,
    SerdeSerialize,
    SerdeDeserialize,
)]
pub struct TypeRef {
    /// Identifier of the referenced type.
    pub guid: String,
    /// Name of the referenced type.
    pub name: String,
}

impl TypeRef {
    /// Create a link from its parts.
    pub fn new(guid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            name: name.into(),
        }
    }
}

/// Fields shared by every type definition.
#[derive(
    Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct TypeDefHeader {
    /// Stable identifier, assigned once.
    pub guid: String,
    /// Unique name.
    pub name: String,
    /// Active or deprecated.
    pub status: TypeStatus,
    /// Version counter; starts at 1 and grows by one per applied patch.
    pub version: u64,
    /// Label of the release that last touched this type.
    pub version_name: String,
    /// Human-readable description.
    pub description: String,
    /// GUID of the documentation entry describing this type.
    pub description_guid: Option<String>,
    /// Originator that created the type.
    pub created_by: String,
    /// Creation time (milliseconds since Unix epoch).
    pub create_time: u64,
    /// Originator of the last change.
    pub updated_by: String,
    /// Time of the last change (milliseconds since Unix epoch).
    pub update_time: u64,
    /// Single supertype, if any.
    pub supertype: Option<TypeRef>,
}

impl TypeDefHeader {
    /// Create an active, version 1 header.
    pub fn new(guid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            name: name.into(),
            status: TypeStatus::Active,
            version: 1,
            version_name: String::new(),
            description: String::new(),
            description_guid: None,
            created_by: String::new(),
            create_time: 0,
            updated_by: String::new(),
            update_time: 0,
            supertype: None,
        }
    }

    /// Link to this type.
    pub fn type_ref(&self) -> TypeRef {
        TypeRef::new(self.guid.clone(), self.name.clone())
    }
}

/// Builder and accessor methods shared by all definition kinds.
pub trait Definition {
    /// Shared header.
    fn header(&self) -> &TypeDefHeader;

    /// Mutable shared header.
    fn header_mut(&mut self) -> &mut TypeDefHeader;

    /// Kind of this definition.
    fn category(&self) -> TypeCategory;

    /// Type name.
    fn name(&self) -> &str {
        &self.header().name
    }

    /// Type identifier.
    fn guid(&self) -> &str {
        &self.header().guid
    }

    /// Set the description.
    fn with_description(mut self, description: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.header_mut().description = description.into();
        self
    }

    /// Set the documentation GUID.
    fn with_description_guid(mut self, guid: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.header_mut().description_guid = Some(guid.into());
        self
    }

    /// Set the supertype link.
    fn with_supertype(mut self, supertype: TypeRef) -> Self
    where
        Self: Sized,
    {
        self.header_mut().supertype = Some(supertype);
        self
    }

    /// Set the version label.
    fn with_version_name(mut self, version_name: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.header_mut().version_name = version_name.into();
        self
    }

    /// Stamp creator and last-updater.
    fn with_origin(mut self, originator: impl Into<String>, time: u64) -> Self
    where
        Self: Sized,
    {
        let originator = originator.into();
        let header = self.header_mut();
        header.created_by = originator.clone();
        header.create_time = time;
        header.updated_by = originator;
        header.update_time = time;
        self
    }
}

/// Any stored type definition.
#[derive(
    Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
#[serde(tag = "category")]
pub enum TypeDef {
    /// Entity type.
    Entity(EntityDef),
    /// Relationship type.
    Relationship(RelationshipDef),
    /// Classification type.
    Classification(ClassificationDef),
    /// Enumeration type.
    Enumeration(EnumDef),
}

impl TypeDef {
    /// Own attributes (empty for enumerations).
    pub fn attributes(&self) -> &[Attribute] {
        match self {
            TypeDef::Entity(def) => &def.attributes,
            TypeDef::Relationship(def) => &def.attributes,
            TypeDef::Classification(def) => &def.attributes,
            TypeDef::Enumeration(_) => &[],
        }
    }

    /// Mutable own attributes; `None` for enumerations.
    pub fn attributes_mut(&mut self) -> Option<&mut Vec<Attribute>> {
        match self {
            TypeDef::Entity(def) => Some(&mut def.attributes),
            TypeDef::Relationship(def) => Some(&mut def.attributes),
            TypeDef::Classification(def) => Some(&mut def.attributes),
            TypeDef::Enumeration(_) => None,
        }
    }

    /// Get an own attribute by name.
    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes().iter().find(|a| a.name == name)
    }

    /// Downcast to an entity type.
    pub fn as_entity(&self) -> Option<&EntityDef> {
        match self {
            TypeDef::Entity(def) => Some(def),
            _ => None,
        }
    }

    /// Downcast to a relationship type.
    pub fn as_relationship(&self) -> Option<&RelationshipDef> {
        match self {
            TypeDef::Relationship(def) => Some(def),
            _ => None,
        }
    }

    /// Downcast to a classification type.
    pub fn as_classification(&self) -> Option<&ClassificationDef> {
        match self {
            TypeDef::Classification(def) => Some(def),
            _ => None,
        }
    }

    /// Downcast to an enumeration type.
    pub fn as_enumeration(&self) -> Option<&EnumDef> {
        match self {
            TypeDef::Enumeration(def) => Some(def),
            _ => None,
        }
    }

    /// Supertype link, if any.
    pub fn supertype(&self) -> Option<&TypeRef> {
        self.header().supertype.as_ref()
    }

    /// Current status.
    pub fn status(&self) -> TypeStatus {
        self.header().status
    }

    /// Current version counter.
    pub fn version(&self) -> u64 {
        self.header().version
    }
}

impl Definition for TypeDef {
    fn header(&self) -> &TypeDefHeader {
        match self {
            TypeDef::Entity(def) => &def.header,
            TypeDef::Relationship(def) => &def.header,
            TypeDef::Classification(def) => &def.header,
            TypeDef::Enumeration(def) => &def.header,
        }
    }

    fn header_mut(&mut self) -> &mut TypeDefHeader {
        match self {
            TypeDef::Entity(def) => &mut def.header,
            TypeDef::Relationship(def) => &mut def.header,
            TypeDef::Classification(def) => &mut def.header,
            TypeDef::Enumeration(def) => &mut def.header,
        }
    }

    fn category(&self) -> TypeCategory {
        match self {
            TypeDef::Entity(_) => TypeCategory::Entity,
            TypeDef::Relationship(_) => TypeCategory::Relationship,
            TypeDef::Classification(_) => TypeCategory::Classification,
            TypeDef::Enumeration(_) => TypeCategory::Enumeration,
        }
    }
}

impl From<EntityDef> for TypeDef {
    fn from(def: EntityDef) -> Self {
        TypeDef::Entity(def)
    }
}

impl From<RelationshipDef> for TypeDef {
    fn from(def: RelationshipDef) -> Self {
        TypeDef::Relationship(def)
    }
}

impl From<ClassificationDef> for TypeDef {
    fn from(def: ClassificationDef) -> Self {
        TypeDef::Classification(def)
    }
}

impl From<EnumDef> for TypeDef {
    fn from(def: EnumDef) -> Self {
        TypeDef::Enumeration(def)
    }
}
