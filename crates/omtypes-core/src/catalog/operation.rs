//! Registry operations.
//!
//! Releases describe their contribution as a sequence of [`Operation`]s; one
//! [`apply`] function dispatches each to the registry.

use super::classification::ClassificationDef;
use super::entity::EntityDef;
use super::enumeration::EnumDef;
use super::patch::TypePatch;
use super::registry::TypeRegistry;
use super::relationship::RelationshipDef;
use super::typedef::{Definition, TypeRef};
use crate::error::CatalogError;

/// A single change to a registry.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Register a new entity type.
    AddEntityType(EntityDef),
    /// Register a new relationship type.
    AddRelationshipType(RelationshipDef),
    /// Register a new classification type.
    AddClassificationType(ClassificationDef),
    /// Register a new enumeration type.
    AddEnumerationType(EnumDef),
    /// Patch a registered type.
    PatchType(TypePatch),
}

impl Operation {
    /// Name of the type the operation touches.
    pub fn type_name(&self) -> &str {
        match self {
            Operation::AddEntityType(def) => def.name(),
            Operation::AddRelationshipType(def) => def.name(),
            Operation::AddClassificationType(def) => def.name(),
            Operation::AddEnumerationType(def) => def.name(),
            Operation::PatchType(patch) => &patch.type_name,
        }
    }

    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::AddEntityType(_) => "add_entity_type",
            Operation::AddRelationshipType(_) => "add_relationship_type",
            Operation::AddClassificationType(_) => "add_classification_type",
            Operation::AddEnumerationType(_) => "add_enumeration_type",
            Operation::PatchType(_) => "patch_type",
        }
    }
}

impl From<EntityDef> for Operation {
    fn from(def: EntityDef) -> Self {
        Operation::AddEntityType(def)
    }
}

impl From<RelationshipDef> for Operation {
    fn from(def: RelationshipDef) -> Self {
        Operation::AddRelationshipType(def)
    }
}

impl From<ClassificationDef> for Operation {
    fn from(def: ClassificationDef) -> Self {
        Operation::AddClassificationType(def)
    }
}

impl From<EnumDef> for Operation {
    fn from(def: EnumDef) -> Self {
        Operation::AddEnumerationType(def)
    }
}

impl From<TypePatch> for Operation {
    fn from(patch: TypePatch) -> Self {
        Operation::PatchType(patch)
    }
}

/// Apply one operation, returning a link to the type it touched.
pub fn apply(registry: &mut TypeRegistry, op: Operation) -> Result<TypeRef, CatalogError> {
    match op {
        Operation::AddEntityType(def) => registry.add_entity_type(def),
        Operation::AddRelationshipType(def) => registry.add_relationship_type(def),
        Operation::AddClassificationType(def) => registry.add_classification_type(def),
        Operation::AddEnumerationType(def) => registry.add_enumeration_type(def),
        Operation::PatchType(patch) => registry
            .apply_patch(patch)
            .map(|def| def.header().type_ref()),
    }
}
