//! Type registry for storing and resolving type definitions.

use super::attribute::{merge_attributes, Attribute};
use super::patch::{self, TypePatch};
use super::typedef::{Definition, TypeCategory, TypeDef, TypeRef};
use super::validate;
use super::{ClassificationDef, EntityDef, EnumDef, RelationshipDef};
use crate::error::CatalogError;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// How far a registry has been populated by a release chain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PopulationState {
    /// No release has run.
    #[default]
    Empty,
    /// A release is contributing.
    Populating {
        /// Label of the release in progress.
        release: String,
    },
    /// Every release up to and including `release` has completed.
    Populated {
        /// Label of the last completed release.
        release: String,
    },
    /// A release failed; the registry must be discarded.
    Failed {
        /// Label of the release that failed.
        release: String,
    },
}

impl PopulationState {
    /// Label of the last completed release, if population finished.
    pub fn populated_release(&self) -> Option<&str> {
        match self {
            PopulationState::Populated { release } => Some(release),
            _ => None,
        }
    }

    /// Check if a release failed against this registry.
    pub fn is_failed(&self) -> bool {
        matches!(self, PopulationState::Failed { .. })
    }
}

impl fmt::Display for PopulationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PopulationState::Empty => write!(f, "empty"),
            PopulationState::Populating { release } => write!(f, "populating {}", release),
            PopulationState::Populated { release } => write!(f, "populated through {}", release),
            PopulationState::Failed { release } => write!(f, "failed in {}", release),
        }
    }
}

/// Read-only view of a registry's contents.
#[derive(Debug, Clone, Copy)]
pub struct RegistrySnapshot<'a> {
    /// Definitions in creation order.
    pub types: &'a [TypeDef],
    /// Applied patches in application order.
    pub patches: &'a [TypePatch],
    /// Population state at the time of the snapshot.
    pub state: &'a PopulationState,
}

impl<'a> RegistrySnapshot<'a> {
    /// Enumeration definitions, in creation order.
    pub fn enumerations(&self) -> impl Iterator<Item = &'a EnumDef> {
        self.types.iter().filter_map(TypeDef::as_enumeration)
    }

    /// Entity, relationship and classification definitions, in creation order.
    pub fn structured_types(&self) -> impl Iterator<Item = &'a TypeDef> {
        self.types
            .iter()
            .filter(|t| t.category() != TypeCategory::Enumeration)
    }
}

/// The central store of type definitions.
///
/// Definitions are keyed by name and by identifier. They are inserted once,
/// patched in place, and never removed.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    /// Definitions in creation order.
    types: Vec<TypeDef>,
    /// Name to position in `types`.
    by_name: HashMap<String, usize>,
    /// Identifier to position in `types`.
    by_guid: HashMap<String, usize>,
    /// Applied patches.
    patches: Vec<TypePatch>,
    /// Release chain progress.
    state: PopulationState,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered definitions.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if no definition is registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Check if a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Registered names in creation order.
    pub fn type_names(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.name()).collect()
    }

    /// Current population state.
    pub fn state(&self) -> &PopulationState {
        &self.state
    }

    /// Add an entity type.
    pub fn add_entity_type(&mut self, def: EntityDef) -> Result<TypeRef, CatalogError> {
        self.insert(TypeDef::Entity(def))
    }

    /// Add a relationship type.
    pub fn add_relationship_type(&mut self, def: RelationshipDef) -> Result<TypeRef, CatalogError> {
        self.insert(TypeDef::Relationship(def))
    }

    /// Add a classification type.
    pub fn add_classification_type(
        &mut self,
        def: ClassificationDef,
    ) -> Result<TypeRef, CatalogError> {
        self.insert(TypeDef::Classification(def))
    }

    /// Add an enumeration type.
    pub fn add_enumeration_type(&mut self, def: EnumDef) -> Result<TypeRef, CatalogError> {
        self.insert(TypeDef::Enumeration(def))
    }

    fn insert(&mut self, def: TypeDef) -> Result<TypeRef, CatalogError> {
        if self.by_name.contains_key(def.name()) || self.by_guid.contains_key(def.guid()) {
            return Err(CatalogError::DuplicateDefinition {
                name: def.name().to_string(),
                guid: def.guid().to_string(),
            });
        }

        validate::check_definition(self, &def)?;

        let link = def.header().type_ref();
        let index = self.types.len();
        self.by_name.insert(link.name.clone(), index);
        self.by_guid.insert(link.guid.clone(), index);

        debug!(
            type_name = %link.name,
            guid = %link.guid,
            category = %def.category(),
            "Added type definition"
        );

        self.types.push(def);
        Ok(link)
    }

    /// Resolve a name to its current definition.
    pub fn get_type_by_name(&self, name: &str) -> Result<&TypeDef, CatalogError> {
        self.by_name
            .get(name)
            .map(|&index| &self.types[index])
            .ok_or_else(|| CatalogError::UnknownType {
                name: name.to_string(),
            })
    }

    /// Resolve an identifier to its current definition.
    pub fn get_type_by_guid(&self, guid: &str) -> Option<&TypeDef> {
        self.by_guid.get(guid).map(|&index| &self.types[index])
    }

    /// Resolve a name, requiring a particular kind.
    pub fn get_typed(&self, name: &str, expected: TypeCategory) -> Result<&TypeDef, CatalogError> {
        let def = self.get_type_by_name(name)?;
        if def.category() != expected {
            return Err(wrong_kind(name, expected, def));
        }
        Ok(def)
    }

    /// Resolve an entity type.
    pub fn get_entity_type(&self, name: &str) -> Result<&EntityDef, CatalogError> {
        let def = self.get_type_by_name(name)?;
        def.as_entity()
            .ok_or_else(|| wrong_kind(name, TypeCategory::Entity, def))
    }

    /// Resolve a relationship type.
    pub fn get_relationship_type(&self, name: &str) -> Result<&RelationshipDef, CatalogError> {
        let def = self.get_type_by_name(name)?;
        def.as_relationship()
            .ok_or_else(|| wrong_kind(name, TypeCategory::Relationship, def))
    }

    /// Resolve a classification type.
    pub fn get_classification_type(&self, name: &str) -> Result<&ClassificationDef, CatalogError> {
        let def = self.get_type_by_name(name)?;
        def.as_classification()
            .ok_or_else(|| wrong_kind(name, TypeCategory::Classification, def))
    }

    /// Resolve an enumeration type.
    pub fn get_enumeration_type(&self, name: &str) -> Result<&EnumDef, CatalogError> {
        let def = self.get_type_by_name(name)?;
        def.as_enumeration()
            .ok_or_else(|| wrong_kind(name, TypeCategory::Enumeration, def))
    }

    /// Supertypes of `name`, nearest first.
    pub fn supertype_chain(&self, name: &str) -> Result<Vec<&TypeDef>, CatalogError> {
        let mut chain = Vec::new();
        let mut current = self.get_type_by_name(name)?;

        while let Some(link) = current.supertype() {
            // Cycles are rejected on insert and patch; the bound keeps a
            // corrupted graph from looping forever.
            if chain.len() >= self.types.len() {
                break;
            }
            current = self.get_type_by_name(&link.name)?;
            chain.push(current);
        }

        Ok(chain)
    }

    /// Check if `name` inherits, directly or indirectly, from `ancestor`.
    pub fn is_subtype_of(&self, name: &str, ancestor: &str) -> Result<bool, CatalogError> {
        Ok(self
            .supertype_chain(name)?
            .iter()
            .any(|t| t.name() == ancestor))
    }

    /// Direct subtypes of `name`, in creation order.
    pub fn subtypes_of(&self, name: &str) -> Vec<&TypeDef> {
        self.types
            .iter()
            .filter(|t| t.supertype().is_some_and(|s| s.name == name))
            .collect()
    }

    /// Inherited and own attributes of `name`.
    ///
    /// The root supertype's attributes come first; a subtype attribute with an
    /// inherited name takes the inherited attribute's position.
    pub fn all_attributes(&self, name: &str) -> Result<Vec<Attribute>, CatalogError> {
        let own = self.get_type_by_name(name)?;
        let mut attributes = Vec::new();
        for ancestor in self.supertype_chain(name)?.into_iter().rev() {
            merge_attributes(&mut attributes, ancestor.attributes());
        }
        merge_attributes(&mut attributes, own.attributes());
        Ok(attributes)
    }

    /// Return an empty patch bound to the current identity and next version of `name`.
    pub fn get_patch_for(&self, name: &str) -> Result<TypePatch, CatalogError> {
        let def = self.get_type_by_name(name)?;
        Ok(TypePatch::new(
            name,
            def.guid(),
            def.version(),
            def.version() + 1,
        ))
    }

    /// Apply a patch to its target and record it.
    pub fn apply_patch(&mut self, mut patch: TypePatch) -> Result<&TypeDef, CatalogError> {
        let updated = patch::apply(self, &patch)?;
        let index = self.by_name[patch.type_name.as_str()];

        patch.from_version = self.types[index].version();
        patch.to_version = updated.version();

        debug!(
            type_name = %patch.type_name,
            guid = %patch.applies_to_guid,
            version = patch.to_version,
            "Applied type patch"
        );

        self.types[index] = updated;
        self.patches.push(patch);
        Ok(&self.types[index])
    }

    /// Applied patches, in application order.
    pub fn patches(&self) -> &[TypePatch] {
        &self.patches
    }

    /// Immutable view of all stored definitions.
    pub fn snapshot(&self) -> RegistrySnapshot<'_> {
        RegistrySnapshot {
            types: &self.types,
            patches: &self.patches,
            state: &self.state,
        }
    }

    pub(crate) fn set_state(&mut self, state: PopulationState) {
        self.state = state;
    }
}

fn wrong_kind(name: &str, expected: TypeCategory, found: &TypeDef) -> CatalogError {
    CatalogError::WrongKind {
        name: name.to_string(),
        expected,
        actual: found.category(),
    }
}
