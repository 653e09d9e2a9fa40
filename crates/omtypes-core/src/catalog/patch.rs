//! Type patches and the patch engine.
//!
//! A [`TypePatch`] names an existing type and declares the changes to make to
//! it. [`apply`] computes the patched definition without touching the
//! registry; [`TypeRegistry::apply_patch`] stores the result.
//!
//! Attribute lists merge by name: a patch attribute whose name matches a
//! stored attribute replaces it in place, any other is appended. Supertype
//! and end changes replace the stored value. Valid-attachment changes are
//! explicit about replacing or extending the stored list.

use super::attribute::{merge_attributes, Attribute};
use super::registry::TypeRegistry;
use super::relationship::{EndSpec, PropagationRule, RelationshipEnd};
use super::typedef::{Definition, TypeCategory, TypeDef, TypeRef, TypeStatus};
use super::validate;
use crate::error::CatalogError;
use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Change to a classification's valid-attachment list.
#[derive(
    Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub enum ScopeChange {
    /// Redeclare the whole list.
    Replace(Vec<String>),
    /// Append entity types not already listed.
    Extend(Vec<String>),
}

/// A declared set of changes to one registered type.
#[derive(
    Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct TypePatch {
    /// Name of the type to patch.
    pub type_name: String,
    /// Identifier of the type to patch.
    pub applies_to_guid: String,
    /// Version the patch was prepared against.
    pub from_version: u64,
    /// Version the type has after the patch.
    pub to_version: u64,
    /// Originator of the change.
    pub updated_by: String,
    /// Time of the change (milliseconds since Unix epoch).
    pub update_time: u64,
    /// New version label.
    pub version_name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// Attributes to merge into the stored list.
    pub attributes: Option<Vec<Attribute>>,
    /// New status.
    pub status: Option<TypeStatus>,
    /// New supertype, by name.
    pub supertype: Option<String>,
    /// New first end, by entity type name.
    pub end1: Option<EndSpec>,
    /// New second end, by entity type name.
    pub end2: Option<EndSpec>,
    /// Change to the valid-attachment list, by entity type name.
    pub valid_entity_types: Option<ScopeChange>,
    /// New propagatable flag.
    pub propagatable: Option<bool>,
    /// New classification propagation rule.
    pub propagation: Option<PropagationRule>,
}

impl TypePatch {
    /// Create an empty patch bound to a type identity and version step.
    pub fn new(
        type_name: impl Into<String>,
        applies_to_guid: impl Into<String>,
        from_version: u64,
        to_version: u64,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            applies_to_guid: applies_to_guid.into(),
            from_version,
            to_version,
            updated_by: String::new(),
            update_time: 0,
            version_name: None,
            description: None,
            attributes: None,
            status: None,
            supertype: None,
            end1: None,
            end2: None,
            valid_entity_types: None,
            propagatable: None,
            propagation: None,
        }
    }

    /// Stamp the originator and time of the change.
    pub fn stamped(mut self, updated_by: impl Into<String>, update_time: u64) -> Self {
        self.updated_by = updated_by.into();
        self.update_time = update_time;
        self
    }

    /// Set the version label.
    pub fn with_version_name(mut self, version_name: impl Into<String>) -> Self {
        self.version_name = Some(version_name.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Merge an attribute.
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.get_or_insert_with(Vec::new).push(attribute);
        self
    }

    /// Merge multiple attributes.
    pub fn with_attributes(mut self, attributes: impl IntoIterator<Item = Attribute>) -> Self {
        self.attributes
            .get_or_insert_with(Vec::new)
            .extend(attributes);
        self
    }

    /// Set the status.
    pub fn with_status(mut self, status: TypeStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Deprecate the type.
    pub fn deprecate(self) -> Self {
        self.with_status(TypeStatus::Deprecated)
    }

    /// Change the supertype.
    pub fn with_supertype(mut self, supertype: impl Into<String>) -> Self {
        self.supertype = Some(supertype.into());
        self
    }

    /// Redefine the first end.
    pub fn with_end1(mut self, end: EndSpec) -> Self {
        self.end1 = Some(end);
        self
    }

    /// Redefine the second end.
    pub fn with_end2(mut self, end: EndSpec) -> Self {
        self.end2 = Some(end);
        self
    }

    /// Redeclare the whole valid-attachment list.
    pub fn replace_valid_entity_types<I, S>(mut self, entity_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.valid_entity_types = Some(ScopeChange::Replace(
            entity_types.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Add entity types to the valid-attachment list.
    pub fn extend_valid_entity_types<I, S>(mut self, entity_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.valid_entity_types = Some(ScopeChange::Extend(
            entity_types.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Set the propagatable flag.
    pub fn with_propagatable(mut self, propagatable: bool) -> Self {
        self.propagatable = Some(propagatable);
        self
    }

    /// Set the propagation rule.
    pub fn with_propagation(mut self, propagation: PropagationRule) -> Self {
        self.propagation = Some(propagation);
        self
    }

    /// Check if the patch declares no change besides the stamps and version label.
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.attributes.is_none()
            && self.status.is_none()
            && self.supertype.is_none()
            && self.end1.is_none()
            && self.end2.is_none()
            && self.valid_entity_types.is_none()
            && self.propagatable.is_none()
            && self.propagation.is_none()
    }
}

/// Compute the result of applying `patch` to its target in `registry`.
///
/// The version of the result is one above the stored version, whatever the
/// patch was prepared against, so re-applying a patch advances the version
/// while leaving the content as it was.
pub fn apply(registry: &TypeRegistry, patch: &TypePatch) -> Result<TypeDef, CatalogError> {
    let current = registry.get_type_by_name(&patch.type_name)?;
    let name = patch.type_name.as_str();

    if current.guid() != patch.applies_to_guid {
        return Err(CatalogError::invalid_patch(
            name,
            format!(
                "patch targets identifier {} but the registered identifier is {}",
                patch.applies_to_guid,
                current.guid()
            ),
        ));
    }

    let mut updated = current.clone();

    if let Some(status) = patch.status {
        updated.header_mut().status = status;
    }
    if let Some(description) = &patch.description {
        updated.header_mut().description = description.clone();
    }
    if let Some(supertype) = &patch.supertype {
        let link = resolve_supertype(registry, &updated, supertype)?;
        updated.header_mut().supertype = Some(link);
    }
    if let Some(attributes) = &patch.attributes {
        validate::check_unique_names(name, attributes)?;
        for attribute in attributes {
            if let Some(enum_name) = attribute.kind.enumeration_name() {
                resolve_declared(registry, name, enum_name, TypeCategory::Enumeration)?;
            }
        }
        match updated.attributes_mut() {
            Some(existing) => merge_attributes(existing, attributes),
            None => {
                return Err(CatalogError::invalid_patch(
                    name,
                    "enumeration types carry no attributes",
                ))
            }
        }
    }

    apply_kind_changes(registry, &mut updated, patch)?;

    validate::check_attribute_names(name, updated.attributes())?;

    let header = updated.header_mut();
    header.version = current.version() + 1;
    header.updated_by = patch.updated_by.clone();
    header.update_time = patch.update_time;
    if let Some(version_name) = &patch.version_name {
        header.version_name = version_name.clone();
    }

    Ok(updated)
}

fn apply_kind_changes(
    registry: &TypeRegistry,
    updated: &mut TypeDef,
    patch: &TypePatch,
) -> Result<(), CatalogError> {
    let name = patch.type_name.as_str();

    match updated {
        TypeDef::Relationship(def) => {
            if let Some(end) = &patch.end1 {
                def.end1 = resolve_end(registry, name, end)?;
            }
            if let Some(end) = &patch.end2 {
                def.end2 = resolve_end(registry, name, end)?;
            }
            if let Some(propagation) = patch.propagation {
                def.propagation = propagation;
            }
        }
        _ if patch.end1.is_some() || patch.end2.is_some() => {
            return Err(CatalogError::invalid_patch(
                name,
                "only relationship types have ends",
            ));
        }
        _ if patch.propagation.is_some() => {
            return Err(CatalogError::invalid_patch(
                name,
                "only relationship types have a propagation rule",
            ));
        }
        _ => {}
    }

    match updated {
        TypeDef::Classification(def) => {
            if let Some(change) = &patch.valid_entity_types {
                def.valid_entity_types = rescope(registry, name, &def.valid_entity_types, change)?;
            }
            if let Some(propagatable) = patch.propagatable {
                def.propagatable = propagatable;
            }
        }
        _ if patch.valid_entity_types.is_some() => {
            return Err(CatalogError::invalid_patch(
                name,
                "only classification types have valid entity types",
            ));
        }
        _ if patch.propagatable.is_some() => {
            return Err(CatalogError::invalid_patch(
                name,
                "only classification types are propagatable",
            ));
        }
        _ => {}
    }

    Ok(())
}

/// Resolve a name declared by a patch, reporting failures as `InvalidPatch`.
fn resolve_declared(
    registry: &TypeRegistry,
    type_name: &str,
    declared: &str,
    expected: TypeCategory,
) -> Result<TypeRef, CatalogError> {
    match registry.get_type_by_name(declared) {
        Ok(def) if def.category() == expected => Ok(def.header().type_ref()),
        Ok(def) => Err(CatalogError::invalid_patch(
            type_name,
            format!(
                "{} is registered as {}, not {}",
                declared,
                def.category(),
                expected
            ),
        )),
        Err(_) => Err(CatalogError::invalid_patch(
            type_name,
            format!("{} is not a registered type", declared),
        )),
    }
}

fn resolve_supertype(
    registry: &TypeRegistry,
    target: &TypeDef,
    supertype: &str,
) -> Result<TypeRef, CatalogError> {
    let name = target.name();
    let category = target.category();

    if category == TypeCategory::Enumeration {
        return Err(CatalogError::invalid_patch(
            name,
            "enumeration types have no supertype",
        ));
    }

    let link = resolve_declared(registry, name, supertype, category)?;

    if supertype == name || registry.is_subtype_of(supertype, name)? {
        return Err(CatalogError::invalid_patch(
            name,
            format!("making {} the supertype would create a cycle", supertype),
        ));
    }

    Ok(link)
}

fn resolve_end(
    registry: &TypeRegistry,
    type_name: &str,
    end: &EndSpec,
) -> Result<RelationshipEnd, CatalogError> {
    let link = resolve_declared(registry, type_name, &end.entity_type, TypeCategory::Entity)?;
    Ok(end.clone().resolve(link))
}

fn rescope(
    registry: &TypeRegistry,
    type_name: &str,
    current: &[TypeRef],
    change: &ScopeChange,
) -> Result<Vec<TypeRef>, CatalogError> {
    let (mut scope, declared) = match change {
        ScopeChange::Replace(names) => (Vec::new(), names),
        ScopeChange::Extend(names) => (current.to_vec(), names),
    };

    for entity_type in declared {
        let link = resolve_declared(registry, type_name, entity_type, TypeCategory::Entity)?;
        if !scope.iter().any(|t| t.name == link.name) {
            scope.push(link);
        }
    }

    if scope.is_empty() {
        return Err(CatalogError::EmptyAttachmentSet {
            type_name: type_name.to_string(),
        });
    }

    Ok(scope)
}
