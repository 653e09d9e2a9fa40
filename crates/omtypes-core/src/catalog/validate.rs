//! Structural checks run before a definition enters the registry.

use super::attribute::Attribute;
use super::enumeration::EnumDef;
use super::registry::TypeRegistry;
use super::typedef::{Definition, TypeCategory, TypeDef, TypeRef};
use crate::error::CatalogError;
use std::collections::HashSet;

/// Check a new definition against the registry it is about to join.
pub(crate) fn check_definition(registry: &TypeRegistry, def: &TypeDef) -> Result<(), CatalogError> {
    let name = def.name();

    if let Some(supertype) = def.supertype() {
        if def.category() == TypeCategory::Enumeration {
            return Err(CatalogError::InvalidReference {
                type_name: name.to_string(),
                reference: supertype.name.clone(),
                guid: supertype.guid.clone(),
            });
        }
        check_link(registry, name, supertype, def.category())?;
    }

    match def {
        TypeDef::Entity(_) => {}
        TypeDef::Relationship(rel) => {
            for end in rel.ends() {
                check_link(registry, name, &end.entity_type, TypeCategory::Entity)?;
            }
        }
        TypeDef::Classification(classification) => {
            if classification.valid_entity_types.is_empty() {
                return Err(CatalogError::EmptyAttachmentSet {
                    type_name: name.to_string(),
                });
            }
            for entity_type in &classification.valid_entity_types {
                check_link(registry, name, entity_type, TypeCategory::Entity)?;
            }
        }
        TypeDef::Enumeration(def) => check_elements(def)?,
    }

    check_attribute_kinds(registry, def.attributes())?;
    check_attribute_names(name, def.attributes())
}

/// Check that a link resolves to a registered type of the expected kind
/// carrying the same identifier.
pub(crate) fn check_link(
    registry: &TypeRegistry,
    type_name: &str,
    link: &TypeRef,
    expected: TypeCategory,
) -> Result<(), CatalogError> {
    let target = registry.get_typed(&link.name, expected)?;
    if target.guid() != link.guid {
        return Err(CatalogError::InvalidReference {
            type_name: type_name.to_string(),
            reference: link.name.clone(),
            guid: link.guid.clone(),
        });
    }
    Ok(())
}

/// Check that enumeration-typed attributes name registered enumerations.
pub(crate) fn check_attribute_kinds(
    registry: &TypeRegistry,
    attributes: &[Attribute],
) -> Result<(), CatalogError> {
    for attribute in attributes {
        if let Some(enum_name) = attribute.kind.enumeration_name() {
            registry.get_enumeration_type(enum_name)?;
        }
    }
    Ok(())
}

/// Check that no attribute name appears twice in `attributes`.
pub(crate) fn check_unique_names(
    type_name: &str,
    attributes: &[Attribute],
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for attribute in attributes {
        if !seen.insert(attribute.name.as_str()) {
            return Err(CatalogError::DuplicateAttribute {
                type_name: type_name.to_string(),
                attribute: attribute.name.clone(),
            });
        }
    }
    Ok(())
}

/// Check attribute name uniqueness and replaced-by links.
///
/// Only a non-active attribute may name a replacement, and the replacement
/// must be an active attribute of the same type.
pub(crate) fn check_attribute_names(
    type_name: &str,
    attributes: &[Attribute],
) -> Result<(), CatalogError> {
    check_unique_names(type_name, attributes)?;

    for attribute in attributes {
        let Some(replacement) = &attribute.replaced_by else {
            continue;
        };
        if attribute.is_active() {
            return Err(CatalogError::ActiveReplacement {
                type_name: type_name.to_string(),
                attribute: attribute.name.clone(),
                replaced_by: replacement.clone(),
            });
        }
        let live = attributes
            .iter()
            .any(|a| &a.name == replacement && a.is_active());
        if !live {
            return Err(CatalogError::DanglingReplacement {
                type_name: type_name.to_string(),
                attribute: attribute.name.clone(),
                replaced_by: replacement.clone(),
            });
        }
    }

    Ok(())
}

/// Check ordinal uniqueness and default flags of an enumeration.
pub(crate) fn check_elements(def: &EnumDef) -> Result<(), CatalogError> {
    let name = def.name();

    let mut ordinals = HashSet::new();
    for element in &def.elements {
        if !ordinals.insert(element.ordinal) {
            return Err(CatalogError::OrdinalConflict {
                type_name: name.to_string(),
                ordinal: element.ordinal,
            });
        }
    }

    let defaults = def.elements.iter().filter(|e| e.is_default).count();
    if defaults > 1 {
        return Err(CatalogError::ExtraDefault {
            type_name: name.to_string(),
            count: defaults,
        });
    }
    if defaults == 0 && def.default_required {
        return Err(CatalogError::MissingDefault {
            type_name: name.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EnumElement, PrimitiveKind};

    #[test]
    fn test_ordinal_conflict() {
        let def = EnumDef::new("g", "KeyPattern")
            .with_element(EnumElement::new(0, "LocalKey", "").as_default())
            .with_element(EnumElement::new(0, "RecycledKey", ""));

        assert_eq!(
            check_elements(&def),
            Err(CatalogError::OrdinalConflict {
                type_name: "KeyPattern".to_string(),
                ordinal: 0,
            })
        );
    }

    #[test]
    fn test_default_rules() {
        let missing = EnumDef::new("g", "E").with_element(EnumElement::new(0, "A", ""));
        assert!(matches!(
            check_elements(&missing),
            Err(CatalogError::MissingDefault { .. })
        ));
        assert!(check_elements(&missing.without_default()).is_ok());

        let extra = EnumDef::new("g", "E")
            .with_element(EnumElement::new(0, "A", "").as_default())
            .with_element(EnumElement::new(1, "B", "").as_default())
            .without_default();
        assert!(matches!(
            check_elements(&extra),
            Err(CatalogError::ExtraDefault { count: 2, .. })
        ));
    }

    #[test]
    fn test_attribute_names() {
        let dup = vec![
            Attribute::primitive("name", PrimitiveKind::String),
            Attribute::primitive("name", PrimitiveKind::Int),
        ];
        assert!(matches!(
            check_attribute_names("Asset", &dup),
            Err(CatalogError::DuplicateAttribute { .. })
        ));

        let chained = vec![
            Attribute::primitive("a", PrimitiveKind::String).deprecated_by("b"),
            Attribute::primitive("b", PrimitiveKind::String).deprecated_by("c"),
            Attribute::primitive("c", PrimitiveKind::String),
        ];
        assert!(matches!(
            check_attribute_names("Asset", &chained),
            Err(CatalogError::DanglingReplacement { ref attribute, .. }) if attribute == "a"
        ));

        let good = vec![
            Attribute::primitive("owner", PrimitiveKind::String).deprecated_by("ownerName"),
            Attribute::primitive("ownerName", PrimitiveKind::String),
        ];
        assert!(check_attribute_names("Asset", &good).is_ok());
    }

    #[test]
    fn test_replacement_requires_inactive_attribute() {
        let mut owner = Attribute::primitive("owner", PrimitiveKind::String);
        owner.replaced_by = Some("ownerName".to_string());
        let attrs = vec![owner, Attribute::primitive("ownerName", PrimitiveKind::String)];

        assert_eq!(
            check_attribute_names("Asset", &attrs),
            Err(CatalogError::ActiveReplacement {
                type_name: "Asset".to_string(),
                attribute: "owner".to_string(),
                replaced_by: "ownerName".to_string(),
            })
        );
    }
}
