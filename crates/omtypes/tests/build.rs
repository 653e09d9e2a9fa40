//! Integration tests for the standard type catalog.

use omtypes::engine::{
    CatalogError, Definition, DefinitionFactory, EndCardinality, EndSpec, EnumElement, Operation,
    Release, ReleaseChain, ReleaseContext, Step, TypeDef, TypeRegistry, TypeStatus,
};
use omtypes::releases::{standard_chain, Release10, RELEASE_LABELS};
use omtypes::{build, BuildError, TypeArchive};
use std::collections::{BTreeMap, BTreeSet};

fn populated_through(label: &str) -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    omtypes::release_chain()
        .unwrap()
        .populate_through(&mut registry, label)
        .unwrap();
    registry
}

fn identities(registry: &TypeRegistry) -> BTreeMap<String, String> {
    registry
        .snapshot()
        .types
        .iter()
        .map(|t| (t.name().to_string(), t.guid().to_string()))
        .collect()
}

#[test]
fn test_monotonic_growth() {
    let mut previous: BTreeSet<String> = BTreeSet::new();

    for label in RELEASE_LABELS {
        let registry = populated_through(label);
        let names: BTreeSet<String> = registry.type_names().into_iter().map(String::from).collect();

        assert!(names.is_superset(&previous), "release {} dropped types", label);
        assert!(names.len() > previous.len(), "release {} added no types", label);
        previous = names;
    }
}

#[test]
fn test_identity_stability() {
    let mut first_seen: BTreeMap<String, String> = BTreeMap::new();

    for label in RELEASE_LABELS {
        for (name, guid) in identities(&populated_through(label)) {
            let known = first_seen.entry(name.clone()).or_insert_with(|| guid.clone());
            assert_eq!(known, &guid, "{} changed identity in {}", name, label);
        }
    }
}

#[test]
fn test_patch_content_idempotence() {
    let mut registry = populated_through("2.0");
    let patch = registry
        .patches()
        .iter()
        .find(|p| p.type_name == "SearchKeyword")
        .cloned()
        .unwrap();

    let before = registry.get_type_by_name("SearchKeyword").unwrap().clone();
    let after = registry.apply_patch(patch).unwrap().clone();

    assert_eq!(after.attributes(), before.attributes());
    assert_eq!(after.status(), before.status());
    assert_eq!(after.guid(), before.guid());
    assert_eq!(after.version(), before.version() + 1);
}

#[test]
fn test_deprecation_consistency() {
    let archive = build().unwrap();

    for def in &archive.type_defs {
        for attribute in def.attributes() {
            let Some(replacement) = &attribute.replaced_by else {
                continue;
            };
            let target = def.get_attribute(replacement).unwrap_or_else(|| {
                panic!("{}.{} replaced by missing {}", def.name(), attribute.name, replacement)
            });
            assert_eq!(target.status, TypeStatus::Active);
            assert!(attribute.is_deprecated());
        }
    }
}

#[test]
fn test_endpoint_resolution() {
    let archive = build().unwrap();

    let relationships: Vec<_> = archive
        .type_defs
        .iter()
        .filter_map(TypeDef::as_relationship)
        .collect();
    assert!(!relationships.is_empty());

    for rel in relationships {
        for end in rel.ends() {
            let target = archive.get_type(&end.entity_type.name).unwrap();
            assert!(target.as_entity().is_some(), "{} end is not an entity", rel.name());
            assert_eq!(target.guid(), end.entity_type.guid);
        }
    }
}

#[test]
fn test_enumeration_well_formedness() {
    let archive = build().unwrap();
    assert!(!archive.attribute_type_defs.is_empty());

    for def in &archive.attribute_type_defs {
        let ordinals: BTreeSet<u32> = def.elements.iter().map(|e| e.ordinal).collect();
        assert_eq!(ordinals.len(), def.elements.len(), "{}", def.name());

        let defaults = def.elements.iter().filter(|e| e.is_default).count();
        assert!(defaults <= 1, "{}", def.name());
    }
}

#[test]
fn test_determinism() {
    let a = build().unwrap();
    let b = build().unwrap();

    assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
    assert_eq!(a.to_bytes().unwrap(), b.to_bytes().unwrap());
    assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());

    let restored = TypeArchive::from_bytes(&a.to_bytes().unwrap()).unwrap();
    assert_eq!(restored, a);
}

#[test]
fn test_json_layout() {
    let json = build().unwrap().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["header"]["version_name"], "2.0");
    assert_eq!(value["header"]["originator_license"], "Apache-2.0");
    assert!(value["attribute_type_defs"].as_array().is_some());
    assert!(value["type_def_patches"].as_array().map_or(0, Vec::len) > 0);
}

#[test]
fn test_scenario_keyword_added() {
    let registry = populated_through("1.0");

    let keyword = registry.get_entity_type("SearchKeyword").unwrap();
    assert_eq!(keyword.header.guid, "0baf4e47-d5e1-4bd5-9e91-8bd4a0a4cc95");
    assert_eq!(keyword.attributes.len(), 2);
    assert!(keyword.attributes.iter().all(|a| a.is_active()));
}

#[test]
fn test_scenario_keyword_description_replaced() {
    let base = populated_through("1.0");
    let registry = populated_through("1.2");

    let keyword = registry.get_entity_type("SearchKeyword").unwrap();
    assert_eq!(
        keyword.header.guid,
        base.get_entity_type("SearchKeyword").unwrap().header.guid
    );

    let description = keyword.get_attribute("description").unwrap();
    assert_eq!(description.status, TypeStatus::Deprecated);
    assert_eq!(description.replaced_by.as_deref(), Some("summary"));
    assert!(keyword.get_attribute("summary").unwrap().is_active());
}

struct Extra {
    label: &'static str,
    steps: &'static [Step],
}

impl Release for Extra {
    fn label(&self) -> &str {
        self.label
    }

    fn contribute(&self, ctx: &mut ReleaseContext<'_>) -> Result<(), CatalogError> {
        ctx.run(self.steps)
    }
}

fn build_with_extra(extra: Extra) -> Result<TypeRegistry, BuildError> {
    let chain = standard_chain("tester", 0)?.with_release(extra)?;
    let mut registry = TypeRegistry::new();
    chain.populate(&mut registry)?;
    Ok(registry)
}

fn dangling_relationship(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .relationship(
            "f1b3c6a2-3c1d-4f8e-9a0b-5d2e7c4b1a90",
            "ProjectScope",
            None,
            "",
            None,
            EndSpec::new("Project", "projects", EndCardinality::AnyNumber),
            EndSpec::new("Referenceable", "scopedElements", EndCardinality::AnyNumber),
        )?
        .into())
}

fn patch_missing(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f.patch("Project")?.deprecate().into())
}

fn second_keyword(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .entity("0e1b2c3d-4e5f-4a6b-8c7d-9e0f1a2b3c4d", "SearchKeyword", None, "", None)?
        .into())
}

fn clashing_ordinals(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .enumeration("9a8b7c6d-5e4f-4321-8765-43210fedcba9", "ProjectStatus", "", None)
        .with_element(EnumElement::new(0, "Planned", "").as_default())
        .with_element(EnumElement::new(0, "Active", ""))
        .into())
}

const DANGLING_END: &[Step] = &[dangling_relationship];
const PATCH_MISSING: &[Step] = &[patch_missing];
const SECOND_KEYWORD: &[Step] = &[second_keyword];
const CLASHING_ORDINALS: &[Step] = &[clashing_ordinals];

fn assert_release_error(result: Result<TypeRegistry, BuildError>, expected: CatalogError) {
    let err = result.unwrap_err();
    assert_eq!(err.release(), Some("3.0"));
    assert_eq!(err.catalog_error(), Some(&expected));
}

#[test]
fn test_scenario_unknown_end() {
    assert_release_error(
        build_with_extra(Extra {
            label: "3.0",
            steps: DANGLING_END,
        }),
        CatalogError::UnknownType {
            name: "Project".to_string(),
        },
    );
}

#[test]
fn test_scenario_patch_unknown_type() {
    assert_release_error(
        build_with_extra(Extra {
            label: "3.0",
            steps: PATCH_MISSING,
        }),
        CatalogError::UnknownType {
            name: "Project".to_string(),
        },
    );
}

#[test]
fn test_scenario_duplicate_across_releases() {
    let err = build_with_extra(Extra {
        label: "3.0",
        steps: SECOND_KEYWORD,
    })
    .unwrap_err();

    assert_eq!(err.release(), Some("3.0"));
    assert!(matches!(
        err.catalog_error(),
        Some(CatalogError::DuplicateDefinition { name, .. }) if name == "SearchKeyword"
    ));
}

#[test]
fn test_scenario_ordinal_conflict() {
    assert_release_error(
        build_with_extra(Extra {
            label: "3.0",
            steps: CLASHING_ORDINALS,
        }),
        CatalogError::OrdinalConflict {
            type_name: "ProjectStatus".to_string(),
            ordinal: 0,
        },
    );
}

#[test]
fn test_duplicate_release_label() {
    let err = standard_chain("tester", 0)
        .unwrap()
        .with_release(Release10)
        .unwrap_err();
    assert!(matches!(err, BuildError::DuplicateRelease { label } if label == "1.0"));
}

#[test]
fn test_population_is_one_shot() {
    let chain: ReleaseChain = omtypes::release_chain().unwrap();
    let mut registry = TypeRegistry::new();
    chain.populate(&mut registry).unwrap();

    let err = chain.populate(&mut registry).unwrap_err();
    assert!(matches!(
        err.catalog_error(),
        Some(CatalogError::DuplicateDefinition { .. })
    ));

    let err = chain.populate(&mut registry).unwrap_err();
    assert!(matches!(err, BuildError::Unusable { .. }));
}
