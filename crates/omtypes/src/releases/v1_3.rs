//! Release 1.3: glossary categories, and wider scopes for assignments and
//! governance classifications.

use omtypes_core::{
    CatalogError, DefinitionFactory, EndCardinality, EndSpec, Operation, Release, ReleaseContext,
    Step,
};

/// Glossary categories; semantic assignment and classifications widened.
#[derive(Debug, Clone, Copy, Default)]
pub struct Release13;

impl Release for Release13 {
    fn label(&self) -> &str {
        "1.3"
    }

    fn contribute(&self, ctx: &mut ReleaseContext<'_>) -> Result<(), CatalogError> {
        ctx.run(STEPS)
    }
}

const STEPS: &[Step] = &[
    glossary_category,
    category_anchor,
    term_categorization,
    semantic_assignment_to_any_element,
    confidentiality_for_terms,
    retention_for_any_element,
];

fn glossary_category(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .entity(
            "e507485b-9b5a-44c9-8a28-6967f7ff3672",
            "GlossaryCategory",
            Some("Referenceable"),
            "A grouping of glossary terms within a glossary.",
            None,
        )?
        .with_attributes([
            f.string_attribute("displayName", "Consumable name for the category.", None),
            f.string_attribute("description", "Description of the category.", None),
        ])
        .into())
}

fn category_anchor(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .relationship(
            "c628938e-815e-47db-8d1c-59bb2e84e028",
            "CategoryAnchor",
            None,
            "Connects a glossary category with its owning glossary.",
            None,
            EndSpec::new("Glossary", "anchor", EndCardinality::AtMostOne)
                .with_description("Owning glossary for this category."),
            EndSpec::new("GlossaryCategory", "categories", EndCardinality::AnyNumber)
                .with_description("Categories owned by this glossary."),
        )?
        .into())
}

fn term_categorization(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .relationship(
            "696a81f5-ac60-46c7-b9fd-6979a1e7ad27",
            "TermCategorization",
            None,
            "Links a glossary term into a glossary category.",
            None,
            EndSpec::new("GlossaryCategory", "categories", EndCardinality::AnyNumber)
                .with_description("Glossary categories that this term is linked to."),
            EndSpec::new("GlossaryTerm", "terms", EndCardinality::AnyNumber)
                .with_description("Glossary terms linked to this category."),
        )?
        .with_attribute(f.string_attribute(
            "description",
            "Explanation why this term is in this categorization.",
            None,
        ))
        .into())
}

fn semantic_assignment_to_any_element(
    f: DefinitionFactory<'_>,
) -> Result<Operation, CatalogError> {
    Ok(f
        .patch("SemanticAssignment")?
        .with_end1(
            EndSpec::new("Referenceable", "assignedElements", EndCardinality::AnyNumber)
                .with_description("Elements identified as managing data that has the same meaning as this glossary term."),
        )
        .into())
}

fn confidentiality_for_terms(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .patch("Confidentiality")?
        .extend_valid_entity_types(["GlossaryTerm"])
        .into())
}

fn retention_for_any_element(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .patch("Retention")?
        .replace_valid_entity_types(["Referenceable"])
        .with_propagatable(true)
        .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::releases::{Release10, Release11, Release12};
    use omtypes_core::{Definition, ReleaseStamp, TypeRegistry};

    fn seeded() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        let earlier: [&dyn Release; 3] = [&Release10, &Release11, &Release12];
        for release in earlier {
            let stamp = ReleaseStamp::new("tester", 1, release.label());
            let mut ctx = ReleaseContext::new(&mut registry, stamp);
            release.contribute(&mut ctx).unwrap();
        }
        registry
    }

    #[test]
    fn test_scope_changes() {
        let mut registry = seeded();
        let mut ctx = ReleaseContext::new(&mut registry, ReleaseStamp::new("tester", 3, "1.3"));
        Release13.contribute(&mut ctx).unwrap();

        let confidentiality = registry.get_classification_type("Confidentiality").unwrap();
        let scope: Vec<_> = confidentiality
            .valid_entity_types
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(scope, vec!["Asset", "GlossaryTerm"]);

        let retention = registry.get_classification_type("Retention").unwrap();
        assert_eq!(retention.valid_entity_types.len(), 1);
        assert!(retention.can_attach_to("Referenceable"));
        assert!(!retention.can_attach_to("Asset"));
        assert!(retention.propagatable);
    }

    #[test]
    fn test_semantic_assignment_end_redefined() {
        let mut registry = seeded();
        let guid = registry.get_type_by_name("SemanticAssignment").unwrap().guid().to_string();

        let mut ctx = ReleaseContext::new(&mut registry, ReleaseStamp::new("tester", 3, "1.3"));
        Release13.contribute(&mut ctx).unwrap();

        let assignment = registry.get_relationship_type("SemanticAssignment").unwrap();
        assert_eq!(assignment.header.guid, guid);
        assert_eq!(assignment.header.version, 2);
        assert_eq!(assignment.end1.entity_type.name, "Referenceable");
        assert_eq!(assignment.end2.entity_type.name, "GlossaryTerm");
        assert_eq!(assignment.attributes.len(), 6);
    }
}
