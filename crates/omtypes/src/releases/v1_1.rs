//! Release 1.1: glossaries and governance classifications.

use omtypes_core::{
    CatalogError, DefinitionFactory, EndCardinality, EndSpec, EnumElement, Operation, Release,
    ReleaseContext, Step,
};

pub(crate) const GLOSSARY_TERM_GUID: &str = "0db3e6ec-f5ef-4d75-ae38-b7ee6fd6ec0a";

/// Glossaries, semantic assignment and confidentiality.
#[derive(Debug, Clone, Copy, Default)]
pub struct Release11;

impl Release for Release11 {
    fn label(&self) -> &str {
        "1.1"
    }

    fn contribute(&self, ctx: &mut ReleaseContext<'_>) -> Result<(), CatalogError> {
        ctx.run(STEPS)
    }
}

const STEPS: &[Step] = &[
    glossary,
    glossary_term,
    term_anchor,
    term_assignment_status,
    semantic_assignment,
    confidentiality_level,
    confidentiality,
    data_file,
];

fn glossary(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .entity(
            "36f66863-9726-4b41-97ee-714fd0dc6fe4",
            "Glossary",
            Some("Referenceable"),
            "A collection of related glossary terms.",
            None,
        )?
        .with_attributes([
            f.string_attribute("displayName", "Name of the glossary.", None),
            f.string_attribute("description", "Description of the glossary.", None),
            f.string_attribute("language", "Natural language used in the glossary.", None),
            f.string_attribute("usage", "Guidance on the use of the glossary content.", None),
        ])
        .into())
}

fn glossary_term(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .entity(
            GLOSSARY_TERM_GUID,
            "GlossaryTerm",
            Some("Referenceable"),
            "A semantic description of something, such as a concept, object, asset, technology, role or group.",
            None,
        )?
        .with_attributes([
            f.string_attribute("displayName", "Consumable name for the glossary term.", None),
            f.string_attribute("summary", "Short description of the glossary term.", None),
            f.string_attribute("description", "Full description of the glossary term.", None),
            f.string_attribute("examples", "Examples of this glossary term in use.", None),
            f.string_attribute("abbreviation", "How this glossary term is abbreviated.", None),
            f.string_attribute("usage", "Further guidance on the use of this glossary term.", None),
        ])
        .into())
}

fn term_anchor(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .relationship(
            "1d43d661-bdc7-4a91-a996-3239b8f82e56",
            "TermAnchor",
            None,
            "Links a term to its owning glossary.",
            None,
            EndSpec::new("Glossary", "anchor", EndCardinality::AtMostOne)
                .with_description("Owning glossary for this term."),
            EndSpec::new("GlossaryTerm", "terms", EndCardinality::AnyNumber)
                .with_description("Terms owned by this glossary."),
        )?
        .into())
}

fn term_assignment_status(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .enumeration(
            "c8fe36ac-369f-4799-af75-46b9c1343ab3",
            "TermAssignmentStatus",
            "Defines the provenance and confidence of a term assignment.",
            None,
        )
        .with_elements([
            EnumElement::new(
                0,
                "Discovered",
                "The term assignment was discovered by an automated process.",
            ),
            EnumElement::new(
                1,
                "Proposed",
                "The term assignment was proposed by a subject matter expert.",
            ),
            EnumElement::new(
                2,
                "Imported",
                "The term assignment was imported from another metadata system.",
            ),
            EnumElement::new(
                3,
                "Validated",
                "The term assignment has been validated and approved by a subject matter expert.",
            )
            .as_default(),
            EnumElement::new(4, "Deprecated", "The term assignment should no longer be used."),
            EnumElement::new(5, "Obsolete", "The term assignment must no longer be used."),
            EnumElement::new(99, "Other", "Another term assignment status."),
        ])
        .into())
}

fn semantic_assignment(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .relationship(
            "e6670973-645f-441a-bec7-6f5570345b92",
            "SemanticAssignment",
            None,
            "Links a glossary term to an asset that it describes.",
            None,
            EndSpec::new("Asset", "assignedElements", EndCardinality::AnyNumber)
                .with_description("Elements identified as managing data that has the same meaning as this glossary term."),
            EndSpec::new("GlossaryTerm", "meaning", EndCardinality::AnyNumber)
                .with_description("Semantic definition for this element."),
        )?
        .with_attributes([
            f.string_attribute("expression", "Expression describing the relationship.", None),
            f.string_attribute("description", "Description of the relationship.", None),
            f.enum_attribute(
                "TermAssignmentStatus",
                "status",
                "The status of the relationship.",
                None,
            )?,
            f.int_attribute(
                "confidence",
                "Level of confidence in the correctness of the relationship.",
                None,
            ),
            f.string_attribute("steward", "Person responsible for the relationship.", None),
            f.string_attribute(
                "source",
                "Person, organization or automated process that created the relationship.",
                None,
            ),
        ])
        .into())
}

fn confidentiality_level(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .enumeration(
            "abc48ec2-7e29-4f1b-8a4d-2a3e1a6e8d11",
            "ConfidentialityLevel",
            "Defines how confidential a data item is.",
            None,
        )
        .with_elements([
            EnumElement::new(0, "Unclassified", "The data is public information.").as_default(),
            EnumElement::new(
                1,
                "Internal",
                "The data should not be exposed outside of this organization.",
            ),
            EnumElement::new(
                2,
                "Confidential",
                "The data should be protected and only shared with people with a need to see it.",
            ),
            EnumElement::new(
                3,
                "Sensitive",
                "The data is sensitive and inappropriate use may adversely impact the data subject.",
            ),
            EnumElement::new(
                4,
                "Restricted",
                "The data is very valuable and must be restricted to a very small number of people.",
            ),
            EnumElement::new(99, "Other", "Another confidentiality level."),
        ])
        .into())
}

fn confidentiality(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .classification(
            "742ddb7d-9a4a-4eb5-8ac2-1d69953bd2b6",
            "Confidentiality",
            None,
            &["Asset"],
            true,
            "Defines the level of confidentiality of related data items.",
            None,
        )?
        .with_attributes([
            f.enum_attribute(
                "ConfidentialityLevel",
                "level",
                "Level of confidentiality.",
                None,
            )?,
            f.int_attribute(
                "confidence",
                "Level of confidence in the classification (0=none, 100=excellent).",
                None,
            ),
            f.string_attribute(
                "steward",
                "Person responsible for maintaining this classification.",
                None,
            ),
            f.string_attribute("source", "Source of the classification.", None),
            f.string_attribute("notes", "Information relating to the classification.", None),
        ])
        .into())
}

fn data_file(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .entity(
            "10752b4a-4b5d-4519-9eae-fdd6d162122f",
            "DataFile",
            Some("Asset"),
            "A file containing stored data.",
            None,
        )?
        .with_attribute(f.string_attribute(
            "fileType",
            "File type descriptor, typically a file extension.",
            None,
        ))
        .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::releases::Release10;
    use omtypes_core::{ReleaseStamp, TypeRegistry};

    fn seeded() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        let mut ctx = ReleaseContext::new(&mut registry, ReleaseStamp::new("tester", 1, "1.0"));
        Release10.contribute(&mut ctx).unwrap();
        registry
    }

    #[test]
    fn test_glossary_release_against_base() {
        let mut registry = seeded();
        let before = registry.len();

        let mut ctx = ReleaseContext::new(&mut registry, ReleaseStamp::new("tester", 1, "1.1"));
        Release11.contribute(&mut ctx).unwrap();
        assert_eq!(registry.len(), before + STEPS.len());

        let anchor = registry.get_relationship_type("TermAnchor").unwrap();
        assert_eq!(anchor.end1.entity_type.name, "Glossary");
        assert_eq!(anchor.end2.entity_type.guid, GLOSSARY_TERM_GUID);

        let confidentiality = registry.get_classification_type("Confidentiality").unwrap();
        assert!(confidentiality.can_attach_to("Asset"));
        assert!(confidentiality.propagatable);
    }

    #[test]
    fn test_glossary_release_needs_base() {
        let mut registry = TypeRegistry::new();
        let mut ctx = ReleaseContext::new(&mut registry, ReleaseStamp::new("tester", 1, "1.1"));

        assert_eq!(
            Release11.contribute(&mut ctx),
            Err(CatalogError::UnknownType {
                name: "Referenceable".to_string()
            })
        );
    }
}
