//! Release 1.0: the base model.
//!
//! Root types, assets and data sets, search keywords, external identifiers
//! and the memento classification.

use omtypes_core::{
    CatalogError, DefinitionFactory, EndCardinality, EndSpec, EnumElement, Operation, Release,
    ReleaseContext, Step,
};

pub(crate) const REFERENCEABLE_GUID: &str = "a32316b8-dc8c-48c5-b12b-71c1b2a080bf";
pub(crate) const ASSET_GUID: &str = "896d14c2-7522-4f6c-8519-757711943fe6";
pub(crate) const DATA_SET_GUID: &str = "1449911c-4f44-4c22-abc0-7540154feefb";
pub(crate) const SEARCH_KEYWORD_GUID: &str = "0baf4e47-d5e1-4bd5-9e91-8bd4a0a4cc95";

/// The base release.
#[derive(Debug, Clone, Copy, Default)]
pub struct Release10;

impl Release for Release10 {
    fn label(&self) -> &str {
        "1.0"
    }

    fn contribute(&self, ctx: &mut ReleaseContext<'_>) -> Result<(), CatalogError> {
        ctx.run(STEPS)
    }
}

const STEPS: &[Step] = &[
    key_pattern,
    referenceable,
    asset,
    data_set,
    external_id,
    search_keyword,
    search_keyword_link,
    memento,
];

fn key_pattern(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .enumeration(
            "8904df8f-1aca-4de8-9abd-1ef2aadba300",
            "KeyPattern",
            "Defines the type of identifier used for an asset.",
            None,
        )
        .with_elements([
            EnumElement::new(
                0,
                "LocalKey",
                "Unique key allocated and used within the scope of a single system.",
            )
            .as_default(),
            EnumElement::new(
                1,
                "RecycledKey",
                "Key allocated and used within the scope of a single system that is periodically reused for different records.",
            ),
            EnumElement::new(
                2,
                "NaturalKey",
                "Key derived from an attribute of the entity, such as email address, passport number.",
            ),
            EnumElement::new(3, "Mirror", "Key value copied from another system."),
            EnumElement::new(
                4,
                "AggregateKey",
                "Key formed by combining keys from multiple systems.",
            ),
            EnumElement::new(
                5,
                "CallersKey",
                "Key from another system can be used if system name provided.",
            ),
            EnumElement::new(
                6,
                "StableKey",
                "Key value will remain active even if records are merged.",
            ),
            EnumElement::new(99, "Other", "Another key pattern."),
        ])
        .into())
}

fn referenceable(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .entity(
            REFERENCEABLE_GUID,
            "Referenceable",
            None,
            "An open metadata entity that has a unique identifier.",
            None,
        )?
        .with_attributes([
            f.string_attribute(
                "qualifiedName",
                "Unique identifier for the entity.",
                None,
            )
            .with_unique(),
            f.string_map_attribute(
                "additionalProperties",
                "Additional properties for the element.",
                None,
            ),
        ])
        .into())
}

fn asset(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .entity(
            ASSET_GUID,
            "Asset",
            Some("Referenceable"),
            "The description of an asset that needs to be catalogued and governed.",
            None,
        )?
        .with_attributes([
            f.string_attribute("name", "Display name for the asset.", None),
            f.string_attribute("description", "Description of the asset.", None),
            f.string_attribute(
                "owner",
                "User name of the person or process that owns the asset.",
                None,
            ),
        ])
        .into())
}

fn data_set(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .entity(
            DATA_SET_GUID,
            "DataSet",
            Some("Asset"),
            "Collection of related data.",
            None,
        )?
        .with_attribute(f.string_attribute(
            "formula",
            "Function that describes the derivation of the data set.",
            None,
        ))
        .into())
}

fn external_id(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .entity(
            "7c8f8c2c-cc48-429e-8a21-a1f1851ccdb0",
            "ExternalId",
            Some("Referenceable"),
            "Alternative identifier used in another system.",
            None,
        )?
        .with_attributes([
            f.string_attribute("identifier", "Identifier used in an external system.", None),
            f.enum_attribute(
                "KeyPattern",
                "keyPattern",
                "Management pattern associated with the identifier.",
                None,
            )?,
        ])
        .into())
}

fn search_keyword(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .entity(
            SEARCH_KEYWORD_GUID,
            "SearchKeyword",
            None,
            "A shareable keyword to help locate elements.",
            None,
        )?
        .with_attributes([
            f.string_attribute("keyword", "The search keyword.", None),
            f.string_attribute("description", "Description of the keyword.", None),
        ])
        .into())
}

fn search_keyword_link(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .relationship(
            "d2f8df24-6905-49b8-b389-31b2da156ece",
            "SearchKeywordLink",
            None,
            "Provides a link to a keyword that helps to identify specific elements.",
            None,
            EndSpec::new("Referenceable", "keywordElements", EndCardinality::AnyNumber)
                .with_description("Element described by the search keyword."),
            EndSpec::new("SearchKeyword", "searchKeywords", EndCardinality::AnyNumber)
                .with_description("Keywords to describe the element."),
        )?
        .with_multi_link()
        .into())
}

fn memento(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .classification(
            "ecdcd472-6701-4a2b-8d1a-8c5a7c8e3e62",
            "Memento",
            None,
            &["Referenceable"],
            false,
            "An element whose real-world counterpart has been deleted or moved to an offline archive.",
            None,
        )?
        .with_attributes([
            f.date_attribute("archiveDate", "Timestamp when the archive occurred.", None),
            f.string_attribute("archiveUser", "Name of user that performed the archive.", None),
            f.string_attribute(
                "archiveProcess",
                "Name of process that performed the archive.",
                None,
            ),
        ])
        .into())
}
