//! Release 2.0: ownership moves to a classification and confidentiality levels
//! become numeric.

use omtypes_core::{
    CatalogError, DefinitionFactory, EnumElement, Operation, Release, ReleaseContext, Step,
};

/// Ownership classification; deprecations of superseded attributes and types.
#[derive(Debug, Clone, Copy, Default)]
pub struct Release20;

impl Release for Release20 {
    fn label(&self) -> &str {
        "2.0"
    }

    fn contribute(&self, ctx: &mut ReleaseContext<'_>) -> Result<(), CatalogError> {
        ctx.run(STEPS)
    }
}

const STEPS: &[Step] = &[
    owner_type,
    ownership,
    asset_owner_deprecated,
    numeric_confidentiality,
    confidentiality_level_deprecated,
];

fn owner_type(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .enumeration(
            "5ce92a70-b86a-4e0d-a9d4-3a4d8a2c1e12",
            "OwnerType",
            "Defines the type of identifier for an asset's owner.",
            None,
        )
        .with_elements([
            EnumElement::new(0, "UserId", "The owner's userId is specified.").as_default(),
            EnumElement::new(
                1,
                "ProfileId",
                "The unique identifier of the owner's profile is specified.",
            ),
            EnumElement::new(99, "Other", "A different type of owner identifier is specified."),
        ])
        .into())
}

fn ownership(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .classification(
            "d531c566-78b2-4d1a-a3a6-31f3c1a5ebd2",
            "Ownership",
            None,
            &["Referenceable"],
            false,
            "Defines the owner of an element.",
            None,
        )?
        .with_attributes([
            f.string_attribute(
                "owner",
                "Identifier of the person or process that owns the element.",
                None,
            ),
            f.enum_attribute(
                "OwnerType",
                "ownerType",
                "Type of identifier used for the owner.",
                None,
            )?,
        ])
        .into())
}

fn asset_owner_deprecated(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .patch("Asset")?
        .with_attribute(
            f.string_attribute(
                "owner",
                "Deprecated; use the Ownership classification.",
                None,
            )
            .deprecated(),
        )
        .into())
}

fn numeric_confidentiality(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .patch("Confidentiality")?
        .with_attributes([
            f.enum_attribute(
                "ConfidentialityLevel",
                "level",
                "Deprecated; use levelIdentifier.",
                None,
            )?
            .deprecated_by("levelIdentifier"),
            f.int_attribute(
                "levelIdentifier",
                "Numeric level of confidentiality, defined by the organization.",
                None,
            ),
        ])
        .into())
}

fn confidentiality_level_deprecated(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f.patch("ConfidentialityLevel")?.deprecate().into())
}
