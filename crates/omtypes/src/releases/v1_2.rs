//! Release 1.2: infrastructure, retention, and the first round of patches.

use omtypes_core::{CatalogError, DefinitionFactory, Operation, Release, ReleaseContext, Step};

/// Infrastructure assets and retention; keyword summaries replace descriptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Release12;

impl Release for Release12 {
    fn label(&self) -> &str {
        "1.2"
    }

    fn contribute(&self, ctx: &mut ReleaseContext<'_>) -> Result<(), CatalogError> {
        ctx.run(STEPS)
    }
}

const STEPS: &[Step] = &[
    search_keyword_summary,
    data_file_is_a_data_set,
    infrastructure,
    software_server,
    retention,
];

fn search_keyword_summary(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .patch("SearchKeyword")?
        .with_description("A shareable keyword with a short summary to help locate elements.")
        .with_attributes([
            f.string_attribute("description", "Deprecated; use summary.", None)
                .deprecated_by("summary"),
            f.string_attribute("summary", "Short description of the keyword.", None),
        ])
        .into())
}

fn data_file_is_a_data_set(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f.patch("DataFile")?.with_supertype("DataSet").into())
}

fn infrastructure(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .entity(
            "c19746ac-b3ec-49ce-af4b-83348fc55e07",
            "Infrastructure",
            Some("Asset"),
            "Physical infrastructure or software platform.",
            None,
        )?
        .into())
}

fn software_server(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .entity(
            "aa7c7884-32ce-4991-9c41-9778f1fec6aa",
            "SoftwareServer",
            Some("Infrastructure"),
            "Software services to support a runtime environment for applications.",
            None,
        )?
        .with_attributes([
            f.string_attribute("softwareVersion", "Version number of the software.", None),
            f.string_attribute("userId", "Server's authentication name.", None),
            f.string_array_attribute("capabilities", "Capabilities hosted by the server.", None),
        ])
        .into())
}

fn retention(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
    Ok(f
        .classification(
            "3a2c8e6d-4a3f-4b9e-9b2c-6a1f8e7d5c40",
            "Retention",
            None,
            &["Asset"],
            false,
            "Defines the retention requirements for related data items.",
            None,
        )?
        .with_attributes([
            f.string_attribute("basis", "Basis on which the retention period is defined.", None),
            f.string_attribute(
                "associatedGUID",
                "Related entity used to determine the retention period.",
                None,
            ),
            f.date_attribute("archiveAfter", "Date the data should be archived.", None),
            f.date_attribute("deleteAfter", "Date the data should be deleted.", None),
            f.string_int_map_attribute(
                "retentionCounts",
                "Number of copies to retain per location.",
                None,
            ),
        ])
        .into())
}
