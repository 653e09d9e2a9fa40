//! # omtypes
//!
//! The standard open metadata type catalog.
//!
//! Each release of the catalog is a module that adds new types or patches
//! types from earlier releases. [`build`] runs every release, oldest first,
//! against a fresh registry and exports the result as a [`TypeArchive`].
//!
//! ## Quick Start
//!
//! ```rust
//! let archive = omtypes::build()?;
//!
//! let keyword = archive.get_type("SearchKeyword").expect("registered in 1.0");
//! assert_eq!(archive.header.version_name, "2.0");
//!
//! // Writing the archive is left to the caller.
//! let json = archive.to_json()?;
//! # let _ = (keyword, json);
//! # Ok::<(), omtypes::Error>(())
//! ```

pub mod releases;

pub use omtypes_core::{
    ArchiveConfig, ArchiveExporter, ArchiveType, BuildError, CatalogError, ExportError,
    ReleaseChain, TypeArchive, TypeRegistry, DEFAULT_ARCHIVE_FILE_NAME,
};

/// Re-export of the catalog engine.
pub use omtypes_core as engine;

use thiserror::Error;
use tracing::info;

/// Errors raised while building the standard archive.
#[derive(Debug, Error)]
pub enum Error {
    /// A release failed or the chain is malformed.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The populated registry could not be exported.
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Result type for archive builds.
pub type Result<T> = std::result::Result<T, Error>;

/// The standard release chain, stamped with the default originator and time.
pub fn release_chain() -> Result<ReleaseChain> {
    let config = ArchiveConfig::default();
    Ok(releases::standard_chain(
        &config.originator_name,
        config.creation_time,
    )?)
}

/// Build the standard archive with the default header.
pub fn build() -> Result<TypeArchive> {
    build_with(ArchiveConfig::default())
}

/// Build the standard archive with a custom header.
///
/// The originator name and creation time of `config` are also stamped onto
/// every type and patch.
pub fn build_with(config: ArchiveConfig) -> Result<TypeArchive> {
    let chain = releases::standard_chain(&config.originator_name, config.creation_time)?;

    let mut registry = TypeRegistry::new();
    let result = chain.populate(&mut registry)?;

    let archive = ArchiveExporter::new(config).export(&registry)?;
    info!(
        releases = result.releases.len(),
        types = archive.type_count(),
        patches = result.patches_applied,
        file_name = DEFAULT_ARCHIVE_FILE_NAME,
        "Built open metadata types archive"
    );

    Ok(archive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use omtypes_core::Definition;

    #[test]
    fn test_build_header() {
        let archive = build().unwrap();
        assert_eq!(archive.header.version_name, "2.0");
        assert_eq!(archive.header.guid, omtypes_core::config::DEFAULT_ARCHIVE_GUID);
        assert_eq!(archive.header.creation_time, 1588261366992);
    }

    #[test]
    fn test_build_with_custom_origin() {
        let archive = build_with(
            ArchiveConfig::new()
                .with_originator("tester")
                .with_creation_time(5),
        )
        .unwrap();

        assert_eq!(archive.header.originator_name, "tester");
        let asset = archive.get_type("Asset").unwrap();
        assert_eq!(asset.header().created_by, "tester");
        assert_eq!(asset.header().create_time, 5);
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = BuildError::UnknownRelease {
            label: "9.9".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "unknown release: 9.9");
    }
}
