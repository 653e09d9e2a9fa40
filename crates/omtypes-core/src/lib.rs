//! omtypes core - type registry, definition factory, patch engine, release
//! chain and archive export.
//!
//! This crate provides the machinery for building a versioned catalog of open
//! metadata types. The release data itself lives in the `omtypes` crate.

pub mod archive;
pub mod catalog;
pub mod chain;
pub mod config;
pub mod error;

pub use archive::{ArchiveExporter, ArchiveHeader, TypeArchive};
pub use catalog::{
    Attribute, AttributeKind, ClassificationDef, Definition, DefinitionFactory, EndCardinality,
    EndSpec, EntityDef, EnumDef, EnumElement, Operation, PopulationState, PrimitiveKind,
    PropagationRule, RegistrySnapshot, RelationshipDef, RelationshipEnd, ReleaseStamp,
    ScopeChange, TypeCategory, TypeDef, TypeDefHeader, TypePatch, TypeRef, TypeRegistry,
    TypeStatus,
};
pub use chain::{
    BuildError, PopulationResult, Release, ReleaseChain, ReleaseContext, ReleasePhase, Step,
};
pub use config::{ArchiveConfig, ArchiveType, DEFAULT_ARCHIVE_FILE_NAME};
pub use error::{CatalogError, ExportError};
