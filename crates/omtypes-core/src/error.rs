//! Core error types.

use crate::catalog::{PopulationState, TypeCategory};
use thiserror::Error;

/// Errors raised while building or patching type definitions.
///
/// Every variant names the type that triggered it. All of them are
/// deterministic: the same source definitions fail the same way every time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A name was referenced before any release registered it.
    #[error("unknown type: {name}")]
    UnknownType {
        /// The unresolved name.
        name: String,
    },

    /// A name resolved, but to a type of another category.
    #[error("type {name} is registered as {actual}, not {expected}")]
    WrongKind {
        /// The referenced name.
        name: String,
        /// Category the caller asked for.
        expected: TypeCategory,
        /// Category actually registered under that name.
        actual: TypeCategory,
    },

    /// A name or identifier is already registered.
    #[error("duplicate definition: {name} ({guid})")]
    DuplicateDefinition {
        /// Name of the rejected definition.
        name: String,
        /// Identifier of the rejected definition.
        guid: String,
    },

    /// A patch cannot be applied to its target.
    #[error("invalid patch for {type_name}: {reason}")]
    InvalidPatch {
        /// Target type of the patch.
        type_name: String,
        /// Why the patch was rejected.
        reason: String,
    },

    /// Two enumeration elements share an ordinal.
    #[error("enumeration {type_name} declares ordinal {ordinal} more than once")]
    OrdinalConflict {
        /// The enumeration type.
        type_name: String,
        /// The repeated ordinal.
        ordinal: u32,
    },

    /// An enumeration that requires a default element has none.
    #[error("enumeration {type_name} has no default element")]
    MissingDefault {
        /// The enumeration type.
        type_name: String,
    },

    /// An enumeration flags more than one element as default.
    #[error("enumeration {type_name} flags {count} elements as default")]
    ExtraDefault {
        /// The enumeration type.
        type_name: String,
        /// Number of default elements found.
        count: usize,
    },

    /// A classification may not attach to any entity type.
    #[error("classification {type_name} has no valid entity types")]
    EmptyAttachmentSet {
        /// The classification type.
        type_name: String,
    },

    /// An attribute name appears twice on one type.
    #[error("type {type_name} declares attribute {attribute} more than once")]
    DuplicateAttribute {
        /// The declaring type.
        type_name: String,
        /// The repeated attribute name.
        attribute: String,
    },

    /// A replaced-by link does not name an active attribute of the same type.
    #[error("attribute {type_name}.{attribute} is replaced by {replaced_by}, which is not an active attribute of {type_name}")]
    DanglingReplacement {
        /// The declaring type.
        type_name: String,
        /// The deprecated attribute.
        attribute: String,
        /// The missing or inactive replacement.
        replaced_by: String,
    },

    /// An attribute names a replacement but is still active.
    #[error("attribute {type_name}.{attribute} is replaced by {replaced_by} but is still active")]
    ActiveReplacement {
        /// The declaring type.
        type_name: String,
        /// The attribute carrying the replaced-by link.
        attribute: String,
        /// The named replacement.
        replaced_by: String,
    },

    /// An embedded link carries an identifier that does not match the registry.
    #[error("type {type_name} links to {reference} with identifier {guid}, which does not match the registered type")]
    InvalidReference {
        /// The declaring type.
        type_name: String,
        /// The referenced name.
        reference: String,
        /// The identifier carried by the link.
        guid: String,
    },
}

impl CatalogError {
    /// Name of the type that triggered the error.
    pub fn type_name(&self) -> &str {
        match self {
            CatalogError::UnknownType { name } => name,
            CatalogError::WrongKind { name, .. } => name,
            CatalogError::DuplicateDefinition { name, .. } => name,
            CatalogError::InvalidPatch { type_name, .. } => type_name,
            CatalogError::OrdinalConflict { type_name, .. } => type_name,
            CatalogError::MissingDefault { type_name } => type_name,
            CatalogError::ExtraDefault { type_name, .. } => type_name,
            CatalogError::EmptyAttachmentSet { type_name } => type_name,
            CatalogError::DuplicateAttribute { type_name, .. } => type_name,
            CatalogError::DanglingReplacement { type_name, .. } => type_name,
            CatalogError::ActiveReplacement { type_name, .. } => type_name,
            CatalogError::InvalidReference { type_name, .. } => type_name,
        }
    }

    pub(crate) fn invalid_patch(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::InvalidPatch {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while exporting a registry.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The registry has not completed population.
    #[error("registry is not populated (state: {state})")]
    NotPopulated {
        /// State the registry was found in.
        state: PopulationState,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("deserialization error: {0}")]
    Deserialization(String),
}
