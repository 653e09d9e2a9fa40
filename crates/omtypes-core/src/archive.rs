//! Archive export.
//!
//! An exported [`TypeArchive`] is a self-contained copy of a populated
//! registry plus a header describing where it came from.

use crate::catalog::{Definition, EnumDef, PopulationState, TypeDef, TypePatch, TypeRegistry};
use crate::config::{ArchiveConfig, ArchiveType};
use crate::error::ExportError;
use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};
use tracing::info;

/// Descriptive header of an exported archive.
#[derive(
    Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct ArchiveHeader {
    /// Archive identifier.
    pub guid: String,
    /// Archive name.
    pub name: String,
    /// Archive description.
    pub description: String,
    /// What the archive is for.
    pub archive_type: ArchiveType,
    /// Label of the last release applied.
    pub version_name: String,
    /// Originator name.
    pub originator_name: String,
    /// Originator license.
    pub originator_license: String,
    /// Creation time (milliseconds since Unix epoch).
    pub creation_time: u64,
}

/// An immutable snapshot of a populated registry.
#[derive(
    Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct TypeArchive {
    /// Archive header.
    pub header: ArchiveHeader,
    /// Enumeration types, in creation order.
    pub attribute_type_defs: Vec<EnumDef>,
    /// Entity, relationship and classification types, in creation order.
    pub type_defs: Vec<TypeDef>,
    /// Applied patches, in application order.
    pub type_def_patches: Vec<TypePatch>,
}

impl TypeArchive {
    /// Find a definition by name, enumerations included.
    pub fn get_type(&self, name: &str) -> Option<TypeDef> {
        self.type_defs
            .iter()
            .find(|t| t.name() == name)
            .cloned()
            .or_else(|| {
                self.attribute_type_defs
                    .iter()
                    .find(|e| e.name() == name)
                    .cloned()
                    .map(TypeDef::Enumeration)
            })
    }

    /// Total number of definitions.
    pub fn type_count(&self) -> usize {
        self.attribute_type_defs.len() + self.type_defs.len()
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ExportError> {
        serde_json::to_string_pretty(self).map_err(|e| ExportError::Serialization(e.to_string()))
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self, ExportError> {
        serde_json::from_str(json).map_err(|e| ExportError::Deserialization(e.to_string()))
    }

    /// Content fingerprint: blake3 of the JSON form, hex encoded.
    pub fn fingerprint(&self) -> Result<String, ExportError> {
        let json = self.to_json()?;
        Ok(hex::encode(blake3::hash(json.as_bytes()).as_bytes()))
    }

    /// Serialize to the binary form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ExportError> {
        rkyv::to_bytes::<rkyv::rancor::Error>(self)
            .map(|v| v.to_vec())
            .map_err(|e| ExportError::Serialization(e.to_string()))
    }

    /// Deserialize from the binary form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ExportError> {
        rkyv::from_bytes::<Self, rkyv::rancor::Error>(bytes)
            .map_err(|e| ExportError::Deserialization(e.to_string()))
    }
}

/// Turns a populated registry into a [`TypeArchive`].
#[derive(Debug, Clone, Default)]
pub struct ArchiveExporter {
    config: ArchiveConfig,
}

impl ArchiveExporter {
    /// Create an exporter with the given header settings.
    pub fn new(config: ArchiveConfig) -> Self {
        Self { config }
    }

    /// Header settings.
    pub fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    /// Export a registry that completed population.
    pub fn export(&self, registry: &TypeRegistry) -> Result<TypeArchive, ExportError> {
        let snapshot = registry.snapshot();
        let version_name = match snapshot.state {
            PopulationState::Populated { release } => release.clone(),
            state => {
                return Err(ExportError::NotPopulated {
                    state: state.clone(),
                })
            }
        };

        let archive = TypeArchive {
            header: ArchiveHeader {
                guid: self.config.guid.clone(),
                name: self.config.name.clone(),
                description: self.config.description.clone(),
                archive_type: self.config.archive_type,
                version_name,
                originator_name: self.config.originator_name.clone(),
                originator_license: self.config.originator_license.clone(),
                creation_time: self.config.creation_time,
            },
            attribute_type_defs: snapshot.enumerations().cloned().collect(),
            type_defs: snapshot.structured_types().cloned().collect(),
            type_def_patches: snapshot.patches.to_vec(),
        };

        info!(
            archive = %archive.header.name,
            version = %archive.header.version_name,
            enumerations = archive.attribute_type_defs.len(),
            types = archive.type_defs.len(),
            patches = archive.type_def_patches.len(),
            "Exported type archive"
        );

        Ok(archive)
    }
}
