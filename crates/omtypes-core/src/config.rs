//! Archive configuration.
//!
//! Every value here ends up in the exported archive. None of them are
//! generated at runtime, so two builds from the same sources produce the same
//! bytes.

use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};
use std::fmt;

/// Default archive identifier.
pub const DEFAULT_ARCHIVE_GUID: &str = "bce3b0a0-662a-4f87-b8dc-844078a11a6e";

/// Default archive name.
pub const DEFAULT_ARCHIVE_NAME: &str = "Open Metadata Types";

/// Default archive description.
pub const DEFAULT_ARCHIVE_DESCRIPTION: &str = "Standard types for open metadata repositories.";

/// Default originator, also stamped as creator and updater of every type.
pub const DEFAULT_ORIGINATOR_NAME: &str = "ODPi Egeria";

/// Default originator license.
pub const DEFAULT_ORIGINATOR_LICENSE: &str = "Apache-2.0";

/// Fixed creation time (milliseconds since Unix epoch).
pub const DEFAULT_CREATION_TIME: u64 = 1588261366992;

/// Well-known file name for the exported archive.
pub const DEFAULT_ARCHIVE_FILE_NAME: &str = "OpenMetadataTypes.json";

/// What an archive is for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Archive,
    Serialize,
    Deserialize,
    SerdeSerialize,
    SerdeDeserialize,
)]
pub enum ArchiveType {
    /// Reusable content loaded into any repository.
    #[default]
    ContentPack,
    /// Metadata exported from one repository.
    MetadataExport,
    /// Full backup of one repository.
    RepositoryBackup,
}

impl fmt::Display for ArchiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveType::ContentPack => write!(f, "content pack"),
            ArchiveType::MetadataExport => write!(f, "metadata export"),
            ArchiveType::RepositoryBackup => write!(f, "repository backup"),
        }
    }
}

/// Archive header settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveConfig {
    /// Archive identifier.
    pub guid: String,

    /// Archive name.
    pub name: String,

    /// Archive description.
    pub description: String,

    /// Archive type.
    pub archive_type: ArchiveType,

    /// Originator name, stamped onto every type and patch.
    pub originator_name: String,

    /// Originator license.
    pub originator_license: String,

    /// Creation time (milliseconds since Unix epoch), stamped onto every type and patch.
    pub creation_time: u64,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            guid: DEFAULT_ARCHIVE_GUID.to_string(),
            name: DEFAULT_ARCHIVE_NAME.to_string(),
            description: DEFAULT_ARCHIVE_DESCRIPTION.to_string(),
            archive_type: ArchiveType::default(),
            originator_name: DEFAULT_ORIGINATOR_NAME.to_string(),
            originator_license: DEFAULT_ORIGINATOR_LICENSE.to_string(),
            creation_time: DEFAULT_CREATION_TIME,
        }
    }
}

impl ArchiveConfig {
    /// Create a configuration with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the archive identifier.
    pub fn with_guid(mut self, guid: impl Into<String>) -> Self {
        self.guid = guid.into();
        self
    }

    /// Set the archive name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the archive description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the archive type.
    pub fn with_archive_type(mut self, archive_type: ArchiveType) -> Self {
        self.archive_type = archive_type;
        self
    }

    /// Set the originator name.
    pub fn with_originator(mut self, name: impl Into<String>) -> Self {
        self.originator_name = name.into();
        self
    }

    /// Set the originator license.
    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.originator_license = license.into();
        self
    }

    /// Set the creation time.
    pub fn with_creation_time(mut self, time: u64) -> Self {
        self.creation_time = time;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ArchiveConfig::default();
        assert_eq!(config.guid, DEFAULT_ARCHIVE_GUID);
        assert_eq!(config.archive_type, ArchiveType::ContentPack);
        assert_eq!(config.originator_license, "Apache-2.0");
        assert_eq!(config.creation_time, 1588261366992);
    }

    #[test]
    fn test_config_builder() {
        let config = ArchiveConfig::new()
            .with_name("Test Types")
            .with_archive_type(ArchiveType::MetadataExport)
            .with_originator("tester")
            .with_creation_time(1);

        assert_eq!(config.name, "Test Types");
        assert_eq!(config.archive_type.to_string(), "metadata export");
        assert_eq!(config.originator_name, "tester");
        assert_eq!(config.creation_time, 1);
        assert_eq!(config.description, DEFAULT_ARCHIVE_DESCRIPTION);
    }
}
