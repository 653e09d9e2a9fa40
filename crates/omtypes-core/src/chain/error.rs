//! Release chain errors.

use crate::catalog::PopulationState;
use crate::error::CatalogError;
use thiserror::Error;

/// Errors raised while running a release chain.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A release failed to contribute. The registry is no longer usable.
    #[error("release {release} failed: {source}")]
    Release {
        /// Label of the failing release.
        release: String,
        /// The underlying catalog error.
        #[source]
        source: CatalogError,
    },

    /// Two releases in one chain share a label.
    #[error("release {label} is already in the chain")]
    DuplicateRelease {
        /// The repeated label.
        label: String,
    },

    /// The requested release is not part of the chain.
    #[error("unknown release: {label}")]
    UnknownRelease {
        /// The requested label.
        label: String,
    },

    /// The registry was poisoned by an earlier failed build.
    #[error("registry is unusable ({state}); start a new build")]
    Unusable {
        /// State the registry was found in.
        state: PopulationState,
    },
}

impl BuildError {
    /// The catalog error behind a failed release, if any.
    pub fn catalog_error(&self) -> Option<&CatalogError> {
        match self {
            BuildError::Release { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Label of the release that failed, if any.
    pub fn release(&self) -> Option<&str> {
        match self {
            BuildError::Release { release, .. } => Some(release),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_release_error_reports_type_and_release() {
        let err = BuildError::Release {
            release: "1.2".to_string(),
            source: CatalogError::UnknownType {
                name: "Glossary".to_string(),
            },
        };

        assert_eq!(err.to_string(), "release 1.2 failed: unknown type: Glossary");
        assert_eq!(err.release(), Some("1.2"));
        assert_eq!(err.catalog_error().map(|e| e.type_name()), Some("Glossary"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_unusable_display() {
        let err = BuildError::Unusable {
            state: PopulationState::Failed {
                release: "1.1".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "registry is unusable (failed in 1.1); start a new build"
        );
        assert!(err.catalog_error().is_none());
    }
}
