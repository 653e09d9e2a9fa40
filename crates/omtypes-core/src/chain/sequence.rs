//! Ordered release chain.
//!
//! The chain is a plain list of releases driven by one loop. Release N runs
//! only after releases 1 to N-1 have contributed, so every reference it makes
//! resolves against their types.

use super::error::BuildError;
use super::release::{Release, ReleaseContext};
use crate::catalog::{PopulationState, ReleaseStamp, TypeRegistry};
use crate::config::{DEFAULT_CREATION_TIME, DEFAULT_ORIGINATOR_NAME};
use std::fmt;
use tracing::{debug, info, instrument, warn};

/// Where a single release is in its population cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleasePhase {
    /// Earlier releases are being applied.
    Delegating,
    /// The release is adding its own types and patches.
    Contributing,
    /// The release and all its predecessors have been applied.
    Populated,
}

impl fmt::Display for ReleasePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleasePhase::Delegating => write!(f, "delegating"),
            ReleasePhase::Contributing => write!(f, "contributing"),
            ReleasePhase::Populated => write!(f, "populated"),
        }
    }
}

/// Result of a population run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulationResult {
    /// Labels of the releases applied, in order.
    pub releases: Vec<String>,
    /// Number of types registered.
    pub types_added: usize,
    /// Number of patches applied.
    pub patches_applied: usize,
}

impl PopulationResult {
    /// Label of the last release applied.
    pub fn last_release(&self) -> Option<&str> {
        self.releases.last().map(String::as_str)
    }
}

/// An ordered sequence of releases.
pub struct ReleaseChain {
    releases: Vec<Box<dyn Release>>,
    originator: String,
    time: u64,
}

impl fmt::Debug for ReleaseChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReleaseChain")
            .field("releases", &self.labels())
            .field("originator", &self.originator)
            .field("time", &self.time)
            .finish()
    }
}

impl Default for ReleaseChain {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseChain {
    /// Create an empty chain stamped with the default originator and time.
    pub fn new() -> Self {
        Self {
            releases: Vec::new(),
            originator: DEFAULT_ORIGINATOR_NAME.to_string(),
            time: DEFAULT_CREATION_TIME,
        }
    }

    /// Set the originator and time stamped onto every definition and patch.
    pub fn with_origin(mut self, originator: impl Into<String>, time: u64) -> Self {
        self.originator = originator.into();
        self.time = time;
        self
    }

    /// Append a release. Labels must be unique within the chain.
    pub fn with_release(mut self, release: impl Release + 'static) -> Result<Self, BuildError> {
        if self.position(release.label()).is_some() {
            return Err(BuildError::DuplicateRelease {
                label: release.label().to_string(),
            });
        }
        self.releases.push(Box::new(release));
        Ok(self)
    }

    /// Release labels, in order.
    pub fn labels(&self) -> Vec<&str> {
        self.releases.iter().map(|r| r.label()).collect()
    }

    /// Number of releases.
    pub fn len(&self) -> usize {
        self.releases.len()
    }

    /// Check if the chain has no releases.
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.releases.iter().position(|r| r.label() == label)
    }

    /// Apply every release to `registry`.
    pub fn populate(&self, registry: &mut TypeRegistry) -> Result<PopulationResult, BuildError> {
        self.run(registry, self.releases.len())
    }

    /// Apply releases up to and including `label`.
    pub fn populate_through(
        &self,
        registry: &mut TypeRegistry,
        label: &str,
    ) -> Result<PopulationResult, BuildError> {
        let index = self
            .position(label)
            .ok_or_else(|| BuildError::UnknownRelease {
                label: label.to_string(),
            })?;
        self.run(registry, index + 1)
    }

    #[instrument(skip(self, registry), fields(originator = %self.originator))]
    fn run(
        &self,
        registry: &mut TypeRegistry,
        count: usize,
    ) -> Result<PopulationResult, BuildError> {
        if registry.state().is_failed() {
            return Err(BuildError::Unusable {
                state: registry.state().clone(),
            });
        }

        let mut result = PopulationResult::default();

        for release in &self.releases[..count] {
            let label = release.label();
            debug!(release = label, phase = %ReleasePhase::Delegating, "Predecessors applied");

            registry.set_state(PopulationState::Populating {
                release: label.to_string(),
            });
            debug!(release = label, phase = %ReleasePhase::Contributing, "Contributing release");

            let stamp = ReleaseStamp::new(self.originator.clone(), self.time, label);
            let mut ctx = ReleaseContext::new(registry, stamp);
            let outcome = release.contribute(&mut ctx);
            let (types_added, patches_applied) = (ctx.types_added(), ctx.patches_applied());

            if let Err(source) = outcome {
                warn!(
                    release = label,
                    type_name = source.type_name(),
                    error = %source,
                    "Release failed; registry is unusable"
                );
                registry.set_state(PopulationState::Failed {
                    release: label.to_string(),
                });
                return Err(BuildError::Release {
                    release: label.to_string(),
                    source,
                });
            }

            registry.set_state(PopulationState::Populated {
                release: label.to_string(),
            });
            result.releases.push(label.to_string());
            result.types_added += types_added;
            result.patches_applied += patches_applied;

            info!(
                release = label,
                phase = %ReleasePhase::Populated,
                types_added,
                patches_applied,
                total_types = registry.len(),
                "Release populated"
            );
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Attribute, EndCardinality, EndSpec, PrimitiveKind, TypeStatus};
    use crate::error::CatalogError;

    struct Base;

    impl Release for Base {
        fn label(&self) -> &str {
            "1.0"
        }

        fn contribute(&self, ctx: &mut ReleaseContext<'_>) -> Result<(), CatalogError> {
            let f = ctx.factory();
            let keyword = f
                .entity("g-kw", "SearchKeyword", None, "A keyword", None)?
                .with_attributes([
                    f.string_attribute("keyword", "The keyword", None),
                    f.string_attribute("description", "What it means", None),
                ]);
            ctx.add_entity_type(keyword)?;
            Ok(())
        }
    }

    struct Rename;

    impl Release for Rename {
        fn label(&self) -> &str {
            "1.1"
        }

        fn contribute(&self, ctx: &mut ReleaseContext<'_>) -> Result<(), CatalogError> {
            let patch = ctx.patch("SearchKeyword")?.with_attributes([
                Attribute::primitive("description", PrimitiveKind::String).deprecated_by("summary"),
                Attribute::primitive("summary", PrimitiveKind::String),
            ]);
            ctx.apply_patch(patch)?;
            Ok(())
        }
    }

    struct Broken;

    impl Release for Broken {
        fn label(&self) -> &str {
            "1.2"
        }

        fn contribute(&self, ctx: &mut ReleaseContext<'_>) -> Result<(), CatalogError> {
            let rel = ctx.factory().relationship(
                "g-ta",
                "TermAnchor",
                None,
                "",
                None,
                EndSpec::new("Glossary", "anchor", EndCardinality::AtMostOne),
                EndSpec::new("SearchKeyword", "terms", EndCardinality::AnyNumber),
            )?;
            ctx.add_relationship_type(rel)?;
            Ok(())
        }
    }

    fn chain() -> ReleaseChain {
        ReleaseChain::new()
            .with_origin("tester", 7)
            .with_release(Base)
            .unwrap()
            .with_release(Rename)
            .unwrap()
    }

    #[test]
    fn test_populate_all() {
        let mut registry = TypeRegistry::new();
        let result = chain().populate(&mut registry).unwrap();

        assert_eq!(result.releases, vec!["1.0", "1.1"]);
        assert_eq!(result.last_release(), Some("1.1"));
        assert_eq!(result.types_added, 1);
        assert_eq!(result.patches_applied, 1);
        assert_eq!(
            registry.state(),
            &PopulationState::Populated {
                release: "1.1".to_string()
            }
        );

        let keyword = registry.get_entity_type("SearchKeyword").unwrap();
        assert_eq!(keyword.header.guid, "g-kw");
        assert_eq!(keyword.header.version, 2);
        assert_eq!(keyword.header.version_name, "1.1");
        assert_eq!(keyword.header.created_by, "tester");

        let description = keyword.get_attribute("description").unwrap();
        assert_eq!(description.status, TypeStatus::Deprecated);
        assert_eq!(description.replaced_by.as_deref(), Some("summary"));
        assert!(keyword.get_attribute("summary").unwrap().is_active());
    }

    #[test]
    fn test_populate_through() {
        let mut registry = TypeRegistry::new();
        let result = chain().populate_through(&mut registry, "1.0").unwrap();

        assert_eq!(result.releases, vec!["1.0"]);
        assert_eq!(registry.get_type_by_name("SearchKeyword").unwrap().version(), 1);
        assert_eq!(registry.state().populated_release(), Some("1.0"));

        let err = chain()
            .populate_through(&mut TypeRegistry::new(), "9.9")
            .unwrap_err();
        assert!(matches!(err, BuildError::UnknownRelease { ref label } if label == "9.9"));
    }

    #[test]
    fn test_duplicate_release_label() {
        let err = ReleaseChain::new()
            .with_release(Base)
            .unwrap()
            .with_release(Base)
            .unwrap_err();
        assert!(matches!(err, BuildError::DuplicateRelease { ref label } if label == "1.0"));
    }

    #[test]
    fn test_repopulation_fails_fast() {
        let chain = chain();
        let mut registry = TypeRegistry::new();
        chain.populate(&mut registry).unwrap();

        let err = chain.populate(&mut registry).unwrap_err();
        assert_eq!(err.release(), Some("1.0"));
        assert!(matches!(
            err.catalog_error(),
            Some(CatalogError::DuplicateDefinition { .. })
        ));
        assert!(registry.state().is_failed());
    }

    #[test]
    fn test_failure_poisons_registry() {
        let chain = chain().with_release(Broken).unwrap();
        let mut registry = TypeRegistry::new();

        let err = chain.populate(&mut registry).unwrap_err();
        assert_eq!(err.release(), Some("1.2"));
        assert_eq!(
            err.catalog_error(),
            Some(&CatalogError::UnknownType {
                name: "Glossary".to_string()
            })
        );
        assert_eq!(
            registry.state(),
            &PopulationState::Failed {
                release: "1.2".to_string()
            }
        );

        let err = chain.populate(&mut registry).unwrap_err();
        assert!(matches!(err, BuildError::Unusable { .. }));
    }
}
