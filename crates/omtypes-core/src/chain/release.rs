//! Release modules and the context they contribute through.

use crate::catalog::{
    self, ClassificationDef, DefinitionFactory, EntityDef, EnumDef, Operation, RelationshipDef,
    ReleaseStamp, TypeDef, TypePatch, TypeRef, TypeRegistry,
};
use crate::error::CatalogError;

/// One step of a release: build an operation against the registry as it
/// stands after the previous step.
pub type Step = fn(DefinitionFactory<'_>) -> Result<Operation, CatalogError>;

/// One release of the type catalog.
///
/// A release only describes its own delta. Everything earlier releases
/// contributed is already in the registry when [`Release::contribute`] runs.
pub trait Release {
    /// Version label of the release, e.g. `"1.2"`.
    fn label(&self) -> &str;

    /// Add this release's types and patches.
    fn contribute(&self, ctx: &mut ReleaseContext<'_>) -> Result<(), CatalogError>;
}

/// Shared registry handle passed to a contributing release.
///
/// Tracks how many types and patches the release applied so the chain can
/// report them.
#[derive(Debug)]
pub struct ReleaseContext<'a> {
    registry: &'a mut TypeRegistry,
    stamp: ReleaseStamp,
    types_added: usize,
    patches_applied: usize,
}

impl<'a> ReleaseContext<'a> {
    /// Create a context over `registry` for the release described by `stamp`.
    pub fn new(registry: &'a mut TypeRegistry, stamp: ReleaseStamp) -> Self {
        Self {
            registry,
            stamp,
            types_added: 0,
            patches_applied: 0,
        }
    }

    /// Label of the contributing release.
    pub fn release(&self) -> &str {
        &self.stamp.version_name
    }

    /// Read access to the registry.
    pub fn registry(&self) -> &TypeRegistry {
        self.registry
    }

    /// A factory stamped for this release.
    pub fn factory(&self) -> DefinitionFactory<'_> {
        DefinitionFactory::new(self.registry, &self.stamp)
    }

    /// Apply one operation.
    pub fn apply(&mut self, op: Operation) -> Result<TypeRef, CatalogError> {
        let is_patch = matches!(op, Operation::PatchType(_));
        let link = catalog::apply(self.registry, op)?;
        if is_patch {
            self.patches_applied += 1;
        } else {
            self.types_added += 1;
        }
        Ok(link)
    }

    /// Register an entity type.
    pub fn add_entity_type(&mut self, def: EntityDef) -> Result<TypeRef, CatalogError> {
        self.apply(def.into())
    }

    /// Register a relationship type.
    pub fn add_relationship_type(&mut self, def: RelationshipDef) -> Result<TypeRef, CatalogError> {
        self.apply(def.into())
    }

    /// Register a classification type.
    pub fn add_classification_type(
        &mut self,
        def: ClassificationDef,
    ) -> Result<TypeRef, CatalogError> {
        self.apply(def.into())
    }

    /// Register an enumeration type.
    pub fn add_enumeration_type(&mut self, def: EnumDef) -> Result<TypeRef, CatalogError> {
        self.apply(def.into())
    }

    /// An empty patch for `name`, stamped for this release.
    pub fn patch(&self, name: &str) -> Result<TypePatch, CatalogError> {
        self.factory().patch(name)
    }

    /// Run steps in order, applying each operation before building the next.
    pub fn run(&mut self, steps: &[Step]) -> Result<(), CatalogError> {
        for step in steps {
            let op = step(self.factory())?;
            self.apply(op)?;
        }
        Ok(())
    }

    /// Apply a patch and return the updated definition.
    pub fn apply_patch(&mut self, patch: TypePatch) -> Result<&TypeDef, CatalogError> {
        let name = patch.type_name.clone();
        self.apply(Operation::PatchType(patch))?;
        self.registry.get_type_by_name(&name)
    }

    /// Number of types this release registered so far.
    pub fn types_added(&self) -> usize {
        self.types_added
    }

    /// Number of patches this release applied so far.
    pub fn patches_applied(&self) -> usize {
        self.patches_applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Attribute, Definition, PrimitiveKind, TypeStatus};

    #[test]
    fn test_context_stamps_and_counts() {
        let mut registry = TypeRegistry::new();
        let mut ctx = ReleaseContext::new(&mut registry, ReleaseStamp::new("tester", 42, "1.0"));

        let def = ctx
            .factory()
            .entity("g-kw", "SearchKeyword", None, "A keyword", None)
            .unwrap();
        ctx.add_entity_type(def).unwrap();

        let patch = ctx
            .patch("SearchKeyword")
            .unwrap()
            .with_attribute(Attribute::primitive("keyword", PrimitiveKind::String));
        assert_eq!(patch.updated_by, "tester");
        assert_eq!(patch.version_name.as_deref(), Some("1.0"));

        let updated = ctx.apply_patch(patch).unwrap();
        assert_eq!(updated.version(), 2);
        assert_eq!(updated.status(), TypeStatus::Active);
        assert_eq!(updated.header().update_time, 42);

        assert_eq!(ctx.release(), "1.0");
        assert_eq!(ctx.types_added(), 1);
        assert_eq!(ctx.patches_applied(), 1);
    }

    fn keyword(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
        Ok(f.entity("g-kw", "SearchKeyword", None, "", None)?.into())
    }

    fn keyword_summary(f: DefinitionFactory<'_>) -> Result<Operation, CatalogError> {
        Ok(f
            .patch("SearchKeyword")?
            .with_attribute(f.string_attribute("summary", "", None))
            .into())
    }

    #[test]
    fn test_run_steps_in_order() {
        let mut registry = TypeRegistry::new();
        let mut ctx = ReleaseContext::new(&mut registry, ReleaseStamp::new("tester", 42, "1.0"));

        ctx.run(&[keyword, keyword_summary]).unwrap();
        assert_eq!(ctx.types_added(), 1);
        assert_eq!(ctx.patches_applied(), 1);

        let def = registry.get_type_by_name("SearchKeyword").unwrap();
        assert!(def.get_attribute("summary").is_some());
    }

    #[test]
    fn test_patch_unknown_type() {
        let mut registry = TypeRegistry::new();
        let ctx = ReleaseContext::new(&mut registry, ReleaseStamp::new("tester", 42, "1.0"));

        assert_eq!(
            ctx.patch("Glossary").unwrap_err(),
            CatalogError::UnknownType {
                name: "Glossary".to_string()
            }
        );
    }
}
