//! Definition factory.
//!
//! Turns semantic requests ("a string attribute", "an entity type whose
//! supertype is `Asset`") into correctly shaped definitions. Every name the
//! caller mentions is resolved through the registry, so a definition built
//! here can only point at types that already exist.

use super::attribute::Attribute;
use super::classification::ClassificationDef;
use super::entity::EntityDef;
use super::enumeration::EnumDef;
use super::patch::TypePatch;
use super::registry::TypeRegistry;
use super::relationship::{EndSpec, RelationshipDef, RelationshipEnd};
use super::typedef::{Definition, TypeCategory, TypeRef};
use super::types::{AttributeKind, PrimitiveKind};
use crate::error::CatalogError;

/// Provenance stamped onto every definition a release creates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReleaseStamp {
    /// Originator recorded as creator and updater.
    pub originator: String,
    /// Creation and update time (milliseconds since Unix epoch).
    pub time: u64,
    /// Release label recorded as the version name.
    pub version_name: String,
}

impl ReleaseStamp {
    /// Create a stamp.
    pub fn new(originator: impl Into<String>, time: u64, version_name: impl Into<String>) -> Self {
        Self {
            originator: originator.into(),
            time,
            version_name: version_name.into(),
        }
    }
}

/// Builds definitions whose references resolve against a registry.
#[derive(Debug, Clone, Copy)]
pub struct DefinitionFactory<'a> {
    registry: &'a TypeRegistry,
    stamp: &'a ReleaseStamp,
}

impl<'a> DefinitionFactory<'a> {
    /// Create a factory over `registry`, stamping definitions with `stamp`.
    pub fn new(registry: &'a TypeRegistry, stamp: &'a ReleaseStamp) -> Self {
        Self { registry, stamp }
    }

    /// The stamp applied to new definitions.
    pub fn stamp(&self) -> &ReleaseStamp {
        self.stamp
    }

    fn attribute(
        &self,
        kind: AttributeKind,
        name: &str,
        description: &str,
        description_guid: Option<&str>,
    ) -> Attribute {
        let mut attribute = Attribute::new(name, kind).with_description(description);
        attribute.description_guid = description_guid.map(String::from);
        attribute
    }

    /// A string attribute.
    pub fn string_attribute(
        &self,
        name: &str,
        description: &str,
        description_guid: Option<&str>,
    ) -> Attribute {
        self.attribute(
            AttributeKind::Primitive(PrimitiveKind::String),
            name,
            description,
            description_guid,
        )
    }

    /// A 32-bit integer attribute.
    pub fn int_attribute(
        &self,
        name: &str,
        description: &str,
        description_guid: Option<&str>,
    ) -> Attribute {
        self.attribute(
            AttributeKind::Primitive(PrimitiveKind::Int),
            name,
            description,
            description_guid,
        )
    }

    /// A 64-bit integer attribute.
    pub fn long_attribute(
        &self,
        name: &str,
        description: &str,
        description_guid: Option<&str>,
    ) -> Attribute {
        self.attribute(
            AttributeKind::Primitive(PrimitiveKind::Long),
            name,
            description,
            description_guid,
        )
    }

    /// A boolean attribute.
    pub fn boolean_attribute(
        &self,
        name: &str,
        description: &str,
        description_guid: Option<&str>,
    ) -> Attribute {
        self.attribute(
            AttributeKind::Primitive(PrimitiveKind::Boolean),
            name,
            description,
            description_guid,
        )
    }

    /// A date attribute.
    pub fn date_attribute(
        &self,
        name: &str,
        description: &str,
        description_guid: Option<&str>,
    ) -> Attribute {
        self.attribute(
            AttributeKind::Primitive(PrimitiveKind::Date),
            name,
            description,
            description_guid,
        )
    }

    /// A floating point attribute.
    pub fn float_attribute(
        &self,
        name: &str,
        description: &str,
        description_guid: Option<&str>,
    ) -> Attribute {
        self.attribute(
            AttributeKind::Primitive(PrimitiveKind::Float),
            name,
            description,
            description_guid,
        )
    }

    /// An attribute whose values come from the registered enumeration `enum_type`.
    pub fn enum_attribute(
        &self,
        enum_type: &str,
        name: &str,
        description: &str,
        description_guid: Option<&str>,
    ) -> Result<Attribute, CatalogError> {
        let def = self.registry.get_enumeration_type(enum_type)?;
        Ok(self.attribute(
            AttributeKind::enumeration(def.name()),
            name,
            description,
            description_guid,
        ))
    }

    /// An array-of-string attribute.
    pub fn string_array_attribute(
        &self,
        name: &str,
        description: &str,
        description_guid: Option<&str>,
    ) -> Attribute {
        self.attribute(
            AttributeKind::Array(PrimitiveKind::String),
            name,
            description,
            description_guid,
        )
    }

    /// A map-of-string-to-string attribute.
    pub fn string_map_attribute(
        &self,
        name: &str,
        description: &str,
        description_guid: Option<&str>,
    ) -> Attribute {
        self.attribute(
            AttributeKind::map(PrimitiveKind::String, PrimitiveKind::String),
            name,
            description,
            description_guid,
        )
    }

    /// A map-of-string-to-integer attribute.
    pub fn string_int_map_attribute(
        &self,
        name: &str,
        description: &str,
        description_guid: Option<&str>,
    ) -> Attribute {
        self.attribute(
            AttributeKind::map(PrimitiveKind::String, PrimitiveKind::Int),
            name,
            description,
            description_guid,
        )
    }

    /// A map-of-string-to-boolean attribute.
    pub fn string_boolean_map_attribute(
        &self,
        name: &str,
        description: &str,
        description_guid: Option<&str>,
    ) -> Attribute {
        self.attribute(
            AttributeKind::map(PrimitiveKind::String, PrimitiveKind::Boolean),
            name,
            description,
            description_guid,
        )
    }

    /// Resolve a link to any registered type.
    pub fn type_ref(&self, name: &str) -> Result<TypeRef, CatalogError> {
        Ok(self.registry.get_type_by_name(name)?.header().type_ref())
    }

    fn typed_ref(&self, name: &str, expected: TypeCategory) -> Result<TypeRef, CatalogError> {
        Ok(self.registry.get_typed(name, expected)?.header().type_ref())
    }

    /// Resolve a declared relationship end.
    pub fn end(&self, spec: EndSpec) -> Result<RelationshipEnd, CatalogError> {
        let link = self.typed_ref(&spec.entity_type, TypeCategory::Entity)?;
        Ok(spec.resolve(link))
    }

    fn stamped<D: Definition>(
        &self,
        def: D,
        description: &str,
        description_guid: Option<&str>,
    ) -> D {
        let mut def = def
            .with_description(description)
            .with_version_name(self.stamp.version_name.clone())
            .with_origin(self.stamp.originator.clone(), self.stamp.time);
        def.header_mut().description_guid = description_guid.map(String::from);
        def
    }

    /// A default-shaped entity type.
    pub fn entity(
        &self,
        guid: &str,
        name: &str,
        supertype: Option<&str>,
        description: &str,
        description_guid: Option<&str>,
    ) -> Result<EntityDef, CatalogError> {
        let mut def = self.stamped(EntityDef::new(guid, name), description, description_guid);
        if let Some(supertype) = supertype {
            def.header.supertype = Some(self.typed_ref(supertype, TypeCategory::Entity)?);
        }
        Ok(def)
    }

    /// A default-shaped relationship type.
    pub fn relationship(
        &self,
        guid: &str,
        name: &str,
        supertype: Option<&str>,
        description: &str,
        description_guid: Option<&str>,
        end1: EndSpec,
        end2: EndSpec,
    ) -> Result<RelationshipDef, CatalogError> {
        let end1 = self.end(end1)?;
        let end2 = self.end(end2)?;
        let mut def = self.stamped(
            RelationshipDef::new(guid, name, end1, end2),
            description,
            description_guid,
        );
        if let Some(supertype) = supertype {
            def.header.supertype = Some(self.typed_ref(supertype, TypeCategory::Relationship)?);
        }
        Ok(def)
    }

    /// A default-shaped classification type.
    pub fn classification(
        &self,
        guid: &str,
        name: &str,
        supertype: Option<&str>,
        valid_entity_types: &[&str],
        propagatable: bool,
        description: &str,
        description_guid: Option<&str>,
    ) -> Result<ClassificationDef, CatalogError> {
        if valid_entity_types.is_empty() {
            return Err(CatalogError::EmptyAttachmentSet {
                type_name: name.to_string(),
            });
        }

        let scope = valid_entity_types
            .iter()
            .map(|entity_type| self.typed_ref(entity_type, TypeCategory::Entity))
            .collect::<Result<Vec<_>, _>>()?;

        let mut def = self.stamped(
            ClassificationDef::new(guid, name, scope),
            description,
            description_guid,
        );
        def.propagatable = propagatable;
        if let Some(supertype) = supertype {
            def.header.supertype = Some(self.typed_ref(supertype, TypeCategory::Classification)?);
        }
        Ok(def)
    }

    /// An empty patch for `name`, bound to its current identity and stamped
    /// with this factory's originator, time and version label.
    pub fn patch(&self, name: &str) -> Result<TypePatch, CatalogError> {
        Ok(self
            .registry
            .get_patch_for(name)?
            .stamped(self.stamp.originator.clone(), self.stamp.time)
            .with_version_name(self.stamp.version_name.clone()))
    }

    /// A default-shaped enumeration type; add elements with [`EnumDef::with_element`].
    pub fn enumeration(
        &self,
        guid: &str,
        name: &str,
        description: &str,
        description_guid: Option<&str>,
    ) -> EnumDef {
        self.stamped(EnumDef::new(guid, name), description, description_guid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EndCardinality, EnumElement, TypeStatus};

    fn stamp() -> ReleaseStamp {
        ReleaseStamp::new("tester", 1_000, "1.0")
    }

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        let stamp = stamp();
        let f = DefinitionFactory::new(&registry, &stamp);
        let referenceable = f
            .entity("g-ref", "Referenceable", None, "Root type", None)
            .unwrap();
        let pattern = f
            .enumeration("g-kp", "KeyPattern", "Key patterns", None)
            .with_element(EnumElement::new(0, "LocalKey", "Local").as_default());
        registry.add_entity_type(referenceable).unwrap();
        registry.add_enumeration_type(pattern).unwrap();
        registry
    }

    #[test]
    fn test_attribute_constructors() {
        let registry = registry();
        let stamp = stamp();
        let f = DefinitionFactory::new(&registry, &stamp);

        let attr = f.string_attribute("name", "Display name", Some("doc-1"));
        assert_eq!(attr.kind, AttributeKind::Primitive(PrimitiveKind::String));
        assert_eq!(attr.description, "Display name");
        assert_eq!(attr.description_guid.as_deref(), Some("doc-1"));
        assert_eq!(attr.status, TypeStatus::Active);

        assert_eq!(
            f.string_int_map_attribute("counts", "", None).kind,
            AttributeKind::map(PrimitiveKind::String, PrimitiveKind::Int)
        );
        assert_eq!(
            f.string_array_attribute("aliases", "", None).kind,
            AttributeKind::Array(PrimitiveKind::String)
        );
        assert_eq!(
            f.date_attribute("archiveDate", "", None).kind,
            AttributeKind::Primitive(PrimitiveKind::Date)
        );
    }

    #[test]
    fn test_enum_attribute_resolves() {
        let registry = registry();
        let stamp = stamp();
        let f = DefinitionFactory::new(&registry, &stamp);

        let attr = f.enum_attribute("KeyPattern", "keyPattern", "", None).unwrap();
        assert_eq!(attr.kind.enumeration_name(), Some("KeyPattern"));

        assert!(matches!(
            f.enum_attribute("Missing", "x", "", None),
            Err(CatalogError::UnknownType { .. })
        ));
        assert!(matches!(
            f.enum_attribute("Referenceable", "x", "", None),
            Err(CatalogError::WrongKind { .. })
        ));
    }

    #[test]
    fn test_entity_defaults_and_stamp() {
        let registry = registry();
        let stamp = stamp();
        let f = DefinitionFactory::new(&registry, &stamp);

        let asset = f
            .entity("g-asset", "Asset", Some("Referenceable"), "An asset", None)
            .unwrap();

        assert_eq!(asset.header.version, 1);
        assert_eq!(asset.header.status, TypeStatus::Active);
        assert_eq!(asset.header.version_name, "1.0");
        assert_eq!(asset.header.created_by, "tester");
        assert_eq!(asset.header.update_time, 1_000);
        assert_eq!(
            asset.header.supertype,
            Some(TypeRef::new("g-ref", "Referenceable"))
        );
    }

    #[test]
    fn test_unregistered_references() {
        let registry = registry();
        let stamp = stamp();
        let f = DefinitionFactory::new(&registry, &stamp);

        assert!(matches!(
            f.entity("g", "DataFile", Some("DataSet"), "", None),
            Err(CatalogError::UnknownType { ref name }) if name == "DataSet"
        ));

        let err = f
            .relationship(
                "g",
                "TermAnchor",
                None,
                "",
                None,
                EndSpec::new("Glossary", "anchor", EndCardinality::AtMostOne),
                EndSpec::new("Referenceable", "terms", EndCardinality::AnyNumber),
            )
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownType { ref name } if name == "Glossary"));
    }

    #[test]
    fn test_relationship_supertype() {
        let mut registry = registry();
        let stamp = stamp();
        let link = DefinitionFactory::new(&registry, &stamp)
            .relationship(
                "g-link",
                "ReferenceLink",
                None,
                "",
                None,
                EndSpec::new("Referenceable", "from", EndCardinality::AnyNumber),
                EndSpec::new("Referenceable", "to", EndCardinality::AnyNumber),
            )
            .unwrap();
        registry.add_relationship_type(link).unwrap();

        let f = DefinitionFactory::new(&registry, &stamp);
        let ends = || {
            (
                EndSpec::new("Referenceable", "source", EndCardinality::AtMostOne),
                EndSpec::new("Referenceable", "targets", EndCardinality::AnyNumber),
            )
        };

        let (end1, end2) = ends();
        let derived = f
            .relationship("g-derived", "DerivedLink", Some("ReferenceLink"), "", None, end1, end2)
            .unwrap();
        assert_eq!(
            derived.header.supertype,
            Some(TypeRef::new("g-link", "ReferenceLink"))
        );

        let (end1, end2) = ends();
        assert!(matches!(
            f.relationship("g-x", "X", Some("MissingLink"), "", None, end1, end2),
            Err(CatalogError::UnknownType { ref name }) if name == "MissingLink"
        ));

        let (end1, end2) = ends();
        assert!(matches!(
            f.relationship("g-x", "X", Some("Referenceable"), "", None, end1, end2),
            Err(CatalogError::WrongKind {
                expected: TypeCategory::Relationship,
                actual: TypeCategory::Entity,
                ..
            })
        ));
    }

    #[test]
    fn test_patch_is_stamped() {
        let registry = registry();
        let stamp = stamp();
        let f = DefinitionFactory::new(&registry, &stamp);

        let patch = f.patch("Referenceable").unwrap();
        assert_eq!(patch.applies_to_guid, "g-ref");
        assert_eq!(patch.from_version, 1);
        assert_eq!(patch.to_version, 2);
        assert_eq!(patch.updated_by, "tester");
        assert_eq!(patch.version_name.as_deref(), Some("1.0"));
        assert!(patch.is_empty());

        assert!(matches!(
            f.patch("Glossary"),
            Err(CatalogError::UnknownType { .. })
        ));
    }

    #[test]
    fn test_classification_scope() {
        let registry = registry();
        let stamp = stamp();
        let f = DefinitionFactory::new(&registry, &stamp);

        let memento = f
            .classification("g-m", "Memento", None, &["Referenceable"], true, "", None)
            .unwrap();
        assert!(memento.propagatable);
        assert!(memento.can_attach_to("Referenceable"));

        assert!(matches!(
            f.classification("g-m", "Memento", None, &[], false, "", None),
            Err(CatalogError::EmptyAttachmentSet { .. })
        ));
        assert!(matches!(
            f.classification("g-m", "Memento", None, &["KeyPattern"], false, "", None),
            Err(CatalogError::WrongKind { .. })
        ));
    }
}
