//! Type catalog.
//!
//! The catalog holds the definitions of entity, relationship, classification
//! and enumeration types, builds new ones through a factory, and evolves
//! registered ones through patches.

mod attribute;
mod classification;
mod entity;
mod enumeration;
mod factory;
mod operation;
mod patch;
mod registry;
mod relationship;
mod typedef;
mod types;
mod validate;

pub use attribute::Attribute;
pub use classification::ClassificationDef;
pub use entity::EntityDef;
pub use enumeration::{EnumDef, EnumElement};
pub use factory::{DefinitionFactory, ReleaseStamp};
pub use operation::{apply, Operation};
pub use patch::{ScopeChange, TypePatch};
pub use registry::{PopulationState, RegistrySnapshot, TypeRegistry};
pub use relationship::{EndCardinality, EndSpec, PropagationRule, RelationshipDef, RelationshipEnd};
pub use typedef::{Definition, TypeCategory, TypeDef, TypeDefHeader, TypeRef, TypeStatus};
pub use types::{AttributeKind, PrimitiveKind};
