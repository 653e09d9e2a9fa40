//! Attribute value kinds.

use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Primitive scalar kinds an attribute can carry.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Archive,
    Serialize,
    Deserialize,
    SerdeSerialize,
    SerdeDeserialize,
)]
pub enum PrimitiveKind {
    /// UTF-8 string.
    String,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// Boolean value.
    Boolean,
    /// Date (milliseconds since Unix epoch).
    Date,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
}

/// Declared kind of an attribute.
///
/// Collections are flat: arrays and maps hold primitives only.
#[derive(
    Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub enum AttributeKind {
    /// A single primitive value.
    Primitive(PrimitiveKind),
    /// A value drawn from a registered enumeration type.
    Enumeration {
        /// Name of the enumeration type.
        name: String,
    },
    /// An array of primitive values.
    Array(PrimitiveKind),
    /// A map from one primitive kind to another.
    Map {
        /// Key kind.
        key: PrimitiveKind,
        /// Value kind.
        value: PrimitiveKind,
    },
}

impl PrimitiveKind {
    /// Canonical type name of the primitive, as used in archive documents.
    pub fn type_name(&self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Date => "date",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    /// Check if this kind is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            PrimitiveKind::Int | PrimitiveKind::Long | PrimitiveKind::Float | PrimitiveKind::Double
        )
    }
}

impl AttributeKind {
    /// Create a primitive attribute kind.
    pub fn primitive(kind: PrimitiveKind) -> Self {
        AttributeKind::Primitive(kind)
    }

    /// Create an enumeration-typed attribute kind.
    pub fn enumeration(name: impl Into<String>) -> Self {
        AttributeKind::Enumeration { name: name.into() }
    }

    /// Create an array-of-primitive attribute kind.
    pub fn array(kind: PrimitiveKind) -> Self {
        AttributeKind::Array(kind)
    }

    /// Create a map attribute kind.
    pub fn map(key: PrimitiveKind, value: PrimitiveKind) -> Self {
        AttributeKind::Map { key, value }
    }

    /// Name of the enumeration this kind refers to, if any.
    pub fn enumeration_name(&self) -> Option<&str> {
        match self {
            AttributeKind::Enumeration { name } => Some(name),
            _ => None,
        }
    }

    /// Check if this kind is a collection.
    pub fn is_collection(&self) -> bool {
        matches!(self, AttributeKind::Array(_) | AttributeKind::Map { .. })
    }

    /// Stored type name, e.g. `array<string>` or `map<string,int>`.
    pub fn type_name(&self) -> String {
        match self {
            AttributeKind::Primitive(p) => p.type_name().to_string(),
            AttributeKind::Enumeration { name } => name.clone(),
            AttributeKind::Array(p) => format!("array<{}>", p.type_name()),
            AttributeKind::Map { key, value } => {
                format!("map<{},{}>", key.type_name(), value.type_name())
            }
        }
    }
}
