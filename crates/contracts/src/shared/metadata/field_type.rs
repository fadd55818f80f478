//! Field kind enumeration for metadata system

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Data kind of a plain (non-reference) field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScalarKind {
    Bool,
    Str,
    Date,
    Dbl,
    Num32,
    Num64,
    Geo,
    Enum,
    Suggestion,
}

impl ScalarKind {
    pub const ALL: [ScalarKind; 9] = [
        Self::Bool,
        Self::Str,
        Self::Date,
        Self::Dbl,
        Self::Num32,
        Self::Num64,
        Self::Geo,
        Self::Enum,
        Self::Suggestion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "BOOL",
            Self::Str => "STR",
            Self::Date => "DATE",
            Self::Dbl => "DBL",
            Self::Num32 => "NUM32",
            Self::Num64 => "NUM64",
            Self::Geo => "GEO",
            Self::Enum => "ENUM",
            Self::Suggestion => "SUGGESTION",
        }
    }
}

/// Kind of a field that points at another entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityRefKind {
    Reference,
    LocalReference,
}

impl EntityRefKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reference => "REFERENCE",
            Self::LocalReference => "LOCAL_REFERENCE",
        }
    }
}

/// Full kind of a field: either a scalar or an entity reference.
///
/// The entity-reference flag of a descriptor is derived from this value,
/// so a field can never claim a scalar kind and be a reference at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKind {
    Scalar(ScalarKind),
    Entity(EntityRefKind),
}

impl FieldKind {
    pub fn is_entity_ref(&self) -> bool {
        matches!(self, Self::Entity(_))
    }

    pub fn scalar(&self) -> Option<ScalarKind> {
        match self {
            Self::Scalar(kind) => Some(*kind),
            Self::Entity(_) => None,
        }
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, Self::Scalar(ScalarKind::Enum))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scalar(kind) => kind.as_str(),
            Self::Entity(kind) => kind.as_str(),
        }
    }
}

impl From<ScalarKind> for FieldKind {
    fn from(kind: ScalarKind) -> Self {
        Self::Scalar(kind)
    }
}

impl From<EntityRefKind> for FieldKind {
    fn from(kind: EntityRefKind) -> Self {
        Self::Entity(kind)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a kind name is not one of the eleven known kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field kind '{}'", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for FieldKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let kind = match upper.as_str() {
            "BOOL" => Self::Scalar(ScalarKind::Bool),
            "STR" => Self::Scalar(ScalarKind::Str),
            "DATE" => Self::Scalar(ScalarKind::Date),
            "DBL" => Self::Scalar(ScalarKind::Dbl),
            "NUM32" => Self::Scalar(ScalarKind::Num32),
            "NUM64" => Self::Scalar(ScalarKind::Num64),
            "GEO" => Self::Scalar(ScalarKind::Geo),
            "ENUM" => Self::Scalar(ScalarKind::Enum),
            "SUGGESTION" => Self::Scalar(ScalarKind::Suggestion),
            "REFERENCE" => Self::Entity(EntityRefKind::Reference),
            "LOCAL_REFERENCE" => Self::Entity(EntityRefKind::LocalReference),
            _ => return Err(UnknownKind(s.to_string())),
        };
        Ok(kind)
    }
}

impl Serialize for FieldKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
