use std::path::PathBuf;

use thiserror::Error;

/// Side of an entity a field is declared on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Model,
    Input,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Input => "input",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while loading or validating a schema declaration
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to read schema declaration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid schema declaration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Entity declared without a class name")]
    EmptyClassName,

    #[error("Class '{0}' is declared more than once")]
    DuplicateClassName(String),

    #[error("Entity index {index} is used by both '{first}' and '{second}'")]
    DuplicateEntityIndex {
        index: i32,
        first: String,
        second: String,
    },

    #[error("'{entity}' declares an unnamed {side} field at index {index}")]
    EmptyFieldName { entity: String, side: Side, index: i32 },

    #[error("'{entity}' declares two {side} {kind} fields at index {index}")]
    DuplicateField {
        entity: String,
        side: Side,
        kind: String,
        index: i32,
    },

    #[error("'{entity}' field '{field}' has enum labels but is not an ENUM field")]
    EnumLabelsOnNonEnum { entity: String, field: String },

    #[error("'{entity}' reference field '{field}' has inline info; document the referenced entity instead")]
    InfoOnReference { entity: String, field: String },

    #[error("Documentation uses '{0}', which is not a scalar field kind")]
    DocumentationKind(String),

    #[error("Entity order names unknown class '{0}'")]
    UnknownOrderEntry(String),
}
