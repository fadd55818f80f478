//! Validation marks carried by input-side field declarations

use serde::{Deserialize, Serialize};

/// Required/unique marks of a field.
/// Only the input (write) declaration of an entity is authoritative for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputMarks {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub unique: bool,
}

impl InputMarks {
    /// No marks (optional, not unique)
    pub const fn none() -> Self {
        Self {
            required: false,
            unique: false,
        }
    }

    /// Marks for a required field
    pub const fn required() -> Self {
        Self {
            required: true,
            unique: false,
        }
    }

    /// Marks for a required field whose value must be unique
    pub const fn required_unique() -> Self {
        Self {
            required: true,
            unique: true,
        }
    }

    pub const fn is_required(&self) -> bool {
        self.required
    }

    pub const fn is_unique(&self) -> bool {
        self.unique
    }
}
