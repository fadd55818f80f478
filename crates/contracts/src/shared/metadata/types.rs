//! Core declaration types for entities and their fields
//!
//! These are the inputs of the metadata engine: one `FieldDescriptor` per
//! declared field, supplied separately for the model (persisted) side and the
//! input (write) side of an entity, plus the entity-level annotation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::field_type::FieldKind;
use super::validation::InputMarks;

// ============================================================================
// Entity-level declarations
// ============================================================================

/// Kind of entity, as published to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    #[default]
    Entity,
    CustomEntity,
    Process,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entity => "ENTITY",
            Self::CustomEntity => "CUSTOM_ENTITY",
            Self::Process => "PROCESS",
        }
    }
}

/// Menu group an entity is listed under in client navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuGroup {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// Entity-level annotation: everything about an entity that is not a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityAnnotation {
    pub index: i32,
    pub visible: bool,
    pub path_name: String,
    pub entity_kind: EntityKind,
    pub class_name: String,
    #[serde(default)]
    pub menus: Vec<MenuGroup>,
}

/// Human-readable documentation of an entity or a property
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub description: String,
}

impl DisplayInfo {
    pub fn new(
        title: impl Into<String>,
        short_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            short_name: short_name.into(),
            description: description.into(),
        }
    }
}

// ============================================================================
// Field-level declarations
// ============================================================================

/// Form group a field is rendered in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupInput {
    pub index: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_proportion: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
}

/// Declaration of one field on either side (model or input) of an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Source field name, as declared (e.g. "Name", "URLPath")
    pub name: String,
    /// Stable index, shared by the model and input declarations
    pub field_index: i32,
    pub kind: FieldKind,
    /// Collection-valued field
    pub is_enumerable: bool,
    pub marks: InputMarks,
    pub is_visible: bool,
    pub is_auto_numeric: bool,
    /// Enumeration labels; only meaningful for ENUM fields
    pub enum_labels: BTreeMap<i32, String>,
    pub groups: Vec<GroupInput>,
}

impl FieldDescriptor {
    /// Visible, non-enumerable field without marks
    pub fn new(name: impl Into<String>, field_index: i32, kind: impl Into<FieldKind>) -> Self {
        Self {
            name: name.into(),
            field_index,
            kind: kind.into(),
            is_enumerable: false,
            marks: InputMarks::none(),
            is_visible: true,
            is_auto_numeric: false,
            enum_labels: BTreeMap::new(),
            groups: Vec::new(),
        }
    }

    pub fn is_entity_ref(&self) -> bool {
        self.kind.is_entity_ref()
    }

    pub fn is_required(&self) -> bool {
        self.marks.required
    }

    pub fn is_unique(&self) -> bool {
        self.marks.unique
    }

    /// Join key between the model and input declarations
    pub fn key(&self) -> (i32, bool) {
        (self.field_index, self.is_entity_ref())
    }

    pub fn with_marks(mut self, marks: InputMarks) -> Self {
        self.marks = marks;
        self
    }

    pub fn enumerable(mut self) -> Self {
        self.is_enumerable = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.is_visible = false;
        self
    }

    pub fn auto_numeric(mut self) -> Self {
        self.is_auto_numeric = true;
        self
    }

    pub fn with_enum_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = (i32, S)>,
        S: Into<String>,
    {
        self.enum_labels = labels.into_iter().map(|(k, v)| (k, v.into())).collect();
        self
    }

    pub fn with_groups(mut self, groups: Vec<GroupInput>) -> Self {
        self.groups = groups;
        self
    }
}

/// Both declarations of one entity, as handed out by a descriptor source
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntityDescriptors {
    pub model: Vec<FieldDescriptor>,
    pub input: Vec<FieldDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::metadata::{EntityRefKind, ScalarKind};

    #[test]
    fn test_descriptor_key_follows_kind() {
        let plain = FieldDescriptor::new("Name", 3, ScalarKind::Str);
        let reference = FieldDescriptor::new("Sector", 3, EntityRefKind::Reference);

        assert_eq!(plain.key(), (3, false));
        assert_eq!(reference.key(), (3, true));
    }

    #[test]
    fn test_builder_helpers() {
        let field = FieldDescriptor::new("Status", 4, ScalarKind::Enum)
            .with_enum_labels([(1, "Open"), (2, "Closed")])
            .with_marks(InputMarks::required())
            .hidden();

        assert!(field.is_required());
        assert!(!field.is_unique());
        assert!(!field.is_visible);
        assert_eq!(field.enum_labels.get(&2).map(String::as_str), Some("Closed"));
    }

    #[test]
    fn test_entity_kind_serializes_screaming_case() {
        let json = serde_json::to_string(&EntityKind::CustomEntity).unwrap();
        assert_eq!(json, "\"CUSTOM_ENTITY\"");
    }
}
