//! JSON schema declaration file
//!
//! The declaration is the explicit replacement for discovering entities at
//! runtime: one entry per class, each with its annotation, model fields and
//! optional input fields, plus a documentation section.
//!
//! ```json
//! {
//!   "entities": [
//!     {
//!       "class_name": "Barrack",
//!       "index": 2,
//!       "path_name": "barracks",
//!       "kind": "ENTITY",
//!       "info": { "title": "Barrack", "short_name": "barrack" },
//!       "model": [ { "name": "Name", "index": 3, "kind": "STR" } ],
//!       "input": [ { "name": "Name", "index": 3, "kind": "STR", "required": true } ]
//!     }
//!   ],
//!   "documentation": {
//!     "entities": { "30": { "title": "Sector" } },
//!     "properties": { "STR": { "3": { "title": "Name" } } }
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use contracts::shared::metadata::{
    DisplayInfo, EntityKind, FieldDescriptor, FieldKind, GroupInput, InputMarks, MenuGroup,
};

// ============================================================================
// JSON Schema Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct DeclarationJson {
    #[serde(default)]
    pub schema_version: Option<String>,
    #[serde(default)]
    pub entities: Vec<EntityJson>,
    #[serde(default)]
    pub documentation: DocumentationJson,
}

#[derive(Debug, Deserialize)]
pub struct EntityJson {
    pub class_name: String,
    /// Absent for types that are declared but carry no index annotation
    pub index: Option<i32>,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub path_name: String,
    #[serde(default)]
    pub kind: EntityKind,
    #[serde(default)]
    pub menus: Vec<MenuJson>,
    pub info: Option<InfoJson>,
    #[serde(default)]
    pub model: Vec<FieldJson>,
    /// Absent when the entity has no paired input declaration
    pub input: Option<Vec<FieldJson>>,
}

#[derive(Debug, Deserialize)]
pub struct MenuJson {
    pub title: String,
    pub icon: Option<String>,
    pub parent: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct InfoJson {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct FieldJson {
    pub name: String,
    pub index: i32,
    pub kind: FieldKind,
    #[serde(default)]
    pub is_array: bool,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub auto_numeric: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub enum_labels: BTreeMap<i32, String>,
    #[serde(default)]
    pub groups: Vec<GroupJson>,
    /// Inline property documentation, used when the documentation section
    /// has no entry for this field. Scalar fields only.
    pub info: Option<InfoJson>,
}

#[derive(Debug, Deserialize)]
pub struct GroupJson {
    pub index: i32,
    #[serde(default)]
    pub title: String,
    pub column_proportion: Option<u8>,
    pub order_index: Option<i32>,
}

#[derive(Debug, Deserialize, Default)]
pub struct DocumentationJson {
    #[serde(default)]
    pub entities: BTreeMap<i32, InfoJson>,
    /// Kind name (e.g. "STR") -> field index -> documentation
    #[serde(default)]
    pub properties: BTreeMap<String, BTreeMap<i32, InfoJson>>,
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Conversion into engine types
// ============================================================================

impl From<InfoJson> for DisplayInfo {
    fn from(info: InfoJson) -> Self {
        DisplayInfo::new(info.title, info.short_name, info.description)
    }
}

impl From<MenuJson> for MenuGroup {
    fn from(menu: MenuJson) -> Self {
        MenuGroup {
            title: menu.title,
            icon: menu.icon,
            parent: menu.parent,
        }
    }
}

impl From<GroupJson> for GroupInput {
    fn from(group: GroupJson) -> Self {
        GroupInput {
            index: group.index,
            title: group.title,
            column_proportion: group.column_proportion,
            order_index: group.order_index,
        }
    }
}

impl FieldJson {
    pub fn into_descriptor(self) -> FieldDescriptor {
        let mut field = FieldDescriptor::new(self.name, self.index, self.kind)
            .with_marks(InputMarks {
                required: self.required,
                unique: self.unique,
            })
            .with_enum_labels(self.enum_labels)
            .with_groups(self.groups.into_iter().map(GroupInput::from).collect());
        field.is_enumerable = self.is_array;
        field.is_visible = self.visible;
        field.is_auto_numeric = self.auto_numeric;
        field
    }
}
