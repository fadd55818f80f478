//! Published metadata document
//!
//! `ModelMetaData` is what clients consume. Every per-kind map is keyed by
//! the field index; JSON serialization turns those keys into strings and all
//! property names into camelCase. Emitters must keep that shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::shared::metadata::{DisplayInfo, EntityKind, MenuGroup};

/// Field metadata keyed by field index
pub type PropertyMap = BTreeMap<i32, PropertyMetadata>;

/// Enum field metadata keyed by field index
pub type EnumPropertyMap = BTreeMap<i32, PropertyMetadataEnum>;

/// Metadata of one non-enum field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMetadata {
    /// Field name with the first character lower-cased
    pub name_prop: String,
    pub visible: bool,
    pub auto_numeric: bool,
    pub is_array: bool,
    pub info: DisplayInfo,
    pub required: bool,
    pub unique: bool,
    /// The field is present in the input (write) declaration
    pub has_input: bool,
}

/// Metadata of one enum field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMetadataEnum {
    pub name_prop: String,
    pub is_array: bool,
    pub info: DisplayInfo,
    /// Label per enum value. Published as `enumData`.
    #[serde(rename = "enumData")]
    pub enum_labels: BTreeMap<i32, String>,
}

/// Metadata of one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMetadata {
    pub index: i32,
    pub title: String,
    pub short_name: String,
    pub description: String,
    pub visible: bool,
    pub path_name: String,
    pub entity_kind: EntityKind,
    pub class_name: String,
    pub auto_numeric: bool,
    pub menus: Vec<MenuGroup>,
    pub bool_data: PropertyMap,
    pub string_data: PropertyMap,
    pub date_data: PropertyMap,
    pub double_data: PropertyMap,
    pub enum_data: EnumPropertyMap,
    pub geo_data: PropertyMap,
    pub num_data: PropertyMap,
    pub rel_data: PropertyMap,
}

impl EntityMetadata {
    /// Total number of fields across every per-kind map
    pub fn field_count(&self) -> usize {
        self.bool_data.len()
            + self.string_data.len()
            + self.date_data.len()
            + self.double_data.len()
            + self.enum_data.len()
            + self.geo_data.len()
            + self.num_data.len()
            + self.rel_data.len()
    }
}

/// Whole document: every entity, in discovery order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetaData {
    pub indexes: Vec<EntityMetadata>,
}

impl ModelMetaData {
    /// Find an entity by its index
    pub fn entity(&self, index: i32) -> Option<&EntityMetadata> {
        self.indexes.iter().find(|e| e.index == index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(name: &str) -> PropertyMetadata {
        PropertyMetadata {
            name_prop: name.to_string(),
            visible: true,
            auto_numeric: false,
            is_array: false,
            info: DisplayInfo::new("Name", "nm", "Display name"),
            required: true,
            unique: false,
            has_input: true,
        }
    }

    fn empty_entity() -> EntityMetadata {
        EntityMetadata {
            index: 7,
            title: "Sector".to_string(),
            short_name: "sec".to_string(),
            description: String::new(),
            visible: true,
            path_name: "sectors".to_string(),
            entity_kind: EntityKind::Entity,
            class_name: "Sector".to_string(),
            auto_numeric: false,
            menus: Vec::new(),
            bool_data: PropertyMap::new(),
            string_data: PropertyMap::new(),
            date_data: PropertyMap::new(),
            double_data: PropertyMap::new(),
            enum_data: EnumPropertyMap::new(),
            geo_data: PropertyMap::new(),
            num_data: PropertyMap::new(),
            rel_data: PropertyMap::new(),
        }
    }

    #[test]
    fn test_maps_serialize_with_string_keys_and_camel_case() {
        let mut entity = empty_entity();
        entity.string_data.insert(3, property("name"));

        let json = serde_json::to_value(&entity).unwrap();

        assert_eq!(json["stringData"]["3"]["nameProp"], "name");
        assert_eq!(json["stringData"]["3"]["hasInput"], true);
        assert_eq!(json["stringData"]["3"]["info"]["shortName"], "nm");
        assert_eq!(json["pathName"], "sectors");
        assert!(json.get("relData").is_some());
    }

    #[test]
    fn test_enum_labels_published_as_enum_data() {
        let field = PropertyMetadataEnum {
            name_prop: "status".to_string(),
            is_array: false,
            info: DisplayInfo::default(),
            enum_labels: BTreeMap::from([(1, "Open".to_string()), (2, "Closed".to_string())]),
        };

        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["enumData"]["1"], "Open");
        assert_eq!(json["enumData"]["2"], "Closed");
    }

    #[test]
    fn test_document_deserializes_back() {
        let mut entity = empty_entity();
        entity.num_data.insert(1, property("count"));
        let doc = ModelMetaData { indexes: vec![entity] };

        let json = serde_json::to_string(&doc).unwrap();
        let back: ModelMetaData = serde_json::from_str(&json).unwrap();

        assert_eq!(back, doc);
        assert_eq!(back.entity(7).map(|e| e.field_count()), Some(1));
    }
}
