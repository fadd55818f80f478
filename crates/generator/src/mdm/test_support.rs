//! In-memory collaborators for unit tests

use std::collections::HashMap;

use contracts::shared::metadata::{
    DisplayInfo, EntityAnnotation, EntityDescriptors, EntityKind, ScalarKind,
};

use super::sources::{EntityAnnotationReader, FieldDescriptorSource, MdmDocumentation};

#[derive(Default)]
pub struct MapDocs {
    entities: HashMap<i32, DisplayInfo>,
    properties: HashMap<(ScalarKind, i32), DisplayInfo>,
}

impl MapDocs {
    pub fn with_entity(mut self, index: i32, title: &str) -> Self {
        self.entities
            .insert(index, DisplayInfo::new(title, title.to_lowercase(), ""));
        self
    }

    pub fn with_property(mut self, kind: ScalarKind, index: i32, title: &str) -> Self {
        self.properties
            .insert((kind, index), DisplayInfo::new(title, "", ""));
        self
    }
}

impl MdmDocumentation for MapDocs {
    fn entity_info(&self, index: i32) -> DisplayInfo {
        self.entities.get(&index).cloned().unwrap_or_default()
    }

    fn property_info(&self, kind: ScalarKind, index: i32) -> DisplayInfo {
        self.properties
            .get(&(kind, index))
            .cloned()
            .unwrap_or_default()
    }
}

/// Entities keyed by class name
#[derive(Default)]
pub struct MapSchema {
    annotations: HashMap<String, EntityAnnotation>,
    descriptors: HashMap<String, EntityDescriptors>,
}

impl MapSchema {
    pub fn with_entity(
        mut self,
        class_name: &str,
        index: i32,
        descriptors: Option<EntityDescriptors>,
    ) -> Self {
        self.annotations.insert(
            class_name.to_string(),
            EntityAnnotation {
                index,
                visible: true,
                path_name: class_name.to_lowercase(),
                entity_kind: EntityKind::Entity,
                class_name: class_name.to_string(),
                menus: Vec::new(),
            },
        );
        if let Some(descriptors) = descriptors {
            self.descriptors.insert(class_name.to_string(), descriptors);
        }
        self
    }

    /// A type that has declarations but no index annotation
    pub fn with_unannotated(mut self, class_name: &str, descriptors: EntityDescriptors) -> Self {
        self.descriptors.insert(class_name.to_string(), descriptors);
        self
    }
}

impl FieldDescriptorSource for MapSchema {
    fn descriptors(&self, entity: &str) -> Option<EntityDescriptors> {
        self.descriptors.get(entity).cloned()
    }
}

impl EntityAnnotationReader for MapSchema {
    fn annotation(&self, entity: &str) -> Option<EntityAnnotation> {
        self.annotations.get(entity).cloned()
    }
}
