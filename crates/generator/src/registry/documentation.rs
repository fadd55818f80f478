//! Documentation tables backing `MdmDocumentation`

use std::collections::HashMap;

use contracts::shared::metadata::{DisplayInfo, ScalarKind};

use crate::mdm::MdmDocumentation;

/// Entity documentation by entity index, property documentation by
/// `(kind, field index)`. Missing entries resolve to an empty `DisplayInfo`.
#[derive(Debug, Clone, Default)]
pub struct StaticDocumentation {
    entities: HashMap<i32, DisplayInfo>,
    properties: HashMap<(ScalarKind, i32), DisplayInfo>,
}

impl StaticDocumentation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set entity documentation, replacing any previous entry
    pub fn set_entity(&mut self, index: i32, info: DisplayInfo) {
        self.entities.insert(index, info);
    }

    /// Set property documentation, replacing any previous entry
    pub fn set_property(&mut self, kind: ScalarKind, index: i32, info: DisplayInfo) {
        self.properties.insert((kind, index), info);
    }

    /// Set entity documentation unless already present
    pub fn default_entity(&mut self, index: i32, info: DisplayInfo) {
        self.entities.entry(index).or_insert(info);
    }

    /// Set property documentation unless already present
    pub fn default_property(&mut self, kind: ScalarKind, index: i32, info: DisplayInfo) {
        self.properties.entry((kind, index)).or_insert(info);
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}

impl MdmDocumentation for StaticDocumentation {
    fn entity_info(&self, index: i32) -> DisplayInfo {
        match self.entities.get(&index) {
            Some(info) => info.clone(),
            None => {
                tracing::debug!(index, "no documentation for entity");
                DisplayInfo::default()
            }
        }
    }

    fn property_info(&self, kind: ScalarKind, index: i32) -> DisplayInfo {
        match self.properties.get(&(kind, index)) {
            Some(info) => info.clone(),
            None => {
                tracing::debug!(kind = kind.as_str(), index, "no documentation for property");
                DisplayInfo::default()
            }
        }
    }
}
