//! Kind classification
//!
//! Routes every reconciled field into the map of its kind, keyed by field
//! index. Plain fields land in one of nine scalar maps, reference fields in
//! one of two reference maps.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use contracts::shared::metadata::{EntityRefKind, FieldKind, ScalarKind};
use contracts::shared::model_metadata::{
    EnumPropertyMap, PropertyMap, PropertyMetadata, PropertyMetadataEnum,
};

use super::diagnostics::{CollisionStage, IndexCollision};
use super::reconciler::PropertySearchInfo;

/// Client-side property name: only the first character is lower-cased.
///
/// `"Id"` becomes `"id"`, `"URLPath"` becomes `"uRLPath"`.
pub fn name_prop(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Fields of one entity split by kind, before folding
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindPartition {
    pub bool_data: PropertyMap,
    pub string_data: PropertyMap,
    pub date_data: PropertyMap,
    pub double_data: PropertyMap,
    pub num32_data: PropertyMap,
    pub num64_data: PropertyMap,
    pub geo_data: PropertyMap,
    pub enum_data: EnumPropertyMap,
    pub suggestion_data: PropertyMap,
    pub reference_data: PropertyMap,
    pub local_reference_data: PropertyMap,
}

impl KindPartition {
    /// Number of classified fields
    pub fn len(&self) -> usize {
        self.bool_data.len()
            + self.string_data.len()
            + self.date_data.len()
            + self.double_data.len()
            + self.num32_data.len()
            + self.num64_data.len()
            + self.geo_data.len()
            + self.enum_data.len()
            + self.suggestion_data.len()
            + self.reference_data.len()
            + self.local_reference_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Map of a non-enum kind; enum fields have their own value type,
    /// see `enum_data`.
    fn map_mut(&mut self, kind: FieldKind) -> Option<&mut PropertyMap> {
        let map = match kind {
            FieldKind::Scalar(ScalarKind::Bool) => &mut self.bool_data,
            FieldKind::Scalar(ScalarKind::Str) => &mut self.string_data,
            FieldKind::Scalar(ScalarKind::Date) => &mut self.date_data,
            FieldKind::Scalar(ScalarKind::Dbl) => &mut self.double_data,
            FieldKind::Scalar(ScalarKind::Num32) => &mut self.num32_data,
            FieldKind::Scalar(ScalarKind::Num64) => &mut self.num64_data,
            FieldKind::Scalar(ScalarKind::Geo) => &mut self.geo_data,
            FieldKind::Scalar(ScalarKind::Suggestion) => &mut self.suggestion_data,
            FieldKind::Scalar(ScalarKind::Enum) => return None,
            FieldKind::Entity(EntityRefKind::Reference) => &mut self.reference_data,
            FieldKind::Entity(EntityRefKind::LocalReference) => &mut self.local_reference_data,
        };
        Some(map)
    }
}

/// Split reconciled fields by kind.
///
/// A field whose `(kind, index)` slot is already occupied is dropped; the
/// first field keeps the slot and the drop is returned as a collision.
pub fn classify_properties(props: &[PropertySearchInfo]) -> (KindPartition, Vec<IndexCollision>) {
    let mut partition = KindPartition::default();
    let mut collisions = Vec::new();

    for prop in props {
        let kept = match partition.map_mut(prop.kind) {
            Some(map) => insert_first(map, prop.field_index, || property_metadata(prop))
                .map(|existing| existing.name_prop.clone()),
            None => insert_first(&mut partition.enum_data, prop.field_index, || {
                enum_metadata(prop)
            })
            .map(|existing| existing.name_prop.clone()),
        };

        if let Some(kept) = kept {
            collisions.push(collision(prop, &kept));
        }
    }

    for c in &collisions {
        tracing::warn!("{}", c);
    }

    (partition, collisions)
}

/// Insert unless the index is taken; returns the value holding the index.
fn insert_first<V>(map: &mut BTreeMap<i32, V>, index: i32, value: impl FnOnce() -> V) -> Option<&V> {
    match map.entry(index) {
        Entry::Occupied(entry) => Some(&*entry.into_mut()),
        Entry::Vacant(entry) => {
            entry.insert(value());
            None
        }
    }
}

fn property_metadata(prop: &PropertySearchInfo) -> PropertyMetadata {
    PropertyMetadata {
        name_prop: name_prop(&prop.name),
        visible: prop.visible,
        auto_numeric: prop.auto_numeric,
        is_array: prop.is_enumerable,
        info: prop.info.clone(),
        required: prop.required,
        unique: prop.unique,
        has_input: prop.has_input,
    }
}

fn enum_metadata(prop: &PropertySearchInfo) -> PropertyMetadataEnum {
    PropertyMetadataEnum {
        name_prop: name_prop(&prop.name),
        is_array: prop.is_enumerable,
        info: prop.info.clone(),
        enum_labels: prop.enum_labels.clone(),
    }
}

fn collision(dropped: &PropertySearchInfo, kept: &str) -> IndexCollision {
    IndexCollision {
        entity_index: dropped.entity_index,
        field_index: dropped.field_index,
        stage: CollisionStage::Classification(dropped.kind),
        kept: kept.to_string(),
        dropped: name_prop(&dropped.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mdm::reconciler::{reconcile_properties, InputOnlyMatch};
    use crate::mdm::test_support::MapDocs;
    use contracts::shared::metadata::{EntityDescriptors, FieldDescriptor};

    fn reconciled(model: Vec<FieldDescriptor>) -> Vec<PropertySearchInfo> {
        let d = EntityDescriptors { model, input: Vec::new() };
        reconcile_properties(1, &d, &MapDocs::default(), InputOnlyMatch::Key)
    }

    #[test]
    fn test_name_prop_lowercases_first_char_only() {
        assert_eq!(name_prop("Id"), "id");
        assert_eq!(name_prop("URLPath"), "uRLPath");
        assert_eq!(name_prop("already"), "already");
        assert_eq!(name_prop("Ñandu"), "ñandu");
        assert_eq!(name_prop(""), "");
    }

    #[test]
    fn test_every_kind_lands_in_its_own_map() {
        let props = reconciled(vec![
            FieldDescriptor::new("Active", 1, ScalarKind::Bool),
            FieldDescriptor::new("Name", 1, ScalarKind::Str),
            FieldDescriptor::new("Created", 1, ScalarKind::Date),
            FieldDescriptor::new("Ratio", 1, ScalarKind::Dbl),
            FieldDescriptor::new("Count", 1, ScalarKind::Num32),
            FieldDescriptor::new("Total", 1, ScalarKind::Num64),
            FieldDescriptor::new("Location", 1, ScalarKind::Geo),
            FieldDescriptor::new("Status", 1, ScalarKind::Enum),
            FieldDescriptor::new("Alias", 1, ScalarKind::Suggestion),
            FieldDescriptor::new("Sector", 1, EntityRefKind::Reference),
            FieldDescriptor::new("Detail", 1, EntityRefKind::LocalReference),
        ]);

        let (partition, collisions) = classify_properties(&props);

        assert!(collisions.is_empty());
        assert_eq!(partition.len(), props.len());
        assert_eq!(partition.bool_data[&1].name_prop, "active");
        assert_eq!(partition.string_data[&1].name_prop, "name");
        assert_eq!(partition.date_data[&1].name_prop, "created");
        assert_eq!(partition.double_data[&1].name_prop, "ratio");
        assert_eq!(partition.num32_data[&1].name_prop, "count");
        assert_eq!(partition.num64_data[&1].name_prop, "total");
        assert_eq!(partition.geo_data[&1].name_prop, "location");
        assert_eq!(partition.enum_data[&1].name_prop, "status");
        assert_eq!(partition.suggestion_data[&1].name_prop, "alias");
        assert_eq!(partition.reference_data[&1].name_prop, "sector");
        assert_eq!(partition.local_reference_data[&1].name_prop, "detail");
    }

    #[test]
    fn test_projection_copies_flags() {
        let mut props = reconciled(vec![FieldDescriptor::new("Tags", 4, ScalarKind::Str)
            .enumerable()
            .hidden()
            .auto_numeric()]);
        props[0].required = true;

        let (partition, _) = classify_properties(&props);
        let tags = &partition.string_data[&4];

        assert!(tags.is_array);
        assert!(!tags.visible);
        assert!(tags.auto_numeric);
        assert!(tags.required);
        assert!(!tags.has_input);
    }

    #[test]
    fn test_duplicate_index_within_kind_keeps_first() {
        let props = reconciled(vec![
            FieldDescriptor::new("First", 2, ScalarKind::Num32),
            FieldDescriptor::new("Second", 2, ScalarKind::Num32),
        ]);

        let (partition, collisions) = classify_properties(&props);

        assert_eq!(partition.num32_data[&2].name_prop, "first");
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].dropped, "second");
        assert_eq!(
            collisions[0].stage,
            CollisionStage::Classification(FieldKind::Scalar(ScalarKind::Num32))
        );
    }
}
