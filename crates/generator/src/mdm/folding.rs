//! Kind folding
//!
//! Clients see one map per broad kind. After classification three narrower
//! kinds are merged into their broader sibling:
//!
//! - SUGGESTION into STR
//! - NUM64 into NUM32
//! - LOCAL_REFERENCE into REFERENCE
//!
//! The destination map always wins: a source entry whose index is already
//! present is dropped and reported.

use contracts::shared::metadata::{EntityRefKind, FieldKind, ScalarKind};
use contracts::shared::model_metadata::{EnumPropertyMap, PropertyMap};

use super::classifier::KindPartition;
use super::diagnostics::{CollisionStage, IndexCollision};

/// The eight maps published per entity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoldedData {
    pub bool_data: PropertyMap,
    pub string_data: PropertyMap,
    pub date_data: PropertyMap,
    pub double_data: PropertyMap,
    pub enum_data: EnumPropertyMap,
    pub geo_data: PropertyMap,
    pub num_data: PropertyMap,
    pub rel_data: PropertyMap,
}

impl FoldedData {
    pub fn len(&self) -> usize {
        self.bool_data.len()
            + self.string_data.len()
            + self.date_data.len()
            + self.double_data.len()
            + self.enum_data.len()
            + self.geo_data.len()
            + self.num_data.len()
            + self.rel_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fold the narrower kinds of one entity into their broader siblings
pub fn fold_kinds(entity_index: i32, partition: KindPartition) -> (FoldedData, Vec<IndexCollision>) {
    let KindPartition {
        bool_data,
        mut string_data,
        date_data,
        double_data,
        mut num32_data,
        num64_data,
        geo_data,
        enum_data,
        suggestion_data,
        mut reference_data,
        local_reference_data,
    } = partition;

    let mut collisions = Vec::new();

    fold_into(
        entity_index,
        &mut string_data,
        suggestion_data,
        ScalarKind::Suggestion.into(),
        ScalarKind::Str.into(),
        &mut collisions,
    );
    fold_into(
        entity_index,
        &mut num32_data,
        num64_data,
        ScalarKind::Num64.into(),
        ScalarKind::Num32.into(),
        &mut collisions,
    );
    fold_into(
        entity_index,
        &mut reference_data,
        local_reference_data,
        EntityRefKind::LocalReference.into(),
        EntityRefKind::Reference.into(),
        &mut collisions,
    );

    let folded = FoldedData {
        bool_data,
        string_data,
        date_data,
        double_data,
        enum_data,
        geo_data,
        num_data: num32_data,
        rel_data: reference_data,
    };

    (folded, collisions)
}

fn fold_into(
    entity_index: i32,
    destination: &mut PropertyMap,
    source: PropertyMap,
    from: FieldKind,
    into: FieldKind,
    collisions: &mut Vec<IndexCollision>,
) {
    for (index, property) in source {
        if let Some(existing) = destination.get(&index) {
            let collision = IndexCollision {
                entity_index,
                field_index: index,
                stage: CollisionStage::Folding { from, into },
                kept: existing.name_prop.clone(),
                dropped: property.name_prop,
            };
            tracing::warn!("{}", collision);
            collisions.push(collision);
            continue;
        }
        destination.insert(index, property);
    }
}
