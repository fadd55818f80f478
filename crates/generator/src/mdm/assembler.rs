//! Entity metadata assembly

use contracts::shared::metadata::EntityAnnotation;
use contracts::shared::model_metadata::EntityMetadata;

use super::folding::FoldedData;
use super::reconciler::PropertySearchInfo;
use super::sources::MdmDocumentation;

/// Combine the folded maps of one entity with its entity-level attributes.
///
/// `auto_numeric` is set when any reconciled field is auto-numeric,
/// whatever its visibility or kind.
pub fn assemble_entity(
    annotation: &EntityAnnotation,
    props: &[PropertySearchInfo],
    folded: FoldedData,
    docs: &impl MdmDocumentation,
) -> EntityMetadata {
    let info = docs.entity_info(annotation.index);

    EntityMetadata {
        index: annotation.index,
        title: info.title,
        short_name: info.short_name,
        description: info.description,
        visible: annotation.visible,
        path_name: annotation.path_name.clone(),
        entity_kind: annotation.entity_kind,
        class_name: annotation.class_name.clone(),
        auto_numeric: props.iter().any(|p| p.auto_numeric),
        menus: annotation.menus.clone(),
        bool_data: folded.bool_data,
        string_data: folded.string_data,
        date_data: folded.date_data,
        double_data: folded.double_data,
        enum_data: folded.enum_data,
        geo_data: folded.geo_data,
        num_data: folded.num_data,
        rel_data: folded.rel_data,
    }
}
