//! Model collection builder
//!
//! Drives reconcile -> classify -> fold -> assemble for every entity of a
//! caller-supplied, ordered list and collects the results into one
//! `ModelMetaData`. Entities are independent of each other; the output keeps
//! the order of the input list.

use contracts::shared::model_metadata::{EntityMetadata, ModelMetaData};

use super::assembler::assemble_entity;
use super::classifier::classify_properties;
use super::diagnostics::{BuildReport, IndexCollision, SkipReason, SkippedEntity};
use super::folding::fold_kinds;
use super::reconciler::{reconcile_properties, InputOnlyMatch};
use super::sources::{EntityAnnotationReader, FieldDescriptorSource, MdmDocumentation};

/// Result of one build: the document plus what was dropped on the way
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelBuild {
    pub document: ModelMetaData,
    pub report: BuildReport,
}

enum EntityOutcome {
    Built(EntityMetadata, Vec<IndexCollision>),
    Skipped(SkipReason),
}

pub struct ModelCollectionBuilder<S, A, D> {
    source: S,
    annotations: A,
    docs: D,
    input_only_match: InputOnlyMatch,
}

impl<S, A, D> ModelCollectionBuilder<S, A, D>
where
    S: FieldDescriptorSource,
    A: EntityAnnotationReader,
    D: MdmDocumentation,
{
    pub fn new(source: S, annotations: A, docs: D) -> Self {
        Self {
            source,
            annotations,
            docs,
            input_only_match: InputOnlyMatch::default(),
        }
    }

    pub fn with_input_only_match(mut self, matching: InputOnlyMatch) -> Self {
        self.input_only_match = matching;
        self
    }

    /// Build the document for `entities`, in that order
    pub fn build<'a, I>(&self, entities: I) -> ModelBuild
    where
        I: IntoIterator<Item = &'a str>,
    {
        let outcomes: Vec<(&str, EntityOutcome)> = entities
            .into_iter()
            .map(|entity| (entity, self.build_entity(entity)))
            .collect();

        let mut build = ModelBuild::default();
        for (entity, outcome) in outcomes {
            match outcome {
                EntityOutcome::Built(metadata, collisions) => {
                    build.document.indexes.push(metadata);
                    build.report.collisions.extend(collisions);
                }
                EntityOutcome::Skipped(reason) => build.report.skipped.push(SkippedEntity {
                    entity: entity.to_string(),
                    reason,
                }),
            }
        }

        tracing::info!(
            entities = build.document.indexes.len(),
            skipped = build.report.skipped.len(),
            collisions = build.report.collisions.len(),
            "model metadata built"
        );

        build
    }

    fn build_entity(&self, entity: &str) -> EntityOutcome {
        let Some(annotation) = self.annotations.annotation(entity) else {
            tracing::debug!(entity, "no entity index annotation, excluded");
            return EntityOutcome::Skipped(SkipReason::NotAnnotated);
        };

        let Some(descriptors) = self.source.descriptors(entity) else {
            tracing::info!(
                entity,
                index = annotation.index,
                "no input declaration, entity skipped"
            );
            return EntityOutcome::Skipped(SkipReason::MissingInput);
        };

        let props = reconcile_properties(
            annotation.index,
            &descriptors,
            &self.docs,
            self.input_only_match,
        );
        let (partition, mut collisions) = classify_properties(&props);
        let (folded, fold_collisions) = fold_kinds(annotation.index, partition);
        collisions.extend(fold_collisions);

        let metadata = assemble_entity(&annotation, &props, folded, &self.docs);

        tracing::debug!(
            entity,
            index = metadata.index,
            fields = metadata.field_count(),
            "entity metadata assembled"
        );

        EntityOutcome::Built(metadata, collisions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mdm::test_support::{MapDocs, MapSchema};
    use contracts::shared::metadata::{
        EntityDescriptors, EntityRefKind, FieldDescriptor, InputMarks, ScalarKind,
    };

    fn barrack() -> EntityDescriptors {
        EntityDescriptors {
            model: vec![
                FieldDescriptor::new("Id", 0, ScalarKind::Str),
                FieldDescriptor::new("Name", 3, ScalarKind::Str),
                FieldDescriptor::new("Alias", 3, ScalarKind::Suggestion),
                FieldDescriptor::new("Plants", 4, ScalarKind::Num32),
                FieldDescriptor::new("Hectares", 5, ScalarKind::Num64),
                FieldDescriptor::new("Status", 6, ScalarKind::Enum)
                    .with_enum_labels([(1, "Open"), (2, "Closed")]),
                FieldDescriptor::new("Correlative", 7, ScalarKind::Num32)
                    .auto_numeric()
                    .hidden(),
                FieldDescriptor::new("IdSector", 30, EntityRefKind::Reference),
                FieldDescriptor::new("Points", 31, EntityRefKind::LocalReference).enumerable(),
            ],
            input: vec![
                FieldDescriptor::new("Name", 3, ScalarKind::Str)
                    .with_marks(InputMarks::required_unique()),
                FieldDescriptor::new("IdSector", 30, EntityRefKind::Reference)
                    .with_marks(InputMarks::required()),
                FieldDescriptor::new("Notes", 9, ScalarKind::Str).with_marks(InputMarks::required()),
            ],
        }
    }

    fn builder<'a>(
        schema: &'a MapSchema,
        docs: &'a MapDocs,
    ) -> ModelCollectionBuilder<&'a MapSchema, &'a MapSchema, &'a MapDocs> {
        ModelCollectionBuilder::new(schema, schema, docs)
    }

    #[test]
    fn test_full_entity_pipeline() {
        let schema = MapSchema::default().with_entity("Barrack", 2, Some(barrack()));
        let docs = MapDocs::default().with_entity(2, "Barrack").with_entity(30, "Sector");

        let build = builder(&schema, &docs).build(["Barrack"]);
        let entity = build.document.entity(2).unwrap();

        // folding collision: STR keeps index 3
        assert_eq!(entity.string_data[&3].name_prop, "name");
        assert!(entity.string_data[&3].required);
        assert!(entity.string_data[&3].unique);
        // input-only synthesis
        assert!(entity.string_data[&9].has_input);
        assert!(entity.string_data[&9].required);
        // NUM64 folded into numbers
        assert!(entity.num_data.contains_key(&5));
        // enum fidelity
        assert_eq!(entity.enum_data[&6].enum_labels.get(&1).map(String::as_str), Some("Open"));
        assert_eq!(entity.enum_data[&6].enum_labels.get(&2).map(String::as_str), Some("Closed"));
        // references, local reference folded into relData
        assert_eq!(entity.rel_data[&30].info.title, "Sector");
        assert!(entity.rel_data[&30].required);
        assert!(entity.rel_data[&31].is_array);
        // auto-numeric propagation from a hidden field
        assert!(entity.auto_numeric);
        assert_eq!(entity.title, "Barrack");

        assert_eq!(build.report.collisions.len(), 1);
        assert_eq!(build.report.collisions[0].dropped, "alias");
    }

    #[test]
    fn test_partition_totality() {
        let schema = MapSchema::default().with_entity("Barrack", 2, Some(barrack()));
        let docs = MapDocs::default();

        let build = builder(&schema, &docs).build(["Barrack"]);
        let entity = &build.document.indexes[0];

        // 9 model fields + 1 input-only field, one lost to the fold collision
        assert_eq!(entity.field_count() + build.report.collisions.len(), 10);
    }

    #[test]
    fn test_output_follows_supplied_order() {
        let schema = MapSchema::default()
            .with_entity("Zeta", 1, Some(EntityDescriptors::default()))
            .with_entity("Alpha", 9, Some(EntityDescriptors::default()))
            .with_entity("Mid", 4, Some(EntityDescriptors::default()));
        let docs = MapDocs::default();

        let build = builder(&schema, &docs).build(["Alpha", "Zeta", "Mid"]);
        let order: Vec<i32> = build.document.indexes.iter().map(|e| e.index).collect();

        assert_eq!(order, vec![9, 1, 4]);
        assert!(build.report.is_clean());
    }

    #[test]
    fn test_skips_unannotated_and_missing_input() {
        let schema = MapSchema::default()
            .with_entity("Kept", 1, Some(EntityDescriptors::default()))
            .with_entity("NoInput", 2, None)
            .with_unannotated("Helper", barrack());
        let docs = MapDocs::default();

        let build = builder(&schema, &docs).build(["Helper", "Kept", "NoInput"]);

        assert_eq!(build.document.indexes.len(), 1);
        assert_eq!(build.document.indexes[0].class_name, "Kept");
        assert_eq!(build.document.indexes[0].field_count(), 0);
        assert_eq!(build.report.skipped_for(SkipReason::NotAnnotated).count(), 1);
        assert_eq!(build.report.skipped_for(SkipReason::MissingInput).count(), 1);
    }

    #[test]
    fn test_rebuild_is_byte_identical() {
        let schema = MapSchema::default()
            .with_entity("Barrack", 2, Some(barrack()))
            .with_entity("Sector", 30, Some(EntityDescriptors::default()));
        let docs = MapDocs::default().with_entity(30, "Sector");
        let builder = builder(&schema, &docs);

        let first = serde_json::to_string(&builder.build(["Barrack", "Sector"]).document).unwrap();
        let second = serde_json::to_string(&builder.build(["Barrack", "Sector"]).document).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_name_matching_mode_is_forwarded() {
        let descriptors = EntityDescriptors {
            model: vec![FieldDescriptor::new("Name", 1, ScalarKind::Str)],
            input: vec![FieldDescriptor::new("Name", 2, ScalarKind::Str)],
        };
        let schema = MapSchema::default().with_entity("Thing", 1, Some(descriptors));
        let docs = MapDocs::default();

        let by_name = builder(&schema, &docs)
            .with_input_only_match(InputOnlyMatch::Name)
            .build(["Thing"]);
        let by_key = builder(&schema, &docs).build(["Thing"]);

        assert_eq!(by_name.document.indexes[0].string_data.len(), 1);
        assert_eq!(by_key.document.indexes[0].string_data.len(), 2);
    }
}
