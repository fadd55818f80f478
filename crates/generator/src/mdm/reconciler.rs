//! Property reconciliation
//!
//! Joins the model-side and input-side declarations of one entity into a
//! single list of `PropertySearchInfo`. The join key is
//! `(field_index, is_entity_ref)`; the input side contributes the
//! required/unique marks, the model side everything else. Input fields that
//! have no model counterpart are appended as synthesized entries.

use std::collections::{BTreeMap, HashMap, HashSet};

use contracts::shared::metadata::{
    DisplayInfo, EntityDescriptors, FieldDescriptor, FieldKind, GroupInput,
};
use serde::{Deserialize, Serialize};

use super::sources::MdmDocumentation;

/// How an input field is recognised as already covered by the model side
/// when looking for input-only fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputOnlyMatch {
    /// Same `(field_index, is_entity_ref)` key as the model/input join
    #[default]
    Key,
    /// Same field name (legacy behaviour)
    Name,
}

/// Reconciled view of one field of one entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySearchInfo {
    /// Index of the owning entity
    pub entity_index: i32,
    pub field_index: i32,
    pub name: String,
    pub kind: FieldKind,
    pub is_enumerable: bool,
    pub visible: bool,
    pub auto_numeric: bool,
    pub required: bool,
    pub unique: bool,
    pub has_input: bool,
    pub info: DisplayInfo,
    pub enum_labels: BTreeMap<i32, String>,
    pub groups: Vec<GroupInput>,
}

impl PropertySearchInfo {
    pub fn is_entity_ref(&self) -> bool {
        self.kind.is_entity_ref()
    }

    pub fn key(&self) -> (i32, bool) {
        (self.field_index, self.is_entity_ref())
    }
}

/// Reconcile both declarations of the entity `entity_index`.
///
/// Model-side fields come first, in declaration order, followed by the
/// synthesized input-only fields in input declaration order.
pub fn reconcile_properties(
    entity_index: i32,
    descriptors: &EntityDescriptors,
    docs: &impl MdmDocumentation,
    matching: InputOnlyMatch,
) -> Vec<PropertySearchInfo> {
    // first declaration wins when the input side repeats a key
    let mut input_by_key: HashMap<(i32, bool), &FieldDescriptor> = HashMap::new();
    for field in &descriptors.input {
        input_by_key.entry(field.key()).or_insert(field);
    }

    let mut props: Vec<PropertySearchInfo> = descriptors
        .model
        .iter()
        .map(|field| {
            let counterpart = input_by_key.get(&field.key()).copied();
            PropertySearchInfo {
                entity_index,
                field_index: field.field_index,
                name: field.name.clone(),
                kind: field.kind,
                is_enumerable: field.is_enumerable,
                visible: field.is_visible,
                auto_numeric: field.is_auto_numeric,
                required: counterpart.is_some_and(FieldDescriptor::is_required),
                unique: counterpart.is_some_and(FieldDescriptor::is_unique),
                has_input: counterpart.is_some(),
                info: field_info(field, docs),
                enum_labels: enum_labels(field),
                groups: field.groups.clone(),
            }
        })
        .collect();

    let model_keys: HashSet<(i32, bool)> = descriptors.model.iter().map(|f| f.key()).collect();
    let model_names: HashSet<&str> = descriptors.model.iter().map(|f| f.name.as_str()).collect();

    let input_only = descriptors.input.iter().filter(|field| match matching {
        InputOnlyMatch::Key => !model_keys.contains(&field.key()),
        InputOnlyMatch::Name => !model_names.contains(field.name.as_str()),
    });

    for field in input_only {
        tracing::debug!(
            entity = entity_index,
            field = %field.name,
            index = field.field_index,
            kind = %field.kind,
            "synthesizing input-only field"
        );
        props.push(PropertySearchInfo {
            entity_index,
            field_index: field.field_index,
            name: field.name.clone(),
            kind: field.kind,
            is_enumerable: field.is_enumerable,
            visible: false,
            auto_numeric: false,
            required: field.is_required(),
            unique: field.is_unique(),
            has_input: true,
            info: field_info(field, docs),
            enum_labels: enum_labels(field),
            groups: field.groups.clone(),
        });
    }

    props
}

// Reference fields carry the index of the entity they point at, so their
// documentation is that entity's documentation.
fn field_info(field: &FieldDescriptor, docs: &impl MdmDocumentation) -> DisplayInfo {
    match field.kind {
        FieldKind::Entity(_) => docs.entity_info(field.field_index),
        FieldKind::Scalar(kind) => docs.property_info(kind, field.field_index),
    }
}

fn enum_labels(field: &FieldDescriptor) -> BTreeMap<i32, String> {
    if field.kind.is_enum() {
        field.enum_labels.clone()
    } else {
        BTreeMap::new()
    }
}
