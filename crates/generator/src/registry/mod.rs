//! Schema registry
//!
//! Loads the JSON schema declaration, validates it and serves it to the
//! metadata engine through the three collaborator traits. Everything is
//! resolved once at load time into a table keyed by entity index.

pub mod declaration;
pub mod documentation;
pub mod error;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use contracts::shared::metadata::{
    DisplayInfo, EntityAnnotation, EntityDescriptors, FieldDescriptor, FieldKind, MenuGroup,
    ScalarKind,
};

use crate::mdm::{
    EntityAnnotationReader, FieldDescriptorSource, InputOnlyMatch, MdmDocumentation, ModelBuild,
    ModelCollectionBuilder,
};

use declaration::{DeclarationJson, EntityJson, FieldJson};
pub use documentation::StaticDocumentation;
pub use error::{RegistryError, Side};

/// Declarations bound to one entity index
#[derive(Debug, Clone)]
pub struct EntityBinding {
    pub annotation: EntityAnnotation,
    pub model: Vec<FieldDescriptor>,
    /// `None` when the entity has no paired input declaration
    pub input: Option<Vec<FieldDescriptor>>,
}

/// Validated schema declaration
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    /// Discovery order: class names as declared, annotated or not
    order: Vec<String>,
    bindings: BTreeMap<i32, EntityBinding>,
    /// Annotated class name -> entity index
    class_index: HashMap<String, i32>,
    documentation: StaticDocumentation,
}

impl SchemaRegistry {
    /// Load and validate a declaration file
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let registry = Self::from_json_str(&content)?;
        tracing::info!(
            "Loaded schema declaration from {}: {} entities, {} annotated",
            path.display(),
            registry.order.len(),
            registry.bindings.len()
        );
        Ok(registry)
    }

    pub fn from_json_str(content: &str) -> Result<Self, RegistryError> {
        let declaration: DeclarationJson = serde_json::from_str(content)?;
        Self::from_declaration(declaration)
    }

    pub fn from_declaration(declaration: DeclarationJson) -> Result<Self, RegistryError> {
        if let Some(version) = &declaration.schema_version {
            tracing::debug!(version = version.as_str(), "schema declaration version");
        }

        let mut registry = Self::default();
        let mut seen_classes = HashSet::new();

        for entity in declaration.entities {
            if entity.class_name.trim().is_empty() {
                return Err(RegistryError::EmptyClassName);
            }
            if !seen_classes.insert(entity.class_name.clone()) {
                return Err(RegistryError::DuplicateClassName(entity.class_name));
            }
            registry.order.push(entity.class_name.clone());
            registry.register_entity(entity)?;
        }

        // Documentation section wins over inline `info`
        for (index, info) in declaration.documentation.entities {
            registry.documentation.set_entity(index, info.into());
        }
        for (kind_name, entries) in declaration.documentation.properties {
            let kind = parse_scalar_kind(&kind_name)?;
            for (index, info) in entries {
                registry.documentation.set_property(kind, index, info.into());
            }
        }

        Ok(registry)
    }

    fn register_entity(&mut self, entity: EntityJson) -> Result<(), RegistryError> {
        let EntityJson {
            class_name,
            index,
            visible,
            path_name,
            kind,
            menus,
            info,
            model,
            input,
        } = entity;

        // Unannotated types are validated but contribute no documentation
        let documented = index.is_some();
        let model = self.convert_fields(&class_name, Side::Model, model, documented)?;
        let input = input
            .map(|fields| self.convert_fields(&class_name, Side::Input, fields, documented))
            .transpose()?;

        let Some(index) = index else {
            tracing::debug!(class = class_name.as_str(), "declared without entity index");
            return Ok(());
        };

        if let Some(existing) = self.bindings.get(&index) {
            return Err(RegistryError::DuplicateEntityIndex {
                index,
                first: existing.annotation.class_name.clone(),
                second: class_name,
            });
        }

        if let Some(info) = info {
            self.documentation.default_entity(index, info.into());
        }

        let annotation = EntityAnnotation {
            index,
            visible,
            path_name,
            entity_kind: kind,
            class_name: class_name.clone(),
            menus: menus.into_iter().map(MenuGroup::from).collect(),
        };

        self.class_index.insert(class_name, index);
        self.bindings.insert(
            index,
            EntityBinding {
                annotation,
                model,
                input,
            },
        );
        Ok(())
    }

    /// Validate one side of an entity and convert it to descriptors.
    /// Inline property documentation is recorded when `documented` is set.
    fn convert_fields(
        &mut self,
        entity: &str,
        side: Side,
        fields: Vec<FieldJson>,
        documented: bool,
    ) -> Result<Vec<FieldDescriptor>, RegistryError> {
        let mut seen: HashSet<(FieldKind, i32)> = HashSet::new();
        let mut descriptors = Vec::with_capacity(fields.len());

        for mut field in fields {
            if field.name.trim().is_empty() {
                return Err(RegistryError::EmptyFieldName {
                    entity: entity.to_string(),
                    side,
                    index: field.index,
                });
            }
            if !seen.insert((field.kind, field.index)) {
                return Err(RegistryError::DuplicateField {
                    entity: entity.to_string(),
                    side,
                    kind: field.kind.to_string(),
                    index: field.index,
                });
            }
            if !field.enum_labels.is_empty() && !field.kind.is_enum() {
                return Err(RegistryError::EnumLabelsOnNonEnum {
                    entity: entity.to_string(),
                    field: field.name,
                });
            }

            if let Some(info) = field.info.take() {
                // reference fields are documented by the entity they point at
                let FieldKind::Scalar(kind) = field.kind else {
                    return Err(RegistryError::InfoOnReference {
                        entity: entity.to_string(),
                        field: field.name,
                    });
                };
                if documented {
                    self.documentation
                        .default_property(kind, field.index, DisplayInfo::from(info));
                }
            }

            descriptors.push(field.into_descriptor());
        }

        Ok(descriptors)
    }

    /// Replace the discovery order with an explicit one.
    /// Every name must be declared; classes left out are not built.
    pub fn with_order<I, S>(mut self, order: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let order: Vec<String> = order.into_iter().map(Into::into).collect();
        if let Some(unknown) = order.iter().find(|name| !self.order.contains(name)) {
            return Err(RegistryError::UnknownOrderEntry(unknown.clone()));
        }
        self.order = order;
        Ok(self)
    }

    /// Class names in discovery order
    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn binding(&self, index: i32) -> Option<&EntityBinding> {
        self.bindings.get(&index)
    }

    pub fn binding_for(&self, class_name: &str) -> Option<&EntityBinding> {
        self.class_index
            .get(class_name)
            .and_then(|index| self.bindings.get(index))
    }

    pub fn documentation(&self) -> &StaticDocumentation {
        &self.documentation
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Build the model metadata for every class in discovery order
    pub fn build(&self, matching: InputOnlyMatch) -> ModelBuild {
        ModelCollectionBuilder::new(self, self, self)
            .with_input_only_match(matching)
            .build(self.order.iter().map(String::as_str))
    }
}

fn parse_scalar_kind(name: &str) -> Result<ScalarKind, RegistryError> {
    name.parse::<FieldKind>()
        .ok()
        .and_then(|kind| kind.scalar())
        .ok_or_else(|| RegistryError::DocumentationKind(name.to_string()))
}

impl FieldDescriptorSource for SchemaRegistry {
    fn descriptors(&self, entity: &str) -> Option<EntityDescriptors> {
        let binding = self.binding_for(entity)?;
        let input = binding.input.as_ref()?;
        Some(EntityDescriptors {
            model: binding.model.clone(),
            input: input.clone(),
        })
    }
}

impl EntityAnnotationReader for SchemaRegistry {
    fn annotation(&self, entity: &str) -> Option<EntityAnnotation> {
        self.binding_for(entity).map(|b| b.annotation.clone())
    }
}

impl MdmDocumentation for SchemaRegistry {
    fn entity_info(&self, index: i32) -> DisplayInfo {
        self.documentation.entity_info(index)
    }

    fn property_info(&self, kind: ScalarKind, index: i32) -> DisplayInfo {
        self.documentation.property_info(kind, index)
    }
}
