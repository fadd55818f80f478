//! Collaborators the engine reads from
//!
//! The engine never discovers entities or fields on its own. Everything comes
//! through these three traits; `registry::SchemaRegistry` implements all of
//! them from a declaration file, tests implement them with in-memory tables.

use contracts::shared::metadata::{DisplayInfo, EntityAnnotation, EntityDescriptors, ScalarKind};

/// Supplies the model-side and input-side field declarations of an entity
pub trait FieldDescriptorSource {
    /// `None` when the entity has no paired input declaration.
    /// An entity with a paired but empty declaration returns empty lists.
    fn descriptors(&self, entity: &str) -> Option<EntityDescriptors>;
}

/// Supplies entity-level annotations
pub trait EntityAnnotationReader {
    /// `None` when the entity carries no index annotation
    fn annotation(&self, entity: &str) -> Option<EntityAnnotation>;
}

/// Supplies documentation text for entities and properties
pub trait MdmDocumentation {
    fn entity_info(&self, index: i32) -> DisplayInfo;

    fn property_info(&self, kind: ScalarKind, index: i32) -> DisplayInfo;
}

impl<T: FieldDescriptorSource + ?Sized> FieldDescriptorSource for &T {
    fn descriptors(&self, entity: &str) -> Option<EntityDescriptors> {
        (**self).descriptors(entity)
    }
}

impl<T: EntityAnnotationReader + ?Sized> EntityAnnotationReader for &T {
    fn annotation(&self, entity: &str) -> Option<EntityAnnotation> {
        (**self).annotation(entity)
    }
}

impl<T: MdmDocumentation + ?Sized> MdmDocumentation for &T {
    fn entity_info(&self, index: i32) -> DisplayInfo {
        (**self).entity_info(index)
    }

    fn property_info(&self, kind: ScalarKind, index: i32) -> DisplayInfo {
        (**self).property_info(kind, index)
    }
}
