//! Metadata reconciliation and classification engine
//!
//! Pure, synchronous transformation from entity declarations to the
//! published `ModelMetaData` document:
//!
//! ```text
//! descriptors -> reconciler -> classifier -> folding -> assembler -> collection
//! ```
//!
//! Nothing in here performs I/O or fails; dropped and skipped items are
//! reported through `BuildReport` and logged.

pub mod assembler;
pub mod classifier;
pub mod collection;
pub mod diagnostics;
pub mod folding;
pub mod reconciler;
pub mod sources;

#[cfg(test)]
pub(crate) mod test_support;

pub use classifier::name_prop;
pub use collection::{ModelBuild, ModelCollectionBuilder};
pub use diagnostics::{BuildReport, CollisionStage, IndexCollision, SkipReason, SkippedEntity};
pub use reconciler::{InputOnlyMatch, PropertySearchInfo};
pub use sources::{EntityAnnotationReader, FieldDescriptorSource, MdmDocumentation};
