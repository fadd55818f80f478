//! Diagnostics collected while building the document
//!
//! The engine never fails on schema content. Anything it has to drop or skip
//! is recorded here and logged, and the run continues.

use std::fmt;

use contracts::shared::metadata::FieldKind;

/// Where an index collision was detected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionStage {
    /// Two fields of the same kind claimed one index
    Classification(FieldKind),
    /// A folded kind claimed an index already used by its destination kind
    Folding { from: FieldKind, into: FieldKind },
}

/// A field dropped because its index was already taken
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexCollision {
    pub entity_index: i32,
    pub field_index: i32,
    pub stage: CollisionStage,
    /// `nameProp` of the field that stayed
    pub kept: String,
    /// `nameProp` of the field that was dropped
    pub dropped: String,
}

impl fmt::Display for IndexCollision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stage {
            CollisionStage::Classification(kind) => write!(
                f,
                "entity {}: {} field '{}' at index {} dropped, index taken by '{}'",
                self.entity_index, kind, self.dropped, self.field_index, self.kept
            ),
            CollisionStage::Folding { from, into } => write!(
                f,
                "entity {}: {} field '{}' not folded into {} at index {}, index taken by '{}'",
                self.entity_index, from, self.dropped, into, self.field_index, self.kept
            ),
        }
    }
}

/// Why an entity is missing from the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No entity-index annotation
    NotAnnotated,
    /// No paired input declaration
    MissingInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntity {
    pub entity: String,
    pub reason: SkipReason,
}

/// Everything noteworthy about one build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub skipped: Vec<SkippedEntity>,
    pub collisions: Vec<IndexCollision>,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.collisions.is_empty()
    }

    pub fn skipped_for(&self, reason: SkipReason) -> impl Iterator<Item = &SkippedEntity> {
        self.skipped.iter().filter(move |s| s.reason == reason)
    }
}
