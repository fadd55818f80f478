//! Model metadata generator
//!
//! Turns declared entity schemas into the `ModelMetaData` document served to
//! clients: field reconciliation between the model and input declarations,
//! per-kind classification and folding, and entity assembly.

pub mod mdm;
pub mod registry;
pub mod shared;
