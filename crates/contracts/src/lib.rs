//! Shared types of the MDM generator
//!
//! `shared::metadata` holds the declarations the generator reads,
//! `shared::model_metadata` the document it publishes.

pub mod shared;
