pub mod metadata;
pub mod model_metadata;
