//! Declaration types for the MDM metadata system
//!
//! Entities are declared as plain data: an `EntityAnnotation` plus two lists
//! of `FieldDescriptor` (model side and input side). The generator reconciles
//! them into the published `ModelMetaData` document.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use contracts::shared::metadata::{FieldDescriptor, InputMarks, ScalarKind};
//!
//! let name = FieldDescriptor::new("Name", 1, ScalarKind::Str)
//!     .with_marks(InputMarks::required_unique());
//! assert_eq!(name.key(), (1, false));
//! ```

mod field_type;
mod types;
mod validation;

pub use field_type::{EntityRefKind, FieldKind, ScalarKind, UnknownKind};
pub use types::{
    DisplayInfo,
    EntityAnnotation,
    EntityDescriptors,
    EntityKind,
    FieldDescriptor,
    GroupInput,
    MenuGroup,
};
pub use validation::InputMarks;
