//! Form domain layer
//!
//! Field validators, per-form value containers and the submit-time rule
//! sets that tie them together.

mod field;
mod form_state;
mod rules;
mod validators;

pub use field::{FieldSpec, FieldValue, UploadedFile};
pub use form_state::{FormKind, FormValues};
pub use rules::validate_form;
pub use validators::ValidationError;
