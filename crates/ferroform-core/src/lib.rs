//! # ferroform-core
//!
//! The schema-driven form engine: field transformation, prepopulation,
//! confirmation selection, submission cleaning and per-render instance
//! ids.
//!
//! A render/validate cycle composes as: the caller supplies a
//! [`FormSchema`](ferroform_schema::FormSchema), the
//! [`InstanceRegistry`] assigns an id, [`transform_fields`] (with a
//! [`PrepopulateResolver`]) produces [`FieldDescriptor`]s and
//! [`resolve_confirmation`] the confirmation text, a rendering step
//! turns descriptors into markup, the client posts a submission, and
//! [`clean_submission`] validates it against the same schema into a
//! [`SubmissionRecord`] ready for persistence.
//!
//! ## Quick Start
//!
//! ```rust
//! use ferroform_core::{
//!     clean_submission, transform_fields, InstanceRegistry,
//!     PrepopulateResolver, RawSubmission,
//! };
//! use ferroform_schema::FormSchema;
//!
//! let schema: FormSchema = serde_json::from_value(serde_json::json!({
//!     "id": 1,
//!     "fields": [
//!         { "id": 1, "type": "text", "label": "Name", "isRequired": "1" }
//!     ]
//! }))
//! .unwrap();
//!
//! let registry = InstanceRegistry::new();
//! let fields = transform_fields(
//!     &schema,
//!     registry.next(),
//!     &PrepopulateResolver::default(),
//! );
//! assert_eq!(fields.len(), 1);
//!
//! let mut raw = RawSubmission::new();
//! raw.insert("input_1", "Ann");
//! let record = clean_submission(&schema, &raw).unwrap();
//! assert_eq!(record.values["1"], "Ann");
//! ```

pub mod confirmation;
mod error;
mod instance;
mod prepopulate;
pub mod sanitize;
mod submission;
mod transform;

pub use confirmation::{resolve_confirmation, FALLBACK_CONFIRMATION};
pub use error::{FormError, Result};
pub use instance::{InstanceId, InstanceRegistry};
pub use prepopulate::PrepopulateResolver;
pub use submission::{clean_submission, RawSubmission, RawValue, SubmissionRecord};
pub use transform::{
    element_id, submission_name, transform_field, transform_fields, CheckboxBox, ChoiceOption,
    Control, FieldDescriptor, InputKind, RadioOption,
};
