//! # ferroform-schema
//!
//! Data model for externally-supplied form schemas.
//!
//! A schema describes one form: its ordered fields, per-field choices
//! and sub-inputs, and the confirmation messages shown after a
//! submission. Schemas arrive as JSON from the form-management
//! service, so every type here is `serde` deserializable.
//!
//! Schema producers are notoriously loose about flag typing: the same
//! flag may arrive as `true`, `"1"`, `"yes"` or `1` depending on how
//! the form was edited. Known flags are therefore kept in a raw
//! side-table on each type and only read through the [`coerce`]
//! module, never matched against directly.
//!
//! ## Quick Start
//!
//! ```rust
//! use ferroform_schema::FormSchema;
//!
//! let schema: FormSchema = serde_json::from_value(serde_json::json!({
//!     "id": 7,
//!     "title": "Contact us",
//!     "fields": [
//!         { "id": 1, "type": "text", "label": "Name", "isRequired": "1" },
//!         { "id": 2, "type": "email", "label": "Email" }
//!     ],
//!     "confirmations": [
//!         { "type": "message", "message": "Thanks!", "isDefault": true }
//!     ]
//! }))
//! .unwrap();
//!
//! assert_eq!(schema.fields.len(), 2);
//! assert!(schema.fields[0].is_required());
//! assert!(!schema.fields[1].is_required());
//! ```

pub mod coerce;
mod schema;

pub use schema::{
    Choice, Confirmation, ConfirmationType, Field, FieldId, FieldType, FormSchema, SubInput,
    SubmitButton,
};
