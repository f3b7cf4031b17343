//! External collaborator contracts.
//!
//! The engine never performs its own I/O: schema lookup, persistence
//! and notifications are delegated to these traits. Each call is a
//! single synchronous operation from the engine's perspective; failures
//! map to [`FormError`](ferroform_core::FormError) variants rather than
//! being retried.

use ferroform_core::{Result, SubmissionRecord};
use ferroform_schema::FormSchema;
use serde_json::Value;

/// The opaque result of persisting a record. The engine does not
/// interpret its shape beyond echoing it back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedEntry(Value);

impl PersistedEntry {
    /// Wraps the store's result.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the result for serialization.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Unwraps the result.
    pub fn into_value(self) -> Value {
        self.0
    }
}

/// Looks up form schemas from the form-management service.
pub trait SchemaProvider: Send + Sync {
    /// Returns the schema for `form_id`, or
    /// [`FormError::SchemaUnavailable`](ferroform_core::FormError::SchemaUnavailable)
    /// when the service is down or the id is unknown.
    fn schema(&self, form_id: u64) -> Result<FormSchema>;
}

/// Persists cleaned submission records.
pub trait EntryStore: Send + Sync {
    /// Stores the record, returning the persisted entry to echo back.
    fn persist(&self, record: &SubmissionRecord) -> Result<PersistedEntry>;
}

/// Side-effect hook fired after a successful persist (e.g. email
/// notifications). Failures are logged and never block the response.
pub trait SubmissionNotifier: Send + Sync {
    /// Notifies about a persisted submission.
    fn notify(&self, schema: &FormSchema, entry: &PersistedEntry) -> Result<()>;
}

/// A notifier that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl SubmissionNotifier for NoopNotifier {
    fn notify(&self, _schema: &FormSchema, _entry: &PersistedEntry) -> Result<()> {
        Ok(())
    }
}
