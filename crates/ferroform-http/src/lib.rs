//! # ferroform-http
//!
//! The HTTP-shaped contract around the form engine: request/response
//! types, the external collaborator traits, and the render and submit
//! endpoints.
//!
//! The endpoints own no I/O of their own. Schema lookup, persistence
//! and notifications go through the [`SchemaProvider`], [`EntryStore`]
//! and [`SubmissionNotifier`] traits supplied by the host; each is a
//! single synchronous call whose failure is mapped to an error
//! response, never retried.
//!
//! ## Quick Start
//!
//! ```rust
//! use ferroform_core::{Result, SubmissionRecord};
//! use ferroform_http::{
//!     EntryStore, FormEndpoints, NoopNotifier, PersistedEntry, Request,
//!     SchemaProvider,
//! };
//! use ferroform_schema::FormSchema;
//!
//! struct StaticProvider(FormSchema);
//!
//! impl SchemaProvider for StaticProvider {
//!     fn schema(&self, _form_id: u64) -> Result<FormSchema> {
//!         Ok(self.0.clone())
//!     }
//! }
//!
//! struct EchoStore;
//!
//! impl EntryStore for EchoStore {
//!     fn persist(&self, record: &SubmissionRecord) -> Result<PersistedEntry> {
//!         Ok(PersistedEntry::new(serde_json::to_value(record).unwrap()))
//!     }
//! }
//!
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let schema: FormSchema =
//!     serde_json::from_value(serde_json::json!({ "id": 1 })).unwrap();
//! let endpoints = FormEndpoints::new(StaticProvider(schema), EchoStore, NoopNotifier);
//!
//! let response = endpoints
//!     .render(Request::get("/forms/render").query_param("form", "1"))
//!     .await;
//! assert_eq!(response.status, 200);
//! # });
//! ```

mod collaborators;
mod endpoints;
mod request;
mod response;

pub use collaborators::{
    EntryStore, NoopNotifier, PersistedEntry, SchemaProvider, SubmissionNotifier,
};
pub use endpoints::{FormEndpoints, RenderRequest, RenderedForm};
pub use request::{parse_pairs, Method, Request};
pub use response::Response;
