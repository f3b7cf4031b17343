//! Render and submit endpoints.

use std::collections::HashMap;
use std::sync::Arc;

use ferroform_core::{
    clean_submission, resolve_confirmation, transform_fields, FieldDescriptor, FormError,
    InstanceId, InstanceRegistry, PrepopulateResolver, Result,
};
use ferroform_render::{render_form, RenderOptions};
use ferroform_schema::coerce;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::collaborators::{EntryStore, PersistedEntry, SchemaProvider, SubmissionNotifier};
use crate::request::{parse_pairs, Request};
use crate::response::Response;

/// Form id assumed when the caller supplies none.
const DEFAULT_FORM_ID: u64 = 1;

/// The only template currently shipped. Unknown template names fall
/// back to it.
const DEFAULT_TEMPLATE: &str = "default";

/// Parsed parameters of one render request.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// Id of the form to render.
    pub form_id: u64,
    /// Whether to show the form title.
    pub show_title: bool,
    /// Whether to show the form description.
    pub show_description: bool,
    /// Requested template name.
    pub template: String,
    /// Caller-supplied prepopulation values.
    pub field_values: HashMap<String, String>,
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self {
            form_id: DEFAULT_FORM_ID,
            show_title: false,
            show_description: false,
            template: DEFAULT_TEMPLATE.to_string(),
            field_values: HashMap::new(),
        }
    }
}

impl RenderRequest {
    /// Extracts render parameters from a request's query string.
    ///
    /// `title` and `description` arrive as loosely-typed flags and are
    /// coerced; `field_values` is an urlencoded pair list
    /// (`name=Ann&city=Oslo`).
    pub fn from_request(req: &Request) -> Self {
        let defaults = Self::default();
        Self {
            form_id: req
                .get_query("form")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_FORM_ID),
            show_title: req.get_query("title").is_some_and(coerce::coerce_bool_str),
            show_description: req
                .get_query("description")
                .is_some_and(coerce::coerce_bool_str),
            template: req
                .get_query("template")
                .map_or(defaults.template, str::to_string),
            field_values: req
                .get_query("field_values")
                .map(|encoded| parse_pairs(encoded).into_iter().collect())
                .unwrap_or_default(),
        }
    }
}

/// One rendered form: the assigned instance id, the descriptor list,
/// the resolved confirmation text and the default-template markup.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedForm {
    /// Assigned instance id.
    pub instance: InstanceId,
    /// Transformed field descriptors, in schema order.
    pub fields: Vec<FieldDescriptor>,
    /// Resolved confirmation text.
    pub confirmation: String,
    /// Markup from the default template.
    pub html: String,
}

/// The render and submit endpoints, wired to their external
/// collaborators.
pub struct FormEndpoints {
    provider: Arc<dyn SchemaProvider>,
    store: Arc<dyn EntryStore>,
    notifier: Arc<dyn SubmissionNotifier>,
    instances: InstanceRegistry,
}

impl FormEndpoints {
    /// Creates the endpoints over the given collaborators, with a fresh
    /// instance registry.
    pub fn new(
        provider: impl SchemaProvider + 'static,
        store: impl EntryStore + 'static,
        notifier: impl SubmissionNotifier + 'static,
    ) -> Self {
        Self {
            provider: Arc::new(provider),
            store: Arc::new(store),
            notifier: Arc::new(notifier),
            instances: InstanceRegistry::new(),
        }
    }

    /// Builds one rendering of a form: assigns an instance id,
    /// transforms the fields and resolves the confirmation.
    ///
    /// `query` supplies same-named prepopulation overrides.
    pub fn build_form(
        &self,
        params: &RenderRequest,
        query: &HashMap<String, String>,
    ) -> Result<RenderedForm> {
        let schema = self.provider.schema(params.form_id)?;
        let instance = self.instances.next();

        if params.template != DEFAULT_TEMPLATE {
            debug!(
                template = %params.template,
                "unknown template, falling back to default"
            );
        }

        let resolver = PrepopulateResolver::new(&params.field_values, query);
        let fields = transform_fields(&schema, instance, &resolver);
        let confirmation = resolve_confirmation(&schema.confirmations);
        let html = render_form(
            &schema,
            &fields,
            &confirmation,
            &RenderOptions {
                show_title: params.show_title,
                show_description: params.show_description,
            },
        );

        info!(form_id = params.form_id, %instance, "rendered form");

        Ok(RenderedForm {
            instance,
            fields,
            confirmation,
            html,
        })
    }

    /// Render path: produces the form markup for the query's form id.
    pub async fn render(&self, req: Request) -> Response {
        let params = RenderRequest::from_request(&req);
        match self.build_form(&params, &req.query) {
            Ok(rendered) => Response::html(rendered.html),
            Err(err) => error_response(&err),
        }
    }

    /// Submit path: validates the posted submission against its schema
    /// and persists it.
    ///
    /// `authenticated` is the host's session verdict; login-required
    /// forms reject unauthenticated callers before any cleaning runs.
    pub async fn submit(&self, req: Request, authenticated: bool) -> Response {
        match self.process_submission(&req, authenticated) {
            Ok(entry) => Response::json(entry.as_value()),
            Err(err) => error_response(&err),
        }
    }

    fn process_submission(&self, req: &Request, authenticated: bool) -> Result<PersistedEntry> {
        let form_id = req
            .form_or_query("form")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_FORM_ID);

        let schema = self.provider.schema(form_id)?;

        if schema.require_login() && !authenticated {
            return Err(FormError::Unauthorized);
        }

        let record = clean_submission(&schema, &req.form_submission())?;
        let entry = self.store.persist(&record)?;
        info!(form_id, "submission persisted");

        // Fire-and-forget: a failed notification never blocks the
        // response.
        if let Err(err) = self.notifier.notify(&schema, &entry) {
            warn!(form_id, error = %err, "submission notification failed");
        }

        Ok(entry)
    }
}

/// Maps engine errors onto the failure responses of the wire contract.
fn error_response(err: &FormError) -> Response {
    let status = match err {
        FormError::Validation { .. } => 400,
        FormError::Unauthorized => 401,
        FormError::SchemaUnavailable(_) | FormError::Persistence(_) => 500,
    };
    warn!(status, error = %err, "request failed");
    Response::failure(status)
}
