//! Endpoint tests over mock collaborators.

use std::collections::HashMap;
use std::sync::Mutex;

use ferroform_core::{FormError, Result, SubmissionRecord};
use ferroform_http::{
    EntryStore, FormEndpoints, NoopNotifier, PersistedEntry, Request, SchemaProvider,
    SubmissionNotifier,
};
use ferroform_schema::FormSchema;
use serde_json::json;

struct MapProvider {
    schemas: HashMap<u64, FormSchema>,
}

impl MapProvider {
    fn with(schemas: Vec<FormSchema>) -> Self {
        Self {
            schemas: schemas.into_iter().map(|s| (s.id, s)).collect(),
        }
    }
}

impl SchemaProvider for MapProvider {
    fn schema(&self, form_id: u64) -> Result<FormSchema> {
        self.schemas
            .get(&form_id)
            .cloned()
            .ok_or_else(|| FormError::SchemaUnavailable(format!("unknown form {form_id}")))
    }
}

#[derive(Default)]
struct RecordingStore {
    records: Mutex<Vec<SubmissionRecord>>,
}

impl EntryStore for RecordingStore {
    fn persist(&self, record: &SubmissionRecord) -> Result<PersistedEntry> {
        let mut records = self.records.lock().unwrap();
        records.push(record.clone());
        let mut entry = serde_json::to_value(record)
            .map_err(|e| FormError::Persistence(e.to_string()))?;
        entry["id"] = json!(records.len());
        Ok(PersistedEntry::new(entry))
    }
}

struct RejectingStore;

impl EntryStore for RejectingStore {
    fn persist(&self, _record: &SubmissionRecord) -> Result<PersistedEntry> {
        Err(FormError::Persistence("store offline".to_string()))
    }
}

struct FailingNotifier;

impl SubmissionNotifier for FailingNotifier {
    fn notify(&self, _schema: &FormSchema, _entry: &PersistedEntry) -> Result<()> {
        Err(FormError::Persistence("smtp down".to_string()))
    }
}

fn contact_schema() -> FormSchema {
    serde_json::from_value(json!({
        "id": 3,
        "title": "Contact",
        "fields": [
            { "id": 1, "type": "text", "label": "Name", "isRequired": "1" },
            { "id": 2, "type": "email", "label": "Contact" }
        ]
    }))
    .unwrap()
}

fn members_schema() -> FormSchema {
    serde_json::from_value(json!({
        "id": 4,
        "title": "Members only",
        "requireLogin": "1",
        "fields": [
            { "id": 1, "type": "text", "label": "Feedback", "isRequired": "1" }
        ]
    }))
    .unwrap()
}

fn endpoints() -> FormEndpoints {
    FormEndpoints::new(
        MapProvider::with(vec![contact_schema(), members_schema()]),
        RecordingStore::default(),
        NoopNotifier,
    )
}

#[tokio::test]
async fn render_returns_form_markup() {
    let endpoints = endpoints();
    let res = endpoints
        .render(
            Request::get("/forms/render")
                .query_param("form", "3")
                .query_param("title", "true"),
        )
        .await;

    assert_eq!(res.status, 200);
    let body = res.body_string().unwrap();
    assert!(body.contains("<h3>Contact</h3>"));
    assert!(body.contains("name=\"input_1\""));
}

#[tokio::test]
async fn render_unknown_form_fails() {
    let endpoints = endpoints();
    let res = endpoints
        .render(Request::get("/forms/render").query_param("form", "99"))
        .await;

    assert_eq!(res.status, 500);
    assert_eq!(res.body_string().unwrap(), r#"{"success":false}"#);
}

#[tokio::test]
async fn render_assigns_increasing_instances() {
    let endpoints = endpoints();
    let params = ferroform_http::RenderRequest {
        form_id: 3,
        ..Default::default()
    };
    let query = HashMap::new();

    let first = endpoints.build_form(&params, &query).unwrap();
    let second = endpoints.build_form(&params, &query).unwrap();
    assert!(first.instance < second.instance);
    assert_eq!(first.fields.len(), 2);
}

#[tokio::test]
async fn submit_persists_and_echoes_entry() {
    let endpoints = endpoints();
    let res = endpoints
        .submit(
            Request::post("/forms/submit")
                .form_body([("form", "3"), ("input_1", "Ann")]),
            false,
        )
        .await;

    assert_eq!(res.status, 200);
    let body: serde_json::Value =
        serde_json::from_slice(&res.body).unwrap();
    assert_eq!(body["1"], "Ann");
    assert_eq!(body["form_id"], 3);
    assert_eq!(body["id"], 1);
    // Optional empty field is absent, not empty.
    assert!(body.get("2").is_none());
}

#[tokio::test]
async fn submit_keeps_multibyte_values_intact() {
    let endpoints = endpoints();
    let res = endpoints
        .submit(
            Request::post("/forms/submit")
                .form_body([("form", "3"), ("input_1", "José")]),
            false,
        )
        .await;

    assert_eq!(res.status, 200);
    let body: serde_json::Value = serde_json::from_slice(&res.body).unwrap();
    assert_eq!(body["1"], "José");
}

#[tokio::test]
async fn submit_missing_required_is_bad_request() {
    let endpoints = endpoints();
    let res = endpoints
        .submit(
            Request::post("/forms/submit").form_body([("form", "3")]),
            false,
        )
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body_string().unwrap(), r#"{"success":false}"#);
}

#[tokio::test]
async fn submit_login_required_rejects_anonymous() {
    let endpoints = endpoints();
    let req = Request::post("/forms/submit").form_body([("form", "4"), ("input_1", "hi")]);

    let res = endpoints.submit(req.clone(), false).await;
    assert_eq!(res.status, 401);
    assert_eq!(res.body_string().unwrap(), r#"{"success":false}"#);

    let res = endpoints.submit(req, true).await;
    assert_eq!(res.status, 200);
}

#[tokio::test]
async fn submit_persistence_failure_surfaces() {
    let endpoints = FormEndpoints::new(
        MapProvider::with(vec![contact_schema()]),
        RejectingStore,
        NoopNotifier,
    );
    let res = endpoints
        .submit(
            Request::post("/forms/submit")
                .form_body([("form", "3"), ("input_1", "Ann")]),
            false,
        )
        .await;

    assert_eq!(res.status, 500);
}

#[tokio::test]
async fn notifier_failure_never_blocks_response() {
    let endpoints = FormEndpoints::new(
        MapProvider::with(vec![contact_schema()]),
        RecordingStore::default(),
        FailingNotifier,
    );
    let res = endpoints
        .submit(
            Request::post("/forms/submit")
                .form_body([("form", "3"), ("input_1", "Ann")]),
            false,
        )
        .await;

    assert_eq!(res.status, 200);
}
