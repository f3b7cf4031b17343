//! Submission cleaning and validation.

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use ferroform_schema::{coerce, Field, FieldType, FormSchema};
use serde::Serialize;
use tracing::debug;

use crate::error::{FormError, Result};
use crate::sanitize;
use crate::transform::submission_name;

/// Timestamp format of `date_created`.
const DATE_CREATED_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A raw submitted value: single for ordinary inputs, repeated for
/// multiselect controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Single(String),
    Multiple(Vec<String>),
}

impl RawValue {
    /// Returns the value as one string; a repeated value yields its
    /// first entry.
    pub fn as_single(&self) -> &str {
        match self {
            Self::Single(value) => value,
            Self::Multiple(values) => values.first().map_or("", String::as_str),
        }
    }

    /// Returns all submitted values.
    pub fn values(&self) -> &[String] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Multiple(values) => values,
        }
    }

    /// Whether the value spells a truthy flag (checkbox companions post
    /// `"true"`/`"1"`).
    pub fn is_truthy(&self) -> bool {
        coerce::coerce_bool_str(self.as_single())
    }
}

/// Raw submitted key/value pairs, keyed by generated input name.
#[derive(Debug, Clone, Default)]
pub struct RawSubmission {
    values: HashMap<String, RawValue>,
}

impl RawSubmission {
    /// Creates an empty submission.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects posted pairs, folding repeated keys and `name[]` array
    /// notation into repeated values.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        use std::collections::hash_map::Entry;

        let mut submission = Self::new();
        for (key, value) in pairs {
            let mut key = key.into();
            let repeated = key.ends_with("[]");
            if repeated {
                key.truncate(key.len() - 2);
            }

            match submission.values.entry(key) {
                Entry::Occupied(mut occupied) => match occupied.get_mut() {
                    RawValue::Multiple(values) => values.push(value.into()),
                    single => {
                        let first = single.as_single().to_string();
                        *single = RawValue::Multiple(vec![first, value.into()]);
                    }
                },
                Entry::Vacant(vacant) => {
                    if repeated {
                        vacant.insert(RawValue::Multiple(vec![value.into()]));
                    } else {
                        vacant.insert(RawValue::Single(value.into()));
                    }
                }
            }
        }
        submission
    }

    /// Sets a single value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values
            .insert(name.into(), RawValue::Single(value.into()));
    }

    /// Sets a repeated value.
    pub fn insert_multi(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.values.insert(name.into(), RawValue::Multiple(values));
    }

    /// Gets a submitted value by input name.
    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.values.get(name)
    }
}

/// The cleaned, validated result of one form submission, ready for
/// persistence. Built fresh per submission and never mutated after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRecord {
    /// Cleaned values keyed by field or sub-input id.
    #[serde(flatten)]
    pub values: BTreeMap<String, String>,
    /// Id of the submitted form.
    pub form_id: u64,
    /// Creation timestamp (`%Y-%m-%d %H:%M`).
    pub date_created: String,
}

/// Maps a raw submission back onto the schema, sanitizing and
/// validating per field type.
///
/// Fields are visited in schema order. Checkbox sub-inputs record the
/// matching choice's value when their companion key is present and
/// truthy; absence means unchecked, never an error. Any other field
/// whose cleaned value is empty while flagged required fails the whole
/// submission immediately. Html and section fields carry no submitted
/// value and are skipped.
///
/// Pure with respect to the schema and the raw input: the same pair
/// always yields the same record (modulo `date_created`) or the same
/// failure.
pub fn clean_submission(schema: &FormSchema, raw: &RawSubmission) -> Result<SubmissionRecord> {
    let mut values = BTreeMap::new();

    for field in &schema.fields {
        match field.field_type {
            FieldType::Html | FieldType::Section | FieldType::Other => continue,
            FieldType::Checkbox => {
                for (choice, input) in field.choices.iter().zip(&field.inputs) {
                    let name = submission_name(&input.id);
                    if raw.get(&name).is_some_and(RawValue::is_truthy) {
                        values.insert(input.id.to_string(), choice.value.clone());
                    }
                }
            }
            _ => match clean_field(field, raw) {
                Some(clean) => {
                    values.insert(field.id.to_string(), clean);
                }
                None if field.is_required() => {
                    return Err(FormError::Validation {
                        field: field.id.to_string(),
                    });
                }
                None => {
                    debug!(field = %field.id, "optional field cleaned to empty, omitted");
                }
            },
        }
    }

    Ok(SubmissionRecord {
        values,
        form_id: schema.id,
        date_created: Utc::now().format(DATE_CREATED_FORMAT).to_string(),
    })
}

/// Derives the cleaned value for a single-value field, or `None` when
/// the value is absent or cleans to empty.
fn clean_field(field: &Field, raw: &RawSubmission) -> Option<String> {
    let value = raw.get(&submission_name(&field.id))?;

    let cleaned = match field.field_type {
        FieldType::Email => sanitize::sanitize_email(value.as_single()),
        FieldType::Number => {
            let single = value.as_single();
            if sanitize::matches_number(single) {
                single.to_string()
            } else {
                String::new()
            }
        }
        // Exact membership in the declared choice set; anything else is
        // treated as empty.
        FieldType::Select | FieldType::Radio => {
            let single = value.as_single();
            if field.choices.iter().any(|choice| choice.value == single) {
                single.to_string()
            } else {
                String::new()
            }
        }
        FieldType::Multiselect => {
            let submitted = value.values();
            let matched: Vec<&str> = field
                .choices
                .iter()
                .filter(|choice| submitted.iter().any(|s| s == &choice.value))
                .map(|choice| choice.value.as_str())
                .collect();
            matched.join(", ")
        }
        FieldType::Textarea => value.as_single().to_string(),
        _ => sanitize::sanitize_text(value.as_single()),
    };

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}
