//! Schema types for one form.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::coerce;

/// Stable identifier of a field or sub-input.
///
/// Simple fields carry integer ids (`"3"`); the sub-inputs of
/// multi-input field types carry dotted compound ids (`"3.1"`).
/// Deserializes from JSON numbers or strings; fractional numbers are
/// formatted with one decimal place so `3.1` and `"3.1"` are the same
/// id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FieldId(String);

impl FieldId {
    /// Creates an id from its string form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the id in element-identifier form, with dots folded to
    /// underscores (`"3.1"` becomes `"3_1"`).
    pub fn element_key(&self) -> String {
        self.0.replace('.', "_")
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl<'de> Deserialize<'de> for FieldId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = FieldId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a field id as a string or number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<FieldId, E> {
                Ok(FieldId::new(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<FieldId, E> {
                Ok(FieldId::new(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<FieldId, E> {
                Ok(FieldId::new(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<FieldId, E> {
                if v.fract() == 0.0 {
                    Ok(FieldId::new(format!("{}", v as i64)))
                } else {
                    Ok(FieldId::new(format!("{v:.1}")))
                }
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// The fixed enumeration of field types.
///
/// Unknown types deserialize to [`FieldType::Other`] and are skipped by
/// the transformer and the cleaner rather than failing schema ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Textarea,
    Hidden,
    Email,
    Number,
    Select,
    Multiselect,
    Radio,
    Checkbox,
    Html,
    Section,
    #[serde(other)]
    Other,
}

/// One selectable choice of a select, multiselect, radio or checkbox
/// field.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Choice {
    /// Stored value.
    #[serde(default)]
    pub value: String,
    /// Display text.
    #[serde(default)]
    pub text: String,
    /// Loosely-typed flags (`isSelected`, ...).
    #[serde(flatten)]
    pub flags: Map<String, Value>,
}

impl Choice {
    /// Whether the choice is pre-selected. Read with raw truthiness:
    /// choice flags come straight off the editor and an explicit `"0"`
    /// must stay unselected.
    pub fn is_selected(&self) -> bool {
        coerce::truthy_property(&self.flags, "isSelected", false)
    }
}

/// One declared sub-input of a multi-input field type (checkbox).
///
/// Sub-input ids are compound (`"3.1"`, `"3.2"`), distinct and stable.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubInput {
    /// Compound id of this sub-input.
    pub id: FieldId,
    /// Sub-input label.
    #[serde(default)]
    pub label: String,
}

/// One field definition of a form schema.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Stable field id.
    pub id: FieldId,
    /// Field type.
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Help text shown under the control.
    #[serde(default)]
    pub description: Option<String>,
    /// Parameter name used for external prepopulation.
    #[serde(default)]
    pub input_name: Option<String>,
    /// Declared default value.
    #[serde(default)]
    pub default_value: Option<String>,
    /// Extra css class hint.
    #[serde(default)]
    pub css_class: Option<String>,
    /// Raw content block, for `html` fields.
    #[serde(default)]
    pub content: Option<String>,
    /// Ordered choices, for choice-bearing field types.
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Ordered sub-inputs, for multi-input field types. Matches
    /// `choices` one to one for checkbox fields.
    #[serde(default)]
    pub inputs: Vec<SubInput>,
    /// Loosely-typed flags (`isRequired`, `adminOnly`, ...).
    #[serde(flatten)]
    pub flags: Map<String, Value>,
}

impl Field {
    /// Whether a submission must produce a value for this field.
    pub fn is_required(&self) -> bool {
        coerce::truthy_property(&self.flags, "isRequired", true)
    }

    /// Whether the field is only shown to administrators. Admin-only
    /// fields never reach the renderer.
    pub fn admin_only(&self) -> bool {
        coerce::truthy_property(&self.flags, "adminOnly", true)
    }

    /// Whether external values may prepopulate the field.
    pub fn allows_prepopulate(&self) -> bool {
        coerce::truthy_property(&self.flags, "allowsPrepopulate", true)
    }

    /// Whether the rendered control masks its input.
    pub fn password_input(&self) -> bool {
        coerce::truthy_property(&self.flags, "enablePasswordInput", true)
    }
}

/// The kind of a post-submission confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationType {
    #[default]
    Message,
    Page,
    Redirect,
    #[serde(other)]
    Other,
}

/// A post-submission confirmation candidate.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    /// Confirmation kind.
    #[serde(rename = "type", default)]
    pub confirmation_type: ConfirmationType,
    /// Message body, for message confirmations.
    #[serde(default)]
    pub message: String,
    /// Loosely-typed flags (`isDefault`, `disableAutoFormatting`).
    #[serde(flatten)]
    pub flags: Map<String, Value>,
}

impl Confirmation {
    /// Whether this confirmation is flagged as the default. Raw
    /// truthiness, matching how the flag is probed at selection time.
    pub fn is_default(&self) -> bool {
        coerce::truthy_property(&self.flags, "isDefault", false)
    }

    /// Whether paragraph auto-formatting of the message is disabled.
    pub fn auto_formatting_disabled(&self) -> bool {
        coerce::truthy_property(&self.flags, "disableAutoFormatting", true)
    }
}

/// The submit button of a form.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubmitButton {
    /// Button label.
    #[serde(default = "default_button_text")]
    pub text: String,
}

impl Default for SubmitButton {
    fn default() -> Self {
        Self {
            text: default_button_text(),
        }
    }
}

fn default_button_text() -> String {
    "Submit".to_string()
}

/// An externally-supplied form schema.
///
/// Immutable for the duration of one render or validate cycle; owned by
/// the form-management service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FormSchema {
    /// Form id, as known to the form-management service.
    pub id: u64,
    /// Form title.
    #[serde(default)]
    pub title: String,
    /// Form description.
    #[serde(default)]
    pub description: String,
    /// Submit button.
    #[serde(default)]
    pub button: SubmitButton,
    /// Ordered field definitions.
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Ordered confirmation candidates.
    #[serde(default)]
    pub confirmations: Vec<Confirmation>,
    /// Loosely-typed form-level flags (`requireLogin`, ...).
    #[serde(flatten)]
    pub flags: Map<String, Value>,
}

impl FormSchema {
    /// Whether submissions require an authenticated caller.
    pub fn require_login(&self) -> bool {
        coerce::truthy_property(&self.flags, "requireLogin", true)
    }
}
