//! Field transformation: schema fields to renderable descriptors.

use ferroform_schema::{Field, FieldId, FieldType, FormSchema};
use serde::Serialize;

use crate::instance::InstanceId;
use crate::prepopulate::PrepopulateResolver;

/// The kind of a single-value input control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Email,
    Hidden,
    Password,
}

impl InputKind {
    /// The `type` attribute value for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Hidden => "hidden",
            Self::Password => "password",
        }
    }
}

/// One option of a select control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    /// Submitted value.
    pub value: String,
    /// Display text.
    pub text: String,
    /// Whether the option is pre-selected.
    pub selected: bool,
}

/// One option of a radio group, keyed by choice index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadioOption {
    /// Position in the declared choice list.
    pub index: usize,
    /// Submitted value.
    pub value: String,
    /// Display text.
    pub text: String,
    /// Whether the option is pre-checked, taken from the choice's own
    /// flag rather than prepopulation.
    pub checked: bool,
}

/// One boolean sub-control of a checkbox group.
///
/// Independently named and addressable by its own stable sub-input id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckboxBox {
    /// Compound id of the sub-input (`"2.1"`).
    pub input_id: FieldId,
    /// Instance-scoped element identifier.
    pub element_id: String,
    /// Submission name of this sub-input.
    pub name: String,
    /// Value recorded when the box is checked.
    pub value: String,
    /// Display text.
    pub text: String,
    /// Whether the box is pre-checked.
    pub checked: bool,
}

/// Render-agnostic representation of a field's input control.
///
/// Descriptors never carry pre-rendered markup, so the same descriptor
/// can target any rendering step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum Control {
    /// A single-value input.
    Input {
        kind: InputKind,
        name: String,
        value: String,
    },
    /// A multi-line text control. The value is raw: it lands in element
    /// content, not an attribute.
    Textarea { name: String, value: String },
    /// A choice list, optionally allowing multiple selections.
    Select {
        name: String,
        multiple: bool,
        options: Vec<ChoiceOption>,
    },
    /// Discrete single-choice controls sharing one submission name.
    RadioGroup { name: String, options: Vec<RadioOption> },
    /// Discrete boolean sub-controls, one per declared sub-input.
    CheckboxGroup { boxes: Vec<CheckboxBox> },
    /// A pass-through content block with no input control.
    Html { content: String },
    /// A non-input heading/divider block.
    Section,
}

/// Output of transforming one schema field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Logical field id.
    pub id: FieldId,
    /// Instance-scoped element identifier.
    pub element_id: String,
    /// Display label.
    pub label: String,
    /// Help text; empty string when the schema declares none.
    pub description: String,
    /// Extra css class hint from the schema.
    pub css_class: Option<String>,
    /// Whether the field is required.
    pub required: bool,
    /// The input control.
    pub control: Control,
}

/// Builds the instance-scoped element identifier for a field id.
pub fn element_id(instance: InstanceId, id: &FieldId) -> String {
    format!("input_{}_{}", instance, id.element_key())
}

/// Builds the submission name for a field or sub-input id.
///
/// Submission names are instance-independent so the same key cleans the
/// submission regardless of which rendering produced it.
pub fn submission_name(id: &FieldId) -> String {
    format!("input_{}", id.element_key())
}

/// Transforms every field of `schema` into descriptors, in schema
/// order. Admin-only fields and unknown field types are dropped.
pub fn transform_fields(
    schema: &FormSchema,
    instance: InstanceId,
    resolver: &PrepopulateResolver<'_>,
) -> Vec<FieldDescriptor> {
    schema
        .fields
        .iter()
        .filter_map(|field| transform_field(field, instance, resolver))
        .collect()
}

/// Transforms one field into a descriptor, or `None` when the field is
/// admin-only or of an unknown type.
pub fn transform_field(
    field: &Field,
    instance: InstanceId,
    resolver: &PrepopulateResolver<'_>,
) -> Option<FieldDescriptor> {
    if field.admin_only() {
        return None;
    }

    let name = submission_name(&field.id);

    let control = match field.field_type {
        // `number` degrades to a text-like control.
        FieldType::Text | FieldType::Email | FieldType::Hidden | FieldType::Number => {
            Control::Input {
                kind: input_kind(field),
                name,
                value: resolver.resolve(field),
            }
        }
        FieldType::Textarea => Control::Textarea {
            name,
            value: resolver.resolve(field),
        },
        FieldType::Select | FieldType::Multiselect => Control::Select {
            name,
            multiple: field.field_type == FieldType::Multiselect,
            options: field
                .choices
                .iter()
                .map(|choice| ChoiceOption {
                    value: choice.value.clone(),
                    text: choice.text.clone(),
                    selected: choice.is_selected(),
                })
                .collect(),
        },
        FieldType::Radio => Control::RadioGroup {
            name,
            options: field
                .choices
                .iter()
                .enumerate()
                .map(|(index, choice)| RadioOption {
                    index,
                    value: choice.value.clone(),
                    text: choice.text.clone(),
                    checked: choice.is_selected(),
                })
                .collect(),
        },
        FieldType::Checkbox => Control::CheckboxGroup {
            boxes: field
                .choices
                .iter()
                .zip(&field.inputs)
                .map(|(choice, input)| CheckboxBox {
                    input_id: input.id.clone(),
                    element_id: element_id(instance, &input.id),
                    name: submission_name(&input.id),
                    value: choice.value.clone(),
                    text: choice.text.clone(),
                    checked: choice.is_selected(),
                })
                .collect(),
        },
        FieldType::Html => Control::Html {
            content: field.content.clone().unwrap_or_default(),
        },
        FieldType::Section => Control::Section,
        FieldType::Other => return None,
    };

    Some(FieldDescriptor {
        id: field.id.clone(),
        element_id: element_id(instance, &field.id),
        label: field.label.clone(),
        description: field.description.clone().unwrap_or_default(),
        css_class: field.css_class.clone(),
        required: field.is_required(),
        control,
    })
}

fn input_kind(field: &Field) -> InputKind {
    if field.password_input() {
        return InputKind::Password;
    }
    match field.field_type {
        FieldType::Email => InputKind::Email,
        FieldType::Hidden => InputKind::Hidden,
        _ => InputKind::Text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::InstanceRegistry;
    use serde_json::json;

    fn field(value: serde_json::Value) -> Field {
        serde_json::from_value(value).unwrap()
    }

    fn transform(value: serde_json::Value) -> Option<FieldDescriptor> {
        let registry = InstanceRegistry::new();
        transform_field(
            &field(value),
            registry.next(),
            &PrepopulateResolver::default(),
        )
    }

    #[test]
    fn test_number_degrades_to_text() {
        let descriptor = transform(json!({
            "id": 3,
            "type": "number",
            "label": "Age"
        }))
        .unwrap();

        match descriptor.control {
            Control::Input { kind, name, .. } => {
                assert_eq!(kind, InputKind::Text);
                assert_eq!(name, "input_3");
            }
            other => panic!("expected input control, got {other:?}"),
        }
        assert_eq!(descriptor.element_id, "input_1_3");
    }

    #[test]
    fn test_password_masking_overrides_kind() {
        let descriptor = transform(json!({
            "id": 1,
            "type": "email",
            "label": "Secret",
            "enablePasswordInput": "1"
        }))
        .unwrap();

        match descriptor.control {
            Control::Input { kind, .. } => assert_eq!(kind, InputKind::Password),
            other => panic!("expected input control, got {other:?}"),
        }
    }

    #[test]
    fn test_admin_only_fields_are_dropped() {
        assert!(transform(json!({
            "id": 1,
            "type": "text",
            "label": "Internal",
            "adminOnly": "1"
        }))
        .is_none());
    }

    #[test]
    fn test_unknown_types_are_dropped() {
        assert!(transform(json!({
            "id": 1,
            "type": "fileupload",
            "label": "Resume"
        }))
        .is_none());
    }

    #[test]
    fn test_description_defaults_to_empty() {
        let descriptor = transform(json!({
            "id": 1,
            "type": "text",
            "label": "Name"
        }))
        .unwrap();
        assert_eq!(descriptor.description, "");
    }

    #[test]
    fn test_checkbox_one_box_per_sub_input() {
        let descriptor = transform(json!({
            "id": 2,
            "type": "checkbox",
            "label": "Interests",
            "choices": [
                { "value": "news", "text": "News", "isSelected": 1 },
                { "value": "events", "text": "Events" }
            ],
            "inputs": [
                { "id": 2.1, "label": "News" },
                { "id": 2.2, "label": "Events" }
            ]
        }))
        .unwrap();

        match descriptor.control {
            Control::CheckboxGroup { boxes } => {
                assert_eq!(boxes.len(), 2);
                assert_eq!(boxes[0].name, "input_2_1");
                assert_eq!(boxes[0].element_id, "input_1_2_1");
                assert_eq!(boxes[0].value, "news");
                assert!(boxes[0].checked);
                assert_eq!(boxes[1].input_id.as_str(), "2.2");
                assert!(!boxes[1].checked);
            }
            other => panic!("expected checkbox group, got {other:?}"),
        }
    }

    #[test]
    fn test_radio_options_keyed_by_index() {
        let descriptor = transform(json!({
            "id": 5,
            "type": "radio",
            "label": "Color",
            "choices": [
                { "value": "r", "text": "Red" },
                { "value": "g", "text": "Green", "isSelected": "1" }
            ]
        }))
        .unwrap();

        match descriptor.control {
            Control::RadioGroup { name, options } => {
                assert_eq!(name, "input_5");
                assert_eq!(options[0].index, 0);
                assert_eq!(options[1].index, 1);
                assert!(!options[0].checked);
                assert!(options[1].checked);
            }
            other => panic!("expected radio group, got {other:?}"),
        }
    }

    #[test]
    fn test_schema_order_is_preserved() {
        let schema: FormSchema = serde_json::from_value(json!({
            "id": 1,
            "fields": [
                { "id": 1, "type": "text", "label": "Name" },
                { "id": 2, "type": "text", "label": "Hidden from public", "adminOnly": true },
                { "id": 3, "type": "section", "label": "Details" }
            ]
        }))
        .unwrap();

        let registry = InstanceRegistry::new();
        let descriptors = transform_fields(
            &schema,
            registry.next(),
            &PrepopulateResolver::default(),
        );

        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].id.as_str(), "1");
        assert_eq!(descriptors[1].id.as_str(), "3");
        assert_eq!(descriptors[1].control, Control::Section);
    }
}
