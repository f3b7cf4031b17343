//! The default form template.

use std::fmt::Write as _;

use ferroform_core::{Control, FieldDescriptor, InputKind};
use ferroform_schema::FormSchema;

use crate::escape::escape_html;

/// Display options for one rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Whether to show the form title.
    pub show_title: bool,
    /// Whether to show the form description.
    pub show_description: bool,
}

/// Renders a complete form from its descriptors, in the default
/// template: title/description per the options, one block per field, a
/// submit button with the schema's label and the confirmation block.
pub fn render_form(
    schema: &FormSchema,
    fields: &[FieldDescriptor],
    confirmation: &str,
    options: &RenderOptions,
) -> String {
    let mut out = String::new();
    out.push_str("<div class=\"ng-gravityforms\" ng-app=\"ngGravityForms\">\n");
    out.push_str("<div ng-controller=\"FormsCtrl\">\n");
    out.push_str("<form ng-submit=\"submitForm()\" ng-hide=\"showConfirm\">\n");

    if options.show_title {
        let _ = writeln!(out, "<h3>{}</h3>", escape_html(&schema.title));
    }
    if options.show_description {
        let _ = writeln!(out, "<p>{}</p>", escape_html(&schema.description));
    }

    for field in fields {
        out.push_str(&render_field(field));
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "<div class=\"text-center\"><button type=\"submit\" \
         class=\"btn btn-lg btn-success\">{}</button></div>",
        escape_html(&schema.button.text)
    );
    out.push_str("</form>\n");
    let _ = writeln!(out, "<div ng-show=\"showConfirm\">{confirmation}</div>");
    out.push_str("</div>\n</div>");
    out
}

/// Renders one field descriptor as markup.
pub fn render_field(field: &FieldDescriptor) -> String {
    match &field.control {
        Control::Input { kind, name, value } => {
            let input = render_input(field, *kind, name, value);
            if *kind == InputKind::Hidden {
                // Hidden inputs get no visible wrapper.
                format!("{input}{}", help_block(field))
            } else {
                standard_group(field, &input)
            }
        }
        Control::Textarea { name, value } => {
            let control = format!(
                "<textarea {}>{}</textarea>",
                control_attrs(field, name, "form-control", true),
                escape_html(value)
            );
            standard_group(field, &control)
        }
        Control::Select {
            name,
            multiple,
            options,
        } => {
            let rendered: String = options
                .iter()
                .map(|option| {
                    format!(
                        "<option value=\"{}\"{}>{}</option>",
                        escape_html(&option.value),
                        if option.selected { " selected" } else { "" },
                        escape_html(&option.text)
                    )
                })
                .collect();
            let control = format!(
                "<select {}{}>{}</select>",
                control_attrs(field, name, "form-control", true),
                if *multiple { " multiple" } else { "" },
                rendered
            );
            standard_group(field, &control)
        }
        Control::RadioGroup { name, options } => {
            let rendered: String = options
                .iter()
                .map(|option| {
                    format!(
                        "<div class=\"radio\"><label><input type=\"radio\" value=\"{}\"{} {} /> \
                         {}</label></div>\n",
                        escape_html(&option.value),
                        if option.checked { " checked" } else { "" },
                        control_attrs(field, name, "", false),
                        escape_html(&option.text)
                    )
                })
                .collect();
            option_group(field, &rendered)
        }
        Control::CheckboxGroup { boxes } => {
            let rendered: String = boxes
                .iter()
                .map(|cb| {
                    format!(
                        "<div class=\"checkbox\"><label><input type=\"checkbox\" value=\"{}\" \
                         id=\"{}\" data-ng-model=\"formData['{}']\" name=\"{}\" class=\"{}\"{} \
                         /> {}</label></div>\n",
                        escape_html(&cb.value),
                        escape_html(&cb.element_id),
                        escape_html(cb.input_id.as_str()),
                        escape_html(&cb.name),
                        classes(field, ""),
                        if cb.checked { " checked" } else { "" },
                        escape_html(&cb.text)
                    )
                })
                .collect();
            option_group(field, &rendered)
        }
        // User-supplied content passes through unescaped.
        Control::Html { content } => format!("{content}{}", help_block(field)),
        Control::Section => format!(
            "<h4>{}</h4><hr />{}",
            escape_html(&field.label),
            help_block(field)
        ),
    }
}

fn render_input(field: &FieldDescriptor, kind: InputKind, name: &str, value: &str) -> String {
    let value_attr = if value.is_empty() {
        String::new()
    } else {
        format!(" value=\"{}\"", escape_html(value))
    };
    format!(
        "<input type=\"{}\" {}{value_attr} />",
        kind.as_str(),
        control_attrs(field, name, "form-control", true)
    )
}

/// Attributes shared by every single-control rendering: the client
/// model binding, submission name, optional element id, classes and the
/// required marker.
fn control_attrs(field: &FieldDescriptor, name: &str, base_class: &str, with_id: bool) -> String {
    let mut attrs = format!(
        "data-ng-model=\"formData['{}']\" name=\"{}\" ",
        escape_html(field.id.as_str()),
        escape_html(name)
    );

    if with_id {
        let _ = write!(attrs, "id=\"{}\" ", escape_html(&field.element_id));
    }

    let _ = write!(attrs, "class=\"{}\"", classes(field, base_class));

    if field.required {
        attrs.push_str(" required");
    }

    attrs
}

fn classes(field: &FieldDescriptor, base_class: &str) -> String {
    match field.css_class.as_deref() {
        Some(css) if !css.is_empty() => {
            if base_class.is_empty() {
                escape_html(css)
            } else {
                format!("{} {base_class}", escape_html(css))
            }
        }
        _ => base_class.to_string(),
    }
}

/// Wrapper for standard single-control fields.
fn standard_group(field: &FieldDescriptor, control: &str) -> String {
    format!(
        "<div class=\"form-group group_{id}\">\n<label for=\"{id}\">{label}</label>\n\
         {control}{help}\n</div>",
        id = escape_html(&field.element_id),
        label = escape_html(&field.label),
        help = help_block(field)
    )
}

/// Wrapper for radio and checkbox option groups.
fn option_group(field: &FieldDescriptor, options: &str) -> String {
    format!(
        "<div class=\"group_{id}\">\n<label for=\"{id}\">{label}</label>\n{options}{help}</div>",
        id = escape_html(&field.element_id),
        label = escape_html(&field.label),
        help = help_block(field)
    )
}

fn help_block(field: &FieldDescriptor) -> String {
    if field.description.is_empty() {
        String::new()
    } else {
        format!(
            "\n<span class=\"help-block\">{}</span>",
            escape_html(&field.description)
        )
    }
}
