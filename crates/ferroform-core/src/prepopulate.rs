//! Initial field value resolution.

use std::collections::HashMap;

use ferroform_schema::Field;

/// Resolves a field's initial value from layered sources.
///
/// Priority, lowest to highest: the field's declared default value, a
/// caller-supplied field-values map, and the request's query
/// parameters. The latter two are keyed by the field's `input_name` and
/// apply only when the field allows external prepopulation; an entry
/// that is present but empty counts as absent.
///
/// Resolved values are raw strings; escaping happens at the rendering
/// target (attribute-escaped in attribute position, left unescaped as a
/// value so element content is not double-escaped).
#[derive(Debug, Clone, Copy, Default)]
pub struct PrepopulateResolver<'a> {
    field_values: Option<&'a HashMap<String, String>>,
    query: Option<&'a HashMap<String, String>>,
}

impl<'a> PrepopulateResolver<'a> {
    /// Creates a resolver over the caller-supplied field values and the
    /// request's query parameters.
    pub fn new(
        field_values: &'a HashMap<String, String>,
        query: &'a HashMap<String, String>,
    ) -> Self {
        Self {
            field_values: Some(field_values),
            query: Some(query),
        }
    }

    /// Resolves the initial value for `field`.
    pub fn resolve(&self, field: &Field) -> String {
        let mut value = field.default_value.clone().unwrap_or_default();

        if field.allows_prepopulate() {
            if let Some(name) = field.input_name.as_deref() {
                // Empty overrides count as absent and keep the default.
                if let Some(supplied) = self.field_values.and_then(|values| values.get(name)) {
                    if !supplied.is_empty() {
                        value = supplied.clone();
                    }
                }
                if let Some(supplied) = self.query.and_then(|query| query.get(name)) {
                    if !supplied.is_empty() {
                        value = supplied.clone();
                    }
                }
            }
        }

        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn prepop_field() -> Field {
        serde_json::from_value(json!({
            "id": 1,
            "type": "text",
            "label": "Name",
            "defaultValue": "A",
            "inputName": "name",
            "allowsPrepopulate": "1"
        }))
        .unwrap()
    }

    #[test]
    fn test_priority_chain() {
        let field = prepop_field();
        let field_values: HashMap<String, String> =
            [("name".to_string(), "B".to_string())].into_iter().collect();
        let query: HashMap<String, String> =
            [("name".to_string(), "C".to_string())].into_iter().collect();

        // Query beats caller values beats the schema default.
        let resolver = PrepopulateResolver::new(&field_values, &query);
        assert_eq!(resolver.resolve(&field), "C");

        let empty = HashMap::new();
        let resolver = PrepopulateResolver::new(&field_values, &empty);
        assert_eq!(resolver.resolve(&field), "B");

        let resolver = PrepopulateResolver::new(&empty, &empty);
        assert_eq!(resolver.resolve(&field), "A");
    }

    #[test]
    fn test_prepopulate_disabled_keeps_default() {
        let field: Field = serde_json::from_value(json!({
            "id": 1,
            "type": "text",
            "label": "Name",
            "defaultValue": "A",
            "inputName": "name"
        }))
        .unwrap();

        let field_values: HashMap<String, String> =
            [("name".to_string(), "B".to_string())].into_iter().collect();
        let query = HashMap::new();

        let resolver = PrepopulateResolver::new(&field_values, &query);
        assert_eq!(resolver.resolve(&field), "A");
    }

    #[test]
    fn test_empty_override_keeps_default() {
        let field = prepop_field();
        let field_values: HashMap<String, String> =
            [("name".to_string(), String::new())].into_iter().collect();
        let query: HashMap<String, String> =
            [("name".to_string(), String::new())].into_iter().collect();

        let resolver = PrepopulateResolver::new(&field_values, &query);
        assert_eq!(resolver.resolve(&field), "A");

        // An empty higher-priority source does not mask a lower one.
        let populated: HashMap<String, String> =
            [("name".to_string(), "B".to_string())].into_iter().collect();
        let resolver = PrepopulateResolver::new(&populated, &query);
        assert_eq!(resolver.resolve(&field), "B");
    }

    #[test]
    fn test_no_default_resolves_empty() {
        let field: Field = serde_json::from_value(json!({
            "id": 1,
            "type": "text",
            "label": "Name"
        }))
        .unwrap();

        assert_eq!(PrepopulateResolver::default().resolve(&field), "");
    }
}
