//! Checks a concrete transformer instance config against its declaration.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use crate::error::{Result, Violations};
use crate::spec::{ConditionalRule, ConfigDeclaration};

/// Why a conditional field became required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger<'a> {
    /// A field listed in `ifAbsent` is missing.
    Absent(&'a str),
    /// A field listed in `ifPresent` is set.
    Present(&'a str),
}

impl ConditionalRule {
    /// The first dependency that makes this field required, if any.
    pub fn trigger<'a>(&'a self, instance: &Map<String, Value>) -> Option<Trigger<'a>> {
        if let Some(field) = self
            .if_absent
            .iter()
            .flatten()
            .find(|field| !is_present(instance, field))
        {
            return Some(Trigger::Absent(field));
        }

        self.if_present
            .iter()
            .flatten()
            .find(|field| is_present(instance, field))
            .map(|field| Trigger::Present(field))
    }
}

impl ConfigDeclaration {
    /// Fields an instance must supply, given which fields it already has.
    pub fn required_fields<'a>(&'a self, instance: &Map<String, Value>) -> BTreeSet<&'a str> {
        let mut fields: BTreeSet<&str> = self.required.keys().map(String::as_str).collect();
        for (field, rule) in &self.conditional {
            if rule.trigger(instance).is_some() {
                fields.insert(field);
            }
        }
        fields
    }

    /// Verify an instance supplies every required and triggered conditional field.
    pub fn check_instance(&self, instance: &Map<String, Value>) -> Result<()> {
        let mut violations = Violations::new();

        for field in self.required.keys() {
            if !is_present(instance, field) {
                violations.push(format!("`{field}` not defined"));
            }
        }

        for (field, rule) in &self.conditional {
            if is_present(instance, field) {
                continue;
            }
            match rule.trigger(instance) {
                Some(Trigger::Absent(other)) => violations.push(format!(
                    "`{field}` not defined (required when `{other}` is absent)"
                )),
                Some(Trigger::Present(other)) => violations.push(format!(
                    "`{field}` not defined (required when `{other}` is present)"
                )),
                None => {}
            }
        }

        violations.into_result()
    }
}

/// Null counts as absent.
fn is_present(instance: &Map<String, Value>, field: &str) -> bool {
    instance.get(field).is_some_and(|value| !value.is_null())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;
    use crate::error::SchemaError;

    fn http_get() -> ConfigDeclaration {
        ConfigDeclaration {
            required: BTreeMap::from([("url".to_string(), "string".to_string())]),
            optional: BTreeMap::from([
                ("query".to_string(), "string".to_string()),
                ("headers".to_string(), "object".to_string()),
            ]),
            conditional: BTreeMap::from([
                (
                    "token".to_string(),
                    ConditionalRule {
                        field_type: "string".to_string(),
                        if_absent: Some(vec!["headers".to_string()]),
                        if_present: None,
                    },
                ),
                (
                    "encoding".to_string(),
                    ConditionalRule {
                        field_type: "string".to_string(),
                        if_absent: None,
                        if_present: Some(vec!["query".to_string()]),
                    },
                ),
            ]),
        }
    }

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn missing_url_is_reported() {
        let instance = object(json!({ "query": "?param=value", "headers": {}, "encoding": "utf8" }));
        let err = http_get().check_instance(&instance).unwrap_err();

        match err {
            SchemaError::Violations(violations) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations.iter().next(), Some("`url` not defined"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn complete_instance_passes() {
        let instance = object(json!({
            "url": "https://example.com/api",
            "headers": { "Authorization": "Bearer TOKEN" }
        }));
        assert!(http_get().check_instance(&instance).is_ok());
    }

    #[test]
    fn if_absent_makes_field_required() {
        let instance = object(json!({ "url": "https://example.com" }));
        let err = http_get().check_instance(&instance).unwrap_err();
        assert!(err.to_string().contains("`token` not defined (required when `headers` is absent)"));
    }

    #[test]
    fn if_present_makes_field_required() {
        let instance = object(json!({ "url": "https://example.com", "token": "t", "query": "?a=1" }));
        let err = http_get().check_instance(&instance).unwrap_err();
        assert!(err.to_string().contains("`encoding` not defined (required when `query` is present)"));
    }

    #[test]
    fn null_counts_as_absent() {
        let instance = object(json!({ "url": null, "headers": {} }));
        assert!(http_get().check_instance(&instance).is_err());
    }

    #[test]
    fn required_fields_reflect_triggers() {
        let declaration = http_get();

        let bare = object(json!({}));
        assert_eq!(
            declaration.required_fields(&bare).into_iter().collect::<Vec<_>>(),
            ["token", "url"]
        );

        let with_query = object(json!({ "headers": {}, "query": "?a" }));
        assert_eq!(
            declaration
                .required_fields(&with_query)
                .into_iter()
                .collect::<Vec<_>>(),
            ["encoding", "url"]
        );
    }

    #[test]
    fn rule_without_dependencies_never_triggers() {
        let rule = ConditionalRule {
            field_type: "string".to_string(),
            if_absent: None,
            if_present: Some(Vec::new()),
        };
        assert_eq!(rule.trigger(&object(json!({}))), None);
    }
}
