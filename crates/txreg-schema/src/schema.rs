use std::collections::BTreeSet;

use jsonschema::Validator;
use serde_json::{Map, Value};

use crate::config::SchemaConfig;
use crate::error::{Result, SchemaError, Violations};
use crate::spec::{ConfigDeclaration, TransformerSpec};

/// Structural rules every `config.json` document must satisfy.
pub const TRANSFORMER_SPEC_SCHEMA: &str =
    include_str!("../schemas/transformer-spec.schema.json");

/// Compiled transformer schema plus the semantic rules JSON Schema cannot express.
pub struct ConfigSchema {
    validator: Validator,
    config: SchemaConfig,
}

impl ConfigSchema {
    /// Compile the embedded schema with default config.
    pub fn new() -> Result<Self> {
        Self::with_config(SchemaConfig::default())
    }

    /// Compile the embedded schema with explicit config.
    pub fn with_config(config: SchemaConfig) -> Result<Self> {
        let mut schema: Value = serde_json::from_str(TRANSFORMER_SPEC_SCHEMA)
            .map_err(|err| SchemaError::CompileFailed(err.to_string()))?;
        if config.strict_mode {
            apply_strict_mode(&mut schema);
        }

        let validator = jsonschema::validator_for(&schema)
            .map_err(|err| SchemaError::CompileFailed(err.to_string()))?;

        Ok(Self { validator, config })
    }

    /// Validate a parsed document and return its typed form.
    ///
    /// Every violated rule is reported, not only the first one. Semantic
    /// rules run only once the structure is sound.
    pub fn validate(&self, document: &Value) -> Result<TransformerSpec> {
        let mut violations = Violations::new();
        for err in self.validator.iter_errors(document) {
            violations.push(err.to_string());
        }
        violations.into_result()?;

        let spec: TransformerSpec = serde_json::from_value(document.clone()).map_err(|err| {
            let mut violations = Violations::new();
            violations.push(err.to_string());
            SchemaError::Violations(violations)
        })?;

        if self.config.strict_mode {
            check_declaration(&spec.config).into_result()?;
        }

        tracing::trace!(name = %spec.name, "document matches transformer spec");
        Ok(spec)
    }

    /// Parse and validate a document from its JSON text.
    pub fn validate_str(&self, document: &str) -> Result<TransformerSpec> {
        let value: Value = serde_json::from_str(document)?;
        self.validate(&value)
    }
}

/// Cross-field rules for a declaration: conditional rules may only reference
/// declared fields, and each field belongs to exactly one category.
fn check_declaration(config: &ConfigDeclaration) -> Violations {
    let mut violations = Violations::new();

    for (field, rule) in &config.conditional {
        for referenced in rule.referenced_fields() {
            if referenced == field {
                violations.push(format!(
                    "conditional field `{field}` cannot depend on itself"
                ));
            } else if !config.declares(referenced) {
                violations.push(format!(
                    "conditional field `{field}` references undeclared field `{referenced}`"
                ));
            }
        }
    }

    let mut seen = BTreeSet::new();
    let categories = [
        config.required.keys().collect::<Vec<_>>(),
        config.optional.keys().collect(),
        config.conditional.keys().collect(),
    ];
    for field in categories.into_iter().flatten() {
        if !seen.insert(field) {
            violations.push(format!(
                "field `{field}` is declared in more than one category"
            ));
        }
    }

    violations
}

fn apply_strict_mode(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.contains_key("properties") && !map.contains_key("additionalProperties") {
                map.insert("additionalProperties".to_string(), Value::Bool(false));
            }

            recurse_map_schemas(map, "properties");
            recurse_map_schemas(map, "$defs");
            if let Some(child) = map.get_mut("additionalProperties") {
                apply_strict_mode(child);
            }
        }
        Value::Array(items) => {
            for item in items {
                apply_strict_mode(item);
            }
        }
        _ => {}
    }
}

fn recurse_map_schemas(map: &mut Map<String, Value>, key: &str) {
    if let Some(Value::Object(obj)) = map.get_mut(key) {
        for value in obj.values_mut() {
            apply_strict_mode(value);
        }
    }
}
