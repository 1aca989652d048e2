use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use txreg_registry::RegistryEntry;
use txreg_schema::{ConditionalRule, ConfigDeclaration};

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn entries_table(entries: &[RegistryEntry]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["NAME", "CLASS", "TYPE", "VERSION"]);
    for entry in entries {
        table.add_row(vec![
            entry.name.clone(),
            entry.class.to_string(),
            entry.kind.to_string(),
            entry.version.clone(),
        ]);
    }
    table
}

pub fn print_entries_pretty(entries: &[RegistryEntry]) {
    for entry in entries {
        println!(
            "{} class={} type={} version={}",
            entry.name, entry.class, entry.kind, entry.version
        );
    }
}

pub fn declaration_table(config: &ConfigDeclaration) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["FIELD", "CATEGORY", "TYPE", "CONDITION"]);
    for (field, field_type) in &config.required {
        table.add_row(vec![field.as_str(), "required", field_type.as_str(), "-"]);
    }
    for (field, field_type) in &config.optional {
        table.add_row(vec![field.as_str(), "optional", field_type.as_str(), "-"]);
    }
    for (field, rule) in &config.conditional {
        table.add_row(vec![
            field.clone(),
            "conditional".to_string(),
            rule.field_type.clone(),
            describe_condition(rule),
        ]);
    }
    table
}

/// Human-readable summary of when a conditional field is required.
pub fn describe_condition(rule: &ConditionalRule) -> String {
    let mut parts = Vec::new();
    if let Some(fields) = rule.if_absent.as_ref().filter(|fields| !fields.is_empty()) {
        parts.push(format!("if absent: {}", fields.join(", ")));
    }
    if let Some(fields) = rule.if_present.as_ref().filter(|fields| !fields.is_empty()) {
        parts.push(format!("if present: {}", fields.join(", ")));
    }
    if parts.is_empty() {
        "never".to_string()
    } else {
        parts.join("; ")
    }
}
