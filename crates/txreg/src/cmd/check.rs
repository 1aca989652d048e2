use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use txreg_registry::read_registry;

use crate::cmd::CheckArgs;
use crate::exit::{
    io_error, registry_error, schema_error, CliError, CliResult, DATA_INVALID, FAILURE, SUCCESS,
};
use crate::output::{print_json, OutputFormat};

#[derive(Serialize)]
struct CheckOutput<'a> {
    schema_id: &'static str,
    name: &'a str,
    instance: String,
    satisfied: bool,
    required_fields: Vec<&'a str>,
}

pub fn run(args: CheckArgs, format: OutputFormat) -> CliResult<i32> {
    let specs = read_registry(&args.registry).map_err(registry_error)?;
    let spec = specs
        .iter()
        .find(|spec| spec.name == args.name)
        .ok_or_else(|| {
            CliError::new(
                FAILURE,
                format!(
                    "no transformer named `{}` in {}",
                    args.name,
                    args.registry.display()
                ),
            )
        })?;

    let instance = read_instance(&args.instance)?;
    let context = format!(
        "instance at {} does not satisfy {}",
        args.instance.display(),
        spec.name
    );
    spec.config
        .check_instance(&instance)
        .map_err(|err| schema_error(&context, err))?;

    let required_fields: Vec<&str> = spec.config.required_fields(&instance).into_iter().collect();
    tracing::debug!(name = %spec.name, required = required_fields.len(), "instance satisfied");

    match format {
        OutputFormat::Json => print_json(&CheckOutput {
            schema_id: "https://schemas.txreg.dev/cli/v1/instance-check.schema.json",
            name: &spec.name,
            instance: args.instance.display().to_string(),
            satisfied: true,
            required_fields,
        }),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!(
                "{} satisfies {} (required: {})",
                args.instance.display(),
                spec.name,
                if required_fields.is_empty() {
                    "none".to_string()
                } else {
                    required_fields.join(", ")
                }
            );
        }
        OutputFormat::Raw => println!("ok"),
    }

    Ok(SUCCESS)
}

fn read_instance(path: &Path) -> CliResult<Map<String, Value>> {
    let content = std::fs::read(path)
        .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))?;
    let value: Value = serde_json::from_slice(&content).map_err(|err| {
        CliError::new(
            DATA_INVALID,
            format!("instance at {} is not valid JSON: {err}", path.display()),
        )
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(CliError::new(
            DATA_INVALID,
            format!("instance at {} must be a JSON object", path.display()),
        )),
    }
}
