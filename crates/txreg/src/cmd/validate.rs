use serde::Serialize;
use txreg_registry::ConfigValidator;
use txreg_schema::TransformerSpec;

use crate::cmd::ValidateArgs;
use crate::exit::{registry_error, CliResult, SUCCESS};
use crate::output::{declaration_table, print_json, OutputFormat};

#[derive(Serialize)]
struct ValidateOutput<'a> {
    schema_id: &'static str,
    path: String,
    valid: bool,
    spec: &'a TransformerSpec,
}

pub fn run(args: ValidateArgs, format: OutputFormat) -> CliResult<i32> {
    let validator =
        ConfigValidator::with_config(&args.schema.registry_config()).map_err(registry_error)?;
    let spec = validator.load(&args.config).map_err(registry_error)?;

    match format {
        OutputFormat::Json => print_json(&ValidateOutput {
            schema_id: "https://schemas.txreg.dev/cli/v1/validate-result.schema.json",
            path: args.config.display().to_string(),
            valid: true,
            spec: &spec,
        }),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("{} is valid\n", args.config.display());
            println!("  Name:        {}", spec.name);
            println!("  Class:       {}", spec.class);
            println!("  Type:        {}", spec.kind);
            println!("  Version:     {}", spec.version);
            println!("  Description: {}", spec.description);
            println!("\n{}", declaration_table(&spec.config));
        }
        OutputFormat::Raw => println!("{}", spec.name),
    }

    Ok(SUCCESS)
}
