use serde::Serialize;
use txreg_registry::{read_registry, RegistryEntry};

use crate::cmd::ListArgs;
use crate::exit::{registry_error, CliResult, SUCCESS};
use crate::output::{entries_table, print_entries_pretty, print_json, OutputFormat};

#[derive(Serialize)]
struct ListOutput<'a> {
    schema_id: &'static str,
    registry: String,
    entries: &'a [RegistryEntry],
}

pub fn run(args: ListArgs, format: OutputFormat) -> CliResult<i32> {
    let specs = read_registry(&args.registry).map_err(registry_error)?;
    let entries: Vec<RegistryEntry> = specs.iter().map(RegistryEntry::from).collect();

    match format {
        OutputFormat::Json => print_json(&ListOutput {
            schema_id: "https://schemas.txreg.dev/cli/v1/registry-list.schema.json",
            registry: args.registry.display().to_string(),
            entries: &entries,
        }),
        OutputFormat::Table => println!("{}", entries_table(&entries)),
        OutputFormat::Pretty => print_entries_pretty(&entries),
        OutputFormat::Raw => {
            for entry in &entries {
                println!("{}", entry.name);
            }
        }
    }

    Ok(SUCCESS)
}
