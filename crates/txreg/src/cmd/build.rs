use serde::Serialize;
use txreg_registry::{BuildSummary, RegistryAggregator, RegistryEntry};

use crate::cmd::BuildArgs;
use crate::exit::{registry_error, CliResult, SUCCESS};
use crate::output::{entries_table, print_entries_pretty, print_json, OutputFormat};

#[derive(Serialize)]
struct BuildOutput<'a> {
    schema_id: &'static str,
    output: String,
    count: usize,
    entries: &'a [RegistryEntry],
}

pub fn run(args: BuildArgs, format: OutputFormat) -> CliResult<i32> {
    let aggregator =
        RegistryAggregator::with_config(args.registry_config()).map_err(registry_error)?;
    let summary = aggregator
        .build(&args.root, &args.output)
        .map_err(registry_error)?;

    print_summary(&summary, format);
    Ok(SUCCESS)
}

fn print_summary(summary: &BuildSummary, format: OutputFormat) {
    let output = summary.output.display();
    match format {
        OutputFormat::Json => print_json(&BuildOutput {
            schema_id: "https://schemas.txreg.dev/cli/v1/build-summary.schema.json",
            output: output.to_string(),
            count: summary.entries.len(),
            entries: &summary.entries,
        }),
        OutputFormat::Table => {
            if !summary.entries.is_empty() {
                println!("{}", entries_table(&summary.entries));
            }
            println!(
                "Data written successfully to {output} ({} transformers)",
                summary.entries.len()
            );
        }
        OutputFormat::Pretty => {
            print_entries_pretty(&summary.entries);
            println!(
                "Data written successfully to {output} ({} transformers)",
                summary.entries.len()
            );
        }
        OutputFormat::Raw => println!("{output}"),
    }
}
