use clap::{Args, Subcommand};
use std::path::PathBuf;

use txreg_registry::RegistryConfig;
use txreg_schema::SchemaConfig;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod build;
pub mod check;
pub mod list;
pub mod validate;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan transformer configs and write the registry.
    Build(BuildArgs),
    /// Validate a single config document.
    Validate(ValidateArgs),
    /// List the entries of an existing registry.
    List(ListArgs),
    /// Check an instance config against a registered transformer.
    Check(CheckArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Build(args) => build::run(args, format),
        Command::Validate(args) => validate::run(args, format),
        Command::List(args) => list::run(args, format),
        Command::Check(args) => check::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Directory holding `<class>/<type>/config.json` trees.
    #[arg(long, env = "TXREG_ROOT", default_value = "./src/modules")]
    pub root: PathBuf,
    /// Registry file to write (overwritten on success).
    #[arg(long, short = 'o', env = "TXREG_OUTPUT", default_value = "registry.json")]
    pub output: PathBuf,
    /// Class-level directory that holds shared code and is never scanned.
    #[arg(long, value_name = "NAME", default_value = "common")]
    pub reserved_dir: String,
    #[command(flatten)]
    pub schema: SchemaArgs,
}

impl BuildArgs {
    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig {
            reserved_dir: self.reserved_dir.clone(),
            ..self.schema.registry_config()
        }
    }
}

#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Reject unknown properties and conditional rules naming undeclared fields.
    #[arg(long, env = "TXREG_STRICT")]
    pub strict: bool,
    /// Maximum size of a single config document in bytes.
    #[arg(long, value_name = "BYTES", default_value_t = RegistryConfig::default().max_config_file_size)]
    pub max_config_size: usize,
}

impl SchemaArgs {
    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig {
            max_config_file_size: self.max_config_size,
            schema: SchemaConfig {
                strict_mode: self.strict,
            },
            ..RegistryConfig::default()
        }
    }
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Config document to validate.
    pub config: PathBuf,
    #[command(flatten)]
    pub schema: SchemaArgs,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Registry file to read.
    #[arg(env = "TXREG_OUTPUT", default_value = "registry.json")]
    pub registry: PathBuf,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Registry file to read.
    pub registry: PathBuf,
    /// Name of the registered transformer.
    #[arg(long)]
    pub name: String,
    /// JSON file holding the instance config object.
    #[arg(long, value_name = "FILE")]
    pub instance: PathBuf,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
