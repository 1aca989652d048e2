mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "txreg", version, about = "Transformer registry generator")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr). `RUST_LOG` takes precedence when set.
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            tracing::debug!(code = err.code, "command failed");
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn build_defaults_match_repository_layout() {
        let cli = Cli::try_parse_from(["txreg", "build"]).expect("build args should parse");

        match cli.command {
            Command::Build(args) => {
                if std::env::var_os("TXREG_ROOT").is_none() {
                    assert_eq!(args.root, PathBuf::from("./src/modules"));
                }
                if std::env::var_os("TXREG_OUTPUT").is_none() {
                    assert_eq!(args.output, PathBuf::from("registry.json"));
                }
                assert_eq!(args.reserved_dir, "common");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn build_strict_flag_reaches_schema_config() {
        let cli = Cli::try_parse_from([
            "txreg",
            "build",
            "--root",
            "modules",
            "--output",
            "out.json",
            "--strict",
            "--max-config-size",
            "2048",
        ])
        .expect("build args should parse");

        let Command::Build(args) = cli.command else {
            panic!("expected build command");
        };
        let config = args.registry_config();
        assert!(config.schema.strict_mode);
        assert_eq!(config.max_config_file_size, 2048);
        assert_eq!(config.reserved_dir, "common");
        assert_eq!(config.config_file_name, "config.json");
    }

    #[test]
    fn check_requires_name_and_instance() {
        let err = Cli::try_parse_from(["txreg", "check", "registry.json"])
            .expect_err("missing --name should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let cli = Cli::try_parse_from([
            "txreg",
            "check",
            "registry.json",
            "--name",
            "HTTP_GET",
            "--instance",
            "instance.json",
        ])
        .expect("check args should parse");
        assert!(matches!(cli.command, Command::Check(_)));
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "txreg",
            "validate",
            "config.json",
            "--format",
            "json",
            "--log-level",
            "debug",
        ])
        .expect("global flags should parse after subcommand");
        assert!(matches!(cli.format, Some(OutputFormat::Json)));
        assert!(matches!(cli.log_level, LogLevel::Debug));
    }
}
