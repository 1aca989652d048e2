use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("txreg {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: txreg");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "target: {}",
        option_env!("TXREG_BUILD_TARGET").unwrap_or("unknown")
    );
    println!(
        "profile: {}",
        option_env!("TXREG_BUILD_PROFILE").unwrap_or("unknown")
    );
    println!(
        "rustc: {}",
        option_env!("RUSTC_VERSION").unwrap_or("unknown")
    );
    println!("git_hash: {}", option_env!("GIT_HASH").unwrap_or("unknown"));
    println!(
        "transformer_spec_schema: {}",
        transformer_spec_schema_id().unwrap_or_else(|| "unknown".to_string())
    );

    Ok(SUCCESS)
}

fn transformer_spec_schema_id() -> Option<String> {
    let schema: serde_json::Value =
        serde_json::from_str(txreg_schema::TRANSFORMER_SPEC_SCHEMA).ok()?;
    schema.get("$id")?.as_str().map(str::to_string)
}
