use std::fmt;
use std::io;

use txreg_registry::RegistryError;
use txreg_schema::SchemaError;

// NO_INPUT follows sysexits.h; argument errors exit with clap's own code 2.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const NO_INPUT: i32 = 66;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

fn io_code(err: &io::Error) -> i32 {
    match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => NO_INPUT,
        _ => INTERNAL,
    }
}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    CliError::new(io_code(&err), format!("{context}: {err}"))
}

pub fn registry_error(err: RegistryError) -> CliError {
    let message = format!("{}: {err}", err.kind());
    let code = match &err {
        RegistryError::MissingConfig { .. } => NO_INPUT,
        RegistryError::MalformedJson { .. } | RegistryError::SchemaViolation { .. } => {
            DATA_INVALID
        }
        RegistryError::Io { source, .. } => io_code(source),
        RegistryError::Serialize(_)
        | RegistryError::Collation(_)
        | RegistryError::Schema(_) => INTERNAL,
    };
    CliError::new(code, message)
}

pub fn schema_error(context: &str, err: SchemaError) -> CliError {
    match err {
        SchemaError::Violations(_) | SchemaError::InvalidJson(_) => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        SchemaError::CompileFailed(_) => CliError::new(INTERNAL, format!("{context}: {err}")),
    }
}
