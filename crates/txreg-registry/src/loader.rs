use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use serde_json::Value;
use txreg_schema::{ConfigSchema, SchemaError, TransformerSpec};

use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};

/// Turns a config path into a validated spec or a classified failure.
pub struct ConfigValidator {
    schema: ConfigSchema,
    max_config_file_size: usize,
}

impl ConfigValidator {
    /// Wrap an already compiled schema, using the default size limit.
    pub fn new(schema: ConfigSchema) -> Self {
        Self {
            schema,
            max_config_file_size: RegistryConfig::default().max_config_file_size,
        }
    }

    /// Compile the schema described by `config`.
    pub fn with_config(config: &RegistryConfig) -> Result<Self> {
        Ok(Self {
            schema: ConfigSchema::with_config(config.schema)?,
            max_config_file_size: config.max_config_file_size,
        })
    }

    /// Load and validate one config document.
    ///
    /// Checks run in order: existence, JSON syntax, schema. Failures outside
    /// those three come back as [`RegistryError::Io`].
    pub fn load(&self, path: &Path) -> Result<TransformerSpec> {
        let content = read_config(path, self.max_config_file_size)?;

        let document: Value =
            serde_json::from_slice(&content).map_err(|source| RegistryError::MalformedJson {
                path: path.to_path_buf(),
                source,
            })?;

        let spec = self.schema.validate(&document).map_err(|err| match err {
            SchemaError::Violations(violations) => RegistryError::SchemaViolation {
                path: path.to_path_buf(),
                violations,
            },
            SchemaError::InvalidJson(source) => RegistryError::MalformedJson {
                path: path.to_path_buf(),
                source,
            },
            other => RegistryError::Schema(other),
        })?;

        tracing::debug!(path = %path.display(), name = %spec.name, "loaded transformer config");
        Ok(spec)
    }
}

fn read_config(path: &Path, max_bytes: usize) -> Result<Vec<u8>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(RegistryError::MissingConfig {
                path: path.to_path_buf(),
            });
        }
        Err(err) => return Err(RegistryError::io(path, err)),
    };

    let metadata = file.metadata().map_err(|err| RegistryError::io(path, err))?;
    if metadata.is_dir() {
        return Err(RegistryError::io(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "config path is a directory"),
        ));
    }
    if metadata.len() > max_bytes as u64 {
        return Err(RegistryError::io(
            path,
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "config file too large ({} bytes, max {max_bytes})",
                    metadata.len()
                ),
            ),
        ));
    }

    let read_limit = u64::try_from(max_bytes.saturating_add(1)).unwrap_or(u64::MAX);
    let mut content = Vec::new();
    file.take(read_limit)
        .read_to_end(&mut content)
        .map_err(|err| RegistryError::io(path, err))?;
    if content.len() > max_bytes {
        return Err(RegistryError::io(
            path,
            io::Error::new(
                io::ErrorKind::InvalidData,
                "config file grew past the size limit while reading",
            ),
        ));
    }

    Ok(content)
}
