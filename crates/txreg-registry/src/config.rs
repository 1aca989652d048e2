use txreg_schema::SchemaConfig;

/// Controls scanning, loading and validation for a registry build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Class-level directory name holding shared code rather than transformers.
    pub reserved_dir: String,
    /// File name expected in every leaf directory.
    pub config_file_name: String,
    /// Maximum bytes accepted per config document.
    pub max_config_file_size: usize,
    /// Validation strictness.
    pub schema: SchemaConfig,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            reserved_dir: "common".to_string(),
            config_file_name: "config.json".to_string(),
            max_config_file_size: 1024 * 1024,
            schema: SchemaConfig::default(),
        }
    }
}
