/// Controls how strictly config documents are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SchemaConfig {
    /// When true, unknown properties are rejected on every object and
    /// conditional rules may only reference declared fields.
    pub strict_mode: bool,
}

impl SchemaConfig {
    pub fn strict() -> Self {
        Self { strict_mode: true }
    }
}
