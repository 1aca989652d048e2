use std::fmt;

/// Errors that can occur during config document validation.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The embedded transformer schema could not be compiled.
    #[error("failed to compile schema: {0}")]
    CompileFailed(String),

    /// The document is not valid JSON.
    #[error("document is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The document parsed but violates one or more schema rules.
    #[error("document does not match transformer spec: {0}")]
    Violations(Violations),
}

/// Every rule a document violated, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<String>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// `Ok(())` when nothing was recorded, otherwise a [`SchemaError::Violations`].
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::Violations(self))
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, message) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            f.write_str(message)?;
        }
        Ok(())
    }
}

pub type Result<T> = std::result::Result<T, SchemaError>;
