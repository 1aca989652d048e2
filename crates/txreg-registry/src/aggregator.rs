use std::path::{Path, PathBuf};

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed, CollatorPreferences};
use serde::Serialize;
use serde_json::Value;
use txreg_schema::{TransformerClass, TransformerSpec, TransformerType, Violations};

use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};
use crate::loader::ConfigValidator;
use crate::scanner::DirectoryScanner;

/// Operator-facing line for one registered transformer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryEntry {
    pub name: String,
    pub class: TransformerClass,
    #[serde(rename = "type")]
    pub kind: TransformerType,
    pub version: String,
}

impl From<&TransformerSpec> for RegistryEntry {
    fn from(spec: &TransformerSpec) -> Self {
        Self {
            name: spec.name.clone(),
            class: spec.class,
            kind: spec.kind,
            version: spec.version.clone(),
        }
    }
}

/// Outcome of a successful [`RegistryAggregator::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub output: PathBuf,
    pub entries: Vec<RegistryEntry>,
}

/// Scans, validates and writes the registry in one fail-fast pass.
pub struct RegistryAggregator {
    config: RegistryConfig,
    validator: ConfigValidator,
    collator: CollatorBorrowed<'static>,
}

impl RegistryAggregator {
    /// Create an aggregator with default config.
    pub fn new() -> Result<Self> {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an aggregator with explicit config.
    pub fn with_config(config: RegistryConfig) -> Result<Self> {
        let validator = ConfigValidator::with_config(&config)?;
        let collator = name_collator()?;
        Ok(Self {
            config,
            validator,
            collator,
        })
    }

    /// Validate every leaf under `root` and return the specs sorted by name.
    ///
    /// The first error of any kind is returned as-is; later leaves are not
    /// visited.
    pub fn collect(&self, root: &Path) -> Result<Vec<TransformerSpec>> {
        tracing::info!(root = %root.display(), "scanning transformer configs");
        let scanner = DirectoryScanner::with_config(root, self.config.clone());

        let mut specs = Vec::new();
        for leaf in scanner.scan() {
            let leaf = leaf?;
            specs.push(self.validator.load(&leaf.config_path)?);
        }

        sort_registry(&mut specs, &self.collator);
        warn_duplicate_names(&specs);
        Ok(specs)
    }

    /// Rebuild the registry at `output` from the tree under `root`.
    ///
    /// The output file is only touched once every leaf has validated; it is
    /// then overwritten in full.
    pub fn build(&self, root: &Path, output: &Path) -> Result<BuildSummary> {
        let specs = self.collect(root)?;
        let rendered = render(&specs)?;

        std::fs::write(output, rendered.as_bytes())
            .map_err(|err| RegistryError::io(output, err))?;
        tracing::info!(
            output = %output.display(),
            entries = specs.len(),
            "registry written"
        );

        Ok(BuildSummary {
            output: output.to_path_buf(),
            entries: specs.iter().map(RegistryEntry::from).collect(),
        })
    }
}

/// Root-locale collator at default (tertiary) strength.
pub fn name_collator() -> Result<CollatorBorrowed<'static>> {
    Collator::try_new(CollatorPreferences::default(), CollatorOptions::default())
        .map_err(|err| RegistryError::Collation(err.to_string()))
}

/// Stable ascending sort by `name` under `collator`; equal names keep scan order.
pub fn sort_registry(specs: &mut [TransformerSpec], collator: &CollatorBorrowed<'_>) {
    specs.sort_by(|a, b| collator.compare(&a.name, &b.name));
}

/// Exact bytes of a registry file: a two-space indented array plus a trailing newline.
pub fn render(specs: &[TransformerSpec]) -> Result<String> {
    let mut rendered = serde_json::to_string_pretty(specs).map_err(RegistryError::Serialize)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Load a registry file written by [`RegistryAggregator::build`].
///
/// Bad JSON text is [`RegistryError::MalformedJson`]; valid JSON of the wrong
/// shape is [`RegistryError::SchemaViolation`].
pub fn read_registry(path: &Path) -> Result<Vec<TransformerSpec>> {
    let content = std::fs::read(path).map_err(|err| RegistryError::io(path, err))?;
    let document: Value =
        serde_json::from_slice(&content).map_err(|source| RegistryError::MalformedJson {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_value(document).map_err(|err| {
        let mut violations = Violations::new();
        violations.push(err.to_string());
        RegistryError::SchemaViolation {
            path: path.to_path_buf(),
            violations,
        }
    })
}

fn warn_duplicate_names(specs: &[TransformerSpec]) {
    for pair in specs.windows(2) {
        if pair[0].name == pair[1].name {
            tracing::warn!(name = %pair[0].name, "duplicate transformer name in registry");
        }
    }
}
