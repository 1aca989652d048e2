//! Builds the transformer registry from a tree of per-plugin config files.
//!
//! The layout is `root/<class>/<type>/config.json`. Every document is
//! validated against the transformer spec, and the whole run fails on the
//! first bad document: either every leaf makes it into the registry or no
//! registry is written.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod loader;
pub mod scanner;

pub use aggregator::{
    name_collator, read_registry, render, sort_registry, BuildSummary, RegistryAggregator,
    RegistryEntry,
};
pub use config::RegistryConfig;
pub use error::{ErrorKind, RegistryError, Result};
pub use loader::ConfigValidator;
pub use scanner::{DirectoryScanner, Leaf, LeafIter};
