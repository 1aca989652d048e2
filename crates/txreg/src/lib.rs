//! Build-time generator for the consolidated transformer registry.
//!
//! Scans `<root>/<class>/<type>/config.json`, validates every document
//! against the transformer spec and writes one sorted `registry.json`.
//!
//! # Crate Structure
//!
//! - [`schema`]: Typed transformer spec, declarative validation, instance checks
//! - [`registry`]: Directory scanning, config loading and registry aggregation
//!
//! ```no_run
//! use std::path::Path;
//!
//! use txreg::registry::RegistryAggregator;
//!
//! let aggregator = RegistryAggregator::new()?;
//! let summary = aggregator.build(Path::new("src/modules"), Path::new("registry.json"))?;
//! println!("{} transformers registered", summary.entries.len());
//! # Ok::<(), txreg::registry::RegistryError>(())
//! ```

/// Re-export schema types.
pub mod schema {
    pub use txreg_schema::*;
}

/// Re-export registry types.
pub mod registry {
    pub use txreg_registry::*;
}
