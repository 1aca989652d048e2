//! Transformer config schema for the txreg registry generator.
//!
//! Every transformer ships a `config.json` declaring its name, class, type
//! and the parameters an instance accepts. This crate holds the typed model
//! of that document, the declarative rules it must satisfy, and the checks
//! an instance config must pass against a declaration.

pub mod config;
pub mod error;
pub mod instance;
pub mod schema;
pub mod spec;

pub use config::SchemaConfig;
pub use error::{Result, SchemaError, Violations};
pub use instance::Trigger;
pub use schema::{ConfigSchema, TRANSFORMER_SPEC_SCHEMA};
pub use spec::{
    ConditionalRule, ConfigDeclaration, TransformerClass, TransformerSpec, TransformerType,
};
