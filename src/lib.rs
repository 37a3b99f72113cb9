#![forbid(unsafe_code)]
//! Compiled resource container codec for Rust.
//!
//! Converts an in-memory resource-table model (typed, localized UI
//! resources) into the compact, self-describing binary container passed
//! between build stages: value records, qualifier records, XML trees, and
//! framed compiled-file units with exact alignment rules.
//!
//! # Quick Start
//!
//! ```rust
//! use respack::container::ContainerWriter;
//! use respack::encode::{encode_compiled_file, encode_table};
//! use respack::types::{ResourceFile, ResourceTable, Source};
//!
//! // Encode a resource table built by a compiler front end.
//! let table = ResourceTable::new();
//! let record = encode_table(&table);
//! assert!(record.packages.is_empty());
//!
//! // Emit one compiled-file unit (metadata + raw payload) to a sink.
//! let file = ResourceFile {
//!     name: "com.example:layout/main".to_string(),
//!     source: Source::new("res/layout/main.xml"),
//!     config: Default::default(),
//!     exported_symbols: vec![],
//! };
//! let mut writer = ContainerWriter::new(Vec::new());
//! writer.write_compiled_file(&encode_compiled_file(&file), b"raw payload");
//! assert!(!writer.had_error());
//! ```
//!
//! # Layout
//!
//! - [`types`] / [`config`] / [`xml`] — the input model
//! - [`schema`] — the wire-side records
//! - [`encode`] — model → record encoders
//! - [`pool`] — the deduplicating source string pool
//! - [`container`] — the framed output writer
//!
//! Encoding is synchronous and single-threaded; inputs are read-only and the
//! only mutated state is the output sink and the transient string pools.

pub mod config;
pub mod container;
pub mod encode;
pub mod error;
pub mod pool;
pub mod schema;
pub mod types;
pub mod xml;

// Re-export most used types for easy consumption
pub use crate::{
    config::ConfigDescription,
    container::ContainerWriter,
    encode::{
        encode_compiled_file, encode_config, encode_item, encode_table, encode_value, encode_xml,
        encode_xml_resource,
    },
    error::Error,
    pool::StringPool,
    schema::Record,
    types::{
        Arity, ConfigValue, Entry, Item, ItemKind, Package, Reference, ResourceFile, ResourceTable,
        ResourceType, Source, SymbolStatus, Value, ValueKind, Visibility,
    },
};
