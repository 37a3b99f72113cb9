//! Encoders from the model in [`crate::types`] to the wire records in
//! [`crate::schema`].
//!
//! All encoders are pure tree traversals over caller-owned, read-only input;
//! the only mutated state is the string pool explicitly threaded through.

pub mod config;
pub mod file;
pub mod table;
pub mod value;
pub mod xml;

pub use config::encode_config;
pub use file::encode_compiled_file;
pub use table::encode_table;
pub use value::{encode_item, encode_value};
pub use xml::{encode_xml, encode_xml_resource};
