//! All error types for the respack crate.
//!
//! These are returned from fallible operations (record serialization, XML
//! parsing, container I/O). Invariant violations inside the encoders are not
//! represented here: they panic, because a partially written framed record
//! would desynchronize every later record in the stream.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("record encoding error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error("record decoding error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("invalid data: {0}")]
    DataMismatch(String),

    #[error("invalid resource: {0}")]
    InvalidResource(String),
}

impl Error {
    /// Creates a new invalid-resource error.
    pub fn invalid_resource(message: impl Into<String>) -> Self {
        Error::InvalidResource(message.into())
    }

    /// Creates a new data-mismatch error.
    pub fn data_mismatch(message: impl Into<String>) -> Self {
        Error::DataMismatch(message.into())
    }
}
