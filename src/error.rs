// src/error.rs

//! Error types for APN database parsing and merging

use thiserror::Error;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or merging APN databases
#[derive(Error, Debug)]
pub enum Error {
    /// Reading an input document or config file failed
    #[error("IO error on {path}: {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed XML
    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// The document is well-formed at the token level but structurally broken
    #[error("Parse error: {0}")]
    ParseError(String),

    /// An element lacks an attribute its parser always reads
    #[error("<{element}> element is missing required attribute '{attribute}'")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// The configuration file could not be understood
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A record's network-id set intersects more than one carrier group
    #[error("network-id {network_id} overlaps several carrier groups: {}", .groups.join(", "))]
    ClusterOverlap {
        network_id: String,
        groups: Vec<String>,
    },
}

impl Error {
    /// Wrap an IO error with the path it occurred on
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }
}
