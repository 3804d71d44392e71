// src/sources/mod.rs

//! APN source formats
//!
//! Each format turns one XML document into a sequence of [`ApnRecord`]s.
//! The formats are independent; neither knows about the other or about the
//! merge engine.

mod android;
mod mbpi;

pub use android::AndroidSource;
pub use mbpi::MbpiSource;

use std::path::Path;
use tracing::info;

use crate::apn::{ApnDatabase, ApnRecord, Source};
use crate::error::{Error, Result};

/// Common interface for all APN document formats
pub trait ApnSource {
    /// Provenance tag stamped on every record this source produces
    fn source(&self) -> Source;

    /// Parse records from the text of one document
    fn parse_str(&self, xml: &str) -> Result<Vec<ApnRecord>>;

    /// Read a document from disk into a fresh database
    fn load(&self, path: &Path) -> Result<ApnDatabase> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(path.display().to_string(), e))?;
        let database: ApnDatabase = self.parse_str(&content)?.into_iter().collect();
        info!(
            "Loaded {} {} APNs from {}",
            database.len(),
            self.source(),
            path.display()
        );
        Ok(database)
    }
}
