// src/lib.rs

//! APN database merging
//!
//! Reconciles the Android `apns-conf.xml` database with the
//! mobile-broadband-provider-info `serviceproviders.xml` database.
//!
//! # Architecture
//!
//! - Sources: one parser per document format, both producing [`ApnRecord`]s
//! - Database: append-only, insertion-ordered record collection
//! - Merge: deduplicates records and clusters them into carrier groups by
//!   overlapping network-ids
//! - Report: what Android knows about each carrier that provider-info lacks

pub mod apn;
pub mod config;
mod error;
pub mod merge;
pub mod report;
pub mod sources;
pub mod xml;

pub use apn::{ApnDatabase, ApnField, ApnRecord, FieldValues, Source, Technology};
pub use config::{AndroidConfig, Config, DEFAULT_CONFIG_PATH, MergeConfig};
pub use error::{Error, Result};
pub use merge::{AddOutcome, CarrierGroup, MergeStats, MergedDatabase};
pub use report::{CarrierDelta, carrier_deltas, render_report};
pub use sources::{AndroidSource, ApnSource, MbpiSource};
