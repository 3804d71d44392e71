// src/merge/mod.rs

//! Merged APN database
//!
//! Records are merged one at a time. A record is only accepted when it has
//! an APN, a carrier name, an MCC and an MNC, and when no already-merged
//! record describes the same access point. Accepted records are then filed
//! into carrier groups (see [`carriers`]).
//!
//! Whichever source is merged first decides the names of carriers that both
//! sources know about, so the provider-info database should go in before
//! the Android one.

pub mod carriers;

pub use carriers::CarrierGroup;

use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use crate::apn::{ApnDatabase, ApnRecord, FieldValues};
use crate::config::{Config, MergeConfig};
use crate::error::Result;
use crate::sources::{AndroidSource, ApnSource, MbpiSource};
use carriers::CarrierIndex;

/// What happened to a record offered to the merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Accepted and filed under the named carrier group
    Added { group: String },
    /// Same access point as a record already merged
    Duplicate,
    /// Missing one of apn, carrier, mcc or mnc
    Invalid,
}

/// Counters describing a merge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Records accepted into the merged database
    pub accepted: usize,
    /// Records dropped as duplicates of an already-merged record
    pub conflicts: usize,
    /// Records dropped for lacking apn, carrier, mcc or mnc
    pub invalid: usize,
}

/// Identity of an access point for duplicate detection
type AccessPointKey = (String, String, String);

/// A deduplicated, carrier-clustered APN database
#[derive(Debug, Clone)]
pub struct MergedDatabase {
    db: ApnDatabase,
    by_access_point: HashMap<AccessPointKey, Vec<usize>>,
    carriers: CarrierIndex,
    stats: MergeStats,
}

impl MergedDatabase {
    pub fn new() -> Self {
        Self::with_config(&MergeConfig::default())
    }

    pub fn with_config(config: &MergeConfig) -> Self {
        Self {
            db: ApnDatabase::new(),
            by_access_point: HashMap::new(),
            carriers: CarrierIndex::new(config.strict_clustering),
            stats: MergeStats::default(),
        }
    }

    /// Load both documents, then merge provider-info first and Android second
    ///
    /// Both documents are parsed completely before any merging starts.
    pub fn from_files(android: &Path, mbpi: &Path, config: &Config) -> Result<Self> {
        let mbpi_db = MbpiSource::new().load(mbpi)?;
        let android_db = AndroidSource::from_config(&config.android).load(android)?;

        let mut merged = Self::with_config(&config.merge);
        merged.add_database(&mbpi_db)?;
        merged.add_database(&android_db)?;
        Ok(merged)
    }

    /// Merge a single record
    pub fn add(&mut self, record: ApnRecord) -> Result<AddOutcome> {
        if !record.is_mergeable() {
            debug!("Dropping incomplete {} APN for {}", record.source, record.network_id());
            self.stats.invalid += 1;
            return Ok(AddOutcome::Invalid);
        }

        let key = access_point_key(&record);
        if self.is_duplicate(&key, &record) {
            debug!(
                "Duplicate APN {} for {}",
                record.apn.as_deref().unwrap_or_default(),
                record.network_id()
            );
            self.stats.conflicts += 1;
            return Ok(AddOutcome::Duplicate);
        }

        let position = self.db.len();
        let group = self.carriers.learn(position, &record)?.to_string();
        self.by_access_point.entry(key).or_default().push(position);
        self.db.add(record);
        self.stats.accepted += 1;

        Ok(AddOutcome::Added { group })
    }

    /// Merge a sequence of records in order
    pub fn add_all<I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = ApnRecord>,
    {
        for record in records {
            self.add(record)?;
        }
        Ok(())
    }

    /// Merge every record of a source database, leaving it untouched
    pub fn add_database(&mut self, database: &ApnDatabase) -> Result<()> {
        let before = self.stats;
        self.add_all(database.apns().iter().cloned())?;
        info!(
            "Merged {} APNs: {} accepted, {} duplicates, {} incomplete",
            database.len(),
            self.stats.accepted - before.accepted,
            self.stats.conflicts - before.conflicts,
            self.stats.invalid - before.invalid
        );
        Ok(())
    }

    fn is_duplicate(&self, key: &AccessPointKey, record: &ApnRecord) -> bool {
        self.by_access_point.get(key).is_some_and(|positions| {
            positions.iter().any(|&idx| {
                let existing = &self.db.apns()[idx];
                soft_match(record.user.as_ref(), existing.user.as_ref())
                    && soft_match(record.password.as_ref(), existing.password.as_ref())
            })
        })
    }

    /// The merged records
    pub fn database(&self) -> &ApnDatabase {
        &self.db
    }

    pub fn apns(&self) -> &[ApnRecord] {
        self.db.apns()
    }

    /// Carrier groups in creation order
    pub fn carriers(&self) -> &[CarrierGroup] {
        self.carriers.groups()
    }

    pub fn carrier(&self, key: &str) -> Option<&CarrierGroup> {
        self.carriers.get(key)
    }

    pub fn find_carriers<P>(&self, pred: P) -> Vec<&CarrierGroup>
    where
        P: Fn(&CarrierGroup) -> bool,
    {
        self.carriers().iter().filter(|group| pred(group)).collect()
    }

    /// Records belonging to a carrier group, in filing order
    pub fn members<'a>(&'a self, group: &'a CarrierGroup) -> impl Iterator<Item = &'a ApnRecord> {
        group.members().iter().map(move |&idx| &self.db.apns()[idx])
    }

    pub fn stats(&self) -> MergeStats {
        self.stats
    }
}

impl Default for MergedDatabase {
    fn default() -> Self {
        Self::new()
    }
}

fn access_point_key(record: &ApnRecord) -> AccessPointKey {
    (
        record.mcc.clone().unwrap_or_default(),
        record.mnc.clone().unwrap_or_default(),
        record.apn.clone().unwrap_or_default(),
    )
}

/// Equal when both sides carry the field; absence on either side is tolerated
fn soft_match(a: Option<&FieldValues>, b: Option<&FieldValues>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}
