// src/apn/database.rs

//! Append-only, insertion-ordered collection of APN records

use std::collections::{BTreeMap, BTreeSet};

use super::{ApnField, ApnRecord};

/// An ordered set of APNs with some primitive searching
///
/// Records are never removed once added; merging builds a new database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApnDatabase {
    apns: Vec<ApnRecord>,
}

impl ApnDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record
    pub fn add(&mut self, record: ApnRecord) {
        self.apns.push(record);
    }

    /// All records in insertion order
    pub fn apns(&self) -> &[ApnRecord] {
        &self.apns
    }

    pub fn len(&self) -> usize {
        self.apns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apns.is_empty()
    }

    /// Distinct network-ids present, sorted
    pub fn carriers(&self) -> BTreeSet<String> {
        self.apns.iter().map(ApnRecord::network_id).collect()
    }

    /// Records that carry `field` and whose value satisfies `pred`
    pub fn find<P>(&self, field: ApnField, pred: P) -> Vec<&ApnRecord>
    where
        P: Fn(&[String]) -> bool,
    {
        self.apns
            .iter()
            .filter(|record| record.get(field).is_some_and(&pred))
            .collect()
    }

    pub fn filter<P>(&self, pred: P) -> Vec<&ApnRecord>
    where
        P: Fn(&ApnRecord) -> bool,
    {
        self.apns.iter().filter(|record| pred(record)).collect()
    }

    /// Group records by an arbitrary key; each group keeps insertion order
    pub fn group_by<K, F>(&self, key: F) -> BTreeMap<K, Vec<&ApnRecord>>
    where
        K: Ord,
        F: Fn(&ApnRecord) -> K,
    {
        let mut groups: BTreeMap<K, Vec<&ApnRecord>> = BTreeMap::new();
        for record in &self.apns {
            groups.entry(key(record)).or_default().push(record);
        }
        groups
    }
}

impl Extend<ApnRecord> for ApnDatabase {
    fn extend<I: IntoIterator<Item = ApnRecord>>(&mut self, iter: I) {
        self.apns.extend(iter);
    }
}

impl FromIterator<ApnRecord> for ApnDatabase {
    fn from_iter<I: IntoIterator<Item = ApnRecord>>(iter: I) -> Self {
        Self {
            apns: iter.into_iter().collect(),
        }
    }
}
