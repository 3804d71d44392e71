// src/merge/carriers.rs

//! Incremental carrier clustering
//!
//! Records are filed into carrier groups one at a time. A record first
//! proposes the group named after itself (`"mcc:carrier"`); if its network-id
//! set, together with the network-ids already filed under that name,
//! overlaps another group of the same MCC, the record joins that group
//! instead. Because groups merge as soon as they overlap, a network-id is
//! owned by at most one group, which lets the overlap test be a map lookup
//! rather than a scan over every group.

use std::collections::HashMap;
use tracing::debug;

use crate::apn::ApnRecord;
use crate::error::{Error, Result};

/// One inferred real-world carrier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierGroup {
    key: String,
    mcc: String,
    members: Vec<usize>,
    network_ids: Vec<String>,
    aliases: Vec<String>,
}

impl CarrierGroup {
    fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            mcc: String::new(),
            members: Vec::new(),
            network_ids: Vec::new(),
            aliases: Vec::new(),
        }
    }

    /// Canonical name, the `"mcc:carrier"` of the record that founded the group
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn mcc(&self) -> &str {
        &self.mcc
    }

    /// Positions of the member records in the merged database, in filing order
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Distinct network-ids of the members, in first-seen order
    pub fn network_ids(&self) -> &[String] {
        &self.network_ids
    }

    /// Distinct `"mcc:carrier"` names merged into this group, in first-seen order
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }
}

/// Carrier groups plus the network-id ownership index
#[derive(Debug, Clone, Default)]
pub struct CarrierIndex {
    groups: Vec<CarrierGroup>,
    by_key: HashMap<String, usize>,
    owners: HashMap<String, usize>,
    strict: bool,
}

impl CarrierIndex {
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            ..Self::default()
        }
    }

    /// Groups in creation order
    pub fn groups(&self) -> &[CarrierGroup] {
        &self.groups
    }

    pub fn get(&self, key: &str) -> Option<&CarrierGroup> {
        self.by_key.get(key).map(|&idx| &self.groups[idx])
    }

    /// Group currently owning a network-id
    pub fn owner_of(&self, network_id: &str) -> Option<&CarrierGroup> {
        self.owners.get(network_id).map(|&idx| &self.groups[idx])
    }

    /// File record number `position` into a group, returning the group's key
    pub fn learn(&mut self, position: usize, record: &ApnRecord) -> Result<&str> {
        let network_id = record.network_id();
        let alias = record.carrier_key();
        let mcc = record.mcc.clone().unwrap_or_default();

        let provisional = self.by_key.get(&alias).copied();
        let target = match self.overlapping_group(provisional, &network_id, &mcc)? {
            Some(idx) => {
                debug!(
                    "{} ({}) joins carrier {}",
                    alias, network_id, self.groups[idx].key
                );
                idx
            }
            None => match provisional {
                Some(idx) => idx,
                None => {
                    self.groups.push(CarrierGroup::new(&alias));
                    let idx = self.groups.len() - 1;
                    self.by_key.insert(alias.clone(), idx);
                    idx
                }
            },
        };

        let group = &mut self.groups[target];
        group.members.push(position);
        group.mcc = mcc;
        if !group.network_ids.contains(&network_id) {
            group.network_ids.push(network_id.clone());
        }
        if !group.aliases.contains(&alias) {
            group.aliases.push(alias);
        }
        self.owners.entry(network_id).or_insert(target);

        Ok(&self.groups[target].key)
    }

    /// The group, other than the provisional one, whose network-ids intersect
    /// the candidate set `{network_id} ∪ provisional.network_ids`
    fn overlapping_group(
        &self,
        provisional: Option<usize>,
        network_id: &str,
        mcc: &str,
    ) -> Result<Option<usize>> {
        let mut candidates: Vec<&str> = vec![network_id];
        if let Some(idx) = provisional {
            candidates.extend(self.groups[idx].network_ids.iter().map(String::as_str));
        }

        let mut overlapping: Vec<usize> = candidates
            .iter()
            .filter_map(|nwid| self.owners.get(*nwid).copied())
            .filter(|&idx| Some(idx) != provisional && self.groups[idx].mcc == mcc)
            .collect();
        overlapping.sort_unstable();
        overlapping.dedup();

        if overlapping.len() > 1 && self.strict {
            return Err(Error::ClusterOverlap {
                network_id: network_id.to_string(),
                groups: overlapping
                    .iter()
                    .map(|&idx| self.groups[idx].key.clone())
                    .collect(),
            });
        }

        // Oldest group first, matching a scan in creation order
        Ok(overlapping.first().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apn::{Source, Technology};

    fn record(mcc: &str, mnc: &str, carrier: &str) -> ApnRecord {
        let mut record = ApnRecord::new(Source::Mbpi, Technology::Gsm);
        record.mcc = Some(mcc.to_string());
        record.mnc = Some(mnc.to_string());
        record.carrier = Some(carrier.to_string());
        record.apn = Some("internet".to_string());
        record
    }

    /// Straightforward scan over every group, kept as the reference the
    /// indexed version must agree with.
    fn reference_cluster(records: &[ApnRecord]) -> Vec<(String, Vec<usize>, Vec<String>)> {
        struct Group {
            key: String,
            mcc: String,
            members: Vec<usize>,
            nwids: Vec<String>,
            aliases: Vec<String>,
        }
        let mut groups: Vec<Group> = Vec::new();

        for (position, record) in records.iter().enumerate() {
            let nwid = record.network_id();
            let alias = record.carrier_key();
            let mcc = record.mcc.clone().unwrap();

            let mut ours: Vec<String> = groups
                .iter()
                .find(|g| g.key == alias)
                .map(|g| g.nwids.clone())
                .unwrap_or_default();
            ours.push(nwid.clone());

            let mut key = alias.clone();
            for group in &groups {
                if group.key == alias || group.mcc != mcc {
                    continue;
                }
                if group.nwids.iter().any(|n| ours.contains(n)) {
                    key = group.key.clone();
                    break;
                }
            }

            let idx = match groups.iter().position(|g| g.key == key) {
                Some(idx) => idx,
                None => {
                    groups.push(Group {
                        key: key.clone(),
                        mcc: String::new(),
                        members: Vec::new(),
                        nwids: Vec::new(),
                        aliases: Vec::new(),
                    });
                    groups.len() - 1
                }
            };
            let group = &mut groups[idx];
            group.members.push(position);
            group.mcc = mcc;
            group.nwids.push(nwid);
            if !group.aliases.contains(&alias) {
                group.aliases.push(alias);
            }
        }

        groups
            .into_iter()
            .map(|g| (g.key, g.members, g.aliases))
            .collect()
    }

    fn indexed_cluster(records: &[ApnRecord]) -> Vec<(String, Vec<usize>, Vec<String>)> {
        let mut index = CarrierIndex::new(true);
        for (position, record) in records.iter().enumerate() {
            index.learn(position, record).unwrap();
        }
        index
            .groups()
            .iter()
            .map(|g| (g.key.clone(), g.members.clone(), g.aliases.clone()))
            .collect()
    }

    #[test]
    fn test_same_name_different_mnc_shares_group() {
        let mut index = CarrierIndex::new(true);
        index.learn(0, &record("310", "410", "AT&T")).unwrap();
        let key = index.learn(1, &record("310", "170", "AT&T")).unwrap().to_string();

        assert_eq!(key, "310:AT&T");
        let group = index.get("310:AT&T").unwrap();
        assert_eq!(group.members(), &[0, 1]);
        assert_eq!(group.network_ids(), &["310:410", "310:170"]);
        assert_eq!(group.aliases(), &["310:AT&T"]);
        assert_eq!(group.mcc(), "310");
    }

    #[test]
    fn test_alias_joins_group_owning_network_id() {
        let mut index = CarrierIndex::new(true);
        index.learn(0, &record("310", "410", "AT&T")).unwrap();
        let key = index.learn(1, &record("310", "410", "Cingular")).unwrap().to_string();

        assert_eq!(key, "310:AT&T");
        assert_eq!(index.groups().len(), 1);
        assert_eq!(index.get("310:AT&T").unwrap().aliases(), &["310:AT&T", "310:Cingular"]);
        assert!(index.get("310:Cingular").is_none());
        assert_eq!(index.owner_of("310:410").unwrap().key(), "310:AT&T");
    }

    #[test]
    fn test_same_name_different_mcc_stays_apart() {
        let mut index = CarrierIndex::new(true);
        index.learn(0, &record("310", "410", "Generic")).unwrap();
        index.learn(1, &record("234", "15", "Generic")).unwrap();

        assert_eq!(index.groups().len(), 2);
        assert_eq!(index.get("310:Generic").unwrap().members(), &[0]);
        assert_eq!(index.get("234:Generic").unwrap().members(), &[1]);
    }

    #[test]
    fn test_agrees_with_reference_scan() {
        let records = vec![
            record("310", "410", "AT&T"),
            record("310", "170", "AT&T"),
            record("310", "410", "Cingular"),
            record("310", "150", "Cingular"),
            record("310", "260", "T-Mobile"),
            record("310", "170", "Cingular Wireless"),
            record("234", "15", "Vodafone"),
            record("234", "15", "Vodafone UK"),
            record("310", "260", "T-Mobile US"),
            record("234", "10", "O2"),
            record("310", "150", "AT&T"),
            record("234", "91", "Vodafone"),
        ];

        assert_eq!(indexed_cluster(&records), reference_cluster(&records));
    }

    #[test]
    fn test_clustering_is_deterministic() {
        let records = vec![
            record("310", "410", "AT&T"),
            record("310", "410", "Cingular"),
            record("234", "15", "Vodafone"),
        ];
        assert_eq!(indexed_cluster(&records), indexed_cluster(&records));
    }

    #[test]
    fn test_strict_mode_rejects_double_overlap() {
        // Two groups sharing one MCC can only both overlap a candidate if the
        // index was built inconsistently; forge that state directly.
        let mut index = CarrierIndex::new(true);
        index.learn(0, &record("310", "410", "A")).unwrap();
        index.learn(1, &record("310", "170", "B")).unwrap();
        index.learn(2, &record("310", "150", "C")).unwrap();
        let c = index.by_key["310:C"];
        index.groups[c].network_ids.push("310:410".to_string());

        let err = index.learn(3, &record("310", "170", "C")).unwrap_err();
        assert!(matches!(err, Error::ClusterOverlap { .. }));

        index.strict = false;
        let key = index.learn(3, &record("310", "170", "C")).unwrap();
        assert_eq!(key, "310:A");
    }
}
