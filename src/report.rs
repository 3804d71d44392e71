// src/report.rs

//! What the Android database knows that provider-info does not
//!
//! For each carrier group, lists the network-ids and APN host names that
//! appear among its Android-sourced members but not among its MBPI-sourced
//! members.

use crate::apn::Source;
use crate::merge::{CarrierGroup, MergedDatabase};

/// Additions suggested for one carrier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierDelta {
    pub carrier: String,
    /// Network-ids only Android has, distinct, first-seen order
    pub network_ids: Vec<String>,
    /// APN host names only Android has, distinct, first-seen order
    pub apns: Vec<String>,
}

impl CarrierDelta {
    pub fn is_empty(&self) -> bool {
        self.network_ids.is_empty() && self.apns.is_empty()
    }

    /// Report lines for this carrier, nwids first
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if !self.network_ids.is_empty() {
            lines.push(format!(
                "Carrier {}: add nwids {}",
                self.carrier,
                format_list(&self.network_ids)
            ));
        }
        if !self.apns.is_empty() {
            lines.push(format!(
                "Carrier {}: add apns {}",
                self.carrier,
                format_list(&self.apns)
            ));
        }
        lines
    }
}

/// Compute the delta of every carrier group, in group creation order
pub fn carrier_deltas(merged: &MergedDatabase) -> Vec<CarrierDelta> {
    merged
        .carriers()
        .iter()
        .map(|group| group_delta(merged, group))
        .collect()
}

fn group_delta(merged: &MergedDatabase, group: &CarrierGroup) -> CarrierDelta {
    let from = move |source: Source| {
        merged
            .members(group)
            .filter(move |record| record.source == source)
    };

    let mbpi_network_ids: Vec<String> = from(Source::Mbpi).map(|r| r.network_id()).collect();
    let mbpi_apns: Vec<&str> = from(Source::Mbpi).filter_map(|r| r.apn.as_deref()).collect();

    let mut network_ids: Vec<String> = Vec::new();
    let mut apns: Vec<String> = Vec::new();
    for record in from(Source::Android) {
        let network_id = record.network_id();
        if !mbpi_network_ids.contains(&network_id) && !network_ids.contains(&network_id) {
            network_ids.push(network_id);
        }
        if let Some(apn) = record.apn.as_deref()
            && !mbpi_apns.contains(&apn)
            && !apns.iter().any(|a| a == apn)
        {
            apns.push(apn.to_string());
        }
    }

    CarrierDelta {
        carrier: group.key().to_string(),
        network_ids,
        apns,
    }
}

/// All report lines, sorted lexicographically
pub fn render_report(merged: &MergedDatabase) -> Vec<String> {
    let mut lines: Vec<String> = carrier_deltas(merged)
        .iter()
        .filter(|delta| !delta.is_empty())
        .flat_map(CarrierDelta::lines)
        .collect();
    lines.sort();
    lines
}

fn format_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| format!("'{}'", item)).collect();
    format!("[{}]", quoted.join(", "))
}
