// src/sources/mbpi.rs

//! mobile-broadband-provider-info `serviceproviders.xml` parser
//!
//! The document nests `country → provider → gsm|cdma → network-id × apn`.
//! Every `(network-id, apn)` pair inside a technology block becomes one
//! record. See `serviceproviders.2.dtd` in the MBPI distribution for the
//! full grammar; only the parts needed for APN merging are read here.

use tracing::warn;

use super::ApnSource;
use crate::apn::{ApnRecord, FieldValues, Source, Technology};
use crate::error::Result;
use crate::xml::{self, XmlElement};

/// Parser for mobile-broadband-provider-info documents
#[derive(Debug, Clone, Copy, Default)]
pub struct MbpiSource;

/// Provider-level context shared by every record of one technology block
struct BlockContext<'a> {
    country: &'a str,
    carrier: &'a str,
    technology: Technology,
}

impl MbpiSource {
    pub fn new() -> Self {
        Self
    }

    fn parse_provider(&self, country: &str, provider: &XmlElement) -> Vec<ApnRecord> {
        // The DTD allows several names per provider; the first one wins.
        let carrier = provider
            .children_named("name")
            .next()
            .map(XmlElement::text)
            .unwrap_or_default();
        if carrier.is_empty() {
            warn!("Provider with no carrier name in country '{}'", country);
        }

        let mut records = Vec::new();
        for (tag, technology) in [("gsm", Technology::Gsm), ("cdma", Technology::Cdma)] {
            let context = BlockContext {
                country,
                carrier,
                technology,
            };
            for block in provider.descendants_named(tag) {
                records.extend(parse_block(&context, block));
            }
        }
        records
    }
}

fn parse_block(context: &BlockContext<'_>, block: &XmlElement) -> Vec<ApnRecord> {
    let network_ids = block.descendants_named("network-id");
    let apns = block.descendants_named("apn");

    let mut records = Vec::with_capacity(network_ids.len() * apns.len());
    for network_id in &network_ids {
        let mcc = network_id.attr("mcc").unwrap_or_default();
        let mnc = network_id.attr("mnc").unwrap_or_default();

        for element in &apns {
            let mut record = ApnRecord::new(Source::Mbpi, context.technology);
            record.carrier = Some(context.carrier.to_string());
            record.country = Some(context.country.to_string());
            record.mcc = Some(mcc.to_string());
            record.mnc = Some(mnc.to_string());
            record.apn = Some(element.attr("value").unwrap_or_default().to_string());
            record.name = child_values(element, "name");
            record.user = child_values(element, "username");
            record.password = child_values(element, "password");
            record.dns = child_values(element, "dns");
            records.push(record);
        }
    }
    records
}

/// Text of every `name` element under `element`, empty ones skipped
fn child_values(element: &XmlElement, name: &str) -> Option<FieldValues> {
    let values = element
        .descendants_named(name)
        .into_iter()
        .map(XmlElement::text)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .collect();
    FieldValues::from_values(values)
}

impl ApnSource for MbpiSource {
    fn source(&self) -> Source {
        Source::Mbpi
    }

    fn parse_str(&self, xml: &str) -> Result<Vec<ApnRecord>> {
        let document = xml::parse_document(xml)?;
        let mut records = Vec::new();

        for country in document.descendants_named("country") {
            let code = country.attr("code").unwrap_or_default();
            for provider in country.descendants_named("provider") {
                records.extend(self.parse_provider(code, provider));
            }
        }

        Ok(records)
    }
}
