// src/sources/android.rs

//! Android `apns-conf.xml` parser
//!
//! Every `<apn>` element is flat: its attributes map straight onto record
//! fields. The format does not say whether an APN is GSM or CDMA, so every
//! record is tagged GSM.

use tracing::debug;

use super::ApnSource;
use crate::apn::{ApnRecord, FieldValues, Source, Technology};
use crate::config::AndroidConfig;
use crate::error::{Error, Result};
use crate::xml::{self, XmlElement};

/// Parser for Android-format APN lists
#[derive(Debug, Clone)]
pub struct AndroidSource {
    excluded_types: Vec<String>,
}

impl AndroidSource {
    pub fn new() -> Self {
        Self::from_config(&AndroidConfig::default())
    }

    pub fn from_config(config: &AndroidConfig) -> Self {
        Self {
            excluded_types: config.excluded_types.clone(),
        }
    }

    /// Convert one `<apn>` element; `None` when its type is excluded
    fn parse_apn(&self, element: &XmlElement) -> Result<Option<ApnRecord>> {
        let required = |attribute: &'static str| {
            element.attr(attribute).ok_or(Error::MissingAttribute {
                element: "apn",
                attribute,
            })
        };
        let mcc = required("mcc")?;
        let mnc = required("mnc")?;
        let apn_type = required("type")?;

        if self.excluded_types.iter().any(|t| t == apn_type) {
            debug!("Skipping {} APN for {}:{}", apn_type, mcc, mnc);
            return Ok(None);
        }

        let mut record = ApnRecord::new(Source::Android, Technology::Gsm);
        for (key, value) in element.attributes() {
            match key {
                "mcc" => record.mcc = Some(value.to_string()),
                "mnc" => record.mnc = Some(value.to_string()),
                "type" => record.apn_type = Some(value.to_string()),
                "apn" => record.apn = Some(value.to_string()),
                "carrier" => record.carrier = Some(value.to_string()),
                "name" => record.name = Some(FieldValues::single(value)),
                "user" => record.user = Some(FieldValues::single(value)),
                "password" => record.password = Some(FieldValues::single(value)),
                "dns" => record.dns = Some(FieldValues::single(value)),
                _ => {
                    record.attributes.insert(key.to_string(), value.to_string());
                }
            }
        }

        Ok(Some(record))
    }
}

impl Default for AndroidSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ApnSource for AndroidSource {
    fn source(&self) -> Source {
        Source::Android
    }

    fn parse_str(&self, xml: &str) -> Result<Vec<ApnRecord>> {
        let document = xml::parse_document(xml)?;
        let mut records = Vec::new();

        for list in document.descendants_named("apns") {
            for element in list.descendants_named("apn") {
                if let Some(record) = self.parse_apn(element)? {
                    records.push(record);
                }
            }
        }

        Ok(records)
    }
}
