// src/apn/mod.rs

//! APN records and the append-only database that holds them
//!
//! Both source parsers produce the same [`ApnRecord`] shape. Fields that may
//! carry several values in the provider-info format (several `<dns>`
//! children, for instance) are stored as [`FieldValues`], an ordered,
//! never-empty sequence; a scalar value is simply a singleton.

mod database;

pub use database::ApnDatabase;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Where a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Source {
    /// Android `apns-conf.xml`
    Android,
    /// mobile-broadband-provider-info `serviceproviders.xml`
    Mbpi,
}

impl Source {
    pub fn as_str(&self) -> &str {
        match self {
            Source::Android => "ANDROID",
            Source::Mbpi => "MBPI",
        }
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ANDROID" => Ok(Source::Android),
            "MBPI" => Ok(Source::Mbpi),
            _ => Err(format!("Invalid APN source: {s}")),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Radio technology an APN applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Technology {
    Gsm,
    Cdma,
}

impl Technology {
    pub fn as_str(&self) -> &str {
        match self {
            Technology::Gsm => "gsm",
            Technology::Cdma => "cdma",
        }
    }
}

impl FromStr for Technology {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "gsm" => Ok(Technology::Gsm),
            "cdma" => Ok(Technology::Cdma),
            _ => Err(format!("Invalid technology: {s}")),
        }
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered, non-empty sequence of values for one field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldValues(Vec<String>);

impl FieldValues {
    /// A field carrying exactly one value
    pub fn single(value: impl Into<String>) -> Self {
        Self(vec![value.into()])
    }

    /// Build from any number of values; `None` when there are none
    pub fn from_values(values: Vec<String>) -> Option<Self> {
        if values.is_empty() {
            None
        } else {
            Some(Self(values))
        }
    }

    pub fn first(&self) -> &str {
        &self.0[0]
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_single(&self) -> bool {
        self.0.len() == 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for FieldValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

/// Record fields addressable by name, for generic lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApnField {
    Apn,
    Carrier,
    Mcc,
    Mnc,
    Type,
    Name,
    User,
    Password,
    Dns,
    Country,
}

/// One access point configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApnRecord {
    /// Access point host name
    pub apn: Option<String>,
    /// Human-readable provider name
    pub carrier: Option<String>,
    pub mcc: Option<String>,
    pub mnc: Option<String>,
    pub technology: Technology,
    /// Android APN type (`default`, `mms`, `supl`, ...)
    pub apn_type: Option<String>,
    pub name: Option<FieldValues>,
    pub user: Option<FieldValues>,
    pub password: Option<FieldValues>,
    pub dns: Option<FieldValues>,
    /// Country code of the enclosing provider-info `<country>` block
    pub country: Option<String>,
    /// Android attributes with no dedicated field (proxy, port, mmsc, ...)
    pub attributes: BTreeMap<String, String>,
    pub source: Source,
}

impl ApnRecord {
    /// Create an empty record
    pub fn new(source: Source, technology: Technology) -> Self {
        Self {
            apn: None,
            carrier: None,
            mcc: None,
            mnc: None,
            technology,
            apn_type: None,
            name: None,
            user: None,
            password: None,
            dns: None,
            country: None,
            attributes: BTreeMap::new(),
            source,
        }
    }

    /// The `"mcc:mnc"` key identifying this record's network
    pub fn network_id(&self) -> String {
        format!(
            "{}:{}",
            self.mcc.as_deref().unwrap_or_default(),
            self.mnc.as_deref().unwrap_or_default()
        )
    }

    /// The `"mcc:carrier"` key this record's carrier group is named after
    pub fn carrier_key(&self) -> String {
        format!(
            "{}:{}",
            self.mcc.as_deref().unwrap_or_default(),
            self.carrier.as_deref().unwrap_or_default()
        )
    }

    /// Whether the record carries everything the merge engine needs
    pub fn is_mergeable(&self) -> bool {
        [&self.apn, &self.carrier, &self.mcc, &self.mnc]
            .iter()
            .all(|field| field.as_deref().is_some_and(|v| !v.is_empty()))
    }

    /// Look up a field uniformly, scalar fields appearing as singletons
    pub fn get(&self, field: ApnField) -> Option<&[String]> {
        match field {
            ApnField::Apn => scalar(&self.apn),
            ApnField::Carrier => scalar(&self.carrier),
            ApnField::Mcc => scalar(&self.mcc),
            ApnField::Mnc => scalar(&self.mnc),
            ApnField::Type => scalar(&self.apn_type),
            ApnField::Country => scalar(&self.country),
            ApnField::Name => multi(&self.name),
            ApnField::User => multi(&self.user),
            ApnField::Password => multi(&self.password),
            ApnField::Dns => multi(&self.dns),
        }
    }
}

fn scalar(value: &Option<String>) -> Option<&[String]> {
    value.as_ref().map(std::slice::from_ref)
}

fn multi(value: &Option<FieldValues>) -> Option<&[String]> {
    value.as_ref().map(FieldValues::as_slice)
}
