// tests/common/mod.rs

//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use tempfile::TempDir;

/// A small provider-info database: AT&T (two network-ids), Vodafone UK, and
/// a provider that never declares a name.
pub const MBPI_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE serviceproviders SYSTEM "serviceproviders.2.dtd">
<serviceproviders format="2.0">
  <country code="us">
    <provider>
      <name>AT&amp;T</name>
      <gsm>
        <network-id mcc="310" mnc="410"/>
        <network-id mcc="310" mnc="170"/>
        <apn value="broadband">
          <usage type="internet"/>
          <name>MEdia Net</name>
        </apn>
        <apn value="wap.cingular">
          <username>WAP@CINGULARGPRS.COM</username>
          <password>CINGULAR1</password>
        </apn>
      </gsm>
    </provider>
    <provider>
      <name>Generic</name>
      <gsm>
        <network-id mcc="310" mnc="999"/>
        <apn value="internet"/>
      </gsm>
    </provider>
  </country>
  <country code="gb">
    <provider>
      <name>Vodafone</name>
      <gsm>
        <network-id mcc="234" mnc="15"/>
        <apn value="internet">
          <username>web</username>
          <password>web</password>
          <dns>10.206.65.68</dns>
          <dns>10.203.65.68</dns>
        </apn>
      </gsm>
    </provider>
    <provider>
      <name>Generic</name>
      <gsm>
        <network-id mcc="234" mnc="998"/>
        <apn value="internet"/>
      </gsm>
    </provider>
    <provider>
      <gsm>
        <network-id mcc="234" mnc="33"/>
        <apn value="orangeinternet"/>
      </gsm>
    </provider>
  </country>
</serviceproviders>
"#;

/// A small Android database overlapping the provider-info one.
pub const ANDROID_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<apns version="8">
  <!-- duplicate of the MBPI record, user omitted -->
  <apn carrier="AT&amp;T" mcc="310" mnc="410" apn="wap.cingular" type="default,supl" />
  <apn carrier="AT&amp;T MMS" mcc="310" mnc="410" apn="wap.cingular"
       mmsc="http://mmsc.cingular.com" type="mms" />
  <apn carrier="Cingular" mcc="310" mnc="170" apn="isp.cingular" type="default" />
  <apn carrier="AT&amp;T" mcc="310" mnc="380" apn="phone" type="default" />
  <apn carrier="Vodafone UK" mcc="234" mnc="15" apn="wap.vodafone.co.uk"
       user="wap" password="wap" type="default" />
  <apn carrier="TIM" mcc="222" mnc="01" apn="ibox.tim.it" type="default" />
  <apn mcc="222" mnc="10" apn="web.omnitel.it" type="default" />
</apns>
"#;

/// Write both fixtures into a fresh directory.
///
/// Returns (TempDir, android_path, mbpi_path) - keep the TempDir alive.
pub fn write_fixtures() -> (TempDir, PathBuf, PathBuf) {
    write_documents(ANDROID_XML, MBPI_XML)
}

/// Write arbitrary Android and provider-info documents into a fresh directory.
pub fn write_documents(android: &str, mbpi: &str) -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = tempfile::tempdir().unwrap();
    let android_path = temp_dir.path().join("apns-conf.xml");
    let mbpi_path = temp_dir.path().join("serviceproviders.xml");
    std::fs::write(&android_path, android).unwrap();
    std::fs::write(&mbpi_path, mbpi).unwrap();
    (temp_dir, android_path, mbpi_path)
}
