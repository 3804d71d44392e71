// src/cli.rs
//! CLI definitions for apndb
//!
//! The command implementation is in the `commands` module.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "apndb")]
#[command(author = "apndb Contributors")]
#[command(version)]
#[command(
    about = "Report APNs and network-ids the Android database has that mobile-broadband-provider-info lacks",
    long_about = None
)]
pub struct Cli {
    /// Android-format APN database (apns-conf.xml)
    pub android_db: PathBuf,

    /// mobile-broadband-provider-info database (serviceproviders.xml)
    pub mbpi_db: PathBuf,
}
