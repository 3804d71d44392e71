// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("apndb")
        .version(env!("CARGO_PKG_VERSION"))
        .author("apndb Contributors")
        .about("Report APNs and network-ids the Android database has that mobile-broadband-provider-info lacks")
        .arg(
            Arg::new("android_db")
                .required(true)
                .value_name("ANDROID_DB")
                .help("Android-format APN database (apns-conf.xml)"),
        )
        .arg(
            Arg::new("mbpi_db")
                .required(true)
                .value_name("MBPI_DB")
                .help("mobile-broadband-provider-info database (serviceproviders.xml)"),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // CARGO_MANIFEST_DIR is always set by cargo
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("apndb.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
