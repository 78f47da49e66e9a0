//! Report which prefixed columns of an export table mention a target string.
//!
//! Thin wrapper over the library's column scan: reads the table once and
//! prints the matching column names as a JSON array.

use anyhow::{Result, bail};
use dictnav::columns_containing;
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut positional = Vec::new();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            other if other.starts_with("--") => {
                bail!("Unknown option {other}");
            }
            other => positional.push(other.to_string()),
        }
    }

    let [file, prefix, target] = positional.as_slice() else {
        print_usage();
        bail!("Expected exactly three arguments");
    };

    let columns = columns_containing(&PathBuf::from(file), prefix, target)?;
    println!("{}", serde_json::to_string(&columns)?);
    Ok(())
}

fn print_usage() {
    eprintln!("Usage: column-scan FILE PREFIX TARGET");
}
