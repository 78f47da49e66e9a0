//! Walk a category subtree and print the descendant category ids.
//!
//! Uses the bounded walk so a malformed hierarchy export surfaces as an
//! error instead of a hang; `--max-steps` raises the budget for unusually
//! deep dictionaries.

use anyhow::{Context, Result, bail};
use dictnav::{CategoryIndex, default_schema_dir, find_project_root};
use serde::Serialize;
use std::env;
use std::path::PathBuf;

const DEFAULT_MAX_STEPS: usize = 100_000;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

#[derive(Serialize)]
struct TreeReport {
    start_id: i64,
    category_count: usize,
    category_ids: Vec<i64>,
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;
    let schema_dir = match args.schema_dir {
        Some(dir) => dir,
        None => default_schema_dir(&find_project_root()?),
    };

    let index = CategoryIndex::load(&schema_dir)?;
    let category_ids = index.descendants_bounded(args.start_id, args.max_steps)?;

    let report = TreeReport {
        start_id: args.start_id,
        category_count: category_ids.len(),
        category_ids,
    };
    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}

struct CliArgs {
    schema_dir: Option<PathBuf>,
    max_steps: usize,
    start_id: i64,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut schema_dir = None;
        let mut max_steps = DEFAULT_MAX_STEPS;
        let mut start_id = None;

        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--schema-dir" => {
                    let Some(value) = args.next() else {
                        bail!("Missing path for --schema-dir");
                    };
                    schema_dir = Some(PathBuf::from(value));
                }
                "--max-steps" => {
                    let Some(value) = args.next() else {
                        bail!("Missing count for --max-steps");
                    };
                    max_steps = value
                        .parse()
                        .with_context(|| format!("invalid --max-steps value '{value}'"))?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other if other.starts_with("--") => {
                    bail!("Unknown option {other}");
                }
                other => {
                    if start_id.is_some() {
                        bail!("Unexpected extra argument {other}");
                    }
                    start_id = Some(
                        other
                            .parse()
                            .with_context(|| format!("invalid category id '{other}'"))?,
                    );
                }
            }
        }

        let Some(start_id) = start_id else {
            print_usage();
            bail!("Missing category id");
        };
        Ok(Self {
            schema_dir,
            max_steps,
            start_id,
        })
    }
}

fn print_usage() {
    eprintln!("Usage: dict-tree [--schema-dir DIR] [--max-steps N] CATEGORY_ID");
}
