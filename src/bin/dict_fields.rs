//! Resolve a category title to every field id beneath it.
//!
//! Loads the schema tables, resolves the title case-insensitively, walks the
//! category subtree, and prints the collected field ids as JSON. Unknown
//! titles are an error here; scripts that want the soft behavior should call
//! the library's `fields_by_title` instead.

use anyhow::{Result, bail};
use dictnav::{CategoryIndex, default_schema_dir, find_project_root};
use serde::Serialize;
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

#[derive(Serialize)]
struct FieldsReport {
    title: String,
    category_id: i64,
    field_count: usize,
    field_ids: Vec<i64>,
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;
    let schema_dir = match args.schema_dir {
        Some(dir) => dir,
        None => default_schema_dir(&find_project_root()?),
    };

    let index = CategoryIndex::load(&schema_dir)?;
    let category_id = index.id_by_title(&args.title);
    if category_id == -1 {
        bail!("category '{}' not found in dictionary", args.title);
    }
    let field_ids = index.fields_under(category_id);

    let report = FieldsReport {
        title: args.title,
        category_id,
        field_count: field_ids.len(),
        field_ids,
    };
    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}

struct CliArgs {
    schema_dir: Option<PathBuf>,
    title: String,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut schema_dir = None;
        let mut title = None;

        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--schema-dir" => {
                    let Some(value) = args.next() else {
                        bail!("Missing path for --schema-dir");
                    };
                    schema_dir = Some(PathBuf::from(value));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other if other.starts_with("--") => {
                    bail!("Unknown option {other}");
                }
                other => {
                    if title.is_some() {
                        bail!("Unexpected extra argument {other}");
                    }
                    title = Some(other.to_string());
                }
            }
        }

        let Some(title) = title else {
            print_usage();
            bail!("Missing category title");
        };
        Ok(Self { schema_dir, title })
    }
}

fn print_usage() {
    eprintln!("Usage: dict-fields [--schema-dir DIR] TITLE");
}
