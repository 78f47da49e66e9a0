use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Write a tab-separated table: one header line plus the given rows.
pub fn write_table(dir: &Path, name: &str, header: &str, rows: &[&str]) -> Result<()> {
    let mut contents = String::from(header);
    for row in rows {
        contents.push('\n');
        contents.push_str(row);
    }
    contents.push('\n');
    fs::write(dir.join(name), contents).with_context(|| format!("writing fixture {name}"))
}

/// Lay down the canonical three-table fixture used across the suite.
///
/// Category 5 ("Imaging") has children 7, 3, 9 in showcase order; 9 carries
/// no title. Fields 101/102 sit on 5, field 103 on 7. The tables carry extra
/// columns and shuffled column order so the loader's header mapping is
/// exercised too.
pub fn write_default_schema(dir: &Path) -> Result<()> {
    write_table(
        dir,
        "fields.tsv",
        "field_id\ttitle\tunits\tmain_category",
        &[
            "101\tAge at assessment\tyears\t5",
            "102\tStanding height\tcm\t5",
            "103\tT1 structural image\t\t7",
        ],
    )?;
    write_table(
        dir,
        "categories.tsv",
        "category_id\ttitle\tnotes",
        &[
            "5\tImaging\ttop-level",
            "7\tBrain MRI\t",
            "3\tHeart MRI\t",
            "9\t\tuntitled bucket",
        ],
    )?;
    write_table(
        dir,
        "catbrowse.tsv",
        "parent_id\tchild_id\tshowcase_order",
        &["5\t9\t3", "5\t7\t1", "5\t3\t2"],
    )?;
    Ok(())
}
