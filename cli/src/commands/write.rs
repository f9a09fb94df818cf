use std::io::Read;
use std::path::Path;

use anyhow::Context;
use colored::*;
use tagcrawl_common::plc::write::WriteResult;
use tagcrawl_common::{success, warn};
use tagcrawl_core::TagService;
use tagcrawl_core::tabular::{self, WriteTable};

use crate::terminal::{colors, print, spinner};

pub async fn write(service: &TagService, ip: &str, table: Option<&Path>, quiet: u8) -> anyhow::Result<()> {
    let text: String = load_table(table)?;
    let table: WriteTable = tabular::parse_write_table(&text)?;

    if !table.skipped.is_empty() {
        warn!("{} rows skipped because of unsupported data types", table.skipped.len());
    }
    if table.writes.is_empty() {
        warn!("nothing to write");
        return Ok(());
    }

    let on_progress = |message: &str, good: bool| spinner::report_outcome(message, good);
    let result: WriteResult = service.write(ip, &table.writes, Some(&on_progress)).await?;

    print_outcomes(&result, quiet);
    let (successful, failed) = result.counts();
    if failed == 0 {
        success!("all {successful} tags written");
    } else {
        warn!("{successful} tags written, {failed} failed");
    }
    Ok(())
}

fn load_table(table: Option<&Path>) -> anyhow::Result<String> {
    match table {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("could not read write table '{}'", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("could not read write table from stdin")?;
            Ok(text)
        }
    }
}

fn print_outcomes(result: &WriteResult, quiet: u8) {
    print::header("write results", quiet);
    let width: usize = print::key_width(result.entries.keys().map(String::as_str));

    for (path, outcome) in &result.entries {
        let shown: ColoredString = match &outcome.value_written {
            Some(value) => value.to_string().color(colors::GOOD),
            None => outcome.status.color(colors::BAD),
        };
        print::aligned_line(path, width, shown);
    }
}
