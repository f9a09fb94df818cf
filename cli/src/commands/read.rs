use colored::*;
use tagcrawl_common::plc::tag::ReadResult;
use tagcrawl_common::success;
use tagcrawl_core::TagService;

use crate::terminal::{colors, print, spinner};

pub async fn read(service: &TagService, ip: &str, tags: &[String], quiet: u8) -> anyhow::Result<()> {
    let on_progress = |message: &str| spinner::report(message);
    let values: ReadResult = service.read(ip, tags, Some(&on_progress)).await?;

    print::header("tag values", quiet);
    let width: usize = print::key_width(tags.iter().map(String::as_str));
    for tag in tags {
        match values.get(tag) {
            Some(value) => print::aligned_line(tag, width, value.to_string()),
            None => print::aligned_line(tag, width, "no value".color(colors::BAD)),
        }
    }

    success!("read {} of {} tags", values.len(), tags.len());
    Ok(())
}
