use std::path::Path;

use tagcrawl_common::plc::tag::Catalog;
use tagcrawl_common::{success, warn};
use tagcrawl_core::TagService;
use tagcrawl_core::tabular;

use crate::terminal::{print, spinner};

pub async fn catalog(service: &TagService, ip: &str, output: Option<&Path>) -> anyhow::Result<()> {
    spinner::report(format!("crawling tags on {ip}"));
    let catalog: Catalog = service.build_catalog(ip).await?;

    if catalog.is_empty() {
        warn!("{ip} lists no readable tags");
    } else {
        success!("found {} tags", catalog.len());
    }
    print::emit_table(&tabular::catalog_to_tab_delimited(&catalog)?, output)
}

pub async fn snapshot(service: &TagService, ip: &str, output: Option<&Path>) -> anyhow::Result<()> {
    spinner::report(format!("crawling tags on {ip}"));
    let on_progress = |message: &str| spinner::report(message);
    let snapshot: Catalog = service.snapshot(ip, Some(&on_progress)).await?;

    let with_value: usize = snapshot.values().filter(|tag| tag.value.is_some()).count();
    success!("read {with_value} of {} tags", snapshot.len());
    if with_value < snapshot.len() {
        warn!("{} tags timed out or were rejected, their value cell is empty", snapshot.len() - with_value);
    }
    print::emit_table(&tabular::catalog_to_tab_delimited(&snapshot)?, output)
}
