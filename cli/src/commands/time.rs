use chrono::NaiveDateTime;
use tagcrawl_common::success;
use tagcrawl_core::TagService;

use crate::commands::TimeAction;
use crate::terminal::{print, spinner};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub async fn time(service: &TagService, action: &TimeAction) -> anyhow::Result<()> {
    match action {
        TimeAction::Get { ip } => {
            spinner::report(format!("asking {ip} for its clock"));
            let time: NaiveDateTime = service.get_time(ip).await?;
            print::aligned_line("controller time", 15, time.format(DISPLAY_FORMAT).to_string());
        }
        TimeAction::Set { ip } => {
            spinner::report(format!("setting the clock on {ip}"));
            let time: NaiveDateTime = service.set_time_to_host(ip).await?;
            success!("controller clock set to {}", time.format(DISPLAY_FORMAT));
        }
    }
    Ok(())
}
