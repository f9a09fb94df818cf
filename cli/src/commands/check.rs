use tagcrawl_common::plc::address::Address;
use tagcrawl_common::success;
use tagcrawl_core::TagService;

use crate::terminal::spinner;

pub async fn check(service: &TagService, ip: &str) -> anyhow::Result<()> {
    spinner::report(format!("checking {ip}"));
    let address: Address = service.precheck(ip).await?;
    success!(
        "{address} answered and reports '{}'",
        service.config().expected_device_type
    );
    Ok(())
}
