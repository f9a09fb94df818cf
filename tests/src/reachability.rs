#![cfg(test)]
use std::sync::Arc;
use std::time::Duration;

use tagcrawl_common::config::Config;
use tagcrawl_common::error::TagError;
use tagcrawl_core::TagService;
use tagcrawl_core::network::tcp::TcpProber;
use tokio::net::TcpListener;

use crate::util::line_plc;

fn probing_service(port: u16) -> TagService {
    let cfg: Config = Config {
        probe_timeout: Duration::from_millis(500),
        probe_port: port,
        ..Config::default()
    };
    TagService::new(Arc::new(line_plc()), Box::new(TcpProber::new(port)), cfg)
}

#[tokio::test]
async fn precheck_passes_when_the_port_answers() -> anyhow::Result<()> {
    let listener: TcpListener = TcpListener::bind("127.0.0.1:0").await?;
    let port: u16 = listener.local_addr()?.port();

    let address = probing_service(port).precheck("127.0.0.1").await?;
    assert_eq!(address.as_str(), "127.0.0.1");
    Ok(())
}

#[tokio::test]
async fn malformed_addresses_never_reach_the_network() {
    let result = probing_service(1).precheck("127.0.0.256").await;
    assert_eq!(result, Err(TagError::InvalidAddressFormat("127.0.0.256".into())));
}

#[tokio::test]
#[ignore]
async fn silent_hosts_are_unreachable() {
    let result = probing_service(44818).precheck("203.0.113.9").await;
    assert!(matches!(result, Err(TagError::Unreachable { .. })));
}
