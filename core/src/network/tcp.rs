//! Liveness probing over a plain TCP handshake.
//!
//! The probe knocks on the controller's explicit messaging port. An accepted
//! connection and an active refusal both mean a host answered; silence or a
//! routing failure means unreachable.

use std::io::ErrorKind;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use tagcrawl_common::config::DEFAULT_PROBE_PORT;
use tagcrawl_common::error::TagError;
use tagcrawl_common::plc::address::Address;
use tagcrawl_common::reachability::Prober;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct TcpProber {
    port: u16,
}

impl Default for TcpProber {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_PORT)
    }
}

impl TcpProber {
    pub fn new(port: u16) -> Self {
        Self { port }
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, address: &Address, probe_timeout: Duration) -> Result<(), TagError> {
        let socket_addr: SocketAddr = SocketAddr::new(IpAddr::V4(address.ip()), self.port);
        let unreachable = |reason: String| TagError::Unreachable {
            address: address.to_string(),
            reason,
        };

        match timeout(probe_timeout, TcpStream::connect(socket_addr)).await {
            Ok(Ok(_stream)) => {
                debug!("{socket_addr} accepted the handshake");
                Ok(())
            }
            Ok(Err(e)) if e.kind() == ErrorKind::ConnectionRefused => {
                debug!("{socket_addr} refused the handshake, host is up");
                Ok(())
            }
            Ok(Err(e)) => Err(unreachable(e.to_string())),
            Err(_elapsed) => Err(unreachable(format!(
                "no answer within {:.1}s",
                probe_timeout.as_secs_f64()
            ))),
        }
    }
}

/// Treats every address as reachable.
///
/// For controllers behind gateways that drop unsolicited handshakes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipProbe;

#[async_trait]
impl Prober for SkipProbe {
    async fn probe(&self, _address: &Address, _timeout: Duration) -> Result<(), TagError> {
        Ok(())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
