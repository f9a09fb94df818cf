//! The gate in front of every hardware operation: validate, probe, classify.

use tagcrawl_common::driver::DeviceProperties;
use tagcrawl_common::error::TagError;
use tagcrawl_common::plc::address::{self, Address};
use tracing::debug;

use crate::service::TagService;

pub use tagcrawl_common::plc::address::validate;

impl TagService {
    /// Runs the three checks in order and stops at the first failure.
    ///
    /// A triggered interrupt turns a passing check into [`TagError::Cancelled`].
    pub async fn precheck(&self, candidate: &str) -> Result<Address, TagError> {
        let address: Address = address::validate(candidate)?;
        self.prober()
            .probe(&address, self.config().probe_timeout)
            .await?;
        self.classify(&address).await?;
        self.ensure_not_interrupted()?;
        debug!("precheck passed for {address}");
        Ok(address)
    }

    /// Confirms the remote identifies as the expected controller class.
    pub async fn classify(&self, address: &Address) -> Result<(), TagError> {
        let session = self.open_session(address).await?;
        let properties = session.device_properties().await;
        self.close_session(session.as_ref(), address).await;

        let properties: DeviceProperties =
            properties.map_err(|e| TagError::connection(address, e))?;

        if properties.device_type != self.config().expected_device_type {
            return Err(TagError::NotAController {
                address: address.to_string(),
                device_type: properties.device_type,
            });
        }
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

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use tagcrawl_common::config::Config;
    use tagcrawl_common::progress::Interrupt;
    use tagcrawl_common::reachability::Prober;
    use tagcrawl_protocols::SimulatedPlc;

    use super::*;
    use crate::network::tcp::SkipProbe;

    struct Silent;

    #[async_trait]
    impl Prober for Silent {
        async fn probe(&self, address: &Address, _timeout: Duration) -> Result<(), TagError> {
            Err(TagError::Unreachable {
                address: address.to_string(),
                reason: "no answer".into(),
            })
        }
    }

    fn service(plc: &SimulatedPlc, prober: Box<dyn Prober>) -> TagService {
        TagService::new(Arc::new(plc.clone()), prober, Config::default())
    }

    #[tokio::test]
    async fn invalid_address_stops_before_any_io() {
        let plc = SimulatedPlc::new();
        let result = service(&plc, Box::new(SkipProbe)).precheck("10.0.0").await;

        assert!(matches!(result, Err(TagError::InvalidAddressFormat(_))));
        assert_eq!(plc.sessions_opened(), 0);
    }

    #[tokio::test]
    async fn unreachable_device_is_never_classified() {
        let plc = SimulatedPlc::new();
        let result = service(&plc, Box::new(Silent)).precheck("10.0.0.1").await;

        assert!(matches!(result, Err(TagError::Unreachable { .. })));
        assert_eq!(plc.sessions_opened(), 0);
    }

    #[tokio::test]
    async fn non_controller_devices_are_rejected() {
        let plc = SimulatedPlc::new().with_device_type("Communications Adapter");
        let result = service(&plc, Box::new(SkipProbe)).precheck("10.0.0.1").await;

        assert!(matches!(
            result,
            Err(TagError::NotAController { device_type, .. }) if device_type == "Communications Adapter"
        ));
        assert_eq!(plc.sessions_closed(), 1);
    }

    #[tokio::test]
    async fn refused_session_is_a_connection_error() {
        let plc = SimulatedPlc::new().refusing_sessions();
        let result = service(&plc, Box::new(SkipProbe)).precheck("10.0.0.1").await;

        assert!(matches!(result, Err(TagError::ConnectionError { .. })));
    }

    #[tokio::test]
    async fn controller_passes_with_one_scoped_session() {
        let plc = SimulatedPlc::new();
        let address = service(&plc, Box::new(SkipProbe)).precheck("10.0.0.1").await.unwrap();

        assert_eq!(address.as_str(), "10.0.0.1");
        assert_eq!((plc.sessions_opened(), plc.sessions_closed()), (1, 1));
    }

    #[tokio::test]
    async fn triggered_interrupt_cancels_after_the_checks() {
        let plc = SimulatedPlc::new();
        let interrupt = Interrupt::new();
        interrupt.trigger();
        let result = service(&plc, Box::new(SkipProbe))
            .with_interrupt(interrupt)
            .precheck("10.0.0.1")
            .await;

        assert_eq!(result, Err(TagError::Cancelled));
        assert_eq!(plc.sessions_opened(), plc.sessions_closed());
    }
}
