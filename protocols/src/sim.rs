//! An in-memory controller behind the [`ProtocolDriver`] port.
//!
//! Clones share the same device state, so a test can keep one handle to
//! inspect values and session counts while the core drives the other.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime, TimeDelta};
use tagcrawl_common::driver::{DeviceProperties, ProtocolDriver, Response, Session, status};
use tagcrawl_common::error::DriverError;
use tagcrawl_common::plc::address::Address;
use tagcrawl_common::plc::composite::{
    CompositeRegistry, CompositeType, MemberDescriptor, PrimitiveRegistry,
};
use tagcrawl_common::plc::scalar::Scalar;
use tracing::debug;

use crate::profile::DeviceProfile;

#[derive(Debug)]
struct DeviceState {
    device_type: String,
    product_name: Option<String>,
    tag_list_status: String,
    tags: Vec<MemberDescriptor>,
    primitives: PrimitiveRegistry,
    composites: CompositeRegistry,
    values: HashMap<String, Scalar>,
    read_latency: HashMap<String, Duration>,
    read_status: HashMap<String, String>,
    write_status: HashMap<String, String>,
    write_errors: HashMap<String, DriverError>,
    refuse_sessions: bool,
    clock_offset: TimeDelta,
}

#[derive(Debug, Default)]
struct SessionCounters {
    opened: AtomicUsize,
    closed: AtomicUsize,
    reads: AtomicUsize,
}

#[derive(Debug, Clone)]
pub struct SimulatedPlc {
    state: Arc<Mutex<DeviceState>>,
    counters: Arc<SessionCounters>,
}

impl Default for SimulatedPlc {
    fn default() -> Self {
        Self::from_profile(DeviceProfile::default())
    }
}

impl SimulatedPlc {
    /// A controller with the standard primitive registry and no tags.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_profile(profile: DeviceProfile) -> Self {
        let state = DeviceState {
            device_type: profile.device_type,
            product_name: profile.product_name,
            tag_list_status: status::SUCCESS.to_string(),
            tags: profile.tags,
            primitives: profile.primitive_types.into_iter().collect(),
            composites: profile
                .composite_types
                .into_iter()
                .map(|composite| (composite.name.clone(), composite))
                .collect(),
            values: profile.values.into_iter().collect(),
            read_latency: profile
                .read_latency_ms
                .into_iter()
                .map(|(path, millis)| (path, Duration::from_millis(millis)))
                .collect(),
            read_status: profile.read_status.into_iter().collect(),
            write_status: HashMap::new(),
            write_errors: HashMap::new(),
            refuse_sessions: false,
            clock_offset: TimeDelta::zero(),
        };

        Self {
            state: Arc::new(Mutex::new(state)),
            counters: Arc::new(SessionCounters::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DeviceState> {
        lock_state(&self.state)
    }

    pub fn with_device_type(self, device_type: impl Into<String>) -> Self {
        self.lock().device_type = device_type.into();
        self
    }

    /// Adds a controller-scope entry to the tag listing.
    pub fn with_tag(self, name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        self.lock().tags.push(MemberDescriptor::new(name, declared_type));
        self
    }

    /// Adds a primitive tag to the listing and gives it a value.
    pub fn with_primitive_tag(
        self,
        name: impl Into<String>,
        declared_type: impl Into<String>,
        value: impl Into<Scalar>,
    ) -> Self {
        let name: String = name.into();
        let plc = self.with_tag(name.clone(), declared_type);
        plc.lock().values.insert(name, value.into());
        plc
    }

    pub fn with_composite(self, composite: CompositeType) -> Self {
        self.lock().composites.insert(composite.name.clone(), composite);
        self
    }

    pub fn with_value(self, path: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.lock().values.insert(path.into(), value.into());
        self
    }

    pub fn with_read_latency(self, path: impl Into<String>, latency: Duration) -> Self {
        self.lock().read_latency.insert(path.into(), latency);
        self
    }

    pub fn with_read_status(self, path: impl Into<String>, status: impl Into<String>) -> Self {
        self.lock().read_status.insert(path.into(), status.into());
        self
    }

    pub fn with_write_status(self, path: impl Into<String>, status: impl Into<String>) -> Self {
        self.lock().write_status.insert(path.into(), status.into());
        self
    }

    /// Makes writes to `path` fail below the protocol level.
    pub fn with_write_error(self, path: impl Into<String>, error: DriverError) -> Self {
        self.lock().write_errors.insert(path.into(), error);
        self
    }

    pub fn with_tag_list_status(self, status: impl Into<String>) -> Self {
        self.lock().tag_list_status = status.into();
        self
    }

    pub fn refusing_sessions(self) -> Self {
        self.lock().refuse_sessions = true;
        self
    }

    pub fn value(&self, path: &str) -> Option<Scalar> {
        self.lock().values.get(path).cloned()
    }

    pub fn clock(&self) -> NaiveDateTime {
        Local::now().naive_local() + self.lock().clock_offset
    }

    pub fn sessions_opened(&self) -> usize {
        self.counters.opened.load(Ordering::SeqCst)
    }

    pub fn sessions_closed(&self) -> usize {
        self.counters.closed.load(Ordering::SeqCst)
    }

    /// Reads attempted on any session, including ones that timed out.
    pub fn reads_attempted(&self) -> usize {
        self.counters.reads.load(Ordering::SeqCst)
    }
}

fn lock_state(state: &Mutex<DeviceState>) -> MutexGuard<'_, DeviceState> {
    // A panicking test thread must not wedge every other session.
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl ProtocolDriver for SimulatedPlc {
    async fn open_session(&self, address: &Address) -> Result<Arc<dyn Session>, DriverError> {
        if self.lock().refuse_sessions {
            return Err(DriverError::Refused);
        }

        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        debug!("simulated session opened for {address}");

        Ok(Arc::new(SimulatedSession {
            state: self.state.clone(),
            counters: self.counters.clone(),
            open: AtomicBool::new(true),
        }))
    }
}

struct SimulatedSession {
    state: Arc<Mutex<DeviceState>>,
    counters: Arc<SessionCounters>,
    open: AtomicBool,
}

impl SimulatedSession {
    fn ensure_open(&self) -> Result<(), DriverError> {
        if self.open.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DriverError::Closed)
        }
    }

    fn lock(&self) -> MutexGuard<'_, DeviceState> {
        lock_state(&self.state)
    }
}

#[async_trait]
impl Session for SimulatedSession {
    async fn device_properties(&self) -> Result<DeviceProperties, DriverError> {
        self.ensure_open()?;
        let state = self.lock();
        Ok(DeviceProperties {
            device_type: state.device_type.clone(),
            product_name: state.product_name.clone(),
        })
    }

    async fn tag_list(&self) -> Result<Response<Vec<MemberDescriptor>>, DriverError> {
        self.ensure_open()?;
        let state = self.lock();
        if state.tag_list_status != status::SUCCESS {
            return Ok(Response::failure(state.tag_list_status.clone()));
        }
        Ok(Response::success(state.tags.clone()))
    }

    async fn primitive_types(&self) -> Result<PrimitiveRegistry, DriverError> {
        self.ensure_open()?;
        Ok(self.lock().primitives.clone())
    }

    async fn composite_types(&self) -> Result<CompositeRegistry, DriverError> {
        self.ensure_open()?;
        Ok(self.lock().composites.clone())
    }

    async fn read(&self, path: &str) -> Result<Response<Scalar>, DriverError> {
        self.ensure_open()?;
        self.counters.reads.fetch_add(1, Ordering::SeqCst);

        let (latency, response) = {
            let state = self.lock();
            let latency: Duration = state.read_latency.get(path).copied().unwrap_or_default();
            let response: Response<Scalar> = match (state.read_status.get(path), state.values.get(path)) {
                (Some(forced), _) => Response::failure(forced.clone()),
                (None, Some(value)) => Response::success(value.clone()),
                (None, None) => Response::failure(status::PATH_SEGMENT_ERROR),
            };
            (latency, response)
        };

        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        Ok(response)
    }

    async fn write(&self, path: &str, value: &Scalar) -> Result<Response<()>, DriverError> {
        self.ensure_open()?;
        let mut state = self.lock();

        if let Some(error) = state.write_errors.get(path) {
            return Err(error.clone());
        }
        if let Some(forced) = state.write_status.get(path) {
            return Ok(Response::failure(forced.clone()));
        }

        match state.values.get_mut(path) {
            Some(slot) => {
                *slot = value.clone();
                Ok(Response::success(()))
            }
            None => Ok(Response::failure(status::PATH_UNKNOWN)),
        }
    }

    async fn get_time(&self) -> Result<Response<NaiveDateTime>, DriverError> {
        self.ensure_open()?;
        let offset: TimeDelta = self.lock().clock_offset;
        Ok(Response::success(Local::now().naive_local() + offset))
    }

    async fn set_time(&self, time: NaiveDateTime) -> Result<Response<()>, DriverError> {
        self.ensure_open()?;
        self.lock().clock_offset = time - Local::now().naive_local();
        Ok(Response::success(()))
    }

    async fn close(&self) -> Result<(), DriverError> {
        if self.open.swap(false, Ordering::SeqCst) {
            self.counters.closed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        } else {
            Err(DriverError::Closed)
        }
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
    use super::*;
    use tagcrawl_common::plc::address;

    fn addr() -> Address {
        address::validate("10.0.0.5").unwrap()
    }

    #[tokio::test]
    async fn writes_only_land_on_known_paths() {
        let plc = SimulatedPlc::new().with_primitive_tag("Count", "DINT", 1);
        let session = plc.open_session(&addr()).await.unwrap();

        let known = session.write("Count", &Scalar::Int(7)).await.unwrap();
        let unknown = session.write("Missing", &Scalar::Int(7)).await.unwrap();

        assert!(known.is_success());
        assert_eq!(unknown.status, status::PATH_UNKNOWN);
        assert_eq!(plc.value("Count"), Some(Scalar::Int(7)));
        assert_eq!(plc.value("Missing"), None);
    }

    #[tokio::test]
    async fn write_errors_surface_as_driver_errors() {
        let plc = SimulatedPlc::new()
            .with_primitive_tag("Jog", "BOOL", false)
            .with_write_error("Jog", DriverError::Transport("socket reset".into()));
        let session = plc.open_session(&addr()).await.unwrap();

        let result = session.write("Jog", &Scalar::Bool(true)).await;
        assert_eq!(result, Err(DriverError::Transport("socket reset".into())));
        assert_eq!(plc.value("Jog"), Some(Scalar::Bool(false)));
    }

    #[tokio::test]
    async fn forced_read_status_wins_over_stored_value() {
        let plc = SimulatedPlc::new()
            .with_primitive_tag("Busy", "BOOL", true)
            .with_read_status("Busy", status::CONNECTION_REFUSED);
        let session = plc.open_session(&addr()).await.unwrap();

        let response = session.read("Busy").await.unwrap();
        assert_eq!(response.status, status::CONNECTION_REFUSED);
        assert!(response.value.is_none());
    }

    #[tokio::test]
    async fn closed_sessions_reject_further_calls() {
        let plc = SimulatedPlc::new();
        let session = plc.open_session(&addr()).await.unwrap();
        session.close().await.unwrap();

        assert_eq!(session.tag_list().await.unwrap_err(), DriverError::Closed);
        assert_eq!(session.close().await.unwrap_err(), DriverError::Closed);
        assert_eq!((plc.sessions_opened(), plc.sessions_closed()), (1, 1));
    }

    #[tokio::test]
    async fn refusing_controller_never_opens_a_session() {
        let plc = SimulatedPlc::new().refusing_sessions();
        assert!(matches!(plc.open_session(&addr()).await, Err(DriverError::Refused)));
        assert_eq!(plc.sessions_opened(), 0);
    }

    #[tokio::test]
    async fn clock_follows_the_last_set_time() {
        let plc = SimulatedPlc::new();
        let session = plc.open_session(&addr()).await.unwrap();
        let target: NaiveDateTime = Local::now().naive_local() - TimeDelta::hours(3);

        session.set_time(target).await.unwrap();
        let reported: NaiveDateTime = session.get_time().await.unwrap().value.unwrap();

        assert!((reported - target).num_seconds().abs() <= 1);
    }
}
