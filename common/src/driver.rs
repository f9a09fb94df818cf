//! # Protocol Driver Port
//!
//! The boundary between the orchestration core and whatever speaks the
//! controller's wire protocol. The core never sees frames or sockets, only
//! these calls and the status strings they return.
//!
//! Sessions are reference counted so a supervising task can hand a clone
//! to a short-lived worker. A session is opened for one logical operation
//! and closed when the operation ends.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::DriverError;
use crate::plc::address::Address;
use crate::plc::composite::{CompositeRegistry, MemberDescriptor, PrimitiveRegistry};
use crate::plc::scalar::Scalar;

pub mod status {
    /// The only status text that counts as success.
    pub const SUCCESS: &str = "Success";

    /// Reported when the controller declines one more connection.
    pub const CONNECTION_REFUSED: &str = "Unknown error [WinError 10061] No connection could be made because the target machine actively refused it";

    pub const PATH_UNKNOWN: &str = "Path destination unknown";

    pub const PATH_SEGMENT_ERROR: &str = "Path segment error";
}

/// A driver reply: the status text plus a payload on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response<T> {
    pub status: String,
    pub value: Option<T>,
}

impl<T> Response<T> {
    pub fn success(value: T) -> Self {
        Self {
            status: status::SUCCESS.to_string(),
            value: Some(value),
        }
    }

    pub fn failure(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            value: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == status::SUCCESS
    }

    /// The payload of a successful reply, otherwise the status text.
    pub fn into_result(self) -> Result<T, String> {
        match (self.is_success(), self.value) {
            (true, Some(value)) => Ok(value),
            (true, None) => Err(format!("{} without a value", self.status)),
            (false, _) => Err(self.status),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceProperties {
    pub device_type: String,
    #[serde(default)]
    pub product_name: Option<String>,
}

/// Opens sessions to controllers.
#[async_trait]
pub trait ProtocolDriver: Send + Sync {
    async fn open_session(&self, address: &Address) -> Result<Arc<dyn Session>, DriverError>;
}

/// One open conversation with a controller.
#[async_trait]
pub trait Session: Send + Sync {
    async fn device_properties(&self) -> Result<DeviceProperties, DriverError>;

    /// All controller-scope tags. Program scopes come back with an empty type.
    async fn tag_list(&self) -> Result<Response<Vec<MemberDescriptor>>, DriverError>;

    async fn primitive_types(&self) -> Result<PrimitiveRegistry, DriverError>;

    async fn composite_types(&self) -> Result<CompositeRegistry, DriverError>;

    async fn read(&self, path: &str) -> Result<Response<Scalar>, DriverError>;

    async fn write(&self, path: &str, value: &Scalar) -> Result<Response<()>, DriverError>;

    /// The controller's wall clock.
    async fn get_time(&self) -> Result<Response<NaiveDateTime>, DriverError>;

    async fn set_time(&self, time: NaiveDateTime) -> Result<Response<()>, DriverError>;

    async fn close(&self) -> Result<(), DriverError>;
}
