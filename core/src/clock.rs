//! Controller wall clock.

use chrono::{Local, NaiveDateTime};
use tagcrawl_common::driver::Response;
use tagcrawl_common::error::{DriverError, TagError};
use tagcrawl_common::plc::address::Address;

use crate::service::TagService;

impl TagService {
    pub async fn get_time(&self, candidate: &str) -> Result<NaiveDateTime, TagError> {
        let address: Address = self.precheck(candidate).await?;

        let session = self.open_session(&address).await?;
        let response = session.get_time().await;
        self.close_session(session.as_ref(), &address).await;

        clock_result(&address, response)
    }

    /// Sets the controller clock to this computer's local time.
    ///
    /// Returns the time that was sent.
    pub async fn set_time_to_host(&self, candidate: &str) -> Result<NaiveDateTime, TagError> {
        let address: Address = self.precheck(candidate).await?;

        let session = self.open_session(&address).await?;
        let host_time: NaiveDateTime = Local::now().naive_local();
        let response = session.set_time(host_time).await;
        self.close_session(session.as_ref(), &address).await;

        clock_result(&address, response)?;
        Ok(host_time)
    }
}

fn clock_result<T>(
    address: &Address,
    response: Result<Response<T>, DriverError>,
) -> Result<T, TagError> {
    response
        .map_err(|e| TagError::connection(address, e))?
        .into_result()
        .map_err(TagError::ClockFailed)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
