use crate::error::SyncResult;

use super::ServiceRequest;

/// Performs one service GET and returns the raw response body.
///
/// Transport failures (connection errors, non-2xx) map to
/// `SyncError::Network`.
pub trait SampleTransport {
    fn get(&mut self, request: &ServiceRequest) -> SyncResult<String>;
}

impl<F> SampleTransport for F
where
    F: FnMut(&ServiceRequest) -> SyncResult<String>,
{
    fn get(&mut self, request: &ServiceRequest) -> SyncResult<String> {
        self(request)
    }
}

#[cfg(feature = "http-client")]
pub use reqwest_transport::ReqwestTransport;

#[cfg(feature = "http-client")]
mod reqwest_transport {
    use std::time::Duration;

    use tracing::debug;

    use crate::error::{SyncError, SyncResult};
    use crate::query::ServiceRequest;

    use super::SampleTransport;

    /// Blocking HTTP transport backed by `reqwest`.
    pub struct ReqwestTransport {
        client: reqwest::blocking::Client,
    }

    impl ReqwestTransport {
        pub fn new(timeout: Duration) -> SyncResult<Self> {
            let client = reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| SyncError::Network(format!("reqwest client error: {e}")))?;
            Ok(Self { client })
        }
    }

    impl SampleTransport for ReqwestTransport {
        fn get(&mut self, request: &ServiceRequest) -> SyncResult<String> {
            debug!(endpoint = %request.endpoint, "sending service request");
            self.client
                .get(request.endpoint.as_str())
                .query(&request.params)
                .send()
                .and_then(|r| r.error_for_status())
                .map_err(|e| SyncError::Network(format!("request error: {e}")))?
                .text()
                .map_err(|e| SyncError::Network(format!("body read error: {e}")))
        }
    }
}
