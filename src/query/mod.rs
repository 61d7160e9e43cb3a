//! Remote query plumbing: request building, response validation, the bounded
//! fallback policy and the latest-request-wins dispatcher.

mod dispatcher;
mod policy;
mod request;
mod response;
mod statistics;
mod transport;

pub use dispatcher::{
    PendingQuery, QueryDispatcher, QueryOrigin, QueryResolution, QueryValidity, RequestToken,
};
pub use policy::FallbackPolicy;
pub use request::{ServiceRequest, TimeRange, build_sample_request};
pub use response::parse_samples;
pub use statistics::{build_statistics_request, parse_statistics};
#[cfg(feature = "http-client")]
pub use transport::ReqwestTransport;
pub use transport::SampleTransport;
