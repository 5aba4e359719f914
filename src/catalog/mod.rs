//! Recipe catalog API client.
//!
//! - `cancel`: [`CancellationToken`] shared between a caller and its request
//! - `client`: endpoint URLs, request bookkeeping and response settlement

pub mod cancel;
pub mod client;

pub use cancel::CancellationToken;
pub use client::{
    ApiRequest, CatalogClient, Endpoint, RequestId, Response, Settlement, DEFAULT_BASE_URL,
    REQUEST_HEADERS,
};
