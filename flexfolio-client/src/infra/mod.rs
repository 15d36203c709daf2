//! Infrastructure shared by the page domains: HTTP access to the profile API
//! and the service seam the pages are written against.

pub mod api_client;
pub mod decode;
pub mod errors;
pub mod services;

#[cfg(test)]
pub mod testing;

pub use api_client::ApiClient;
pub use errors::{FailureReason, ProfileError};
pub use services::api::ProfileApi;
