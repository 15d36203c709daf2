//! FlexFolio client library
//!
//! Library surfaces used by the `flexfolio` executable in `src/main.rs`: the
//! profile API client, the session capability, the page controllers and the
//! view models they render through.
//!
//! Notes
//! - Pages are driven by messages; `update` functions are pure and return the
//!   side effect to run, the runtimes execute those effects on tokio.
//! - The library is exposed mainly to enable testing and reuse by other
//!   front ends.

pub mod app;
pub mod domains;
pub mod infra;
pub mod view_models;
pub mod views;
