//! Configuration library for the FlexFolio client.
//!
//! Resolution order, lowest to highest precedence: built-in defaults, the TOML
//! config file, then environment variables (optionally seeded from a `.env`
//! file). The only mandatory setting is the API base URL.

pub mod constants;
pub mod loader;
pub mod models;
pub mod util;

pub use loader::{ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use models::{ApiConfig, ClientConfig, ConfigMetadata, ConfigWarning, UiConfig};
