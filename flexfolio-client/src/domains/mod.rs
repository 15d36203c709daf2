//! Domain modules for the FlexFolio client
//!
//! Each page owns its state and a pure `update` function; side effects are
//! described as commands and executed by the page's runtime.

pub mod auth;
pub mod directory;
pub mod profile;
pub mod user;
