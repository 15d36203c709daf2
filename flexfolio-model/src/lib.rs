//! Core data model shared across FlexFolio crates.
//!
//! A single entity lives here, [`UserProfile`], together with the pieces the
//! client needs around it: the identifier newtype, the canonical social link
//! representation, the edit form and the shape checks applied to records that
//! come back from the profile API.
#![allow(missing_docs)]

pub mod error;
pub mod form;
pub mod ids;
pub mod links;
pub mod profile;

pub use error::{ModelError, Result as ModelResult};
pub use form::{ProfileField, ProfileForm};
pub use ids::UserId;
pub use links::{
    SocialKind, SocialLink, normalize_handle, normalize_stored_url, normalize_web_url,
};
pub use profile::{ProfileShape, UserProfile, validate_listing};
