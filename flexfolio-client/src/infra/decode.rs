//! Verifying decoder for profile API payloads.
//!
//! Bodies are parsed into the typed record, normalized, then checked against
//! the shape the call expects. Anything that does not fit is rejected as a
//! schema mismatch instead of reaching the views half-formed.

use flexfolio_model::{ProfileShape, UserProfile, validate_listing};

use crate::infra::errors::FailureReason;

fn mismatch(err: impl std::fmt::Display) -> FailureReason {
    FailureReason::SchemaMismatch(err.to_string())
}

pub fn decode_profile(
    body: &[u8],
    shape: ProfileShape,
) -> Result<UserProfile, FailureReason> {
    let profile = serde_json::from_slice::<UserProfile>(body)
        .map_err(mismatch)?
        .normalized();
    shape.validate(&profile).map_err(mismatch)?;
    Ok(profile)
}

pub fn decode_listing(body: &[u8]) -> Result<Vec<UserProfile>, FailureReason> {
    let profiles: Vec<UserProfile> = serde_json::from_slice::<Vec<UserProfile>>(body)
        .map_err(mismatch)?
        .into_iter()
        .map(UserProfile::normalized)
        .collect();
    validate_listing(&profiles).map_err(mismatch)?;
    Ok(profiles)
}
