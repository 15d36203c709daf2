use std::time::Duration;

use flexfolio_config::ApiConfig;
use flexfolio_model::{ProfileShape, UserId, UserProfile};
use log::{debug, info, warn};
use reqwest::{Client, RequestBuilder};

use crate::domains::auth::AccessToken;
use crate::infra::decode::{decode_listing, decode_profile};
use crate::infra::errors::{FailureReason, ProfileError};

const OWN_PROFILE_PATH: &str = "users/profile";
const PROFILES_PATH: &str = "users/profiles";

/// Whether a failure happened while reading or writing, which decides the
/// error variant surfaced to the page.
#[derive(Debug, Clone, Copy)]
enum Operation {
    Fetch,
    Update,
}

impl Operation {
    fn fail(self, reason: FailureReason) -> ProfileError {
        match self {
            Operation::Fetch => ProfileError::FetchFailure { reason },
            Operation::Update => ProfileError::UpdateFailure { reason },
        }
    }
}

/// HTTP client for the profile API
///
/// Stateless apart from the connection pool: credentials are passed per call
/// and nothing is cached, so every read reflects the server's current record.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn has_http_scheme(raw: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        raw.get(..scheme.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
    })
}

/// Trim whitespace and a trailing slash, default to `http://` when the scheme
/// is missing.
fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    let with_scheme = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };
    if with_scheme != raw {
        warn!(
            "[ApiClient] Normalized base URL from '{}' to '{}'",
            raw, with_scheme
        );
    }
    with_scheme
}

impl ApiClient {
    /// Client for a user-supplied origin, normalized leniently.
    pub fn new(base_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        Self::build(normalize_base_url(base_url), timeout)
    }

    /// Client for an origin the config loader already validated.
    pub fn from_config(config: &ApiConfig) -> reqwest::Result<Self> {
        let base_url = config.base_url.as_str().trim_end_matches('/').to_string();
        Self::build(base_url, config.timeout)
    }

    fn build(base_url: String, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        info!(
            "[ApiClient] Creating profile API client with base URL: {}",
            base_url
        );

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(
        builder: RequestBuilder,
        token: &AccessToken,
    ) -> RequestBuilder {
        builder.bearer_auth(token.expose())
    }

    /// Send the request and return the body of a 2xx response.
    async fn send(
        &self,
        request: RequestBuilder,
        op: Operation,
    ) -> Result<Vec<u8>, ProfileError> {
        let response = request
            .send()
            .await
            .map_err(|e| op.fail(FailureReason::from_transport(&e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!("[ApiClient] {:?} request failed with status {}", op, status);
            return Err(op.fail(FailureReason::Status(status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| op.fail(FailureReason::from_transport(&e)))?;
        debug!("[ApiClient] {:?} received {} bytes", op, body.len());
        Ok(body.to_vec())
    }

    /// Fetch the profile of the session holder.
    pub async fn fetch_own_profile(
        &self,
        token: &AccessToken,
    ) -> Result<UserProfile, ProfileError> {
        if token.is_empty() {
            return Err(ProfileError::NoSession);
        }
        let request =
            Self::authorized(self.client.get(self.url(OWN_PROFILE_PATH)), token);
        let body = self.send(request, Operation::Fetch).await?;
        decode_profile(&body, ProfileShape::Own)
            .map_err(|reason| Operation::Fetch.fail(reason))
    }

    /// Replace the session holder's profile; returns the record as stored.
    pub async fn update_own_profile(
        &self,
        token: &AccessToken,
        profile: &UserProfile,
    ) -> Result<UserProfile, ProfileError> {
        if token.is_empty() {
            return Err(ProfileError::NoSession);
        }
        let request = Self::authorized(
            self.client.post(self.url(OWN_PROFILE_PATH)).json(profile),
            token,
        );
        let body = self.send(request, Operation::Update).await?;
        let stored = decode_profile(&body, ProfileShape::Own)
            .map_err(|reason| Operation::Update.fail(reason))?;
        info!("[ApiClient] Profile updated for {}", stored.name);
        Ok(stored)
    }

    pub async fn fetch_profile_by_id(
        &self,
        id: &UserId,
    ) -> Result<UserProfile, ProfileError> {
        let path = format!(
            "{}/{}",
            PROFILES_PATH,
            urlencoding::encode(id.as_str())
        );
        let body = self
            .send(self.client.get(self.url(&path)), Operation::Fetch)
            .await?;
        decode_profile(&body, ProfileShape::Public)
            .map_err(|reason| Operation::Fetch.fail(reason))
    }

    /// Public listing, in server order.
    pub async fn fetch_profiles(&self) -> Result<Vec<UserProfile>, ProfileError> {
        let body = self
            .send(self.client.get(self.url(PROFILES_PATH)), Operation::Fetch)
            .await?;
        decode_listing(&body).map_err(|reason| Operation::Fetch.fail(reason))
    }
}
