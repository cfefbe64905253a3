use crate::error::ApiError;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::Path;

pub const ACCESS_TOKEN_ENV: &str = "RTB_ACCESS_TOKEN";

/// OAuth scope for the Real-time Bidding API.
pub const REALTIME_BIDDING_SCOPE: &str = "https://www.googleapis.com/auth/realtime-bidding";
/// OAuth scope for Cloud Pub/Sub.
pub const PUBSUB_SCOPE: &str = "https://www.googleapis.com/auth/pubsub";

/// Bearer credentials passed to a transport.
///
/// Tokens are obtained out of band (for example `gcloud auth print-access-token`
/// with the scopes above); no OAuth2 exchange happens here.
#[derive(Clone)]
pub struct Credentials {
    token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn from_token(token: &str) -> Result<Self, ApiError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ApiError::Credentials("access token is empty".to_string()));
        }
        Ok(Self {
            token: token.to_string(),
        })
    }

    /// Read a token file: either the raw token, or JSON with an `access_token` field.
    pub fn from_token_file(path: &Path) -> Result<Self, ApiError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ApiError::Credentials(format!("failed to read key file {}: {e}", path.display()))
        })?;

        let trimmed = contents.trim();
        if !trimmed.starts_with('{') {
            return Self::from_token(trimmed);
        }

        let json: Value = serde_json::from_str(trimmed).map_err(|e| {
            ApiError::Credentials(format!("key file {} is not valid JSON: {e}", path.display()))
        })?;
        if let Some(token) = json.get("access_token").and_then(Value::as_str) {
            return Self::from_token(token);
        }
        if json.get("type").and_then(Value::as_str) == Some("service_account") {
            return Err(ApiError::Credentials(format!(
                "{} is a service account key; exchange it for an access token \
                 ({REALTIME_BIDDING_SCOPE} {PUBSUB_SCOPE}) and set {ACCESS_TOKEN_ENV}",
                path.display()
            )));
        }
        Err(ApiError::Credentials(format!(
            "key file {} has no access_token field",
            path.display()
        )))
    }

    /// Resolve credentials from `RTB_ACCESS_TOKEN`, falling back to `key_file`.
    pub fn load(key_file: Option<&Path>) -> Result<Self, ApiError> {
        if let Ok(token) = std::env::var(ACCESS_TOKEN_ENV) {
            if !token.trim().is_empty() {
                tracing::debug!("using access token from {ACCESS_TOKEN_ENV}");
                return Self::from_token(&token);
            }
        }

        match key_file {
            Some(path) => {
                tracing::debug!(path = %path.display(), "reading access token from key file");
                Self::from_token_file(path)
            }
            None => Err(ApiError::Credentials(format!(
                "no credentials configured; set {ACCESS_TOKEN_ENV} or keyFile in the config"
            ))),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}
