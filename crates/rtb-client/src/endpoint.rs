use crate::error::ApiError;
use url::Url;

pub const REALTIME_BIDDING_V1: &str = "https://realtimebidding.googleapis.com/v1/";
pub const PUBSUB_V1: &str = "https://pubsub.googleapis.com/v1/";

/// Base URL that resource paths are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    base_url: Url,
}

impl ServiceEndpoint {
    pub fn parse(base_url: &str) -> Result<Self, ApiError> {
        let mut url = Url::parse(base_url.trim())
            .map_err(|e| ApiError::Endpoint(format!("{base_url}: {e}")))?;
        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(ApiError::Endpoint(format!(
                "expected an http(s) URL, got '{base_url}'"
            )));
        }
        if url.host_str().is_none() {
            return Err(ApiError::Endpoint(format!("URL has no host: '{base_url}'")));
        }

        // `Url::join` drops the last path segment unless the base ends with '/'.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self { base_url: url })
    }

    pub fn realtime_bidding() -> Result<Self, ApiError> {
        Self::parse(REALTIME_BIDDING_V1)
    }

    pub fn pubsub() -> Result<Self, ApiError> {
        Self::parse(PUBSUB_V1)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a resource path such as `bidders/1/endpoints/2` against the base URL.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Endpoint(format!("cannot resolve '{path}': {e}")))
    }
}
