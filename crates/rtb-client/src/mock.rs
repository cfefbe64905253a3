use crate::error::ApiError;
use crate::transport::{ApiRequest, Transport};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// In-memory [`Transport`] that records every request and replays queued responses.
///
/// With an empty queue every call answers `{}`.
#[derive(Debug, Default)]
pub struct MockTransport {
    requests: Mutex<Vec<ApiRequest>>,
    responses: Mutex<VecDeque<Result<Value, ApiError>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, value: Value) -> &Self {
        self.lock_responses().push_back(Ok(value));
        self
    }

    pub fn fail(&self, error: ApiError) -> &Self {
        self.lock_responses().push_back(Err(error));
        self
    }

    /// Requests seen so far, in call order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests().len()
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<Value, ApiError>>> {
        self.responses
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Transport for MockTransport {
    fn execute(&self, request: ApiRequest) -> Result<Value, ApiError> {
        tracing::trace!(method = %request.method, path = %request.path, "mock transport call");
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(request);
        self.lock_responses()
            .pop_front()
            .unwrap_or_else(|| Ok(Value::Object(Default::default())))
    }
}
