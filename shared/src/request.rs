//! Request descriptors and per-operation request sequencing.
//!
//! Every execution of a logical operation gets a fresh [`RequestToken`].
//! A response is applied only when its token is still the latest one the
//! operation issued, so a slow earlier response can never overwrite the
//! result of a newer request.

use crate::envelope::ApiError;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Verbs that must carry the CSRF header
    pub fn is_mutating(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// `{method, url, params?, data?}` description of one API call
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    pub path: String,
    pub params: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestDescriptor {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing tokens for one logical operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }

    pub fn latest(&self) -> Option<RequestToken> {
        (self.latest > 0).then_some(RequestToken(self.latest))
    }
}

/// `{response, error, loading}` holder backing the generic request hook
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSlot<T> {
    tracker: RequestTracker,
    pub response: Option<T>,
    pub error: Option<ApiError>,
    pub loading: bool,
}

impl<T> Default for RequestSlot<T> {
    fn default() -> Self {
        Self {
            tracker: RequestTracker::default(),
            response: None,
            error: None,
            loading: false,
        }
    }
}

impl<T> RequestSlot<T> {
    /// Start a new request; earlier in-flight requests become stale
    pub fn begin(&mut self) -> RequestToken {
        self.loading = true;
        self.error = None;
        self.tracker.issue()
    }

    /// Apply a finished request. Returns `false` when the token is stale
    /// and the result was dropped.
    pub fn complete(&mut self, token: RequestToken, result: Result<T, ApiError>) -> bool {
        if !self.tracker.is_current(token) {
            log::debug!(
                "dropping stale response #{} (latest is {:?})",
                token.sequence(),
                self.tracker.latest()
            );
            return false;
        }
        self.loading = false;
        match result {
            Ok(response) => {
                self.response = Some(response);
                self.error = None;
            }
            Err(error) => {
                self.error = Some(error);
            }
        }
        true
    }
}
