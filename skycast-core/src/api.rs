use std::sync::{
    Arc, Mutex, MutexGuard,
    atomic::{AtomicUsize, Ordering},
};

use anyhow::{Context, Result};
use reqwest::{Client, Method, header};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::ApiError;

/// Counts in-flight requests and remembers the most recent failure.
///
/// The loading flag is true iff the counter is nonzero, which keeps it
/// correct when the current and forecast fetches overlap: it drops to
/// false only when the last of them settles, regardless of order. The
/// raw counter stays private; callers only see the derived flag.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    active: Arc<AtomicUsize>,
    last_error: Arc<Mutex<Option<ApiError>>>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin one tracked request: bump the counter and clear the error
    /// slot. The returned guard releases the counter on drop, so every
    /// exit path of a request settles it.
    pub fn begin(&self) -> TrackerGuard {
        self.active.fetch_add(1, Ordering::SeqCst);
        *self.slot() = None;

        TrackerGuard { active: Arc::clone(&self.active) }
    }

    pub fn loading(&self) -> bool {
        self.active.load(Ordering::SeqCst) > 0
    }

    /// The normalized failure of the most recently settled request, if
    /// it failed and no newer request has started since.
    pub fn last_error(&self) -> Option<ApiError> {
        self.slot().clone()
    }

    pub(crate) fn record_failure(&self, error: &ApiError) {
        *self.slot() = Some(error.clone());
    }

    fn slot(&self) -> MutexGuard<'_, Option<ApiError>> {
        self.last_error.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// RAII release of one tracked request.
#[derive(Debug)]
pub struct TrackerGuard {
    active: Arc<AtomicUsize>,
}

impl Drop for TrackerGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

/// HTTP client bound to the backend base URL.
///
/// GET-only, JSON-in, JSON-out. The HTTP status line is never consulted:
/// the envelope's body status carries the application contract, and a
/// body that fails to parse is a generic failure. No timeout and no
/// retry; a request runs until the server settles it.
#[derive(Debug, Clone)]
pub struct Api {
    http: Client,
    base_url: Url,
    tracker: RequestTracker,
}

impl Api {
    pub fn new(base_url: Url) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, base_url, tracker: RequestTracker::new() })
    }

    /// Issue one tracked request.
    ///
    /// Only GET is supported. The method check happens inside the
    /// tracked scope and before any network activity, so even a rejected
    /// call briefly counts as in flight.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let _guard = self.tracker.begin();

        let result = self.dispatch(method, endpoint, params).await;

        if let Err(err) = &result {
            self.tracker.record_failure(err);
        }

        result
    }

    /// GET shorthand; every caller in this crate goes through it.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.request(Method::GET, endpoint, params).await
    }

    pub fn loading(&self) -> bool {
        self.tracker.loading()
    }

    /// Most recent request failure; cleared whenever a new request begins.
    pub fn last_error(&self) -> Option<ApiError> {
        self.tracker.last_error()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        if method != Method::GET {
            warn!(%method, "unsupported HTTP method");
            return Err(ApiError::generic());
        }

        let url = self.resolve(endpoint)?;
        debug!(%url, "GET");

        let response = self.http.get(url.clone()).query(params).send().await.map_err(|err| {
            warn!(%url, error = %err, "request failed to send");
            ApiError::from(err)
        })?;

        let body = response.text().await.map_err(|err| {
            warn!(%url, error = %err, "failed to read response body");
            ApiError::from(err)
        })?;

        serde_json::from_str(&body).map_err(|err| {
            warn!(%url, error = %err, "response body did not match the expected shape");
            ApiError::generic()
        })
    }

    /// Fully-qualified endpoints pass through untouched; anything else
    /// joins onto the base URL. The geolocation lookup is the
    /// fully-qualified case.
    fn resolve(&self, endpoint: &str) -> Result<Url, ApiError> {
        match Url::parse(endpoint) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                self.base_url.join(endpoint).map_err(|err| {
                    warn!(endpoint, error = %err, "could not join endpoint onto base URL");
                    ApiError::generic()
                })
            }
            Err(err) => {
                warn!(endpoint, error = %err, "invalid endpoint");
                Err(ApiError::generic())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_tracks_overlapping_guards() {
        let tracker = RequestTracker::new();
        assert!(!tracker.loading());

        let a = tracker.begin();
        let b = tracker.begin();
        assert!(tracker.loading());

        // Settle B first: A is still in flight.
        drop(b);
        assert!(tracker.loading());

        drop(a);
        assert!(!tracker.loading());
    }

    #[test]
    fn begin_clears_the_error_slot() {
        let tracker = RequestTracker::new();
        tracker.record_failure(&ApiError::generic());
        assert_eq!(tracker.last_error(), Some(ApiError::generic()));

        let _guard = tracker.begin();
        assert_eq!(tracker.last_error(), None);
    }

    #[tokio::test]
    async fn non_get_method_fails_before_any_network() {
        // Port 9 is discard; nothing should ever be sent to it anyway.
        let api = Api::new(Url::parse("http://127.0.0.1:9/api/v1/").unwrap()).unwrap();

        let err = api
            .request::<serde_json::Value>(Method::POST, "weather", &[])
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::generic());
        assert_eq!(api.last_error(), Some(ApiError::generic()));
        assert!(!api.loading());
    }

    #[test]
    fn relative_endpoints_join_the_base_url() {
        let api = Api::new(Url::parse("http://127.0.0.1:8000/api/v1/").unwrap()).unwrap();

        let url = api.resolve("weather").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/v1/weather");
    }

    #[test]
    fn absolute_endpoints_bypass_the_base_url() {
        let api = Api::new(Url::parse("http://127.0.0.1:8000/api/v1/").unwrap()).unwrap();

        let url = api.resolve("https://ipapi.co/json/").unwrap();
        assert_eq!(url.as_str(), "https://ipapi.co/json/");
    }
}
