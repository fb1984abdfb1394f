use anyhow::{Context, Result};
use async_trait::async_trait;
use url::Url;

use crate::{
    api::Api,
    config::Config,
    error::ApiError,
    geo,
    model::{CurrentWeather, Envelope, ForecastWeather},
    query::SearchQuery,
};

/// The surface the dashboard talks through.
///
/// [`HttpBackend`] is the production path; tests drive the dashboard
/// with an in-process stub.
#[async_trait]
pub trait WeatherBackend: Send + Sync {
    /// Current conditions for a query, asset URLs already rewritten.
    async fn current(&self, query: &SearchQuery) -> Result<CurrentWeather, ApiError>;

    /// Forecast sample list with its location block, untouched.
    async fn forecast(&self, query: &SearchQuery) -> Result<ForecastWeather, ApiError>;

    /// IP-based city lookup; `None` means "use the fallback city".
    async fn locate_city(&self) -> Option<String>;

    /// True while any request is in flight.
    fn is_fetching(&self) -> bool;
}

/// Production backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    api: Api,
    geo_lookup_url: String,
}

impl HttpBackend {
    pub fn new(base_url: Url, geo_lookup_url: impl Into<String>) -> Result<Self> {
        Ok(Self { api: Api::new(base_url)?, geo_lookup_url: geo_lookup_url.into() })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        // A base URL without a trailing slash would swallow its last
        // path segment on join.
        let mut base = config.api_base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }

        let base = Url::parse(&base)
            .with_context(|| format!("Invalid backend base URL: {}", config.api_base_url))?;

        Self::new(base, config.geo_lookup_url.clone())
    }

    pub fn api(&self) -> &Api {
        &self.api
    }
}

#[async_trait]
impl WeatherBackend for HttpBackend {
    async fn current(&self, query: &SearchQuery) -> Result<CurrentWeather, ApiError> {
        let envelope: Envelope<CurrentWeather> = self.api.get("weather", &query.params()).await?;

        let mut current = envelope.into_data()?;
        current.rewrite_assets();

        Ok(current)
    }

    async fn forecast(&self, query: &SearchQuery) -> Result<ForecastWeather, ApiError> {
        let envelope: Envelope<ForecastWeather> = self.api.get("forecast", &query.params()).await?;

        envelope.into_data()
    }

    async fn locate_city(&self) -> Option<String> {
        geo::detect_city(&self.api, &self.geo_lookup_url).await
    }

    fn is_fetching(&self) -> bool {
        self.api.loading()
    }
}
