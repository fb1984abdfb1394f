use tracing::{debug, warn};

use crate::{
    backend::WeatherBackend,
    banner::{Banner, BannerPhase},
    error::{ApiError, QueryError},
    forecast::DayGroups,
    model::{CurrentWeather, WeatherSample},
    query::SearchQuery,
};

/// Lifecycle of one display panel.
///
/// The explicit sum type rules out the impossible combinations a set of
/// scattered flags would allow, such as an error and fresh data at once.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Panel<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(ApiError),
}

impl<T> Panel<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Panel::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Panel::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Panel::Loading)
    }
}

/// What a search submission did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Empty input; nothing was fired.
    Ignored,
    /// A classified query refreshed both panels.
    Fetched,
}

/// Banner text when a current-weather failure carries no message.
const CURRENT_FETCH_FALLBACK: &str = "Failed to fetch current weather.";
/// Banner text when a forecast failure carries no message.
const FORECAST_FETCH_FALLBACK: &str = "Failed to fetch forecast.";

/// The dashboard state machine.
///
/// Owns the two panels, the active forecast day and the transient error
/// banner, and drives them through a [`WeatherBackend`].
pub struct Dashboard {
    backend: Box<dyn WeatherBackend>,
    current: Panel<CurrentWeather>,
    forecast: Panel<DayGroups>,
    active_day: Option<String>,
    banner: Option<Banner>,
    last_query: Option<SearchQuery>,
}

impl Dashboard {
    pub fn new(backend: Box<dyn WeatherBackend>) -> Self {
        Self {
            backend,
            current: Panel::Idle,
            forecast: Panel::Idle,
            active_day: None,
            banner: None,
            last_query: None,
        }
    }

    /// Startup sequence: geolocate, fall back to the configured city,
    /// then load both panels for that target. Geolocation failure is
    /// recovered silently and never raises the banner.
    pub async fn bootstrap(&mut self, fallback_city: &str) {
        let city = match self.backend.locate_city().await {
            Some(city) => city,
            None => {
                debug!(fallback_city, "geolocation unavailable, using fallback city");
                fallback_city.to_string()
            }
        };

        self.refresh(SearchQuery::City(city)).await;
    }

    /// Fetch current conditions and forecast concurrently and settle
    /// both panels. The two fetches are independent: one failing leaves
    /// the other's result intact.
    pub async fn refresh(&mut self, query: SearchQuery) {
        debug!(query = %query, "refreshing dashboard");
        self.current = Panel::Loading;
        self.forecast = Panel::Loading;

        let (current, forecast) =
            tokio::join!(self.backend.current(&query), self.backend.forecast(&query));

        match current {
            Ok(data) => self.current = Panel::Ready(data),
            Err(err) => {
                self.raise_banner(&err, CURRENT_FETCH_FALLBACK);
                self.current = Panel::Failed(err);
            }
        }

        match forecast {
            Ok(data) => {
                let groups = DayGroups::from_samples(&data.weather);
                self.active_day = groups.first_label().map(str::to_string);
                self.forecast = Panel::Ready(groups);
            }
            Err(err) => {
                self.raise_banner(&err, FORECAST_FETCH_FALLBACK);
                self.forecast = Panel::Failed(err);
            }
        }

        self.last_query = Some(query);
    }

    /// Classify and act on search input: empty input is ignored, invalid
    /// input is rejected without issuing any request, a valid query
    /// refreshes both panels.
    pub async fn submit_search(&mut self, input: &str) -> Result<SearchOutcome, QueryError> {
        if input.trim().is_empty() {
            return Ok(SearchOutcome::Ignored);
        }

        let query = SearchQuery::parse(input)?;
        self.refresh(query).await;

        Ok(SearchOutcome::Fetched)
    }

    /// Select the day whose samples the detail list shows. Matching at
    /// read time is case-insensitive.
    pub fn select_day(&mut self, label: &str) {
        self.active_day = Some(label.to_string());
    }

    /// Samples of the active day, in arrival order. Empty when no day is
    /// active or the forecast panel holds no data.
    pub fn active_samples(&self) -> &[WeatherSample] {
        let (Some(label), Some(groups)) = (self.active_day.as_deref(), self.forecast.ready())
        else {
            return &[];
        };

        groups.samples_for(label)
    }

    /// Drop the banner once its lifecycle has run out. Called before
    /// each render.
    pub fn tick(&mut self) {
        if let Some(banner) = &self.banner {
            if banner.phase() == BannerPhase::Expired {
                self.banner = None;
            }
        }
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn current(&self) -> &Panel<CurrentWeather> {
        &self.current
    }

    pub fn forecast(&self) -> &Panel<DayGroups> {
        &self.forecast
    }

    pub fn active_day(&self) -> Option<&str> {
        self.active_day.as_deref()
    }

    pub fn last_query(&self) -> Option<&SearchQuery> {
        self.last_query.as_ref()
    }

    /// True while any backend request is in flight.
    pub fn is_fetching(&self) -> bool {
        self.backend.is_fetching()
    }

    /// Raise (or replace) the transient banner with the error's message,
    /// or the per-operation fallback text when the message is empty.
    /// Replacement restarts the show/hide/clear clock.
    fn raise_banner(&mut self, error: &ApiError, fallback: &str) {
        let message = if error.message.trim().is_empty() {
            fallback.to_string()
        } else {
            error.message.clone()
        };

        warn!(status = error.status, message = %message, "fetch failed");
        self.banner = Some(Banner::new(message));
    }
}
