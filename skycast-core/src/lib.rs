//! Core library for the `skycast` terminal weather dashboard.
//!
//! This crate defines:
//! - The backend API client, with in-flight request tracking
//! - Search classification (city name vs. coordinate pair)
//! - Forecast grouping by weekday and the dashboard state machine
//! - The transient error banner lifecycle
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod api;
pub mod backend;
pub mod banner;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod geo;
pub mod model;
pub mod query;
pub mod timefmt;

pub use api::{Api, RequestTracker};
pub use backend::{HttpBackend, WeatherBackend};
pub use banner::{Banner, BannerPhase};
pub use config::Config;
pub use dashboard::{Dashboard, Panel, SearchOutcome};
pub use error::{ApiError, QueryError};
pub use forecast::DayGroups;
pub use model::{CurrentWeather, ForecastWeather, Location, WeatherSample};
pub use query::SearchQuery;
pub use timefmt::DateStyle;
