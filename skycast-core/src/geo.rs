use serde::Deserialize;
use tracing::{debug, warn};

use crate::api::Api;

/// Payload of the IP geolocation lookup. Only the city is consumed; the
/// rest of the body is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct IpLocation {
    #[serde(default)]
    pub city: Option<String>,
}

/// Resolve the user's city from their IP address.
///
/// Goes through the shared client with a fully-qualified URL, so it
/// bypasses the backend base URL while still participating in the
/// loading flag. Any failure, including a payload without a usable city,
/// yields `None` and the caller falls back to its configured default
/// city. Nothing here surfaces to the user.
pub async fn detect_city(api: &Api, lookup_url: &str) -> Option<String> {
    match api.get::<IpLocation>(lookup_url, &[]).await {
        Ok(IpLocation { city: Some(city) }) if !city.trim().is_empty() => {
            debug!(city = %city, "geolocated");
            Some(city)
        }
        Ok(_) => {
            warn!("geolocation payload had no usable city");
            None
        }
        Err(err) => {
            warn!(error = %err, "geolocation lookup failed");
            None
        }
    }
}
