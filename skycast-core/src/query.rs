use crate::error::QueryError;

/// A classified search target: either a city name or a coordinate pair.
///
/// Classification is attempted coordinate-first, then city, on the
/// trimmed input. Anything matching neither is rejected; the rejection
/// carries the guidance text shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchQuery {
    City(String),
    Coords { lat: f64, lon: f64 },
}

impl SearchQuery {
    /// Classify free-text search input.
    ///
    /// Coordinates are two comma-separated decimal tokens (optional sign,
    /// optional single fractional part) with lat in [-90, 90] and lon in
    /// [-180, 180]. A city is at least two characters of letters and
    /// spaces. Validity of coordinates is decided by the numeric range,
    /// not by the token's digit count.
    pub fn parse(input: &str) -> Result<Self, QueryError> {
        let value = input.trim();

        if let Some(coords) = parse_coords(value) {
            return Ok(coords);
        }

        if is_city_name(value) {
            return Ok(SearchQuery::City(value.to_string()));
        }

        Err(QueryError)
    }

    /// Query-string pairs for the backend endpoints. Both the current
    /// weather and the forecast requests use the same shape.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            SearchQuery::City(name) => vec![("city", name.clone())],
            SearchQuery::Coords { lat, lon } => {
                vec![("lat", lat.to_string()), ("lon", lon.to_string())]
            }
        }
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchQuery::City(name) => f.write_str(name),
            SearchQuery::Coords { lat, lon } => write!(f, "{lat},{lon}"),
        }
    }
}

fn parse_coords(value: &str) -> Option<SearchQuery> {
    let (lat_token, lon_token) = value.split_once(',')?;

    let lat_token = lat_token.trim();
    let lon_token = lon_token.trim();

    if !is_decimal_token(lat_token) || !is_decimal_token(lon_token) {
        return None;
    }

    let lat: f64 = lat_token.parse().ok()?;
    let lon: f64 = lon_token.parse().ok()?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return None;
    }

    Some(SearchQuery::Coords { lat, lon })
}

/// Optional `-`, digits, then optionally a single `.` with digits.
fn is_decimal_token(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);

    let (whole, frac) = match digits.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (digits, None),
    };

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    match frac {
        Some(frac) => !frac.is_empty() && frac.bytes().all(|b| b.is_ascii_digit()),
        None => true,
    }
}

/// At least two characters, letters and spaces only.
fn is_city_name(value: &str) -> bool {
    value.chars().count() >= 2
        && value.chars().all(|c| c.is_ascii_alphabetic() || c.is_ascii_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_coordinate_pair() {
        let query = SearchQuery::parse("13.0827,80.2707").expect("valid coords");
        assert_eq!(query, SearchQuery::Coords { lat: 13.0827, lon: 80.2707 });
    }

    #[test]
    fn classifies_city_name() {
        assert_eq!(SearchQuery::parse("Chennai").unwrap(), SearchQuery::City("Chennai".into()));
        assert_eq!(SearchQuery::parse("New York").unwrap(), SearchQuery::City("New York".into()));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(
            SearchQuery::parse("  Chennai  ").unwrap(),
            SearchQuery::City("Chennai".into())
        );
        assert_eq!(
            SearchQuery::parse(" 13.08 , 80.27 ").unwrap(),
            SearchQuery::Coords { lat: 13.08, lon: 80.27 }
        );
    }

    #[test]
    fn coordinates_win_over_city_rules() {
        // A lone comma-separated number pair never reads as a city.
        assert!(matches!(SearchQuery::parse("2,3").unwrap(), SearchQuery::Coords { .. }));
    }

    #[test]
    fn negative_and_integer_coordinates() {
        assert_eq!(
            SearchQuery::parse("-33,151").unwrap(),
            SearchQuery::Coords { lat: -33.0, lon: 151.0 }
        );
        assert_eq!(
            SearchQuery::parse("-90,-180").unwrap(),
            SearchQuery::Coords { lat: -90.0, lon: -180.0 }
        );
        assert_eq!(
            SearchQuery::parse("90,180").unwrap(),
            SearchQuery::Coords { lat: 90.0, lon: 180.0 }
        );
    }

    #[test]
    fn out_of_range_coordinates_reject() {
        assert_eq!(SearchQuery::parse("101,50"), Err(QueryError));
        assert_eq!(SearchQuery::parse("90.000001,0"), Err(QueryError));
        assert_eq!(SearchQuery::parse("-90.000001,0"), Err(QueryError));
        assert_eq!(SearchQuery::parse("0,180.5"), Err(QueryError));
        assert_eq!(SearchQuery::parse("0,-181"), Err(QueryError));
    }

    #[test]
    fn malformed_tokens_reject() {
        assert_eq!(SearchQuery::parse("13.08.27,80"), Err(QueryError));
        assert_eq!(SearchQuery::parse("13.,80"), Err(QueryError));
        assert_eq!(SearchQuery::parse(".5,80"), Err(QueryError));
        assert_eq!(SearchQuery::parse("13,"), Err(QueryError));
        assert_eq!(SearchQuery::parse("13,80,1"), Err(QueryError));
        assert_eq!(SearchQuery::parse("1e2,80"), Err(QueryError));
    }

    #[test]
    fn non_city_inputs_reject() {
        assert_eq!(SearchQuery::parse("42"), Err(QueryError));
        assert_eq!(SearchQuery::parse("abc123"), Err(QueryError));
        assert_eq!(SearchQuery::parse("a"), Err(QueryError));
        assert_eq!(SearchQuery::parse(""), Err(QueryError));
        assert_eq!(SearchQuery::parse("St. Louis"), Err(QueryError));
    }

    #[test]
    fn city_params_carry_the_name() {
        let query = SearchQuery::City("Chennai".into());
        assert_eq!(query.params(), vec![("city", "Chennai".to_string())]);
    }

    #[test]
    fn coordinate_params_carry_both_axes() {
        let query = SearchQuery::Coords { lat: 13.0827, lon: 80.2707 };
        assert_eq!(
            query.params(),
            vec![("lat", "13.0827".to_string()), ("lon", "80.2707".to_string())]
        );
    }
}
