use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::LookupError,
    model::{Place, country_flag},
};

const GEOCODING_BASE_URL: &str = "https://geocoding-api.open-meteo.com";

/// Client for the Open-Meteo geocoding endpoint.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    http: Client,
    base_url: String,
}

impl GeocodeClient {
    pub fn new() -> Self {
        Self::with_base_url(GEOCODING_BASE_URL)
    }

    /// Point the client at a different host, e.g. a local mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Resolve a free-text place name to the single best match.
    ///
    /// The first returned result wins; a response without results maps to
    /// [`LookupError::NotFound`]. The query is sent percent-encoded.
    pub async fn resolve(&self, name: &str) -> Result<Place, LookupError> {
        let url = format!("{}/v1/search", self.base_url);

        let res = self.http.get(&url).query(&[("name", name)]).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(LookupError::Status {
                endpoint: "geocoding",
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: GeoResponse =
            serde_json::from_str(&body).map_err(|e| LookupError::Malformed {
                endpoint: "geocoding",
                detail: e.to_string(),
            })?;

        let hit = parsed
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| LookupError::NotFound(name.to_string()))?;

        Ok(Place {
            country_flag: country_flag(&hit.country_code),
            name: hit.name,
            latitude: hit.latitude,
            longitude: hit.longitude,
            timezone: hit.timezone,
        })
    }
}

impl Default for GeocodeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    results: Option<Vec<GeoResult>>,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    name: String,
    latitude: f64,
    longitude: f64,
    timezone: String,
    country_code: String,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn two_results() -> serde_json::Value {
        json!({
            "results": [
                {
                    "name": "Berlin",
                    "latitude": 52.52,
                    "longitude": 13.405,
                    "timezone": "Europe/Berlin",
                    "country_code": "DE"
                },
                {
                    "name": "Berlin",
                    "latitude": 44.47,
                    "longitude": -71.19,
                    "timezone": "America/New_York",
                    "country_code": "US"
                }
            ]
        })
    }

    #[tokio::test]
    async fn first_result_wins() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", "Berlin"))
            .respond_with(ResponseTemplate::new(200).set_body_json(two_results()))
            .mount(&server)
            .await;

        let client = GeocodeClient::with_base_url(server.uri());
        let place = client.resolve("Berlin").await.expect("lookup should succeed");

        assert_eq!(place.name, "Berlin");
        assert_eq!(place.latitude, 52.52);
        assert_eq!(place.longitude, 13.405);
        assert_eq!(place.timezone, "Europe/Berlin");
        assert_eq!(place.country_flag, "\u{1F1E9}\u{1F1EA}");
    }

    #[tokio::test]
    async fn missing_results_field_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = GeocodeClient::with_base_url(server.uri());
        let err = client.resolve("xyzNoSuchPlace").await.unwrap_err();

        assert!(matches!(err, LookupError::NotFound(ref q) if q == "xyzNoSuchPlace"));
    }

    #[tokio::test]
    async fn empty_results_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
            .mount(&server)
            .await;

        let client = GeocodeClient::with_base_url(server.uri());
        let err = client.resolve("nowhere").await.unwrap_err();

        assert!(matches!(err, LookupError::NotFound(_)));
    }

    #[tokio::test]
    async fn query_is_percent_encoded() {
        let server = MockServer::start().await;
        // The matcher compares decoded values, so this only matches if the
        // space survived the request URL intact.
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", "New York"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{
                    "name": "New York",
                    "latitude": 40.71,
                    "longitude": -74.01,
                    "timezone": "America/New_York",
                    "country_code": "US"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeocodeClient::with_base_url(server.uri());
        let place = client.resolve("New York").await.expect("lookup should succeed");
        assert_eq!(place.name, "New York");
    }

    #[tokio::test]
    async fn upstream_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = GeocodeClient::with_base_url(server.uri());
        let err = client.resolve("Berlin").await.unwrap_err();

        assert!(matches!(
            err,
            LookupError::Status { endpoint: "geocoding", .. }
        ));
    }

    #[tokio::test]
    async fn garbage_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = GeocodeClient::with_base_url(server.uri());
        let err = client.resolve("Berlin").await.unwrap_err();

        assert!(matches!(
            err,
            LookupError::Malformed { endpoint: "geocoding", .. }
        ));
    }
}
