use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::LookupError,
    model::{ForecastDay, Place},
};

const FORECAST_BASE_URL: &str = "https://api.open-meteo.com";

/// Daily variables requested from the forecast endpoint. The response
/// arrays come back in this order, index-aligned with `time`.
const DAILY_FIELDS: &str = "weathercode,temperature_2m_max,temperature_2m_min";

/// Client for the Open-Meteo forecast endpoint.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    http: Client,
    base_url: String,
}

impl ForecastClient {
    pub fn new() -> Self {
        Self::with_base_url(FORECAST_BASE_URL)
    }

    /// Point the client at a different host, e.g. a local mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the multi-day daily forecast for a resolved place.
    pub async fn daily(&self, place: &Place) -> Result<Vec<ForecastDay>, LookupError> {
        let url = format!("{}/v1/forecast", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", place.latitude.to_string()),
                ("longitude", place.longitude.to_string()),
                ("timezone", place.timezone.clone()),
                ("daily", DAILY_FIELDS.to_string()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(LookupError::Status {
                endpoint: "forecast",
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: ForecastResponse =
            serde_json::from_str(&body).map_err(|e| LookupError::Malformed {
                endpoint: "forecast",
                detail: e.to_string(),
            })?;

        assemble_days(parsed.daily)
    }
}

impl Default for ForecastClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: DailySeries,
}

#[derive(Debug, Deserialize)]
struct DailySeries {
    time: Vec<String>,
    weathercode: Vec<i32>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
}

/// Zip the four parallel arrays into one entry per day.
///
/// Arrays of unequal length mean the response cannot be trusted; zipping to
/// the shortest would silently misalign dates and temperatures.
fn assemble_days(daily: DailySeries) -> Result<Vec<ForecastDay>, LookupError> {
    let DailySeries {
        time,
        weathercode,
        temperature_2m_max,
        temperature_2m_min,
    } = daily;

    let len = time.len();
    if weathercode.len() != len
        || temperature_2m_max.len() != len
        || temperature_2m_min.len() != len
    {
        return Err(LookupError::Malformed {
            endpoint: "forecast",
            detail: format!(
                "daily arrays disagree on length: {} dates, {} codes, {} maxima, {} minima",
                len,
                weathercode.len(),
                temperature_2m_max.len(),
                temperature_2m_min.len()
            ),
        });
    }

    time.into_iter()
        .zip(weathercode)
        .zip(temperature_2m_max.into_iter().zip(temperature_2m_min))
        .map(|((date, weather_code), (temp_max, temp_min))| {
            let date = date.parse::<NaiveDate>().map_err(|e| LookupError::Malformed {
                endpoint: "forecast",
                detail: format!("bad date {date:?}: {e}"),
            })?;

            Ok(ForecastDay {
                date,
                weather_code,
                temp_min,
                temp_max,
            })
        })
        .collect()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}
