use chrono::NaiveDate;

/// A geocoded place: the single best match for a user query.
///
/// Created once per successful geocode and replaced wholesale by the next
/// one; never merged.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub country_flag: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

/// One day of the forecast, assembled from the daily response arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub weather_code: i32,
    pub temp_min: f64,
    pub temp_max: f64,
}

const REGIONAL_INDICATOR_OFFSET: u32 = 0x1F1E6 - 'A' as u32;

/// Map an ISO 3166 country code to its regional-indicator flag glyph.
///
/// Characters outside A-Z are dropped, so an unexpected code degrades to an
/// empty string rather than stray symbols.
pub fn country_flag(code: &str) -> String {
    code.chars()
        .filter(char::is_ascii_alphabetic)
        .filter_map(|c| char::from_u32(c.to_ascii_uppercase() as u32 + REGIONAL_INDICATOR_OFFSET))
        .collect()
}
