//! Pure presentation helpers: weather glyphs, day labels, temperature
//! rounding. No state, no I/O.

use chrono::NaiveDate;

/// Map a WMO weather code to a display glyph.
///
/// Codes are grouped by what they look like from a window, not by the full
/// WMO taxonomy.
pub fn weather_icon(code: i32) -> &'static str {
    match code {
        0 => "\u{2600}\u{FE0F}",                                // clear sky
        1 => "\u{1F324}",                                       // mainly clear
        2 => "\u{26C5}\u{FE0F}",                                // partly cloudy
        3 => "\u{2601}\u{FE0F}",                                // overcast
        45 | 48 => "\u{1F32B}",                                 // fog
        51 | 56 | 61 | 66 | 80 => "\u{1F326}",                  // light rain / drizzle
        53 | 55 | 57 | 63 | 65 | 67 | 81 | 82 => "\u{1F327}",   // rain
        71 | 73 | 75 | 77 | 85 | 86 => "\u{1F328}",             // snow
        95 => "\u{1F329}",                                      // thunderstorm
        96 | 99 => "\u{26C8}",                                  // thunderstorm with hail
        _ => "\u{2753}",
    }
}

/// "Today" for the leading entry, short weekday name otherwise.
pub fn day_label(date: NaiveDate, is_today: bool) -> String {
    if is_today {
        "Today".to_string()
    } else {
        date.format("%a").to_string()
    }
}

/// Temperature range for one day: minimum rounds down, maximum up.
pub fn temp_range(min: f64, max: f64) -> String {
    format!("{}\u{B0} \u{2014} {}\u{B0}", min.floor() as i64, max.ceil() as i64)
}
