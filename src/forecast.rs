use chrono::{DateTime, Days, TimeZone, Timelike};
use crate::models::forecast::{ForecastSample, ForecastWindow};

/// Cadence of the display series in seconds
pub const TICK_SECONDS: i64 = 7200;

/// First and last hour of the display window (local time)
const FIRST_HOUR: u32 = 8;
const LAST_HOUR: u32 = 22;

/// From this hour on the digest shows tomorrow's forecast instead of today's
const TOMORROW_FROM_HOUR: u32 = 10;

/// Produces a forecast series with one sample per two-hour tick inside the window.
///
/// Upstream data comes either as hourly samples or as 3-hourly samples. Input where
/// the first two samples are at most two hours apart is considered already regular and
/// is only filtered to the window. Otherwise every tick from window start to window end
/// (both inclusive) gets a sample interpolated between the closest samples on each side,
/// or a verbatim copy of the only neighbouring sample at the edges of the input.
///
/// The samples must be sorted ascending by timestamp.
///
/// # Arguments
///
/// * 'samples' - forecast samples sorted by timestamp
/// * 'window' - inclusive display window
pub fn regularize(samples: &[ForecastSample], window: ForecastWindow) -> Vec<ForecastSample> {
    if is_regular(samples) {
        return samples
            .iter()
            .filter(|s| window.contains(s.timestamp))
            .cloned()
            .collect();
    }

    let mut result: Vec<ForecastSample> = Vec::new();

    // Index of the first sample later than the current tick, ticks are ascending so
    // the cursor only ever moves forward
    let mut next: usize = 0;
    let mut tick = window.start;
    while tick <= window.end {
        while next < samples.len() && samples[next].timestamp <= tick {
            next += 1;
        }

        let before = next.checked_sub(1).map(|i| &samples[i]);
        let after = samples.get(next);

        match (before, after) {
            (Some(b), Some(a)) => result.push(interpolate(b, a, tick)),
            (Some(s), None) | (None, Some(s)) => result.push(s.at(tick)),
            (None, None) => {}
        }

        tick += TICK_SECONDS;
    }

    result
}

/// Returns true if the samples need no interpolation
///
/// # Arguments
///
/// * 'samples' - forecast samples sorted by timestamp
fn is_regular(samples: &[ForecastSample]) -> bool {
    match samples {
        [first, second, ..] => second.timestamp - first.timestamp <= TICK_SECONDS,
        _ => true,
    }
}

/// Linear interpolation of the numeric values between two samples at the given tick.
/// Weather code and description are taken from whichever sample is nearest in time,
/// a tie goes to the later sample.
///
/// # Arguments
///
/// * 'before' - sample at or before the tick
/// * 'after' - sample after the tick
/// * 'tick' - timestamp of the resulting sample
pub fn interpolate(before: &ForecastSample, after: &ForecastSample, tick: i64) -> ForecastSample {
    let span = after.timestamp - before.timestamp;
    if span <= 0 {
        return before.at(tick);
    }

    let factor = (tick - before.timestamp) as f64 / span as f64;
    let nearest = if factor < 0.5 { before } else { after };

    ForecastSample {
        timestamp: tick,
        temperature: lerp(before.temperature, after.temperature, factor),
        feels_like: lerp(before.feels_like, after.feels_like, factor),
        weather_code: nearest.weather_code,
        weather_description: nearest.weather_description.clone(),
        precipitation_probability: lerp(
            before.precipitation_probability,
            after.precipitation_probability,
            factor,
        ),
    }
}

fn lerp(from: f64, to: f64, factor: f64) -> f64 {
    from + (to - from) * factor
}

/// Returns the window the digest shows a forecast for, 08:00 to 22:00 local time.
/// Before 10 o'clock that is today, later in the day it is tomorrow.
///
/// Returns None if the window boundaries don't exist on the target date
///
/// # Arguments
///
/// * 'now' - current date and time
pub fn display_window<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<ForecastWindow> {
    let mut date = now.date_naive();
    if now.hour() >= TOMORROW_FROM_HOUR {
        date = date.checked_add_days(Days::new(1))?;
    }

    let tz = now.timezone();
    let start = tz.from_local_datetime(&date.and_hms_opt(FIRST_HOUR, 0, 0)?).earliest()?;
    let end = tz.from_local_datetime(&date.and_hms_opt(LAST_HOUR, 0, 0)?).latest()?;

    Some(ForecastWindow { start: start.timestamp(), end: end.timestamp() })
}

/// Returns rounded high and low temperatures for the series, or the fallback
/// temperature for both if the series is empty
///
/// # Arguments
///
/// * 'series' - forecast series
/// * 'fallback' - temperature to use when there is no forecast
pub fn high_low(series: &[ForecastSample], fallback: f64) -> (i64, i64) {
    let temps = series
        .iter()
        .map(|s| s.temperature.round() as i64)
        .collect::<Vec<i64>>();

    let fallback = fallback.round() as i64;
    let high = temps.iter().max().copied().unwrap_or(fallback);
    let low = temps.iter().min().copied().unwrap_or(fallback);

    (high, low)
}

/// Translates an OpenWeatherMap condition code to an emoji.
/// Codes outside the known groups fall back to keywords in the description.
///
/// # Arguments
///
/// * 'code' - OpenWeatherMap condition id
/// * 'description' - condition description
pub fn weather_emoji(code: u32, description: &str) -> &'static str {
    match code {
        200..=232 => return "⛈️",
        300..=321 => return "🌦️",
        500..=504 | 520..=531 => return "🌧️",
        600..=622 => return "❄️",
        701..=781 => return "🌫️",
        800 => return "☀️",
        801 => return "🌤️",
        802 => return "⛅",
        803 | 804 => return "☁️",
        _ => {}
    }

    let desc = description.to_lowercase();
    if desc.contains("clear") || desc.contains("sunny") {
        "☀️"
    } else if desc.contains("cloud") {
        if desc.contains("few") || desc.contains("scattered") { "⛅" } else { "☁️" }
    } else if desc.contains("rain") {
        if desc.contains("drizzle") { "🌦️" } else { "🌧️" }
    } else if desc.contains("storm") || desc.contains("thunder") {
        "⛈️"
    } else if desc.contains("snow") {
        "❄️"
    } else if desc.contains("fog") || desc.contains("mist") || desc.contains("haze") {
        "🌫️"
    } else {
        "🌤️"
    }
}
