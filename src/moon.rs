use chrono::{NaiveDate, NaiveDateTime};

/// Length of a synodic month in days
const LUNAR_CYCLE: f64 = 29.53058867;

/// Upper bound (days into the cycle) of each phase, the last phase takes the rest
const PHASES: [(f64, &str, &str); 7] = [
    (1.84566, "New Moon", "🌑"),
    (7.38264, "Waxing Crescent", "🌒"),
    (9.22831, "First Quarter", "🌓"),
    (14.76529, "Waxing Gibbous", "🌔"),
    (16.61096, "Full Moon", "🌕"),
    (22.14794, "Waning Gibbous", "🌖"),
    (23.99361, "Last Quarter", "🌗"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoonPhase {
    pub name: &'static str,
    pub emoji: &'static str,
}

fn reference_new_moon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 11)
        .and_then(|d| d.and_hms_opt(11, 57, 0))
        .unwrap_or_default()
}

/// Returns the moon phase at the given (local) date and time
///
/// # Arguments
///
/// * 'now' - local date and time
pub fn moon_phase(now: NaiveDateTime) -> MoonPhase {
    let days = (now - reference_new_moon()).num_seconds() as f64 / 86400.0;
    let position = days.rem_euclid(LUNAR_CYCLE);

    PHASES
        .iter()
        .find(|(limit, _, _)| position < *limit)
        .map_or(MoonPhase { name: "Waning Crescent", emoji: "🌘" }, |(_, name, emoji)| {
            MoonPhase { name: *name, emoji: *emoji }
        })
}
