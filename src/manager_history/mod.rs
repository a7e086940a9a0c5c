pub mod errors;

use chrono::{Datelike, NaiveDate};
use rand::Rng;
use rand::seq::SliceRandom;
use ureq::Agent;
use crate::manager_history::errors::HistoryError;
use crate::models::wikipedia::{Event, HistoricalFact, OnThisDay};
use crate::USER_AGENT;

const ON_THIS_DAY_URL: &str = "https://en.wikipedia.org/api/rest_v1/feed/onthisday/events";

pub struct History {
    agent: Agent,
}

impl History {
    pub fn new(agent: Agent) -> History {
        Self { agent }
    }

    /// Fetches a random historical event that happened on the same month and day
    ///
    /// # Arguments
    ///
    /// * 'today' - the date to find events for
    /// * 'rng' - random source for picking the event
    pub fn on_this_day<R: Rng>(&self, today: NaiveDate, rng: &mut R) -> Result<Option<HistoricalFact>, HistoryError> {
        let url = format!("{}/{:02}/{:02}", ON_THIS_DAY_URL, today.month(), today.day());

        let json = self.agent
            .get(url)
            .header("User-Agent", USER_AGENT)
            .call()?
            .body_mut()
            .read_to_string()?;

        let on_this_day: OnThisDay = serde_json::from_str(&json)?;

        Ok(pick_event(&on_this_day.events, rng))
    }
}

/// Picks a random event, preferring those with a year and a reasonably long text
///
/// # Arguments
///
/// * 'events' - events to choose from
/// * 'rng' - random source
fn pick_event<R: Rng>(events: &[Event], rng: &mut R) -> Option<HistoricalFact> {
    let described = events
        .iter()
        .filter(|e| e.year.is_some() && e.text.as_ref().is_some_and(|t| t.chars().count() > 20))
        .collect::<Vec<&Event>>();

    let event = if described.is_empty() {
        events.choose(rng)?
    } else {
        *described.choose(rng)?
    };

    Some(HistoricalFact {
        year: event.year,
        text: event.text.clone().unwrap_or_default(),
        url: event.pages
            .first()
            .and_then(|p| p.content_urls.desktop.page.clone())
            .filter(|u| !u.is_empty()),
    })
}
