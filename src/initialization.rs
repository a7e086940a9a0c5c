use std::time::Duration;
use log::{info, warn};
use ureq::Agent;
use crate::config::Config;
use crate::errors::InitError;
use crate::manager_history::History;
use crate::manager_mail::Mail;
use crate::manager_market::Market;
use crate::manager_movies::Movies;
use crate::manager_news::News;
use crate::manager_weather::OpenWeather;
use crate::manager_xkcd::Xkcd;
use crate::state::{FileMarkerStore, MarkerStore, MemoryMarkerStore};

/// All managers needed during a run
pub struct Mgr {
    pub weather: OpenWeather,
    pub news: Option<News>,
    pub history: History,
    pub market: Market,
    pub movies: Option<Movies>,
    pub xkcd: Xkcd,
    pub mail: Mail,
    pub comic_state: Box<dyn MarkerStore>,
}

/// Initializes and returns the managers used by the worker
///
/// # Arguments
///
/// * 'config' - the configuration
pub fn init(config: &Config) -> Result<Mgr, InitError> {
    let timeout = Duration::from_secs(config.general.http_timeout_secs);
    let agent: Agent = Agent::config_builder()
        .timeout_global(Some(timeout))
        .build()
        .into();

    let news = optional_key(&config.news.api_key, "news")
        .map(|key| News::new(agent.clone(), key));
    let movies = optional_key(&config.movies.api_key, "movie recommendation")
        .map(|key| Movies::new(agent.clone(), key));

    let comic_state: Box<dyn MarkerStore> = if config.files.comic_state.is_empty() {
        warn!("No comic state file configured, new comics may be announced more than once");
        Box::new(MemoryMarkerStore::default())
    } else {
        Box::new(FileMarkerStore::new(&config.files.comic_state))
    };

    let mgr = Mgr {
        weather: OpenWeather::new(
            agent.clone(),
            config.weather.api_key.clone(),
            config.weather.country_code.clone()),
        news,
        history: History::new(agent.clone()),
        market: Market::new(agent.clone()),
        movies,
        xkcd: Xkcd::new(agent),
        mail: Mail::new(&config.mail, timeout)?,
        comic_state,
    };

    info!("Managers initialized, http timeout {}s", config.general.http_timeout_secs);

    Ok(mgr)
}

/// Returns a usable api key or logs that the section will be skipped
///
/// # Arguments
///
/// * 'key' - configured api key
/// * 'section' - name of the section depending on the key
fn optional_key(key: &Option<String>, section: &str) -> Option<String> {
    match key.as_deref().map(str::trim) {
        Some(k) if !k.is_empty() => Some(k.to_string()),
        _ => {
            warn!("No api key configured, skipping {} section", section);
            None
        }
    }
}
