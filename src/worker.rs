use std::fmt;
use std::thread;
use std::time::Duration;
use chrono::{DateTime, Local};
use log::{debug, error, info, warn};
use rand::Rng;
use crate::config::Config;
use crate::digest::{render, SharedContent};
use crate::forecast::{display_window, regularize};
use crate::initialization::Mgr;
use crate::manager_mail::Mailer;
use crate::manager_weather::WeatherSource;
use crate::models::forecast::ForecastSample;
use crate::recipients::{load_recipients, Recipient};

/// Outcome of a complete run
#[derive(Default, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub sent: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{} emails sent successfully ({} skipped, {} failed)",
               self.sent, self.total, self.skipped, self.failed)
    }
}

enum Outcome {
    Sent,
    Skipped,
    Failed,
}

/// Runs one daily brief: loads recipients, fetches shared content once and then mails
/// each recipient in turn. Nothing in here is fatal, failures are logged and counted.
///
/// # Arguments
///
/// * 'config' - the configuration
/// * 'mgr' - managers used for fetching content and sending mail
pub fn run(config: &Config, mgr: &mut Mgr) -> RunSummary {
    let now = Local::now();
    info!("Running scheduled task at {}", now.format("%Y-%m-%d %H:%M:%S"));

    let recipients = match load_recipients(&config.files.recipients) {
        Ok(r) => r,
        Err(e) => {
            error!("Could not load {}: {}", config.files.recipients, e);
            Vec::new()
        }
    };
    info!("Loaded {} recipient(s) from {}", recipients.len(), config.files.recipients);

    if recipients.is_empty() {
        warn!("No recipients found, no email sent");
        return RunSummary::default();
    }

    let mut rng = rand::thread_rng();
    let shared = fetch_shared(config, mgr, now, &mut rng);
    let delay = Duration::from_secs(config.general.send_delay_secs);

    let summary = deliver_all(&mgr.weather, &mgr.mail, &recipients, &shared, now, delay);

    info!("Completed: {}", summary);
    summary
}

/// Mails every recipient in turn, a failing recipient never stops the batch
///
/// # Arguments
///
/// * 'weather' - source of per recipient weather
/// * 'mailer' - mail delivery
/// * 'recipients' - recipients in list order
/// * 'shared' - content shared by all recipients
/// * 'now' - date and time of the run
/// * 'delay' - pause between two sends
fn deliver_all<W, M>(
    weather: &W,
    mailer: &M,
    recipients: &[Recipient],
    shared: &SharedContent,
    now: DateTime<Local>,
    delay: Duration) -> RunSummary
where
    W: WeatherSource,
    M: Mailer,
{
    let mut summary = RunSummary { total: recipients.len(), ..Default::default() };

    for (i, recipient) in recipients.iter().enumerate() {
        match deliver(weather, mailer, recipient, shared, now) {
            Outcome::Sent => summary.sent += 1,
            Outcome::Skipped => summary.skipped += 1,
            Outcome::Failed => summary.failed += 1,
        }

        if i + 1 < recipients.len() {
            thread::sleep(delay);
        }
    }

    summary
}

/// Fetches content that is the same for every recipient, a failing source leaves its
/// section out
///
/// # Arguments
///
/// * 'config' - the configuration
/// * 'mgr' - managers used for fetching content
/// * 'now' - date and time of the run
/// * 'rng' - random source for history, movie and comic picks
fn fetch_shared<R: Rng>(config: &Config, mgr: &mut Mgr, now: DateTime<Local>, rng: &mut R) -> SharedContent {
    let today = now.date_naive();
    let mut shared = SharedContent::default();

    if let Some(news) = &mgr.news {
        match news.top_stories(config.news.num_stories, today) {
            Ok(stories) => {
                info!("Found {} news articles", stories.len());
                shared.news = stories;
            }
            Err(e) => warn!("News: {}", e),
        }
    }

    match mgr.history.on_this_day(today, rng) {
        Ok(Some(fact)) => {
            info!("Found historical fact from {}", fact.year.map_or("unknown year".to_string(), |y| y.to_string()));
            shared.history = Some(fact);
        }
        Ok(None) => info!("No historical fact found"),
        Err(e) => warn!("History: {}", e),
    }

    match mgr.market.sp500() {
        Ok(Some(m)) => {
            info!("S&P 500: {:+.2} ({:+.2}%)", m.change, m.percent_change);
            shared.market = Some(m);
        }
        Ok(None) => info!("No stock market data found"),
        Err(e) => warn!("Market: {}", e),
    }

    if let Some(movies) = &mgr.movies {
        match movies.recommendation(rng) {
            Ok(Some(movie)) => {
                info!("Movie recommendation: {} ({}/10)", movie.title, movie.rating);
                shared.movie = Some(movie);
            }
            Ok(None) => info!("No movie recommendation found"),
            Err(e) => warn!("Movies: {}", e),
        }
    }

    match mgr.xkcd.comic(today, mgr.comic_state.as_mut(), rng) {
        Ok(comic) => {
            info!("Found XKCD ({}) #{}: {}",
                  if comic.is_new { "NEW" } else { "RANDOM" }, comic.record.number, comic.record.title);
            shared.comic = Some(comic);
        }
        Err(e) => warn!("XKCD: {}", e),
    }

    shared
}

/// Returns why a recipient can't be mailed, if so
///
/// # Arguments
///
/// * 'recipient' - the recipient to check
fn skip_reason(recipient: &Recipient) -> Option<&'static str> {
    if recipient.email.is_empty() {
        Some("no email address")
    } else if recipient.city.is_empty() {
        Some("no city specified")
    } else {
        None
    }
}

/// Fetches weather for a recipient, renders the digest and sends it
///
/// # Arguments
///
/// * 'weather' - source of per recipient weather
/// * 'mailer' - mail delivery
/// * 'recipient' - the recipient
/// * 'shared' - content shared by all recipients
/// * 'now' - date and time of the run
fn deliver<W, M>(weather: &W, mailer: &M, recipient: &Recipient, shared: &SharedContent, now: DateTime<Local>) -> Outcome
where
    W: WeatherSource,
    M: Mailer,
{
    if let Some(reason) = skip_reason(recipient) {
        warn!("Skipping recipient {}: {}", recipient.name, reason);
        return Outcome::Skipped;
    }

    info!("Processing weather for {} ({}) in {}, {}",
          recipient.name, recipient.email, recipient.city,
          if recipient.state.is_empty() { "N/A" } else { recipient.state.as_str() });

    let report = match weather.weather(recipient) {
        Ok(r) => r,
        Err(e) => {
            error!("Weather for {} failed, no email sent to {}: {}", recipient.city, recipient.email, e);
            return Outcome::Skipped;
        }
    };

    let series: Vec<ForecastSample> = match display_window(&now) {
        Some(window) => regularize(&report.samples, window),
        None => {
            warn!("No forecast window for {}, sending without forecast", now.date_naive());
            Vec::new()
        }
    };

    let digest = render(&recipient.name, &report.current, &series, shared, now);
    debug!("Preview for {}: {}", recipient.email, digest.preview);

    match mailer.send_mail(&recipient.name, &recipient.email, &digest.subject, digest.html) {
        Ok(()) => {
            info!("Email sent to {} ({})", recipient.name, recipient.email);
            Outcome::Sent
        }
        Err(e) => {
            error!("Error sending email to {}: {}", recipient.email, e);
            Outcome::Failed
        }
    }
}
