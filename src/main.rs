use argh::FromArgs;
use log::info;
use crate::config::load_config;
use crate::initialization::init;
use crate::logging::setup_logger;
use crate::scheduler::Scheduler;

mod comic;
mod config;
mod digest;
mod errors;
mod forecast;
mod initialization;
mod logging;
mod manager_history;
mod manager_mail;
mod manager_market;
mod manager_movies;
mod manager_news;
mod manager_weather;
mod manager_xkcd;
mod models;
mod moon;
mod recipients;
mod scheduler;
mod state;
mod worker;

/// User agent sent to services that ask clients to identify themselves
pub const USER_AGENT: &str = concat!("dailybrief/", env!("CARGO_PKG_VERSION"));

/// Sends a daily brief email with weather, news and more to everyone on the recipient list
#[derive(FromArgs)]
struct Args {
    /// path to the configuration file (default: config.toml)
    #[argh(option, short = 'c', default = "String::from(\"config.toml\")")]
    config: String,

    /// run once immediately and exit instead of waiting for the schedule
    #[argh(switch)]
    once: bool,
}

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();

    let config = load_config(&args.config)?;
    setup_logger(&config.general)?;
    info!("dailybrief version: {}", env!("CARGO_PKG_VERSION"));

    let mut mgr = init(&config)?;

    if args.once {
        info!("Running in single-execution mode");
        worker::run(&config, &mut mgr);
        return Ok(());
    }

    let scheduler = Scheduler::new(&config.schedule.cron)?;
    info!("Daily brief scheduler started with schedule '{}'", config.schedule.cron);

    scheduler.run(|| {
        worker::run(&config, &mut mgr);
    })?;

    Ok(())
}
