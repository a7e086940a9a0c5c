use std::str::FromStr;
use std::thread;
use std::time::Duration;
use chrono::{DateTime, Local, TimeZone};
use log::info;
use crate::errors::SchedulerError;

/// Longest single sleep while waiting, keeps the wait accurate across clock adjustments
const MAX_SLEEP: Duration = Duration::from_secs(60);

/// Recurring trigger driven by a cron expression
pub struct Scheduler {
    expr: String,
    schedule: cron::Schedule,
}

impl Scheduler {
    /// Returns a new Scheduler
    ///
    /// Standard 5-field expressions (min hr dom month dow) get a leading seconds field
    /// since the cron crate expects 6 fields.
    ///
    /// # Arguments
    ///
    /// * 'cron_expr' - cron expression, e.g. "0 8 * * *" for 08:00 every day
    pub fn new(cron_expr: &str) -> Result<Scheduler, SchedulerError> {
        let expr = normalize_cron_expr(cron_expr);
        let schedule = cron::Schedule::from_str(&expr)
            .map_err(|e| SchedulerError::CronParse(format!("{}: {}", cron_expr, e)))?;

        Ok(Scheduler { expr, schedule })
    }

    /// Returns the first fire time strictly after the given time
    ///
    /// # Arguments
    ///
    /// * 'after' - date and time to search from
    pub fn next_after<Tz: TimeZone>(&self, after: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        self.schedule.after(after).next()
    }

    /// Runs the job every time the schedule fires, never returns unless the schedule
    /// has no further occurrences
    ///
    /// # Arguments
    ///
    /// * 'job' - the job to run
    pub fn run<F: FnMut()>(&self, mut job: F) -> Result<(), SchedulerError> {
        loop {
            let next = self.next_after(&Local::now())
                .ok_or_else(|| SchedulerError::NoOccurrence(self.expr.clone()))?;
            info!("Next run at {}", next.format("%Y-%m-%d %H:%M:%S"));

            wait_until(next);
            job();
        }
    }
}

/// Sleeps until the given time has been reached
///
/// # Arguments
///
/// * 'at' - the time to wait for
fn wait_until(at: DateTime<Local>) {
    loop {
        let remaining = at - Local::now();
        match remaining.to_std() {
            Ok(d) if !d.is_zero() => thread::sleep(d.min(MAX_SLEEP)),
            _ => return,
        }
    }
}

/// Normalise a cron expression to 6-field format
///
/// # Arguments
///
/// * 'expr' - 5 or 6 field cron expression
fn normalize_cron_expr(expr: &str) -> String {
    let trimmed = expr.trim();
    if trimmed.split_whitespace().count() == 5 {
        format!("0 {}", trimmed)
    } else {
        trimmed.to_string()
    }
}
