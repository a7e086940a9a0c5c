pub mod errors;

use chrono::NaiveDate;
use log::debug;
use rand::Rng;
use ureq::Agent;
use crate::comic::{select_comic, ComicSelection};
use crate::manager_xkcd::errors::XkcdError;
use crate::models::xkcd::{ComicInfo, ComicRecord};
use crate::state::MarkerStore;

const XKCD_URL: &str = "https://xkcd.com";

/// The comic to show in the digest
#[derive(Clone, Debug)]
pub struct ComicPick {
    pub record: ComicRecord,
    pub is_new: bool,
    pub label: String,
}

impl ComicPick {
    pub fn link(&self) -> String {
        format!("{}/{}", XKCD_URL, self.record.number)
    }
}

pub struct Xkcd {
    agent: Agent,
}

impl Xkcd {
    pub fn new(agent: Agent) -> Xkcd {
        Self { agent }
    }

    /// Returns the latest comic if it is recent and hasn't been shown as new before,
    /// otherwise a random comic
    ///
    /// # Arguments
    ///
    /// * 'today' - the local date
    /// * 'store' - storage holding the number of the last comic shown as new
    /// * 'rng' - random source for the fallback pick
    pub fn comic<S, R>(&self, today: NaiveDate, store: &mut S, rng: &mut R) -> Result<ComicPick, XkcdError>
    where
        S: MarkerStore + ?Sized,
        R: Rng,
    {
        let latest = self.fetch(format!("{}/info.0.json", XKCD_URL))?;

        let selection = select_comic(&latest, today, store, rng);
        debug!("Latest xkcd is #{}, showing #{}", latest.number, selection.number());

        match selection {
            ComicSelection::New(n) => Ok(ComicPick {
                record: latest,
                is_new: true,
                label: format!("New comic #{}", n),
            }),
            ComicSelection::Random(n) => {
                let record = self.fetch(format!("{}/{}/info.0.json", XKCD_URL, n))?;
                let label = format!("No new comic, here's a random one #{}", record.number);
                Ok(ComicPick { record, is_new: false, label })
            }
        }
    }

    fn fetch(&self, url: String) -> Result<ComicRecord, XkcdError> {
        let json = self.agent
            .get(url.as_str())
            .call()?
            .body_mut()
            .read_to_string()?;

        let info: ComicInfo = serde_json::from_str(&json)?;

        info.to_record()
            .ok_or_else(|| XkcdError(format!("invalid publication date in {}", url)))
    }
}
