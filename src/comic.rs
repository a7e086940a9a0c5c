use chrono::NaiveDate;
use log::warn;
use rand::Rng;
use crate::models::xkcd::ComicRecord;
use crate::state::MarkerStore;

/// The one comic number xkcd never published
const MISSING_COMIC: u32 = 404;

/// Which comic to show and how to label it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComicSelection {
    /// The latest comic, shown as new for the first and only time
    New(u32),
    /// A randomly chosen comic number
    Random(u32),
}

impl ComicSelection {
    pub fn number(&self) -> u32 {
        match self {
            ComicSelection::New(n) | ComicSelection::Random(n) => *n,
        }
    }
}

/// Returns true if the publication date is today or yesterday
///
/// # Arguments
///
/// * 'published' - publication date of the comic
/// * 'today' - the caller's local date
pub fn is_recent(published: NaiveDate, today: NaiveDate) -> bool {
    published == today || today.pred_opt() == Some(published)
}

/// Decides between showing the latest comic as new or a random comic.
///
/// The latest comic is selected as new only if it was published today or yesterday and
/// the marker doesn't already hold its number, in which case the marker is updated.
/// A random pick never touches the marker. A marker that can't be read counts as no marker,
/// and failing to save the marker doesn't change the decision.
///
/// # Arguments
///
/// * 'latest' - the latest published comic
/// * 'today' - the caller's local date
/// * 'store' - storage holding the number of the last comic shown as new
/// * 'rng' - random source for the fallback pick
pub fn select_comic<S, R>(latest: &ComicRecord, today: NaiveDate, store: &mut S, rng: &mut R) -> ComicSelection
where
    S: MarkerStore + ?Sized,
    R: Rng,
{
    let marker = store.get().unwrap_or_else(|e| {
        warn!("Ignoring comic marker: {}", e);
        None
    });

    if is_recent(latest.published, today) && marker != Some(latest.number) {
        if let Err(e) = store.set(latest.number) {
            warn!("Could not save comic marker {}: {}", latest.number, e);
        }
        ComicSelection::New(latest.number)
    } else {
        ComicSelection::Random(random_number(latest.number, rng))
    }
}

/// Draws a comic number uniformly from 1 to latest, leaving out the missing comic
///
/// # Arguments
///
/// * 'latest' - number of the latest comic
/// * 'rng' - random source
fn random_number<R: Rng>(latest: u32, rng: &mut R) -> u32 {
    if latest < MISSING_COMIC {
        return rng.gen_range(1..=latest.max(1));
    }

    let n = rng.gen_range(1..latest);
    if n >= MISSING_COMIC { n + 1 } else { n }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use crate::errors::StateError;
    use crate::state::MemoryMarkerStore;

    fn latest(number: u32, published: NaiveDate) -> ComicRecord {
        ComicRecord {
            number,
            title: "Latest".to_string(),
            image_url: "https://imgs.xkcd.com/comics/latest.png".to_string(),
            alt_text: "alt".to_string(),
            published,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct BrokenStore {
        writes: u32,
    }

    impl MarkerStore for BrokenStore {
        fn get(&self) -> Result<Option<u32>, StateError> {
            Err(StateError::Corrupt("??".to_string()))
        }

        fn set(&mut self, _value: u32) -> Result<(), StateError> {
            self.writes += 1;
            Err(StateError::File(std::io::Error::other("read only")))
        }
    }

    #[test]
    fn new_comic_is_shown_once() {
        let today = date(2026, 10, 16);
        let comic = latest(3100, today);
        let mut store = MemoryMarkerStore::default();
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(select_comic(&comic, today, &mut store, &mut rng), ComicSelection::New(3100));
        assert_eq!(store.get().unwrap(), Some(3100));

        let second = select_comic(&comic, today, &mut store, &mut rng);
        assert!(matches!(second, ComicSelection::Random(_)));
        assert_eq!(store.get().unwrap(), Some(3100));
    }

    #[test]
    fn yesterday_still_counts_as_new() {
        let today = date(2026, 3, 1);
        let comic = latest(3101, date(2026, 2, 28));
        let mut store = MemoryMarkerStore::with_value(3100);
        let mut rng = StdRng::seed_from_u64(2);

        assert_eq!(select_comic(&comic, today, &mut store, &mut rng), ComicSelection::New(3101));
        assert_eq!(store.get().unwrap(), Some(3101));
    }

    #[test]
    fn old_comic_is_always_random() {
        let today = date(2026, 10, 16);
        let comic = latest(3099, date(2026, 10, 13));
        let mut rng = StdRng::seed_from_u64(3);

        for marker in [None, Some(3099), Some(1), Some(5000)] {
            let mut store = match marker {
                Some(m) => MemoryMarkerStore::with_value(m),
                None => MemoryMarkerStore::default(),
            };

            let selection = select_comic(&comic, today, &mut store, &mut rng);

            assert!(matches!(selection, ComicSelection::Random(_)));
            assert_eq!(store.get().unwrap(), marker);
        }
    }

    #[test]
    fn random_pick_stays_in_range_and_leaves_marker() {
        let today = date(2026, 10, 16);
        let comic = latest(5, date(2020, 1, 1));
        let mut store = MemoryMarkerStore::with_value(2);
        let mut rng = StdRng::seed_from_u64(4);

        for _ in 0..200 {
            let n = select_comic(&comic, today, &mut store, &mut rng).number();
            assert!((1..=5).contains(&n));
        }
        assert_eq!(store.get().unwrap(), Some(2));
    }

    #[test]
    fn missing_comic_is_never_drawn() {
        let mut rng = StdRng::seed_from_u64(6);

        for latest in [404, 405, 406] {
            for _ in 0..5000 {
                let n = random_number(latest, &mut rng);
                assert_ne!(n, MISSING_COMIC);
                assert!((1..=latest).contains(&n));
            }
        }
    }

    #[test]
    fn latest_comic_can_still_be_drawn_past_the_gap() {
        let mut rng = StdRng::seed_from_u64(7);

        let drawn: Vec<u32> = (0..5000).map(|_| random_number(406, &mut rng)).collect();
        assert!(drawn.contains(&406));
        assert!(drawn.contains(&405));
    }

    #[test]
    fn unreadable_marker_counts_as_none() {
        let today = date(2026, 10, 16);
        let comic = latest(3100, today);
        let mut store = BrokenStore { writes: 0 };
        let mut rng = StdRng::seed_from_u64(5);

        assert_eq!(select_comic(&comic, today, &mut store, &mut rng), ComicSelection::New(3100));
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn future_date_is_not_recent() {
        let today = date(2026, 10, 16);

        assert!(is_recent(today, today));
        assert!(is_recent(date(2026, 10, 15), today));
        assert!(!is_recent(date(2026, 10, 14), today));
        assert!(!is_recent(date(2026, 10, 17), today));
    }
}
