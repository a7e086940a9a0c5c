pub mod errors;

use rand::Rng;
use rand::seq::SliceRandom;
use ureq::Agent;
use crate::manager_movies::errors::MovieError;
use crate::models::tmdb::{MovieDetails, MoviePick, MovieSummary, TopRated};

const TMDB_API: &str = "https://api.themoviedb.org/3/movie";
const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";
const MOVIE_PAGE: &str = "https://www.themoviedb.org/movie";

/// Pages 1 to 10 of the top rated list cover about 200 movies
const TOP_RATED_PAGES: u32 = 10;

pub struct Movies {
    agent: Agent,
    api_key: String,
}

impl Movies {
    /// Returns a new Movies struct
    ///
    /// # Arguments
    ///
    /// * 'agent' - http agent to use for requests
    /// * 'api_key' - TMDB api key
    pub fn new(agent: Agent, api_key: String) -> Movies {
        Self { agent, api_key }
    }

    /// Picks a random movie from a random page of TMDB's top rated list
    ///
    /// # Arguments
    ///
    /// * 'rng' - random source for page and movie selection
    pub fn recommendation<R: Rng>(&self, rng: &mut R) -> Result<Option<MoviePick>, MovieError> {
        let page = rng.gen_range(1..=TOP_RATED_PAGES);

        let json = self.agent
            .get(format!("{}/top_rated", TMDB_API))
            .query("api_key", &self.api_key)
            .query("page", page.to_string())
            .call()?
            .body_mut()
            .read_to_string()?;

        let top_rated: TopRated = serde_json::from_str(&json)?;
        let Some(movie) = top_rated.results.choose(rng) else {
            return Ok(None);
        };

        let json = self.agent
            .get(format!("{}/{}", TMDB_API, movie.id))
            .query("api_key", &self.api_key)
            .call()?
            .body_mut()
            .read_to_string()?;

        let details: MovieDetails = serde_json::from_str(&json)?;

        Ok(Some(to_pick(movie, &details)))
    }
}

fn to_pick(movie: &MovieSummary, details: &MovieDetails) -> MoviePick {
    let genres = details.genres
        .iter()
        .take(3)
        .map(|g| g.name.as_str())
        .collect::<Vec<&str>>()
        .join(", ");

    MoviePick {
        title: movie.title.clone().unwrap_or_else(|| "Unknown".to_string()),
        overview: movie.overview.clone()
            .filter(|o| !o.is_empty())
            .unwrap_or_else(|| "No overview available.".to_string()),
        poster_url: movie.poster_path
            .as_ref()
            .filter(|p| !p.is_empty())
            .map(|p| format!("{}{}", POSTER_BASE, p)),
        release_date: movie.release_date.clone().filter(|d| !d.is_empty()),
        rating: (movie.vote_average.unwrap_or(0.0) * 10.0).round() / 10.0,
        genres: if genres.is_empty() { "N/A".to_string() } else { genres },
        runtime: match details.runtime {
            Some(r) if r > 0 => format!("{} min", r),
            _ => "N/A".to_string(),
        },
        tmdb_url: format!("{}/{}", MOVIE_PAGE, movie.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_combines_summary_and_details() {
        let summary: MovieSummary = serde_json::from_str(r#"{"id": 278, "title": "The Shawshank Redemption",
            "overview": "Imprisoned in the 1940s...", "poster_path": "/q6y0Go1tsGEsmtFryDOJo3dEmqu.jpg",
            "release_date": "1994-09-23", "vote_average": 8.708}"#).unwrap();
        let details: MovieDetails = serde_json::from_str(r#"{"runtime": 142,
            "genres": [{"id": 18, "name": "Drama"}, {"id": 80, "name": "Crime"},
                       {"id": 1, "name": "Extra"}, {"id": 2, "name": "Dropped"}]}"#).unwrap();

        let pick = to_pick(&summary, &details);

        assert_eq!(pick.rating, 8.7);
        assert_eq!(pick.genres, "Drama, Crime, Extra");
        assert_eq!(pick.runtime, "142 min");
        assert_eq!(pick.poster_url.as_deref(), Some("https://image.tmdb.org/t/p/w500/q6y0Go1tsGEsmtFryDOJo3dEmqu.jpg"));
        assert_eq!(pick.tmdb_url, "https://www.themoviedb.org/movie/278");
    }

    #[test]
    fn sparse_movie_gets_placeholders() {
        let summary: MovieSummary = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        let details: MovieDetails = serde_json::from_str(r#"{"runtime": 0}"#).unwrap();

        let pick = to_pick(&summary, &details);

        assert_eq!(pick.title, "Unknown");
        assert_eq!(pick.overview, "No overview available.");
        assert!(pick.poster_url.is_none());
        assert!(pick.release_date.is_none());
        assert_eq!(pick.genres, "N/A");
        assert_eq!(pick.runtime, "N/A");
    }
}
