use serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct MovieSummary {
    pub id: u64,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
}

#[derive(Deserialize)]
pub struct TopRated {
    #[serde(default)]
    pub results: Vec<MovieSummary>,
}

#[derive(Deserialize)]
pub struct Genre {
    pub name: String,
}

#[derive(Deserialize)]
pub struct MovieDetails {
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub runtime: Option<u32>,
}

/// Movie recommendation as shown in the digest
#[derive(Clone, Debug, PartialEq)]
pub struct MoviePick {
    pub title: String,
    pub overview: String,
    pub poster_url: Option<String>,
    pub release_date: Option<String>,
    pub rating: f64,
    pub genres: String,
    pub runtime: String,
    pub tmdb_url: String,
}
