use serde::Deserialize;

#[derive(Deserialize, Clone, Debug, Default)]
pub struct Source {
    pub name: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct Article {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub source: Source,
}

#[derive(Deserialize)]
pub struct ArticlesResponse {
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// A news story as shown in the digest
#[derive(Clone, Debug, PartialEq)]
pub struct NewsStory {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub source: String,
}
