pub mod errors;

use std::collections::HashSet;
use chrono::NaiveDate;
use log::warn;
use ureq::Agent;
use crate::manager_news::errors::NewsError;
use crate::models::news::{Article, ArticlesResponse, NewsStory};

const TOP_HEADLINES_URL: &str = "https://newsapi.org/v2/top-headlines";
const EVERYTHING_URL: &str = "https://newsapi.org/v2/everything";
const SUPPLEMENT_QUERY: &str = "USA OR \"United States\" OR breaking";

/// Headlines with shorter descriptions are considered minor stories
const MIN_DESCRIPTION_LEN: usize = 30;

pub struct News {
    agent: Agent,
    api_key: String,
}

impl News {
    /// Returns a new News struct
    ///
    /// # Arguments
    ///
    /// * 'agent' - http agent to use for requests
    /// * 'api_key' - NewsAPI api key
    pub fn new(agent: Agent, api_key: String) -> News {
        Self { agent, api_key }
    }

    /// Fetches the top US headlines, supplemented with today's most popular stories
    ///
    /// # Arguments
    ///
    /// * 'num_stories' - max number of stories to return
    /// * 'today' - date used to limit the supplementary search
    pub fn top_stories(&self, num_stories: usize, today: NaiveDate) -> Result<Vec<NewsStory>, NewsError> {
        let json = self.agent
            .get(TOP_HEADLINES_URL)
            .query("country", "us")
            .query("pageSize", (num_stories * 2).to_string())
            .query("apiKey", &self.api_key)
            .call()?
            .body_mut()
            .read_to_string()?;

        let headlines: ArticlesResponse = serde_json::from_str(&json)?;

        let supplement = self.supplement(today).unwrap_or_else(|e| {
            warn!("Could not fetch supplementary news: {}", e);
            Vec::new()
        });

        Ok(select_stories(headlines.articles, supplement, num_stories))
    }

    fn supplement(&self, today: NaiveDate) -> Result<Vec<Article>, NewsError> {
        let json = self.agent
            .get(EVERYTHING_URL)
            .query("q", SUPPLEMENT_QUERY)
            .query("language", "en")
            .query("sortBy", "popularity")
            .query("from", today.format("%Y-%m-%d").to_string())
            .query("pageSize", "10")
            .query("apiKey", &self.api_key)
            .call()?
            .body_mut()
            .read_to_string()?;

        let response: ArticlesResponse = serde_json::from_str(&json)?;

        Ok(response.articles)
    }
}

/// Filters headlines down to major stories and appends supplementary stories not
/// already present, returning at most 'num_stories'
///
/// # Arguments
///
/// * 'headlines' - top headlines
/// * 'supplement' - supplementary articles
/// * 'num_stories' - max number of stories
fn select_stories(headlines: Vec<Article>, supplement: Vec<Article>, num_stories: usize) -> Vec<NewsStory> {
    let mut stories = headlines
        .into_iter()
        .filter(is_major_headline)
        .filter_map(to_story)
        .collect::<Vec<NewsStory>>();

    let mut seen = stories.iter().map(|s| s.url.clone()).collect::<HashSet<String>>();
    for article in supplement {
        if let Some(story) = to_story(article) {
            if seen.insert(story.url.clone()) {
                stories.push(story);
            }
        }
    }

    stories.truncate(num_stories);
    stories
}

fn is_major_headline(article: &Article) -> bool {
    if let Some(title) = &article.title {
        if title.to_lowercase().contains("horoscope") {
            return false;
        }
    }

    match &article.description {
        Some(d) if !d.is_empty() => d.chars().count() >= MIN_DESCRIPTION_LEN,
        _ => true,
    }
}

fn to_story(article: Article) -> Option<NewsStory> {
    let title = article.title.filter(|t| !t.is_empty() && t != "[Removed]")?;
    let url = article.url.filter(|u| !u.is_empty())?;

    Some(NewsStory {
        title,
        url,
        description: article.description.filter(|d| !d.is_empty()),
        source: article.source.name.unwrap_or_else(|| "Unknown".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::news::Source;

    fn article(title: &str, url: &str, description: Option<&str>) -> Article {
        Article {
            title: Some(title.to_string()),
            url: Some(url.to_string()),
            description: description.map(|d| d.to_string()),
            source: Source { name: Some("Wire".to_string()) },
        }
    }

    const LONG: &str = "A description that is comfortably longer than thirty characters";

    #[test]
    fn minor_and_removed_headlines_are_dropped() {
        let headlines = vec![
            article("Big story", "https://a", Some(LONG)),
            article("[Removed]", "https://b", Some(LONG)),
            article("Your daily Horoscope", "https://c", Some(LONG)),
            article("Tiny", "https://d", Some("too short")),
            article("No description", "https://e", None),
            article("", "https://f", Some(LONG)),
            Article { url: None, ..article("No url", "", Some(LONG)) },
        ];

        let stories = select_stories(headlines, vec![], 8);
        let titles = stories.iter().map(|s| s.title.as_str()).collect::<Vec<&str>>();

        assert_eq!(titles, vec!["Big story", "No description"]);
        assert_eq!(stories[0].source, "Wire");
    }

    #[test]
    fn supplement_skips_known_urls_and_respects_limit() {
        let headlines = vec![
            article("One", "https://1", Some(LONG)),
            article("Two", "https://2", Some(LONG)),
        ];
        let supplement = vec![
            article("One again", "https://1", None),
            article("Short but supplementary", "https://3", Some("short")),
            article("[Removed]", "https://4", None),
            article("Four", "https://5", None),
        ];

        let stories = select_stories(headlines, supplement, 3);
        let urls = stories.iter().map(|s| s.url.as_str()).collect::<Vec<&str>>();

        assert_eq!(urls, vec!["https://1", "https://2", "https://3"]);
    }

    #[test]
    fn missing_source_name_is_unknown() {
        let a = Article { source: Source::default(), ..article("T", "https://t", None) };

        assert_eq!(to_story(a).unwrap().source, "Unknown");
    }
}
