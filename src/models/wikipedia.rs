use serde::Deserialize;

#[derive(Deserialize, Default)]
pub struct Link {
    pub page: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct ContentUrls {
    #[serde(default)]
    pub desktop: Link,
}

#[derive(Deserialize)]
pub struct Page {
    #[serde(default)]
    pub content_urls: ContentUrls,
}

#[derive(Deserialize)]
pub struct Event {
    pub text: Option<String>,
    pub year: Option<i64>,
    #[serde(default)]
    pub pages: Vec<Page>,
}

#[derive(Deserialize)]
pub struct OnThisDay {
    #[serde(default)]
    pub events: Vec<Event>,
}

/// Something that happened on this day in history
#[derive(Clone, Debug, PartialEq)]
pub struct HistoricalFact {
    pub year: Option<i64>,
    pub text: String,
    pub url: Option<String>,
}
