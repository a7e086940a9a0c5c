use chrono::NaiveDate;
use serde::Deserialize;

/// Metadata of one published comic
#[derive(Clone, Debug, PartialEq)]
pub struct ComicRecord {
    pub number: u32,
    pub title: String,
    pub image_url: String,
    pub alt_text: String,
    pub published: NaiveDate,
}

/// Response from the xkcd json interface
#[derive(Deserialize)]
pub struct ComicInfo {
    pub num: u32,
    pub title: String,
    pub img: String,
    pub alt: String,
    pub year: String,
    pub month: String,
    pub day: String,
}

impl ComicInfo {
    /// Maps the response into a ComicRecord, returns None if the publication date is invalid
    pub fn to_record(&self) -> Option<ComicRecord> {
        let published = NaiveDate::from_ymd_opt(
            self.year.trim().parse().ok()?,
            self.month.trim().parse().ok()?,
            self.day.trim().parse().ok()?,
        )?;

        Some(ComicRecord {
            number: self.num,
            title: self.title.clone(),
            image_url: self.img.clone(),
            alt_text: self.alt.clone(),
            published,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_maps_to_record() {
        let json = r#"{"month": "10", "num": 3158, "link": "", "year": "2025", "news": "",
            "safe_title": "Shielding Chart", "transcript": "", "alt": "Alt text here",
            "img": "https://imgs.xkcd.com/comics/shielding_chart.png", "title": "Shielding Chart", "day": "15"}"#;
        let info: ComicInfo = serde_json::from_str(json).unwrap();
        let record = info.to_record().unwrap();

        assert_eq!(record.number, 3158);
        assert_eq!(record.alt_text, "Alt text here");
        assert_eq!(record.published, NaiveDate::from_ymd_opt(2025, 10, 15).unwrap());
    }

    #[test]
    fn impossible_date_is_rejected() {
        let info = ComicInfo {
            num: 1,
            title: String::new(),
            img: String::new(),
            alt: String::new(),
            year: "2025".to_string(),
            month: "2".to_string(),
            day: "30".to_string(),
        };

        assert!(info.to_record().is_none());
    }
}
