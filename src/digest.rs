use std::fmt::Write;
use chrono::{DateTime, Local, TimeZone};
use crate::forecast::{high_low, weather_emoji};
use crate::manager_weather::CurrentWeather;
use crate::manager_xkcd::ComicPick;
use crate::models::forecast::ForecastSample;
use crate::models::news::NewsStory;
use crate::models::tmdb::MoviePick;
use crate::models::wikipedia::HistoricalFact;
use crate::models::yahoo::MarketSnapshot;
use crate::moon::moon_phase;

/// Max length of a news description before it is cut
const NEWS_DESCRIPTION_LEN: usize = 200;
/// Max length of a movie overview before it is cut
const MOVIE_OVERVIEW_LEN: usize = 300;

/// Content fetched once per run and shared by all recipients, any part may be missing
#[derive(Default)]
pub struct SharedContent {
    pub news: Vec<NewsStory>,
    pub history: Option<HistoricalFact>,
    pub market: Option<MarketSnapshot>,
    pub movie: Option<MoviePick>,
    pub comic: Option<ComicPick>,
}

/// A rendered digest ready to be mailed
pub struct Digest {
    pub subject: String,
    pub preview: String,
    pub html: String,
}

/// Renders the digest for one recipient
///
/// # Arguments
///
/// * 'name' - the recipient's name, may be empty
/// * 'current' - current weather at the recipient's location
/// * 'series' - regularized forecast for the display window
/// * 'shared' - content shared by all recipients
/// * 'now' - date and time of the run
pub fn render(
    name: &str,
    current: &CurrentWeather,
    series: &[ForecastSample],
    shared: &SharedContent,
    now: DateTime<Local>) -> Digest {

    let (high, low) = high_low(series, current.temperature);
    let description = title_case(&current.description);
    let preview = format!(
        "In {}, the high is {}° and the low is {}°. You can expect {} today. \
         Open up to see some of the top news stories of the day.",
        current.city_name, high, low, current.description.to_lowercase());

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head><meta charset=\"UTF-8\"></head>\n");
    html.push_str("<body style=\"margin: 0; padding: 0; font-family: Arial, sans-serif; background-color: #f5f5f5;\">\n");
    let _ = writeln!(html, "<div style=\"display: none; max-height: 0; overflow: hidden;\">{}</div>", escape(&preview));
    html.push_str("<div style=\"max-width: 500px; margin: 0 auto; background-color: #ffffff; padding: 20px;\">\n");

    current_section(&mut html, current, &description, now);
    forecast_section(&mut html, series);

    if !shared.news.is_empty() {
        news_section(&mut html, &shared.news, shared.market.as_ref());
    }
    if let Some(fact) = &shared.history {
        history_section(&mut html, fact);
    }
    if let Some(movie) = &shared.movie {
        movie_section(&mut html, movie);
    }
    if let Some(comic) = &shared.comic {
        comic_section(&mut html, comic);
    }

    footer(&mut html, name, shared);
    html.push_str("</div>\n</body>\n</html>\n");

    Digest {
        subject: format!("🛸 Daily Brief - {}", now.format("%m/%d/%Y")),
        preview,
        html,
    }
}

fn current_section(html: &mut String, current: &CurrentWeather, description: &str, now: DateTime<Local>) {
    let moon = moon_phase(now.naive_local());

    let _ = write!(html, r#"<div style="padding: 15px 0; border-bottom: 2px solid #e0e0e0;">
<table style="width: 100%; border-collapse: collapse;"><tr>
<td style="width: 33%; vertical-align: top;">
<div style="font-size: 14px; font-weight: 500; color: #333;">{city}</div>
<div style="font-size: 12px; color: #999;">{date}</div>
</td>
<td style="width: 34%; vertical-align: top; text-align: center;">
<div style="font-size: 14px; font-weight: 500; color: #333;">{temp}°F <span style="font-size: 28px;">{emoji}</span></div>
<div style="font-size: 12px; color: #666;">{description}</div>
<div style="font-size: 12px; color: #999;">Feels like {feels_like}°F</div>
</td>
<td style="width: 33%; vertical-align: top; text-align: right;">
<div style="font-size: 14px; font-weight: 500; color: #333;">{moon_name} <span style="font-size: 28px;">{moon_emoji}</span></div>
<div style="font-size: 12px; color: #666;">Moon Phase</div>
</td>
</tr></table>
<table style="width: 100%; border-collapse: collapse; margin-top: 12px; border-top: 1px solid #f0f0f0;"><tr>
<td style="text-align: left; font-size: 14px; color: #666;">🌅 {sunrise}</td>
<td style="text-align: right; font-size: 14px; color: #666;">🌇 {sunset}</td>
</tr></table>
</div>
"#,
        city = escape(&current.city_name),
        date = now.format("%B %d, %Y"),
        temp = current.temperature.round() as i64,
        feels_like = current.feels_like.round() as i64,
        emoji = weather_emoji(current.weather_code, &current.description),
        description = escape(description),
        moon_name = moon.name,
        moon_emoji = moon.emoji,
        sunrise = local_time(current.sunrise, "%-I:%M %p"),
        sunset = local_time(current.sunset, "%-I:%M %p"),
    );
}

fn forecast_section(html: &mut String, series: &[ForecastSample]) {
    html.push_str(r#"<div style="padding-top: 15px;">
<h3 style="margin: 0 0 12px 0; font-size: 16px; color: #333;">Today's Forecast</h3>
<table style="width: 100%; border-collapse: collapse;">
<thead><tr style="border-bottom: 2px solid #e0e0e0; font-size: 12px; color: #666;">
<th style="padding: 8px 5px; text-align: left;">Time</th>
<th style="padding: 8px 5px; text-align: center;">Condition</th>
<th style="padding: 8px 5px; text-align: right;">Temp</th>
<th style="padding: 8px 5px; text-align: left;">Description</th>
<th style="padding: 8px 5px; text-align: center;">Rain</th>
</tr></thead>
<tbody>
"#);

    for (i, sample) in series.iter().enumerate() {
        let description = title_case(&sample.weather_description);
        let pop = sample.precipitation_probability * 100.0;
        let (pop_display, pop_color) = if pop > 0.0 {
            (format!("{}%", pop as i64), if pop > 50.0 { "#3498db" } else { "#7f8c8d" })
        } else {
            ("—".to_string(), "#999")
        };
        let row_bg = if i % 2 == 0 { "#fafafa" } else { "#ffffff" };

        let _ = writeln!(html,
            r#"<tr style="background-color: {row_bg}; border-bottom: 1px solid #f0f0f0;"><td style="padding: 10px 5px; font-size: 13px; color: #333;">{time}</td><td style="padding: 10px 5px; text-align: center; font-size: 24px;">{emoji}</td><td style="padding: 10px 5px; text-align: right; font-size: 15px; font-weight: bold; color: #333;">{temp}°F</td><td style="padding: 10px 5px; font-size: 12px; color: #666;">{description}</td><td style="padding: 10px 5px; text-align: center; font-size: 12px; color: {pop_color};">{pop_display}</td></tr>"#,
            time = local_time(sample.timestamp, "%-I %p"),
            emoji = weather_emoji(sample.weather_code, &description),
            temp = sample.temperature.round() as i64,
            description = escape(&description),
        );
    }

    html.push_str("</tbody>\n</table>\n</div>\n");
}

fn news_section(html: &mut String, stories: &[NewsStory], market: Option<&MarketSnapshot>) {
    html.push_str(r#"<div style="padding-top: 20px; border-top: 2px solid #e0e0e0; margin-top: 20px;">
<h3 style="margin: 0 0 10px 0; font-size: 16px; color: #333;">📰 Top News</h3>
"#);

    if let Some(m) = market {
        let (arrow, color, sign) = if m.is_positive { ("▲", "#27ae60", "+") } else { ("▼", "#e74c3c", "") };
        let _ = writeln!(html,
            r#"<div style="background-color: #f8f9fa; padding: 10px 15px; border-radius: 6px; margin-bottom: 15px; border-left: 3px solid {color};"><table style="width: 100%; border-collapse: collapse;"><tr><td style="font-size: 13px; color: #666;">S&amp;P 500</td><td style="text-align: right; font-size: 15px; font-weight: 600; color: {color};">{arrow} {sign}{pct:.2}%</td></tr></table></div>"#,
            pct = m.percent_change,
        );
    }

    for story in stories {
        let url = escape(&story.url);
        let description = story.description
            .as_ref()
            .map(|d| format!(
                r#"<div style="font-size: 12px; color: #666; line-height: 1.5; margin-top: 5px;">{}</div>"#,
                escape(&truncate(d, NEWS_DESCRIPTION_LEN))))
            .unwrap_or_default();

        let _ = writeln!(html,
            r#"<div style="padding: 12px 0; border-bottom: 1px solid #f0f0f0;"><div style="font-size: 14px; font-weight: 600;"><a href="{url}" style="color: #2c3e50; text-decoration: none;">{title}</a></div>{description}<div style="margin-top: 6px;"><a href="{url}" style="font-size: 11px; color: #3498db; text-decoration: none;">Read more →</a><span style="font-size: 11px; color: #999; margin-left: 8px;">• {source}</span></div></div>"#,
            title = escape(&story.title),
            source = escape(&story.source),
        );
    }

    html.push_str("</div>\n");
}

fn history_section(html: &mut String, fact: &HistoricalFact) {
    let year = fact.year.map(|y| y.to_string()).unwrap_or_default();
    let link = fact.url
        .as_ref()
        .map(|u| format!(
            r#"<div style="margin-top: 10px;"><a href="{}" style="font-size: 11px; color: #3498db; text-decoration: none;">Learn more →</a></div>"#,
            escape(u)))
        .unwrap_or_default();

    let _ = writeln!(html,
        r#"<div style="padding: 20px 0; border-top: 2px solid #e0e0e0; margin-top: 20px;"><h3 style="margin: 0 0 12px 0; font-size: 16px; color: #333;">📜 On This Day in History</h3><div style="background-color: #f8f9fa; padding: 15px; border-radius: 8px; border-left: 4px solid #9b59b6;"><div style="font-size: 18px; font-weight: 600; color: #8e44ad; margin-bottom: 8px;">{year}</div><div style="font-size: 13px; color: #555; line-height: 1.6;">{text}</div>{link}</div></div>"#,
        text = escape(&fact.text),
    );
}

fn movie_section(html: &mut String, movie: &MoviePick) {
    let release_year = movie.release_date
        .as_ref()
        .and_then(|d| d.split('-').next())
        .unwrap_or("N/A");
    let tmdb_url = escape(&movie.tmdb_url);
    let poster = movie.poster_url
        .as_ref()
        .map(|p| format!(
            r#"<td style="width: 100px; vertical-align: top; padding-right: 15px;"><a href="{}"><img src="{}" alt="{} poster" style="width: 100px; border-radius: 4px;" /></a></td>"#,
            tmdb_url, escape(p), escape(&movie.title)))
        .unwrap_or_default();

    let _ = writeln!(html,
        r#"<div style="padding: 20px 0; border-top: 2px solid #e0e0e0; margin-top: 20px;"><h3 style="margin: 0 0 12px 0; font-size: 16px; color: #333;">🎬 Movie Recommendation of the Day</h3><div style="background-color: #f8f9fa; padding: 15px; border-radius: 8px; border-left: 4px solid #e74c3c;"><table style="width: 100%; border-collapse: collapse;"><tr>{poster}<td style="vertical-align: top;"><div style="font-size: 16px; font-weight: 600; margin-bottom: 6px;"><a href="{tmdb_url}" style="color: #c0392b; text-decoration: none;">{title}</a><span style="font-size: 13px; color: #999; font-weight: normal;"> ({release_year})</span></div><div style="font-size: 12px; color: #666; margin-bottom: 8px;">{stars} {rating}/10 • {genres} • {runtime}</div><div style="font-size: 13px; color: #555; line-height: 1.5; margin-bottom: 10px;">{overview}</div><a href="{tmdb_url}" style="font-size: 11px; color: #3498db; text-decoration: none;">View on TMDB →</a></td></tr></table></div></div>"#,
        title = escape(&movie.title),
        release_year = escape(release_year),
        stars = star_rating(movie.rating),
        rating = movie.rating,
        genres = escape(&movie.genres),
        runtime = escape(&movie.runtime),
        overview = escape(&truncate(&movie.overview, MOVIE_OVERVIEW_LEN)),
    );
}

fn comic_section(html: &mut String, comic: &ComicPick) {
    let link = comic.link();
    let alt = escape(&comic.record.alt_text);

    let _ = writeln!(html,
        r#"<div style="padding-top: 20px; border-top: 2px solid #e0e0e0; margin-top: 20px;"><h3 style="margin: 0 0 8px 0; font-size: 16px; color: #333;">💥 XKCD Comic</h3><div style="margin: 0 0 12px 0; font-size: 13px; color: #666;">{label}</div><div style="text-align: center; background-color: #f8f9fa; padding: 15px; border-radius: 8px;"><a href="{link}"><img src="{img}" alt="{alt}" style="max-width: 100%; height: auto;" /></a><div style="margin-top: 12px; font-size: 14px; font-weight: 600; color: #333;">{title}</div><div style="margin-top: 6px; font-size: 11px; color: #666; font-style: italic;">"{alt}"</div><div style="margin-top: 8px;"><a href="{link}" style="font-size: 11px; color: #3498db; text-decoration: none;">View on xkcd.com →</a></div></div></div>"#,
        label = escape(&comic.label),
        img = escape(&comic.record.image_url),
        title = escape(&comic.record.title),
    );
}

fn footer(html: &mut String, name: &str, shared: &SharedContent) {
    let greeting = if name.is_empty() { "Hi,".to_string() } else { format!("Hi {},", escape(name)) };

    let mut sources = vec!["Weather from OpenWeatherMap"];
    if !shared.news.is_empty() { sources.push("News from NewsAPI"); }
    if shared.history.is_some() { sources.push("History from Wikipedia"); }
    if shared.movie.is_some() { sources.push("Movies from TMDB"); }
    if shared.comic.is_some() { sources.push("Comics from xkcd"); }

    let _ = writeln!(html,
        r#"<div style="margin-top: 20px; padding-top: 15px; border-top: 1px solid #e0e0e0; text-align: center; font-size: 11px; color: #999;">{} {}</div>"#,
        greeting, sources.join(", "));
}

/// Five star rating from a score out of ten
///
/// # Arguments
///
/// * 'rating' - score 0-10
fn star_rating(rating: f64) -> String {
    let half_score = (rating / 2.0).clamp(0.0, 5.0);
    let full = half_score.floor() as usize;
    let half = usize::from(half_score - full as f64 >= 0.5);
    let empty = 5 - full - half;

    "⭐".repeat(full) + &"✨".repeat(half) + &"☆".repeat(empty)
}

fn local_time(timestamp: i64, format: &str) -> String {
    Local.timestamp_opt(timestamp, 0)
        .single()
        .map(|t| t.format(format).to_string())
        .unwrap_or_default()
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|w| {
            let mut c = w.chars();
            match c.next() {
                None => String::new(),
                Some(f) => f.to_uppercase().collect::<String>() + &c.as_str().to_lowercase(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Cuts a text to at most 'max' characters, adding an ellipsis when cut
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max.saturating_sub(3)).collect::<String>() + "..."
    }
}

/// Escapes text for use in html content and attribute values
pub fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::models::xkcd::ComicRecord;

    fn current() -> CurrentWeather {
        CurrentWeather {
            city_name: "Springfield".to_string(),
            temperature: 61.4,
            feels_like: 60.0,
            weather_code: 801,
            description: "few clouds".to_string(),
            sunrise: 1_760_000_000,
            sunset: 1_760_040_000,
            lat: 39.8,
            lon: -89.6,
        }
    }

    fn sample(timestamp: i64, temperature: f64, pop: f64) -> ForecastSample {
        ForecastSample {
            timestamp,
            temperature,
            feels_like: temperature,
            weather_code: 500,
            weather_description: "light rain".to_string(),
            precipitation_probability: pop,
        }
    }

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 16, 8, 0, 0).earliest().unwrap()
    }

    #[test]
    fn weather_only_digest_omits_optional_sections() {
        let series = vec![sample(1_760_000_000, 58.2, 0.0), sample(1_760_007_200, 66.7, 0.8)];
        let digest = render("Ada", &current(), &series, &SharedContent::default(), now());

        assert_eq!(digest.subject, "🛸 Daily Brief - 10/16/2026");
        assert!(digest.preview.starts_with("In Springfield, the high is 67° and the low is 58°. You can expect few clouds today."));
        assert!(digest.html.contains("Few Clouds"));
        assert!(digest.html.contains("Feels like 60°F"));
        assert!(digest.html.contains("Light Rain"));
        assert!(digest.html.contains("80%"));
        assert!(digest.html.contains("Hi Ada, Weather from OpenWeatherMap</div>"));
        assert!(!digest.html.contains("Top News"));
        assert!(!digest.html.contains("On This Day"));
        assert!(!digest.html.contains("Movie Recommendation"));
        assert!(!digest.html.contains("XKCD"));
    }

    #[test]
    fn empty_forecast_uses_current_temperature() {
        let digest = render("", &current(), &[], &SharedContent::default(), now());

        assert!(digest.preview.contains("the high is 61° and the low is 61°"));
        assert!(digest.html.contains("Hi, Weather"));
    }

    #[test]
    fn shared_sections_are_rendered_and_escaped() {
        let shared = SharedContent {
            news: vec![NewsStory {
                title: "Markets <rally> & more".to_string(),
                url: "https://news.example.com/a?b=1&c=2".to_string(),
                description: None,
                source: "Wire".to_string(),
            }],
            history: Some(HistoricalFact { year: Some(1969), text: "Moon landing".to_string(), url: None }),
            market: Some(MarketSnapshot { price: 5050.0, change: -25.0, percent_change: -0.5, is_positive: false }),
            movie: None,
            comic: Some(ComicPick {
                record: ComicRecord {
                    number: 3100,
                    title: "Title".to_string(),
                    image_url: "https://imgs.xkcd.com/comics/t.png".to_string(),
                    alt_text: "It's \"fine\"".to_string(),
                    published: NaiveDate::from_ymd_opt(2026, 10, 15).unwrap(),
                },
                is_new: true,
                label: "New comic #3100".to_string(),
            }),
        };

        let digest = render("Ada", &current(), &[], &shared, now());

        assert!(digest.html.contains("Markets &lt;rally&gt; &amp; more"));
        assert!(digest.html.contains("https://news.example.com/a?b=1&amp;c=2"));
        assert!(digest.html.contains("▼ -0.50%"));
        assert!(digest.html.contains("1969"));
        assert!(digest.html.contains("New comic #3100"));
        assert!(digest.html.contains("https://xkcd.com/3100"));
        assert!(digest.html.contains("It&#39;s &quot;fine&quot;"));
        assert!(digest.html.contains("News from NewsAPI, History from Wikipedia, Comics from xkcd"));
    }

    #[test]
    fn stars_from_ten_point_rating() {
        assert_eq!(star_rating(8.7), "⭐⭐⭐⭐☆");
        assert_eq!(star_rating(9.0), "⭐⭐⭐⭐✨");
        assert_eq!(star_rating(0.0), "☆☆☆☆☆");
        assert_eq!(star_rating(10.0), "⭐⭐⭐⭐⭐");
    }

    #[test]
    fn long_text_is_truncated() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 10), "abcdefg...");
    }
}
