use std::sync::mpsc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::app::MovieFetchMessage;
use crate::config::Config;
use crate::error::{AppError, redact_api_key};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub maximum: NaiveDate,
    pub minimum: NaiveDate,
}

/// One page of the now playing listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoviesPage {
    #[serde(default)]
    pub dates: Option<DateRange>,
    pub page: u32,
    pub results: Vec<MovieRecord>,
    pub total_pages: u32,
    pub total_results: u32,
}

impl MoviesPage {
    /// The first result, shown full width above the carousel.
    pub fn banner(&self) -> Option<&MovieRecord> {
        self.results.first()
    }
}

// TMDB sends "" for unknown release dates.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()))
}

pub fn now_playing_url(config: &Config, api_key: &str) -> String {
    format!(
        "{}/movie/now_playing?api_key={}",
        config.api_base,
        urlencoding::encode(api_key)
    )
}

pub fn decode_now_playing(body: &str) -> Result<MoviesPage, AppError> {
    serde_json::from_str(body).map_err(|e| AppError::Decode(e.to_string()))
}

/// Fetches the now playing page from TMDB. Single attempt, no retry.
pub fn fetch_now_playing(config: &Config) -> Result<MoviesPage, AppError> {
    let api_key = config.require_api_key()?;
    let url = now_playing_url(config, api_key);

    let client = reqwest::blocking::Client::builder()
        .timeout(config.request_timeout())
        .build()
        .map_err(|e| AppError::from_reqwest(&url, e))?;

    tracing::debug!(url = %redact_api_key(&url), "requesting now playing");
    let response = client
        .get(&url)
        .send()
        .map_err(|e| AppError::from_reqwest(&url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::Network {
            url: redact_api_key(&url),
            status: Some(status.as_u16()),
            message: format!("API request failed with status: {}", status),
        });
    }

    let body = response.text().map_err(|e| AppError::from_reqwest(&url, e))?;
    decode_now_playing(&body)
}

pub fn fetch_now_playing_threaded(config: Config, sender: mpsc::Sender<MovieFetchMessage>) {
    let message = match fetch_now_playing(&config) {
        Ok(page) => {
            tracing::info!(results = page.results.len(), page = page.page, "now playing loaded");
            MovieFetchMessage::Complete(page)
        }
        Err(e) => {
            tracing::error!(error = %e, "now playing fetch failed");
            MovieFetchMessage::Error(e.to_string())
        }
    };
    let _ = sender.send(message);
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn movie(id: u64) -> MovieRecord {
        MovieRecord {
            id,
            title: format!("Movie {}", id),
            overview: format!("Overview of movie {}", id),
            backdrop_path: Some(format!("/backdrop{}.jpg", id)),
            poster_path: Some(format!("/poster{}.jpg", id)),
            release_date: None,
            vote_average: None,
        }
    }

    /// A page whose results have ids `1..=len`.
    pub fn page_of(len: usize) -> MoviesPage {
        MoviesPage {
            dates: None,
            page: 1,
            results: (1..=len as u64).map(movie).collect(),
            total_pages: 1,
            total_results: len as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "dates": {"maximum": "2024-05-22", "minimum": "2024-04-10"},
        "page": 1,
        "results": [
            {
                "adult": false,
                "backdrop_path": "/fqv8v6AycXKsivp1T5yKtLbGXce.jpg",
                "genre_ids": [878, 12, 28],
                "id": 653346,
                "original_language": "en",
                "overview": "Several generations in the future...",
                "popularity": 4050.674,
                "poster_path": "/gKkl37BQuKTanygYQG1pyYgLVgf.jpg",
                "release_date": "2024-05-08",
                "title": "Kingdom of the Planet of the Apes",
                "video": false,
                "vote_average": 6.9,
                "vote_count": 546
            },
            {
                "backdrop_path": null,
                "id": 7,
                "overview": "",
                "poster_path": null,
                "release_date": "",
                "title": "No Images"
            }
        ],
        "total_pages": 97,
        "total_results": 1929
    }"#;

    #[test]
    fn decodes_realistic_envelope() {
        let page = decode_now_playing(BODY).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 97);
        assert_eq!(page.total_results, 1929);
        assert_eq!(page.results.len(), 2);

        let dates = page.dates.as_ref().unwrap();
        assert_eq!(dates.minimum, NaiveDate::from_ymd_opt(2024, 4, 10).unwrap());

        let banner = page.banner().unwrap();
        assert_eq!(banner.id, 653346);
        assert_eq!(banner.release_date, NaiveDate::from_ymd_opt(2024, 5, 8));
        assert_eq!(banner.vote_average, Some(6.9));

        let second = &page.results[1];
        assert_eq!(second.backdrop_path, None);
        assert_eq!(second.release_date, None);
    }

    #[test]
    fn rejects_wrong_shape() {
        assert!(matches!(decode_now_playing("not json"), Err(AppError::Decode(_))));
        assert!(matches!(
            decode_now_playing(r#"{"status_code": 7, "status_message": "Invalid API key"}"#),
            Err(AppError::Decode(_))
        ));
    }

    #[test]
    fn url_carries_encoded_key() {
        let config = Config::default();
        assert_eq!(
            now_playing_url(&config, "a b"),
            "https://api.themoviedb.org/3/movie/now_playing?api_key=a%20b"
        );
    }

    #[test]
    fn missing_key_fails_before_any_request() {
        let config = Config::default();
        assert!(matches!(fetch_now_playing(&config), Err(AppError::Config(_))));
    }

    #[test]
    fn transport_failure_keeps_the_key_hidden() {
        let config = Config {
            api_base: "http://127.0.0.1:1/3".to_string(),
            api_key: Some("SUPERSECRETKEY".to_string()),
            request_timeout_secs: 2,
            ..Config::default()
        };

        let err = fetch_now_playing(&config).unwrap_err();
        assert!(matches!(err, AppError::Network { status: None, .. }));
        let shown = err.to_string();
        assert!(!shown.contains("SUPERSECRETKEY"), "key leaked: {}", shown);
        assert!(shown.contains("api_key=***"));
        assert!(!format!("{:?}", err).contains("SUPERSECRETKEY"));
    }

    #[test]
    fn threaded_fetch_reports_exactly_one_message() {
        let (sender, receiver) = mpsc::channel();
        fetch_now_playing_threaded(Config::default(), sender);
        assert!(matches!(receiver.recv(), Ok(MovieFetchMessage::Error(_))));
        assert!(receiver.recv().is_err());
    }
}
