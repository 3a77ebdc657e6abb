use std::io;

use reqwest::Url;
use thiserror::Error;

/// Errors surfaced by fetching, decoding and looking up movies.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("request to {url} failed: {message}")]
    Network {
        url: String,
        status: Option<u16>,
        message: String,
    },

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("movie {0} is not in the now playing list")]
    NotFound(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AppError {
    /// Maps a reqwest failure onto the network/decode split.
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        // reqwest's message embeds the request URL, key included.
        let err = err.without_url();
        if err.is_decode() {
            return AppError::Decode(err.to_string());
        }
        AppError::Network {
            url: redact_api_key(url),
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

/// Strips the `api_key` query value so it never ends up in logs or on screen.
pub fn redact_api_key(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return if url.contains("api_key") {
            "<unparseable url>".to_string()
        } else {
            url.to_string()
        };
    };
    if !parsed.query_pairs().any(|(name, _)| name == "api_key") {
        return parsed.to_string();
    }

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(name, value)| {
            let value = if name == "api_key" {
                "***".to_string()
            } else {
                value.into_owned()
            };
            (name.into_owned(), value)
        })
        .collect();
    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_key_in_middle_and_end() {
        assert_eq!(
            redact_api_key("https://x/movie/now_playing?api_key=secret"),
            "https://x/movie/now_playing?api_key=***"
        );
        assert_eq!(
            redact_api_key("https://x/?api_key=secret&page=2"),
            "https://x/?api_key=***&page=2"
        );
        assert_eq!(redact_api_key("https://x/"), "https://x/");
        assert_eq!(redact_api_key("not a url?api_key=secret"), "<unparseable url>");
    }

    #[test]
    fn not_found_message_names_the_id() {
        let err = AppError::NotFound("42".to_string());
        assert_eq!(err.to_string(), "movie 42 is not in the now playing list");
    }
}
