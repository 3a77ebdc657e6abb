use crate::app::tmdb::{MovieRecord, MoviesPage};
use crate::error::AppError;

pub const ROOT_PATH: &str = "/";
const MOVIE_PREFIX: &str = "/movies/";
/// Oldest entries are dropped past this many.
const HISTORY_LIMIT: usize = 32;

/// In-app navigation history. The last entry is the current path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    history: Vec<String>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            history: vec![ROOT_PATH.to_string()],
        }
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &str {
        self.history.last().map(String::as_str).unwrap_or(ROOT_PATH)
    }

    pub fn push(&mut self, path: impl Into<String>) {
        let path = path.into();
        tracing::debug!(from = self.current(), to = %path, "navigate");
        self.history.push(path);
        if self.history.len() > HISTORY_LIMIT {
            let overflow = self.history.len() - HISTORY_LIMIT;
            self.history.drain(..overflow);
        }
    }

    pub fn open_movie(&mut self, id: u64) {
        self.push(movie_path(id));
    }

    pub fn go_home(&mut self) {
        self.push(ROOT_PATH);
    }
}

pub fn movie_path(id: u64) -> String {
    format!("{}{}", MOVIE_PREFIX, id)
}

/// Matches `/movies/:movieId` and returns the id segment.
pub fn match_movie_route(path: &str) -> Option<&str> {
    let rest = path.strip_prefix(MOVIE_PREFIX)?;
    let segment = rest.strip_suffix('/').unwrap_or(rest);
    if segment.is_empty() || segment.contains('/') {
        return None;
    }
    Some(segment)
}

/// True whenever the path is a movie route, whether or not the movie is loaded.
pub fn overlay_active(path: &str) -> bool {
    match_movie_route(path).is_some()
}

pub fn lookup_movie<'a>(page: &'a MoviesPage, movie_id: &str) -> Result<&'a MovieRecord, AppError> {
    page.results
        .iter()
        .find(|movie| movie.id.to_string() == movie_id)
        .ok_or_else(|| AppError::NotFound(movie_id.to_string()))
}

pub fn selected_movie<'a>(path: &str, page: Option<&'a MoviesPage>) -> Option<&'a MovieRecord> {
    let movie_id = match_movie_route(path)?;
    lookup_movie(page?, movie_id).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tmdb::fixtures::page_of;

    #[test]
    fn matches_movie_paths_only() {
        assert_eq!(match_movie_route("/movies/42"), Some("42"));
        assert_eq!(match_movie_route("/movies/42/"), Some("42"));
        assert_eq!(match_movie_route("/movies/"), None);
        assert_eq!(match_movie_route("/movies/42/cast"), None);
        assert_eq!(match_movie_route("/"), None);
        assert_eq!(match_movie_route("/tv/42"), None);
    }

    #[test]
    fn unknown_id_keeps_overlay_without_movie() {
        let page = page_of(13);
        assert!(overlay_active("/movies/42"));
        assert_eq!(selected_movie("/movies/42", Some(&page)), None);
        assert!(matches!(lookup_movie(&page, "42"), Err(AppError::NotFound(id)) if id == "42"));
    }

    #[test]
    fn overlay_active_while_data_is_loading() {
        assert!(overlay_active("/movies/3"));
        assert_eq!(selected_movie("/movies/3", None), None);
    }

    #[test]
    fn id_comparison_is_textual() {
        let page = page_of(13);
        assert_eq!(selected_movie("/movies/3", Some(&page)).map(|m| m.id), Some(3));
        assert_eq!(selected_movie("/movies/03", Some(&page)), None);
    }

    #[test]
    fn open_then_dismiss_round_trip() {
        let page = page_of(13);
        let mut nav = Navigator::new();
        assert_eq!(nav.current(), "/");

        nav.open_movie(5);
        assert_eq!(nav.current(), "/movies/5");
        assert_eq!(selected_movie(nav.current(), Some(&page)).map(|m| m.id), Some(5));

        nav.go_home();
        assert_eq!(nav.current(), "/");
        assert!(!overlay_active(nav.current()));
        assert_eq!(selected_movie(nav.current(), Some(&page)), None);
        assert_eq!(nav.history.len(), 3);
    }

    #[test]
    fn history_is_bounded() {
        let mut nav = Navigator::new();
        for id in 0..500 {
            nav.open_movie(id);
            nav.go_home();
        }
        assert_eq!(nav.history.len(), HISTORY_LIMIT);
        assert_eq!(nav.current(), "/");
        assert_eq!(nav.history[HISTORY_LIMIT - 2], "/movies/499");
    }
}
