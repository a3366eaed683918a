//! Field-level normalization shared by the catalog adapters.

use mediashelf_model::{UNKNOWN_TITLE, UNKNOWN_YEAR};

/// Prefix joined with TMDB's `poster_path`
pub const TMDB_POSTER_BASE: &str = "https://image.tmdb.org/t/p/w200";

pub const TMDB_POSTER_PLACEHOLDER: &str =
    "https://placehold.co/200x300/CCCCCC/000000?text=No+Poster";

pub const BOOK_COVER_PLACEHOLDER: &str =
    "https://placehold.co/100x150/000000/FFFFFF?text=No+Cover";

/// Movies below this TMDB popularity are dropped from results.
pub const MIN_MOVIE_POPULARITY: f64 = 3.0;

/// Page size requested from Google Books.
pub const BOOKS_MAX_RESULTS: u32 = 20;

/// Year component of an upstream date (`YYYY`, `YYYY-MM` or `YYYY-MM-DD`).
///
/// Everything before the first `-` is returned as-is; an absent or empty
/// date yields [`UNKNOWN_YEAR`].
pub fn release_year(date: Option<&str>) -> String {
    date.and_then(|date| date.split('-').next())
        .map(str::trim)
        .filter(|year| !year.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_YEAR.to_string())
}

pub fn display_title(title: Option<String>) -> String {
    title
        .filter(|title| !title.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string())
}

pub fn tmdb_poster_url(poster_path: Option<&str>) -> String {
    match poster_path.filter(|path| !path.is_empty()) {
        Some(path) => format!("{TMDB_POSTER_BASE}{path}"),
        None => TMDB_POSTER_PLACEHOLDER.to_string(),
    }
}

pub fn book_cover_url(thumbnail: Option<&str>) -> String {
    match thumbnail.filter(|url| !url.is_empty()) {
        Some(url) => upgrade_to_https(url),
        None => BOOK_COVER_PLACEHOLDER.to_string(),
    }
}

fn upgrade_to_https(url: &str) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{rest}"),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_is_the_prefix_before_the_first_dash() {
        assert_eq!(release_year(Some("1999-05-01")), "1999");
        assert_eq!(release_year(Some("2004-07")), "2004");
        assert_eq!(release_year(Some("1865")), "1865");
    }

    #[test]
    fn missing_or_empty_dates_are_unknown() {
        assert_eq!(release_year(None), UNKNOWN_YEAR);
        assert_eq!(release_year(Some("")), UNKNOWN_YEAR);
        assert_eq!(release_year(Some("-05-01")), UNKNOWN_YEAR);
    }

    #[test]
    fn blank_titles_fall_back_to_placeholder() {
        assert_eq!(display_title(None), UNKNOWN_TITLE);
        assert_eq!(display_title(Some("  ".into())), UNKNOWN_TITLE);
        assert_eq!(display_title(Some("Dune".into())), "Dune");
    }

    #[test]
    fn poster_urls_are_absolute_or_placeholders() {
        assert_eq!(
            tmdb_poster_url(Some("/x.jpg")),
            "https://image.tmdb.org/t/p/w200/x.jpg"
        );
        assert_eq!(tmdb_poster_url(None), TMDB_POSTER_PLACEHOLDER);
        assert_eq!(book_cover_url(None), BOOK_COVER_PLACEHOLDER);
    }

    #[test]
    fn book_covers_are_upgraded_to_https() {
        assert_eq!(
            book_cover_url(Some("http://books.google.com/c?id=1")),
            "https://books.google.com/c?id=1"
        );
        assert_eq!(
            book_cover_url(Some("https://books.google.com/c?id=1")),
            "https://books.google.com/c?id=1"
        );
    }
}
