use async_trait::async_trait;
use mediashelf_model::{MediaKind, NormalizedResult, UniqueId};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::normalize::{
    MIN_MOVIE_POPULARITY, display_title, release_year, tmdb_poster_url,
};
use super::upstream::fetch_json;
use super::{CatalogError, CatalogProvider};

const TMDB_API_BASE: &str = "https://api.themoviedb.org/3";
const PROVIDER: &str = "TMDB";

/// Movie and series search against TMDB's `search/movie` and `search/tv`.
#[derive(Debug, Clone)]
pub struct TmdbCatalog {
    api_key: String,
    language: Option<String>,
    base_url: String,
    client: Client,
}

impl TmdbCatalog {
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            language: None,
            base_url: TMDB_API_BASE.to_string(),
            client,
        }
    }

    /// Point the adapter at another host (a proxy or a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Localize titles, e.g. `pt-BR`. TMDB's default applies when unset.
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language.filter(|lang| !lang.trim().is_empty());
        self
    }

    fn endpoint(kind: MediaKind) -> Result<&'static str, CatalogError> {
        match kind {
            MediaKind::Movie => Ok("search/movie"),
            MediaKind::Series => Ok("search/tv"),
            MediaKind::Book => Err(CatalogError::Internal(
                "TMDB does not catalog books".to_string(),
            )),
        }
    }
}

#[async_trait]
impl CatalogProvider for TmdbCatalog {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn search(
        &self,
        query: &str,
        kind: MediaKind,
    ) -> Result<Vec<NormalizedResult>, CatalogError> {
        let url = format!("{}/{}", self.base_url, Self::endpoint(kind)?);
        debug!(%url, query, %kind, "searching TMDB");

        let mut params = vec![("api_key", self.api_key.as_str()), ("query", query)];
        if let Some(language) = &self.language {
            params.push(("language", language.as_str()));
        }

        let response: TmdbSearchResponse =
            fetch_json(PROVIDER, self.client.get(&url).query(&params)).await?;
        Ok(normalize_results(response, kind))
    }
}

#[derive(Debug, Deserialize)]
struct TmdbSearchResponse {
    #[serde(default)]
    results: Vec<TmdbSearchResult>,
}

#[derive(Debug, Deserialize)]
struct TmdbSearchResult {
    id: u64,
    title: Option<String>,
    name: Option<String>, // TV shows use "name" instead of "title"
    release_date: Option<String>,
    first_air_date: Option<String>, // TV shows
    poster_path: Option<String>,
    popularity: Option<f64>,
}

impl TmdbSearchResult {
    /// Movies need a poster and some popularity to be worth showing.
    fn is_presentable_movie(&self) -> bool {
        self.poster_path.as_deref().is_some_and(|path| !path.is_empty())
            && self.popularity.unwrap_or(0.0) >= MIN_MOVIE_POPULARITY
    }

    fn into_result(self, kind: MediaKind) -> NormalizedResult {
        let (unique_id, title, date) = match kind {
            MediaKind::Series => (
                UniqueId::tmdb_series(self.id),
                self.name,
                self.first_air_date,
            ),
            _ => (UniqueId::tmdb_movie(self.id), self.title, self.release_date),
        };

        NormalizedResult {
            unique_id,
            kind,
            title: display_title(title),
            release_year: release_year(date.as_deref()),
            poster_url: tmdb_poster_url(self.poster_path.as_deref()),
            authors: Vec::new(),
        }
    }
}

fn normalize_results(
    response: TmdbSearchResponse,
    kind: MediaKind,
) -> Vec<NormalizedResult> {
    response
        .results
        .into_iter()
        .filter(|item| kind != MediaKind::Movie || item.is_presentable_movie())
        .map(|item| item.into_result(kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::normalize::TMDB_POSTER_PLACEHOLDER;
    use mediashelf_model::UNKNOWN_YEAR;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> TmdbSearchResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn normalizes_a_popular_movie() {
        let response = parse(json!({
            "results": [{
                "id": 42,
                "title": "X",
                "release_date": "1999-05-01",
                "poster_path": "/x.jpg",
                "popularity": 10
            }]
        }));

        let results = normalize_results(response, MediaKind::Movie);
        assert_eq!(
            results,
            vec![NormalizedResult {
                unique_id: UniqueId::tmdb_movie(42),
                kind: MediaKind::Movie,
                title: "X".into(),
                release_year: "1999".into(),
                poster_url: "https://image.tmdb.org/t/p/w200/x.jpg".into(),
                authors: vec![],
            }]
        );
    }

    #[test]
    fn drops_movies_without_poster_or_popularity() {
        let response = parse(json!({
            "results": [
                { "id": 1, "title": "No poster", "poster_path": null, "popularity": 50.0 },
                { "id": 2, "title": "Obscure", "poster_path": "/o.jpg", "popularity": 2.99 },
                { "id": 3, "title": "Unrated", "poster_path": "/u.jpg" },
                { "id": 4, "title": "Edge", "poster_path": "/e.jpg", "popularity": 3.0 },
                { "id": 5, "title": "Hit", "poster_path": "/h.jpg", "popularity": 88.1 }
            ]
        }));

        let ids: Vec<_> = normalize_results(response, MediaKind::Movie)
            .into_iter()
            .map(|r| r.unique_id.to_string())
            .collect();
        assert_eq!(ids, ["TMDB:movie:4", "TMDB:movie:5"]);
    }

    #[test]
    fn series_are_never_filtered() {
        let response = parse(json!({
            "results": [
                { "id": 1399, "name": "Game of Thrones", "first_air_date": "2011-04-17", "popularity": 0.1 },
                { "id": 7, "name": "Pilot Only", "first_air_date": "" }
            ]
        }));

        let results = normalize_results(response, MediaKind::Series);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].unique_id.as_str(), "TMDB:tv:1399");
        assert_eq!(results[0].title, "Game of Thrones");
        assert_eq!(results[0].release_year, "2011");
        assert_eq!(results[0].poster_url, TMDB_POSTER_PLACEHOLDER);
        assert_eq!(results[1].release_year, UNKNOWN_YEAR);
    }

    #[test]
    fn missing_results_array_is_empty() {
        let response = parse(json!({ "page": 1 }));
        assert!(normalize_results(response, MediaKind::Series).is_empty());
    }

    #[test]
    fn books_are_not_routed_here() {
        assert!(matches!(
            TmdbCatalog::endpoint(MediaKind::Book),
            Err(CatalogError::Internal(_))
        ));
    }
}
