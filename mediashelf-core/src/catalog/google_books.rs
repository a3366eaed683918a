use async_trait::async_trait;
use mediashelf_model::{MediaKind, NormalizedResult, UniqueId};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::normalize::{
    BOOKS_MAX_RESULTS, book_cover_url, display_title, release_year,
};
use super::upstream::fetch_json;
use super::{CatalogError, CatalogProvider};

const GOOGLE_BOOKS_API_BASE: &str = "https://www.googleapis.com/books/v1";
const PROVIDER: &str = "Google Books";

/// Book search against the Google Books `volumes` endpoint. The API key is
/// optional; anonymous requests share a lower quota.
#[derive(Debug, Clone)]
pub struct GoogleBooksCatalog {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

impl GoogleBooksCatalog {
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            base_url: GOOGLE_BOOKS_API_BASE.to_string(),
            client,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl CatalogProvider for GoogleBooksCatalog {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn search(
        &self,
        query: &str,
        kind: MediaKind,
    ) -> Result<Vec<NormalizedResult>, CatalogError> {
        if kind != MediaKind::Book {
            return Err(CatalogError::Internal(format!(
                "Google Books cannot search for {kind}"
            )));
        }

        let url = format!("{}/volumes", self.base_url);
        debug!(%url, query, "searching Google Books");

        let max_results = BOOKS_MAX_RESULTS.to_string();
        let mut params = vec![
            ("q", query),
            ("maxResults", max_results.as_str()),
            ("printType", "books"),
        ];
        if let Some(key) = &self.api_key {
            params.push(("key", key.as_str()));
        }

        let response: VolumesResponse =
            fetch_json(PROVIDER, self.client.get(&url).query(&params)).await?;
        Ok(normalize_volumes(response))
    }
}

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Option<Vec<Volume>>,
}

#[derive(Debug, Deserialize)]
struct Volume {
    id: Option<String>,
    /// Kept raw so emptiness is judged on everything upstream sent, not
    /// only on the fields mapped below.
    #[serde(rename = "volumeInfo")]
    volume_info: Option<Map<String, Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
    published_date: Option<String>,
    image_links: Option<ImageLinks>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

impl Volume {
    /// Volumes without an id, without a non-empty `volumeInfo`, or with one
    /// whose mapped fields have the wrong shape are skipped.
    fn into_result(self) -> Option<NormalizedResult> {
        let id = self.id.filter(|id| !id.is_empty())?;
        let raw = self.volume_info.filter(|info| !info.is_empty())?;
        let info: VolumeInfo = match serde_json::from_value(Value::Object(raw)) {
            Ok(info) => info,
            Err(err) => {
                debug!(volume_id = %id, error = %err, "skipping malformed volume");
                return None;
            }
        };
        let thumbnail = info.image_links.and_then(|links| links.thumbnail);

        Some(NormalizedResult {
            unique_id: UniqueId::google_books(&id),
            kind: MediaKind::Book,
            title: display_title(info.title),
            release_year: release_year(info.published_date.as_deref()),
            poster_url: book_cover_url(thumbnail.as_deref()),
            authors: info.authors.unwrap_or_default(),
        })
    }
}

fn normalize_volumes(response: VolumesResponse) -> Vec<NormalizedResult> {
    response
        .items
        .unwrap_or_default()
        .into_iter()
        .filter_map(Volume::into_result)
        .collect()
}
