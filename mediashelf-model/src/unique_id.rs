use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;
use crate::media_kind::MediaKind;

const TMDB_MOVIE_PREFIX: &str = "TMDB:movie:";
const TMDB_TV_PREFIX: &str = "TMDB:tv:";
const GOOGLE_BOOKS_PREFIX: &str = "GB:";

/// Upstream catalog an identifier was minted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogSource {
    Tmdb,
    GoogleBooks,
}

/// Source-qualified item identifier.
///
/// The prefix encodes both the catalog and, for TMDB, the subtype so that a
/// movie and a TV show sharing a numeric id never collide:
///
/// * `TMDB:movie:<id>`
/// * `TMDB:tv:<id>`
/// * `GB:<volume id>`
///
/// This is the natural key of a tracked item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct UniqueId(String);

impl UniqueId {
    pub fn tmdb_movie(id: u64) -> Self {
        UniqueId(format!("{TMDB_MOVIE_PREFIX}{id}"))
    }

    pub fn tmdb_series(id: u64) -> Self {
        UniqueId(format!("{TMDB_TV_PREFIX}{id}"))
    }

    pub fn google_books(volume_id: &str) -> Self {
        UniqueId(format!("{GOOGLE_BOOKS_PREFIX}{volume_id}"))
    }

    /// Validate a raw identifier received from a client.
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        let (_, native) = Self::split(raw)
            .ok_or_else(|| ModelError::InvalidUniqueId(raw.to_string()))?;
        if native.is_empty() || native.chars().any(char::is_whitespace) {
            return Err(ModelError::InvalidUniqueId(raw.to_string()));
        }
        Ok(UniqueId(raw.to_string()))
    }

    fn split(raw: &str) -> Option<(MediaKind, &str)> {
        if let Some(rest) = raw.strip_prefix(TMDB_MOVIE_PREFIX) {
            Some((MediaKind::Movie, rest))
        } else if let Some(rest) = raw.strip_prefix(TMDB_TV_PREFIX) {
            Some((MediaKind::Series, rest))
        } else {
            raw.strip_prefix(GOOGLE_BOOKS_PREFIX)
                .map(|rest| (MediaKind::Book, rest))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Media kind implied by the prefix
    pub fn media_kind(&self) -> MediaKind {
        Self::split(&self.0)
            .map(|(kind, _)| kind)
            .unwrap_or(MediaKind::Book)
    }

    pub fn source(&self) -> CatalogSource {
        match self.media_kind() {
            MediaKind::Movie | MediaKind::Series => CatalogSource::Tmdb,
            MediaKind::Book => CatalogSource::GoogleBooks,
        }
    }

    /// The upstream's own identifier without the source prefix.
    pub fn native_id(&self) -> &str {
        Self::split(&self.0).map(|(_, rest)| rest).unwrap_or_default()
    }
}

impl AsRef<str> for UniqueId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for UniqueId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for UniqueId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UniqueId::parse(s)
    }
}

impl TryFrom<String> for UniqueId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        UniqueId::parse(&value)
    }
}

impl From<UniqueId> for String {
    fn from(value: UniqueId) -> Self {
        value.0
    }
}
