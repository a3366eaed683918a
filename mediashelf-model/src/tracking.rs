//! A user's relationship to a catalog item: status, rating and review.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::ModelError;
use crate::media_kind::MediaKind;
use crate::result::UNKNOWN_TITLE;
use crate::unique_id::UniqueId;

/// Where the user stands with a tracked item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TrackingStatus {
    Watched,
    Watching,
    WantToWatch,
}

impl TrackingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackingStatus::Watched => "watched",
            TrackingStatus::Watching => "watching",
            TrackingStatus::WantToWatch => "want_to_watch",
        }
    }
}

impl Display for TrackingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackingStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "watched" => Ok(TrackingStatus::Watched),
            "watching" => Ok(TrackingStatus::Watching),
            "want_to_watch" => Ok(TrackingStatus::WantToWatch),
            other => Err(ModelError::InvalidStatus(other.to_string())),
        }
    }
}

/// Star rating, 1 through 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i64", into = "i64"))]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self, ModelError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(ModelError::InvalidRating(value))
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = ModelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for i64 {
    fn from(value: Rating) -> Self {
        i64::from(value.0)
    }
}

/// Persisted tracking record, unique per (user, unique id).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TrackedMedia {
    pub id: Uuid,
    pub user_id: Uuid,
    pub unique_id: UniqueId,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: MediaKind,
    pub title: String,
    pub poster_url: Option<String>,
    pub release_year: Option<String>,
    pub status: TrackingStatus,
    pub rating: Option<Rating>,
    pub review: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Release year as clients send it; either `"1999"` or `1999`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum YearInput {
    Text(String),
    Number(i64),
}

/// Raw body of a track/update call. Every field is optional on the wire so
/// that missing values surface as validation messages, not decode failures.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct TrackMediaRequest {
    pub unique_id: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub poster_url: Option<String>,
    pub release_year: Option<YearInput>,
    pub status: Option<String>,
    pub rating: Option<i64>,
    pub review: Option<String>,
}

/// Validated upsert payload handed to the tracking store.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackMediaInput {
    pub unique_id: UniqueId,
    pub kind: MediaKind,
    pub title: String,
    pub poster_url: Option<String>,
    pub release_year: Option<String>,
    pub status: TrackingStatus,
    pub rating: Option<Rating>,
    pub review: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl TrackMediaRequest {
    pub fn validate(self) -> Result<TrackMediaInput, ModelError> {
        let unique_id = non_blank(self.unique_id)
            .ok_or(ModelError::MissingField("uniqueId"))?;
        let unique_id = UniqueId::parse(&unique_id)?;

        let status = non_blank(self.status)
            .ok_or(ModelError::MissingField("status"))?
            .parse::<TrackingStatus>()?;

        // The id prefix already pins the kind; an explicit type must agree.
        let kind = unique_id.media_kind();
        if let Some(raw) = non_blank(self.kind) {
            let declared = raw.parse::<MediaKind>()?;
            if declared != kind {
                return Err(ModelError::Validation(format!(
                    "type '{declared}' does not match unique id '{unique_id}'"
                )));
            }
        }

        let release_year = match self.release_year {
            Some(YearInput::Text(text)) => non_blank(Some(text)),
            Some(YearInput::Number(year)) => Some(year.to_string()),
            None => None,
        };

        Ok(TrackMediaInput {
            unique_id,
            kind,
            title: non_blank(self.title)
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            poster_url: non_blank(self.poster_url),
            release_year,
            status,
            rating: self.rating.map(Rating::new).transpose()?,
            review: non_blank(self.review),
        })
    }
}
