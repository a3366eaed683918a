use crate::media_kind::MediaKind;
use crate::unique_id::UniqueId;

/// Sentinel stored in `release_year` when upstream provides no date.
pub const UNKNOWN_YEAR: &str = "unknown";

/// Display title substituted when upstream omits one.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Catalog search hit reshaped into the one model every source maps onto.
///
/// Built fresh from upstream JSON on every search; never persisted as-is.
/// `title` and `poster_url` are always populated (placeholders stand in for
/// missing upstream data) and `authors` is only non-empty for books.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct NormalizedResult {
    pub unique_id: UniqueId,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: MediaKind,
    pub title: String,
    /// Four digit year, or [`UNKNOWN_YEAR`]
    pub release_year: String,
    pub poster_url: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub authors: Vec<String>,
}

impl NormalizedResult {
    pub fn has_known_year(&self) -> bool {
        self.release_year != UNKNOWN_YEAR
    }
}
