use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;

/// Category of a searchable or trackable item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MediaKind {
    /// Feature film from the movie catalog
    Movie,
    /// Television series from the movie catalog
    Series,
    /// Printed book from the bibliographic catalog
    Book,
}

impl MediaKind {
    pub const ALL: [MediaKind; 3] =
        [MediaKind::Movie, MediaKind::Series, MediaKind::Book];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "series",
            MediaKind::Book => "book",
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(MediaKind::Movie),
            "series" => Ok(MediaKind::Series),
            "book" => Ok(MediaKind::Book),
            other => Err(ModelError::InvalidMediaKind(other.to_string())),
        }
    }
}
