use thiserror::Error;

/// Failures surfaced by a catalog search.
///
/// `BadRequest` is raised before any upstream call is made. `Upstream`
/// covers non-success responses and transport failures; there are no
/// retries.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{message}")]
    Upstream {
        provider: &'static str,
        status: Option<u16>,
        message: String,
    },

    #[error("{0}")]
    Internal(String),
}

impl CatalogError {
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            CatalogError::Upstream { status, .. } => *status,
            _ => None,
        }
    }
}
