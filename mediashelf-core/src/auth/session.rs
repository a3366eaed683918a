use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use super::token::{TokenError, TokenSigner};

/// Caller identity proven by a valid bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthRejection {
    #[error("Access denied. Token not provided.")]
    MissingToken,
    #[error("Invalid or expired token.")]
    InvalidToken,
}

/// Token part of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(authorization: &str) -> Option<&str> {
    let (scheme, token) = authorization.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Resolve the caller from the raw `Authorization` header.
///
/// A missing header or a non-bearer scheme is [`AuthRejection::MissingToken`];
/// a token that fails signature or expiry checks is
/// [`AuthRejection::InvalidToken`].
pub fn authenticate(
    signer: &TokenSigner,
    authorization: Option<&str>,
) -> Result<Identity, AuthRejection> {
    let token = authorization
        .and_then(bearer_token)
        .ok_or(AuthRejection::MissingToken)?;

    signer
        .verify(token)
        .map(|claims| Identity {
            user_id: claims.sub,
        })
        .map_err(|err| {
            match &err {
                TokenError::Expired => debug!("rejected expired session token"),
                other => debug!(error = %other, "rejected session token"),
            }
            AuthRejection::InvalidToken
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::DEFAULT_TOKEN_TTL;

    fn signer() -> TokenSigner {
        TokenSigner::new("session-secret", DEFAULT_TOKEN_TTL).unwrap()
    }

    #[test]
    fn accepts_a_valid_bearer_token() {
        let signer = signer();
        let user_id = Uuid::now_v7();
        let header = format!("Bearer {}", signer.issue(user_id).unwrap());

        assert_eq!(
            authenticate(&signer, Some(&header)),
            Ok(Identity { user_id })
        );
    }

    #[test]
    fn missing_or_malformed_headers_are_missing_tokens() {
        let signer = signer();
        for header in [None, Some(""), Some("Bearer"), Some("Bearer   "), Some("Basic abc")] {
            assert_eq!(
                authenticate(&signer, header),
                Err(AuthRejection::MissingToken),
                "{header:?}"
            );
        }
    }

    #[test]
    fn bad_tokens_are_invalid() {
        let other = TokenSigner::new("other-secret", DEFAULT_TOKEN_TTL).unwrap();
        let foreign = format!("Bearer {}", other.issue(Uuid::now_v7()).unwrap());

        assert_eq!(
            authenticate(&signer(), Some(&foreign)),
            Err(AuthRejection::InvalidToken)
        );
        assert_eq!(
            authenticate(&signer(), Some("Bearer garbage")),
            Err(AuthRejection::InvalidToken)
        );
    }

    #[test]
    fn scheme_is_case_insensitive() {
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
        assert_eq!(bearer_token("BEARER  abc "), Some("abc"));
    }
}
