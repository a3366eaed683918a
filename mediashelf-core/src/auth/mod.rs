//! Accounts and sessions.
//!
//! Passwords are hashed with Argon2id plus a server pepper ([`AuthCrypto`]);
//! sessions are stateless HS256 tokens ([`TokenSigner`]) resolved per
//! request by [`authenticate`].

pub mod accounts;
pub mod crypto;
pub mod session;
pub mod token;

pub use accounts::{AccountError, AccountService, Session};
pub use crypto::{Argon2Params, AuthCrypto, AuthCryptoError};
pub use session::{AuthRejection, Identity, authenticate, bearer_token};
pub use token::{Claims, DEFAULT_TOKEN_TTL, TokenError, TokenSigner};
