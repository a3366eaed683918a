//! Account types exchanged by the registration and login endpoints.
//!
//! The password hash never appears here; it lives only in the store.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::ModelError;

/// Registered account as exposed over the API
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct User {
    pub id: Uuid,
    /// Lowercased login email, unique across accounts
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

/// Registration payload after validation and email normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegisterResponse {
    pub message: String,
    pub user: User,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoginResponse {
    pub message: String,
    pub user: User,
    pub token: String,
}

/// Trim and lowercase an email, rejecting anything without a local part
/// and a domain.
pub fn normalize_email(raw: &str) -> Result<String, ModelError> {
    let email = raw.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace) =>
        {
            Ok(email)
        }
        _ => Err(ModelError::Validation(format!(
            "'{}' is not a valid email address",
            raw.trim()
        ))),
    }
}

impl RegisterRequest {
    pub fn validate(self) -> Result<NewAccount, ModelError> {
        let email = self
            .email
            .filter(|e| !e.trim().is_empty())
            .ok_or(ModelError::MissingField("email"))?;
        let password = self
            .password
            .filter(|p| !p.is_empty())
            .ok_or(ModelError::MissingField("password"))?;

        Ok(NewAccount {
            email: normalize_email(&email)?,
            password,
            name: self
                .name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        })
    }
}

impl LoginRequest {
    /// Returns the normalized email and the raw password.
    pub fn credentials(self) -> Result<(String, String), ModelError> {
        let email = self
            .email
            .filter(|e| !e.trim().is_empty())
            .ok_or(ModelError::MissingField("email"))?;
        let password = self
            .password
            .filter(|p| !p.is_empty())
            .ok_or(ModelError::MissingField("password"))?;
        Ok((email.trim().to_lowercase(), password))
    }
}
