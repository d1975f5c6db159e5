use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sitestock_core::{DomainError, DomainResult};

use crate::{PasswordHash, Role};

/// Internal user identifier. Assigned on registration, never exposed in
/// HTTP responses.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stored user account. Holds only the salted hash of the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub password: PasswordHash,
    pub role: Role,
}

impl UserRecord {
    /// Build a registration record, hashing the password.
    ///
    /// Duplicate usernames are rejected by the caller's keyed insert.
    pub fn register(
        username: impl Into<String>,
        password: &str,
        role: Option<Role>,
    ) -> DomainResult<Self> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(DomainError::validation("username cannot be empty"));
        }
        if password.is_empty() {
            return Err(DomainError::validation("password cannot be empty"));
        }
        Ok(Self {
            id: UserId::new(),
            username,
            password: PasswordHash::derive(password),
            role: role.unwrap_or_default(),
        })
    }

    /// One-shot credential check.
    ///
    /// The error is the same `Unauthorized` returned for an unknown
    /// username, so responses cannot be used to enumerate accounts.
    pub fn authenticate(&self, password: &str) -> DomainResult<()> {
        if self.password.verify(password) {
            Ok(())
        } else {
            Err(DomainError::Unauthorized)
        }
    }
}
