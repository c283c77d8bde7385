//! Session repository for cookie-based logins.
//!
//! Session tokens are opaque random strings handed to the browser; only a
//! SHA-256 hash of the token is stored.

use chrono::{Duration, Utc};
use rand::RngCore;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use sha2::{Digest, Sha256};
use tracing::error;
use uuid::Uuid;

use crate::entities::{accounts, sessions};

/// Session repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    db: DatabaseConnection,
}

impl SessionRepository {
    /// Creates a new session repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Generates a fresh session token.
    #[must_use]
    pub fn generate_token() -> String {
        let mut bytes = [0u8; 32];
        rand::rng().fill_bytes(&mut bytes);
        base64_url::encode(&bytes)
    }

    /// Hashes a session token for storage.
    #[must_use]
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Creates a new session and returns the raw token with the stored row.
    ///
    /// Returns `None` when the store rejects the write; the caller treats
    /// that as a failed login.
    pub async fn create(
        &self,
        account_id: Uuid,
        ttl: Duration,
        user_agent: Option<&str>,
        ip_address: Option<&str>,
    ) -> Option<(String, sessions::Model)> {
        let token = Self::generate_token();
        let now = Utc::now();

        let session = sessions::ActiveModel {
            id: Set(Uuid::new_v4()),
            account_id: Set(account_id),
            token_hash: Set(Self::hash_token(&token)),
            user_agent: Set(user_agent.map(String::from)),
            ip_address: Set(ip_address.map(String::from)),
            expires_at: Set((now + ttl).into()),
            revoked_at: Set(None),
            created_at: Set(now.into()),
        };

        match session.insert(&self.db).await {
            Ok(model) => Some((token, model)),
            Err(e) => {
                error!(error = %e, "failed to create session");
                None
            }
        }
    }

    /// Resolves a session token to its account.
    ///
    /// Only unrevoked, unexpired sessions resolve; anything else, including
    /// an unreachable store, is `None`.
    pub async fn find_account(&self, token: &str) -> Option<accounts::Model> {
        let session = sessions::Entity::find()
            .filter(sessions::Column::TokenHash.eq(Self::hash_token(token)))
            .filter(sessions::Column::RevokedAt.is_null())
            .filter(sessions::Column::ExpiresAt.gt(Utc::now()))
            .one(&self.db)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "session lookup failed");
                None
            })?;

        accounts::Entity::find_by_id(session.account_id)
            .one(&self.db)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "session account lookup failed");
                None
            })
    }

    /// Revokes the session behind a token. Returns `false` when no active
    /// session matches or the write fails.
    pub async fn revoke(&self, token: &str) -> bool {
        let session = sessions::Entity::find()
            .filter(sessions::Column::TokenHash.eq(Self::hash_token(token)))
            .filter(sessions::Column::RevokedAt.is_null())
            .one(&self.db)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "session lookup failed");
                None
            });

        let Some(session) = session else {
            return false;
        };

        let change = sessions::ActiveModel {
            id: Set(session.id),
            revoked_at: Set(Some(Utc::now().into())),
            ..Default::default()
        };

        match change.update(&self.db).await {
            Ok(_) => true,
            Err(e) => {
                error!(error = %e, "failed to revoke session");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token_is_unique_and_url_safe() {
        let a = SessionRepository::generate_token();
        let b = SessionRepository::generate_token();

        assert_ne!(a, b);
        assert!(a.len() >= 40);
        assert!(
            a.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_hash_token_is_stable_hex() {
        let token = "some-session-token";
        let first = SessionRepository::hash_token(token);
        let second = SessionRepository::hash_token(token);

        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_token_differs_per_token() {
        assert_ne!(
            SessionRepository::hash_token("token-a"),
            SessionRepository::hash_token("token-b")
        );
    }
}
