use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub id: Uuid,
    pub token: String,
    pub expires_at: i64,
    pub created_at: DateTime<Utc>,
}

impl AdminSession {
    /// A session is valid strictly before its expiry instant; a token
    /// presented exactly at `expires_at` is already dead.
    pub fn is_valid_at(&self, now_ms: i64) -> bool {
        now_ms < self.expires_at
    }

    pub async fn find_by_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<AdminSession>, sqlx::Error> {
        sqlx::query_as::<_, AdminSession>(
            r#"
            SELECT id, token, expires_at, created_at
            FROM admin_sessions
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(pool)
        .await
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidateSessionRequest {
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(expires_at: i64) -> AdminSession {
        AdminSession {
            id: Uuid::new_v4(),
            token: "deadbeef".to_string(),
            expires_at,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn valid_strictly_before_expiry() {
        let s = session(1_000);
        assert!(s.is_valid_at(999));
    }

    #[test]
    fn invalid_at_and_after_expiry() {
        let s = session(1_000);
        assert!(!s.is_valid_at(1_000));
        assert!(!s.is_valid_at(1_001));
    }

    #[test]
    fn login_response_uses_camel_case() {
        let json = serde_json::to_string(&LoginResponse {
            token: "abc".to_string(),
            expires_at: 42,
        })
        .unwrap();
        assert_eq!(json, r#"{"token":"abc","expiresAt":42}"#);
    }
}
