//! Token entities for JWT-based authentication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::Roles;

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (external identity)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID; keeps two tokens minted in the same second distinct
    pub jti: String,

    /// Comma-joined authorities, present on access tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorities: Option<String>,
}

impl Claims {
    /// Creates claims for a token expiring at `expiry`
    ///
    /// Pass `roles` for access tokens; refresh tokens carry none.
    pub fn new(
        subject: impl Into<String>,
        issuer: impl Into<String>,
        roles: Option<&Roles>,
        expiry: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: subject.into(),
            iat: Utc::now().timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.into(),
            jti: Uuid::new_v4().to_string(),
            authorities: roles.map(Roles::to_authorities_claim),
        }
    }

    /// Roles restored from the `authorities` claim
    pub fn roles(&self) -> Roles {
        Roles::from_authorities_claim(self.authorities.as_deref())
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Token pair returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Refresh token expiry in epoch milliseconds
    pub ttl: i64,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String, ttl: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            ttl,
        }
    }
}

/// The single stored refresh token of an identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshRecord {
    /// Internal identity key owning the slot
    pub owner_key: i64,

    /// Raw refresh token string
    pub token: String,

    /// Expiry in epoch milliseconds
    pub ttl: i64,
}

impl RefreshRecord {
    pub fn new(owner_key: i64, token: impl Into<String>, ttl: i64) -> Self {
        Self {
            owner_key,
            token: token.into(),
            ttl,
        }
    }

    /// True once the recorded expiry has passed
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() >= self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_access_claims_carry_authorities() {
        let roles = Roles::explicit(vec!["ROLE_USER", "ROLE_ADMIN"]);
        let claims = Claims::new("kakao_1", "devmarket", Some(&roles), Utc::now() + Duration::minutes(15));

        assert_eq!(claims.authorities.as_deref(), Some("ROLE_USER,ROLE_ADMIN"));
        assert_eq!(claims.roles(), roles);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_refresh_claims_omit_authorities() {
        let claims = Claims::new("kakao_1", "devmarket", None, Utc::now() + Duration::days(7));
        assert!(claims.authorities.is_none());
        assert_eq!(claims.roles(), Roles::DefaultBaseline);

        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("authorities").is_none());
    }

    #[test]
    fn test_claims_ids_are_unique() {
        let expiry = Utc::now() + Duration::minutes(1);
        let a = Claims::new("kakao_1", "devmarket", None, expiry);
        let b = Claims::new("kakao_1", "devmarket", None, expiry);
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_token_pair_wire_format() {
        let pair = TokenPair::new("a".to_string(), "r".to_string(), 1_700_000_000_000);
        let json = serde_json::to_value(&pair).unwrap();

        assert_eq!(json["accessToken"], "a");
        assert_eq!(json["refreshToken"], "r");
        assert_eq!(json["ttl"], 1_700_000_000_000i64);
    }

    #[test]
    fn test_refresh_record_expiry() {
        let past = Utc::now().timestamp_millis() - 1_000;
        let future = Utc::now().timestamp_millis() + 60_000;
        assert!(RefreshRecord::new(1, "t", past).is_expired());
        assert!(!RefreshRecord::new(1, "t", future).is_expired());
    }
}
