//! JWT issuance and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use super::AuthError;
use crate::models::auth::{TokenClaims, TokenKind, TokenPair};

/// Access token lifetime: 15 minutes.
const ACCESS_TOKEN_EXPIRY_SECS: i64 = 15 * 60;

/// Refresh token lifetime: 7 days.
const REFRESH_TOKEN_EXPIRY_SECS: i64 = 7 * 24 * 60 * 60;

/// Signs and verifies HS256 bearer tokens.
///
/// Built once from configuration and shared through application state, so the
/// signing secret is never read from the environment at call time.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], issuer: impl Into<String>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
        }
    }

    /// The configured `iss` claim value.
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Issue a fresh access + refresh pair for a user.
    pub fn issue_pair(&self, user_id: &str) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access_token: self.issue(user_id, TokenKind::Access, ACCESS_TOKEN_EXPIRY_SECS)?,
            refresh_token: self.issue(user_id, TokenKind::Refresh, REFRESH_TOKEN_EXPIRY_SECS)?,
        })
    }

    fn issue(&self, user_id: &str, kind: TokenKind, expiry_secs: i64) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = TokenClaims {
            id: user_id.to_string(),
            exp: (now + Duration::seconds(expiry_secs)).timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            kind,
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::Internal(format!("jwt encode: {e}")))
    }

    /// Verify signature and the required `exp`, `iat`, `iss` claims, returning
    /// the decoded claims.
    ///
    /// The `type` claim is not checked here; callers compare it against the
    /// kind they expect so each flow can reject with its own message.
    pub fn decode_claims(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "iat", "iss"]);
        validation.set_issuer(&[&self.issuer]);
        decode::<TokenClaims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::TokenError(format!("invalid token: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    const SECRET: &[u8] = b"test-secret";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(SECRET, "ward-test")
    }

    #[test]
    fn issued_pair_decodes_with_expected_kinds() {
        let tokens = issuer();
        let pair = tokens.issue_pair("user-1").unwrap();

        let access = tokens.decode_claims(&pair.access_token).unwrap();
        assert_eq!(access.kind, TokenKind::Access);
        assert_eq!(access.id, "user-1");
        assert_eq!(access.iss, "ward-test");

        let refresh = tokens.decode_claims(&pair.refresh_token).unwrap();
        assert_eq!(refresh.kind, TokenKind::Refresh);
        assert!(refresh.exp > access.exp);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let pair = issuer().issue_pair("user-1").unwrap();
        let other = TokenIssuer::new(b"another-secret", "ward-test");
        assert!(other.decode_claims(&pair.access_token).is_err());
    }

    #[test]
    fn wrong_issuer_is_rejected() {
        let pair = issuer().issue_pair("user-1").unwrap();
        let other = TokenIssuer::new(SECRET, "someone-else");
        assert!(other.decode_claims(&pair.access_token).is_err());
    }

    #[test]
    fn missing_iss_claim_is_rejected() {
        // Hand-rolled claims without `iss`, signed with the right secret.
        #[derive(Serialize)]
        struct BareClaims {
            id: String,
            exp: i64,
            iat: i64,
            #[serde(rename = "type")]
            kind: TokenKind,
        }
        let now = Utc::now();
        let bare = BareClaims {
            id: "user-1".into(),
            exp: (now + Duration::seconds(600)).timestamp(),
            iat: now.timestamp(),
            kind: TokenKind::Refresh,
        };
        let token = encode(
            &Header::default(),
            &bare,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        assert!(issuer().decode_claims(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        #[derive(Serialize)]
        struct StaleClaims {
            id: String,
            exp: i64,
            iat: i64,
            iss: String,
            #[serde(rename = "type")]
            kind: TokenKind,
        }
        let now = Utc::now();
        let stale = StaleClaims {
            id: "user-1".into(),
            // Well past the default decode leeway.
            exp: (now - Duration::hours(2)).timestamp(),
            iat: (now - Duration::hours(3)).timestamp(),
            iss: "ward-test".into(),
            kind: TokenKind::Access,
        };
        let token = encode(
            &Header::default(),
            &stale,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        assert!(issuer().decode_claims(&token).is_err());
    }
}
