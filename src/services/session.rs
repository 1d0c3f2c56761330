// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session tokens: short-lived access JWTs and long-lived refresh JWTs.
//!
//! Access and refresh tokens are signed with different keys derived from the
//! master secret, so one can never be presented as the other.

use crate::config::Config;
use crate::crypto;
use crate::error::{AppError, Result};
use crate::models::User;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
    /// Unique token ID
    pub jti: String,
    /// "access" or "refresh"
    pub token_type: TokenType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Tokens handed out on login.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Signs and checks session tokens.
#[derive(Clone)]
pub struct SessionIssuer {
    access_key: [u8; 32],
    refresh_key: [u8; 32],
    access_ttl_secs: usize,
    refresh_ttl_secs: usize,
}

impl SessionIssuer {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            access_key: crypto::derive_key(&config.jwt_signing_key, "session/access")?,
            refresh_key: crypto::derive_key(&config.jwt_signing_key, "session/refresh")?,
            access_ttl_secs: (config.access_token_ttl_minutes.max(1) * 60) as usize,
            refresh_ttl_secs: (config.refresh_token_ttl_hours.max(1) * 60 * 60) as usize,
        })
    }

    /// Issue an access/refresh pair for a verified user.
    pub fn issue(&self, user: &User) -> Result<TokenPair> {
        Ok(TokenPair {
            access: self.sign(user.id, TokenType::Access)?,
            refresh: self.sign(user.id, TokenType::Refresh)?,
        })
    }

    /// Exchange a valid refresh token for a new access token.
    pub fn refresh(&self, refresh_token: &str) -> Result<String> {
        let user_id = self.verify(refresh_token, TokenType::Refresh)?;
        self.sign(user_id, TokenType::Access)
    }

    /// Check an access token and return the user ID it was issued for.
    pub fn verify_access(&self, token: &str) -> Result<u64> {
        self.verify(token, TokenType::Access)
    }

    fn key(&self, token_type: TokenType) -> &[u8] {
        match token_type {
            TokenType::Access => &self.access_key,
            TokenType::Refresh => &self.refresh_key,
        }
    }

    fn sign(&self, user_id: u64, token_type: TokenType) -> Result<String> {
        let now = chrono::Utc::now().timestamp() as usize;
        let ttl = match token_type {
            TokenType::Access => self.access_ttl_secs,
            TokenType::Refresh => self.refresh_ttl_secs,
        };

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + ttl,
            jti: hex::encode(crypto::random_bytes::<16>()?),
            token_type,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.key(token_type)),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))
    }

    fn verify(&self, token: &str, expected: TokenType) -> Result<u64> {
        let key = DecodingKey::from_secret(self.key(expected));
        let validation = Validation::new(Algorithm::HS256);

        let token_data =
            decode::<Claims>(token, &key, &validation).map_err(|_| AppError::InvalidToken)?;

        if token_data.claims.token_type != expected {
            return Err(AppError::InvalidToken);
        }

        token_data
            .claims
            .sub
            .parse()
            .map_err(|_| AppError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn issuer() -> SessionIssuer {
        SessionIssuer::new(&Config::test_default()).unwrap()
    }

    #[test]
    fn test_issue_and_verify_access() {
        let user = User::new(42, "jane@example.com", Utc::now());
        let pair = issuer().issue(&user).unwrap();

        assert_eq!(issuer().verify_access(&pair.access).unwrap(), 42);
        assert_ne!(pair.access, pair.refresh);
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let user = User::new(42, "jane@example.com", Utc::now());
        let pair = issuer().issue(&user).unwrap();

        assert!(matches!(
            issuer().verify_access(&pair.refresh),
            Err(AppError::InvalidToken)
        ));
        assert!(matches!(
            issuer().refresh(&pair.access),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_refresh_issues_new_access() {
        let user = User::new(7, "sam@example.com", Utc::now());
        let pair = issuer().issue(&user).unwrap();

        let access = issuer().refresh(&pair.refresh).unwrap();
        assert_eq!(issuer().verify_access(&access).unwrap(), 7);
    }

    #[test]
    fn test_tokens_from_other_secret_rejected() {
        let mut config = Config::test_default();
        config.jwt_signing_key = b"another_key_that_is_32_bytes_long!".to_vec();
        let other = SessionIssuer::new(&config).unwrap();

        let user = User::new(1, "a@example.com", Utc::now());
        let pair = other.issue(&user).unwrap();
        assert!(issuer().verify_access(&pair.access).is_err());
    }
}
