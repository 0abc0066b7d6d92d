//! Access token inspection.
//!
//! The portal cannot verify backend signatures (it never holds the secret),
//! but it can reject tokens that are malformed or already expired before
//! spending a backend round trip on them.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::errors::AppResult;

/// Claims the portal reads from a backend token
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    pub exp: i64,
}

/// Decode `token` and check that it is well formed and not expired.
pub fn inspect(token: &str) -> AppResult<TokenClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = true;

    let data = decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(data.claims)
}

/// Strip an optional `Bearer ` prefix and surrounding whitespace.
pub fn normalize(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    let token = trimmed
        .strip_prefix(crate::config::BEARER_TOKEN_PREFIX)
        .unwrap_or(trimmed)
        .trim();
    (!token.is_empty()).then_some(token)
}
