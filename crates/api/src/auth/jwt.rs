//! JWT access-token validation.
//!
//! Tokens are minted by the upstream identity service; this coordinator only
//! verifies them. Verification is HMAC-only: the token's declared algorithm
//! is checked against the HS allow-list before any signature work, so a
//! token claiming an asymmetric algorithm is rejected outright instead of
//! being verified with the wrong key family.

use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// HMAC algorithms this service accepts. Anything else in a token header is
/// rejected before signature verification.
const ALLOWED_ALGS: &[Algorithm] = &[Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// JWT claims expected in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the username the booking is recorded under.
    pub sub: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Configuration for JWT token validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret shared with the identity service.
    pub secret: String,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var      | Default       |
    /// |--------------|---------------|
    /// | `JWT_SECRET` | `supersecret` |
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| "supersecret".into());
        Self { secret }
    }
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Checks, in order: the declared algorithm is an allowed HS variant, the
/// signature matches under the shared secret, and `exp` has not passed.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let header = decode_header(token)?;
    if !ALLOWED_ALGS.contains(&header.alg) {
        return Err(jsonwebtoken::errors::ErrorKind::InvalidAlgorithm.into());
    }

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::new(header.alg),
    )?;
    Ok(token_data.claims)
}
