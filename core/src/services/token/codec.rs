//! Signing and structural verification of claim sets.

use std::collections::HashSet;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{Claims, TokenType};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKeys {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Encodes and decodes signed tokens
///
/// Each token type has its own key. The header `kid` names the type so the
/// matching key is chosen before the signature is checked, and after
/// verification the `type` claim must agree with it.
///
/// Decoding checks signature and structure only. Expiry, expected type and
/// revocation are business rules applied by `TokenVerifier`.
pub struct ClaimsCodec {
    algorithm: Algorithm,
    access: SigningKeys,
    refresh: SigningKeys,
    validation: Validation,
}

impl ClaimsCodec {
    pub fn new(config: &TokenServiceConfig) -> Result<Self, DomainError> {
        if !matches!(
            config.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(DomainError::Validation {
                message: format!("Unsupported JWT algorithm: {:?}", config.algorithm),
            });
        }
        if config.access_secret.is_empty() || config.refresh_secret.is_empty() {
            return Err(DomainError::Validation {
                message: "JWT signing secrets must not be empty".to_string(),
            });
        }

        let mut validation = Validation::new(config.algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims =
            HashSet::from(["exp".to_string(), "sub".to_string()]);

        Ok(Self {
            algorithm: config.algorithm,
            access: SigningKeys::from_secret(&config.access_secret),
            refresh: SigningKeys::from_secret(&config.refresh_secret),
            validation,
        })
    }

    fn keys(&self, token_type: TokenType) -> &SigningKeys {
        match token_type {
            TokenType::Access => &self.access,
            TokenType::Refresh => &self.refresh,
        }
    }

    /// Sign `claims` with the key for `claims.token_type`
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let mut header = Header::new(self.algorithm);
        header.kid = Some(claims.token_type.as_str().to_string());

        encode(&header, claims, &self.keys(claims.token_type).encoding).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            TokenError::SigningFailed
        })
    }

    /// Verify the signature of `token` and return its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature valid and all claims present
    /// * `Err(TokenError::InvalidSignature)` - Tag does not match
    /// * `Err(TokenError::MalformedToken)` - Anything else wrong with the token
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let header = decode_header(token).map_err(|_| TokenError::MalformedToken)?;
        if header.alg != self.algorithm {
            return Err(TokenError::MalformedToken);
        }
        let declared: TokenType = header
            .kid
            .as_deref()
            .ok_or(TokenError::MalformedToken)?
            .parse()?;

        let data = decode::<Claims>(token, &self.keys(declared).decoding, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::MalformedToken,
            })?;
        let claims = data.claims;

        if claims.token_type != declared || claims.jti.is_empty() {
            return Err(TokenError::MalformedToken);
        }
        claims.account_id()?;

        Ok(claims)
    }
}
