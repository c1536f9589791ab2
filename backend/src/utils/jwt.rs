use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use voicecart_shared::{PrincipalKind, MIN_JWT_SECRET_LENGTH};

use crate::error::AppError;


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,         // Principal id
    pub name: String,
    pub email: String,
    pub kind: PrincipalKind, // user, seller or admin
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl Claims {
    pub fn principal_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::Authentication("Invalid subject in token".to_string()))
    }
}

/// Issues and checks HS256 access tokens. Tokens are stateless; there is no
/// revocation list.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry: Duration,
}

impl JwtService {
    pub fn new(secret: &str, expiry_hours: i64) -> Result<Self, AppError> {
        if secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::Internal(format!(
                "JWT secret must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub", "iat"]);
        validation.validate_exp = true;
        validation.leeway = 30; // clock skew

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expiry: Duration::hours(expiry_hours),
        })
    }

    /// Generate an access token
    pub fn issue(
        &self,
        id: Uuid,
        name: &str,
        email: &str,
        kind: PrincipalKind,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            kind,
            exp: (now + self.expiry).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to encode JWT: {}", e)))
    }

    /// Validate and decode a token
    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::Authentication("Token has expired".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::Authentication("Invalid token signature".to_string())
                }
                _ => AppError::Authentication("Invalid token".to_string()),
            })
    }
}
