use serde::Deserialize;
use voicecart_shared::{DEFAULT_CURRENCY, DEFAULT_JWT_EXPIRY_HOURS, MIN_JWT_SECRET_LENGTH};

use crate::error::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Absent means the in-memory store is used.
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub bcrypt_cost: u32,
    pub razorpay_key_id: String,
    pub razorpay_key_secret: String,
    pub razorpay_api_url: String,
    pub currency: String,
    /// Absent means emails are only logged.
    pub email_api_url: Option<String>,
    pub email_api_key: Option<String>,
    pub email_from: String,
    pub frontend_origin: String,
    pub admin_email: String,
    pub admin_password: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8080_i64)?
            .set_default("jwt_expiry_hours", DEFAULT_JWT_EXPIRY_HOURS)?
            .set_default("bcrypt_cost", i64::from(bcrypt::DEFAULT_COST))?
            .set_default("razorpay_api_url", "https://api.razorpay.com/v1")?
            .set_default("currency", DEFAULT_CURRENCY)?
            .set_default("email_from", "VoiceCart <orders@voicecart.local>")?
            .set_default("frontend_origin", "http://localhost:3000")?
            .set_default("admin_email", "admin@voicecart.local")?
            .set_default("admin_password", "")?
            .add_source(config::Environment::default())
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::Validation(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }
        if self.email_api_url.is_some() && self.email_api_key.is_none() {
            return Err(AppError::Validation(
                "EMAIL_API_KEY is required when EMAIL_API_URL is set".to_string(),
            ));
        }
        Ok(())
    }
}
