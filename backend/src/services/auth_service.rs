use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;
use voicecart_shared::{
    AdminAuthResponse, CreateSellerRequest, LoginRequest, PrincipalKind, RegisterUserRequest,
    SellerAuthResponse, SellerProfileResponse, UpdateProfileRequest, UserAuthResponse,
    UserResponse, ERROR_INVALID_CREDENTIALS, ERROR_SELLER_NOT_APPROVED, ERROR_SELLER_NOT_FOUND,
    ERROR_USER_NOT_FOUND,
};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::{normalize_email, Seller, User};
use crate::repositories::{SellerRepository, UserRepository};
use crate::utils::{hash_password, verify_password, JwtService};

const ADMIN_NAME: &str = "Administrator";

/// Account registration, login and profiles for users, sellers and the admin.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    sellers: Arc<dyn SellerRepository>,
    jwt: JwtService,
    bcrypt_cost: u32,
    admin_email: String,
    admin_password: String,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sellers: Arc<dyn SellerRepository>,
        jwt: JwtService,
        config: &AppConfig,
    ) -> Self {
        Self {
            users,
            sellers,
            jwt,
            bcrypt_cost: config.bcrypt_cost,
            admin_email: config.admin_email.clone(),
            admin_password: config.admin_password.clone(),
        }
    }

    /// Register a new user
    pub async fn register_user(
        &self,
        request: RegisterUserRequest,
    ) -> Result<UserAuthResponse, AppError> {
        request.validate()?;

        let password_hash = hash_password(&request.password, self.bcrypt_cost)?;
        let user = User::new(
            request.name,
            normalize_email(&request.email),
            password_hash,
            request.phone,
            request.address,
        );
        self.users.create(&user).await?;
        info!("Registered user {}", user.id);

        let token = self
            .jwt
            .issue(user.id, &user.name, &user.email, PrincipalKind::User)?;
        Ok(UserAuthResponse {
            token,
            user: user.to_response(),
        })
    }

    pub async fn login_user(&self, request: LoginRequest) -> Result<UserAuthResponse, AppError> {
        request.validate()?;

        let email = normalize_email(&request.email);
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !verify_password(&request.password, &user.password_hash)? {
            warn!("Failed login for user {}", user.id);
            return Err(invalid_credentials());
        }

        let token = self
            .jwt
            .issue(user.id, &user.name, &user.email, PrincipalKind::User)?;
        Ok(UserAuthResponse {
            token,
            user: user.to_response(),
        })
    }

    pub async fn user_profile(&self, user_id: Uuid) -> Result<UserResponse, AppError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(ERROR_USER_NOT_FOUND.to_string()))?;
        Ok(user.to_response())
    }

    pub async fn update_user_profile(
        &self,
        user_id: Uuid,
        changes: UpdateProfileRequest,
    ) -> Result<UserResponse, AppError> {
        changes.validate()?;

        let user = self
            .users
            .update_profile(user_id, &changes)
            .await?
            .ok_or_else(|| AppError::NotFound(ERROR_USER_NOT_FOUND.to_string()))?;
        Ok(user.to_response())
    }

    /// New sellers cannot log in until an admin approves them.
    pub async fn register_seller(
        &self,
        request: CreateSellerRequest,
    ) -> Result<SellerProfileResponse, AppError> {
        request.validate()?;

        let password_hash = hash_password(&request.password, self.bcrypt_cost)?;
        let seller = Seller::new(
            request.name,
            normalize_email(&request.email),
            password_hash,
            request.store_name,
            request.phone,
            request.description,
        );
        self.sellers.create(&seller).await?;
        info!("Registered seller {} ({}), awaiting approval", seller.id, seller.store_name);

        Ok(seller.to_profile())
    }

    /// Approval is checked before the password, so an unapproved seller is
    /// always told so.
    pub async fn login_seller(&self, request: LoginRequest) -> Result<SellerAuthResponse, AppError> {
        request.validate()?;

        let email = normalize_email(&request.email);
        let seller = self
            .sellers
            .find_by_email(&email)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !seller.is_approved {
            return Err(AppError::Authorization(ERROR_SELLER_NOT_APPROVED.to_string()));
        }

        if !verify_password(&request.password, &seller.password_hash)? {
            warn!("Failed login for seller {}", seller.id);
            return Err(invalid_credentials());
        }

        let token = self
            .jwt
            .issue(seller.id, &seller.name, &seller.email, PrincipalKind::Seller)?;
        Ok(SellerAuthResponse {
            token,
            seller: seller.to_response(),
        })
    }

    pub async fn seller_profile(&self, seller_id: Uuid) -> Result<SellerProfileResponse, AppError> {
        let seller = self
            .sellers
            .find_by_id(seller_id)
            .await?
            .ok_or_else(|| AppError::NotFound(ERROR_SELLER_NOT_FOUND.to_string()))?;
        Ok(seller.to_profile())
    }

    /// Single configured admin account. An empty configured password
    /// disables admin login.
    pub fn login_admin(&self, request: LoginRequest) -> Result<AdminAuthResponse, AppError> {
        request.validate()?;

        let email_matches = request.email.trim().eq_ignore_ascii_case(&self.admin_email);
        if self.admin_password.is_empty()
            || !email_matches
            || request.password != self.admin_password
        {
            warn!("Failed admin login for {}", request.email);
            return Err(invalid_credentials());
        }

        let token = self
            .jwt
            .issue(Uuid::nil(), ADMIN_NAME, &self.admin_email, PrincipalKind::Admin)?;
        Ok(AdminAuthResponse { token })
    }
}

fn invalid_credentials() -> AppError {
    AppError::Authentication(ERROR_INVALID_CREDENTIALS.to_string())
}
