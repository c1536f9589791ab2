use actix_web::{web, HttpResponse};
use uuid::Uuid;
use voicecart_shared::{LoginRequest, RegisterUserRequest, UpdateProfileRequest};

use crate::error::AppError;
use crate::middleware::Principal;
use crate::services::auth_service::AuthService;
use crate::services::product_service::ProductService;

pub async fn register(
    auth: web::Data<AuthService>,
    body: web::Json<RegisterUserRequest>,
) -> Result<HttpResponse, AppError> {
    let response = auth.register_user(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

pub async fn login(
    auth: web::Data<AuthService>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let response = auth.login_user(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

pub async fn get_profile(
    principal: Principal,
    auth: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    let user = auth.user_profile(principal.id).await?;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn update_profile(
    principal: Principal,
    auth: web::Data<AuthService>,
    body: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let user = auth.update_user_profile(principal.id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn toggle_wishlist(
    principal: Principal,
    products: web::Data<ProductService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let response = products.toggle_wishlist(principal.id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

pub async fn get_wishlist(
    principal: Principal,
    products: web::Data<ProductService>,
) -> Result<HttpResponse, AppError> {
    let wishlist = products.wishlist(principal.id).await?;
    Ok(HttpResponse::Ok().json(wishlist))
}
