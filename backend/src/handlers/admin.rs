use actix_web::{web, HttpResponse};
use serde_json::json;
use uuid::Uuid;
use voicecart_shared::{LoginRequest, PageQuery, SUCCESS_SELLER_APPROVED};

use crate::error::AppError;
use crate::models::Pagination;
use crate::services::admin_service::AdminService;
use crate::services::auth_service::AuthService;

pub async fn login(
    auth: web::Data<AuthService>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(auth.login_admin(body.into_inner())?))
}

pub async fn dashboard(admin: web::Data<AdminService>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(admin.dashboard().await?))
}

pub async fn list_users(
    admin: web::Data<AdminService>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = admin.users(Pagination::from_query(&query)).await?;
    Ok(HttpResponse::Ok().json(page))
}

pub async fn list_sellers(
    admin: web::Data<AdminService>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = admin.sellers(Pagination::from_query(&query)).await?;
    Ok(HttpResponse::Ok().json(page))
}

pub async fn list_products(
    admin: web::Data<AdminService>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = admin.products(Pagination::from_query(&query)).await?;
    Ok(HttpResponse::Ok().json(page))
}

pub async fn approve_seller(
    admin: web::Data<AdminService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let seller = admin.approve_seller(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": SUCCESS_SELLER_APPROVED,
        "seller": seller
    })))
}
