use actix_web::{web, HttpResponse};
use uuid::Uuid;
use voicecart_shared::{CreateSellerRequest, LoginRequest, UpdateItemStatusRequest};

use crate::error::AppError;
use crate::middleware::Principal;
use crate::services::auth_service::AuthService;
use crate::services::order_service::OrderService;
use crate::services::product_service::ProductService;

pub async fn register(
    auth: web::Data<AuthService>,
    body: web::Json<CreateSellerRequest>,
) -> Result<HttpResponse, AppError> {
    let seller = auth.register_seller(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(seller))
}

pub async fn login(
    auth: web::Data<AuthService>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let response = auth.login_seller(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

pub async fn get_profile(
    principal: Principal,
    auth: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    let seller = auth.seller_profile(principal.id).await?;
    Ok(HttpResponse::Ok().json(seller))
}

pub async fn get_products(
    principal: Principal,
    products: web::Data<ProductService>,
) -> Result<HttpResponse, AppError> {
    let listing = products.by_seller(principal.id).await?;
    Ok(HttpResponse::Ok().json(listing))
}

pub async fn get_orders(
    principal: Principal,
    orders: web::Data<OrderService>,
) -> Result<HttpResponse, AppError> {
    let orders = orders.seller_orders(principal.id).await?;
    Ok(HttpResponse::Ok().json(orders))
}

pub async fn update_item_status(
    principal: Principal,
    orders: web::Data<OrderService>,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<UpdateItemStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let (order_id, item_id) = path.into_inner();
    let order = orders
        .update_item_status(&principal, order_id, item_id, body.status)
        .await?;
    Ok(HttpResponse::Ok().json(order))
}
