use actix_web::{web, HttpResponse};
use voicecart_shared::{CreateOrderRequest, VerifyPaymentRequest};

use crate::error::AppError;
use crate::middleware::Principal;
use crate::services::order_service::OrderService;

pub async fn create_order(
    orders: web::Data<OrderService>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let created = orders.create_order(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(created))
}

/// A signature mismatch is a 400 carrying `success: false`.
pub async fn verify_payment(
    orders: web::Data<OrderService>,
    body: web::Json<VerifyPaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let outcome = orders.verify_payment(body.into_inner()).await?;
    if outcome.success {
        Ok(HttpResponse::Ok().json(outcome))
    } else {
        Ok(HttpResponse::BadRequest().json(outcome))
    }
}

pub async fn get_by_number(
    orders: web::Data<OrderService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(orders.find_by_number(&path).await?))
}

pub async fn my_orders(
    principal: Principal,
    orders: web::Data<OrderService>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(orders.orders_for_email(&principal.email).await?))
}
