use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use voicecart_shared::{ItemStatus, OrderStatus};

use crate::error::AppError;
use crate::models::{Order, PaymentUpdate};
use crate::repositories::OrderRepository;

#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create(&self, order: &Order) -> Result<(), AppError> {
        Order::insert(&self.pool, order).await
    }

    async fn set_gateway_order_id(
        &self,
        id: Uuid,
        gateway_order_id: &str,
    ) -> Result<bool, AppError> {
        Order::set_gateway_order_id(&self.pool, id, gateway_order_id).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, AppError> {
        Order::find_by_id(&self.pool, id).await
    }

    async fn find_by_gateway_order_id(
        &self,
        gateway_order_id: &str,
    ) -> Result<Option<Order>, AppError> {
        Order::find_by_gateway_order_id(&self.pool, gateway_order_id).await
    }

    async fn find_by_order_number(&self, order_number: &str) -> Result<Option<Order>, AppError> {
        Order::find_by_order_number(&self.pool, order_number).await
    }

    async fn record_payment(
        &self,
        id: Uuid,
        update: &PaymentUpdate,
    ) -> Result<Option<Order>, AppError> {
        Order::record_payment(&self.pool, id, update).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Order>, AppError> {
        Order::find_by_email(&self.pool, email).await
    }

    async fn find_by_seller(&self, seller_id: Uuid) -> Result<Vec<Order>, AppError> {
        Order::find_by_seller(&self.pool, seller_id).await
    }

    async fn update_item_status(
        &self,
        order_id: Uuid,
        item_id: Uuid,
        status: ItemStatus,
    ) -> Result<bool, AppError> {
        Order::update_item_status(&self.pool, order_id, item_id, status).await
    }

    async fn count(&self) -> Result<i64, AppError> {
        Order::count(&self.pool).await
    }

    async fn count_by_status(&self, status: OrderStatus) -> Result<i64, AppError> {
        Order::count_by_status(&self.pool, status).await
    }

    async fn revenue(&self) -> Result<Decimal, AppError> {
        Order::revenue(&self.pool).await
    }
}
