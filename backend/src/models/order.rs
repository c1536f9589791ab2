use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use uuid::Uuid;
use voicecart_shared::{
    CreateOrderRequest, ItemStatus, OrderItemResponse, OrderResponse, OrderStatus, PaymentMethod,
    ShippingAddress, DELIVERY_ESTIMATE_DAYS,
};

use crate::error::AppError;
use crate::models::normalize_email;

const ORDER_COLUMNS: &str = r#"
    id, order_number, customer_name, email, street, city, state, zip_code, payment_method,
    total_amount, status, gateway_order_id, gateway_payment_id, gateway_signature,
    created_at, estimated_delivery
"#;

const ITEM_COLUMNS: &str =
    "id, order_id, position, product_id, seller_id, name, quantity, price, status";

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub customer_name: String,
    pub email: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub payment_method: PaymentMethod,
    pub total_amount: Decimal,
    /// Payment lifecycle only. Fulfilment lives on the items.
    pub status: OrderStatus,
    pub gateway_order_id: Option<String>,
    pub gateway_payment_id: Option<String>,
    pub gateway_signature: Option<String>,
    pub created_at: DateTime<Utc>,
    pub estimated_delivery: DateTime<Utc>,
    #[sqlx(skip)]
    pub items: Vec<OrderItem>,
}

/// Line item snapshot taken at checkout.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub position: i32,
    pub product_id: Uuid,
    pub seller_id: Uuid,
    pub name: String,
    pub quantity: i32,
    pub price: Decimal,
    pub status: ItemStatus,
}

/// Outcome of a verification attempt, written onto the order.
#[derive(Debug, Clone)]
pub struct PaymentUpdate {
    pub status: OrderStatus,
    pub payment_id: String,
    pub signature: String,
}

impl Order {
    pub fn from_request(order_number: String, request: CreateOrderRequest) -> Self {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        let items = request
            .items
            .into_iter()
            .enumerate()
            .map(|(position, item)| OrderItem {
                id: Uuid::new_v4(),
                order_id: id,
                position: position as i32,
                product_id: item.product_id,
                seller_id: item.seller_id,
                name: item.name,
                quantity: item.quantity,
                price: item.price,
                status: ItemStatus::Pending,
            })
            .collect();
        let address = request.shipping_address;

        Self {
            id,
            order_number,
            customer_name: request.customer_name,
            email: normalize_email(&request.email),
            street: address.street,
            city: address.city,
            state: address.state,
            zip_code: address.zip_code,
            payment_method: request.payment_method,
            total_amount: request.total_amount,
            status: OrderStatus::Pending,
            gateway_order_id: None,
            gateway_payment_id: None,
            gateway_signature: None,
            created_at,
            estimated_delivery: created_at + Duration::days(DELIVERY_ESTIMATE_DAYS),
            items,
        }
    }

    pub fn fulfillment_status(&self) -> ItemStatus {
        let statuses: Vec<ItemStatus> = self.items.iter().map(|item| item.status).collect();
        ItemStatus::aggregate(&statuses)
    }

    pub fn shipping_address(&self) -> ShippingAddress {
        ShippingAddress {
            street: self.street.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip_code: self.zip_code.clone(),
        }
    }

    pub fn has_seller(&self, seller_id: Uuid) -> bool {
        self.items.iter().any(|item| item.seller_id == seller_id)
    }

    /// The same order with only this seller's items kept.
    pub fn restricted_to_seller(mut self, seller_id: Uuid) -> Self {
        self.items.retain(|item| item.seller_id == seller_id);
        self
    }

    pub fn apply_payment(&mut self, update: &PaymentUpdate) {
        self.status = update.status;
        self.gateway_payment_id = Some(update.payment_id.clone());
        self.gateway_signature = Some(update.signature.clone());
    }

    /// Phase one of checkout: the order and its items in one transaction.
    pub async fn insert(pool: &PgPool, order: &Order) -> Result<(), AppError> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, order_number, customer_name, email, street, city, state, zip_code,
                payment_method, total_amount, status, gateway_order_id, gateway_payment_id,
                gateway_signature, created_at, estimated_delivery
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(order.id)
        .bind(&order.order_number)
        .bind(&order.customer_name)
        .bind(&order.email)
        .bind(&order.street)
        .bind(&order.city)
        .bind(&order.state)
        .bind(&order.zip_code)
        .bind(order.payment_method)
        .bind(order.total_amount)
        .bind(order.status)
        .bind(&order.gateway_order_id)
        .bind(&order.gateway_payment_id)
        .bind(&order.gateway_signature)
        .bind(order.created_at)
        .bind(order.estimated_delivery)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::from_unique_violation(e, "Order number already exists"))?;

        for item in &order.items {
            sqlx::query(
                r#"
                INSERT INTO order_items (
                    id, order_id, position, product_id, seller_id, name, quantity, price, status
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(item.id)
            .bind(item.order_id)
            .bind(item.position)
            .bind(item.product_id)
            .bind(item.seller_id)
            .bind(&item.name)
            .bind(item.quantity)
            .bind(item.price)
            .bind(item.status)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Phase two of checkout. Returns false when the order vanished.
    pub async fn set_gateway_order_id(
        pool: &PgPool,
        id: Uuid,
        gateway_order_id: &str,
    ) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE orders SET gateway_order_id = $2 WHERE id = $1")
            .bind(id)
            .bind(gateway_order_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1");
        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Self::with_item(pool, order).await
    }

    pub async fn find_by_gateway_order_id(
        pool: &PgPool,
        gateway_order_id: &str,
    ) -> Result<Option<Self>, AppError> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE gateway_order_id = $1");
        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(gateway_order_id)
            .fetch_optional(pool)
            .await?;

        Self::with_item(pool, order).await
    }

    pub async fn find_by_order_number(
        pool: &PgPool,
        order_number: &str,
    ) -> Result<Option<Self>, AppError> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE order_number = $1");
        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(order_number)
            .fetch_optional(pool)
            .await?;

        Self::with_item(pool, order).await
    }

    /// Write the verification outcome. Re-running it simply overwrites.
    pub async fn record_payment(
        pool: &PgPool,
        id: Uuid,
        update: &PaymentUpdate,
    ) -> Result<Option<Self>, AppError> {
        let sql = format!(
            r#"
            UPDATE orders
            SET status = $2, gateway_payment_id = $3, gateway_signature = $4
            WHERE id = $1
            RETURNING {ORDER_COLUMNS}
            "#
        );
        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(id)
            .bind(update.status)
            .bind(&update.payment_id)
            .bind(&update.signature)
            .fetch_optional(pool)
            .await?;

        Self::with_item(pool, order).await
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Vec<Self>, AppError> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE email = $1 ORDER BY created_at DESC"
        );
        let orders = sqlx::query_as::<_, Order>(&sql)
            .bind(email)
            .fetch_all(pool)
            .await?;

        Self::with_items(pool, orders).await
    }

    /// Orders holding at least one item of this seller, with all their items.
    pub async fn find_by_seller(pool: &PgPool, seller_id: Uuid) -> Result<Vec<Self>, AppError> {
        let sql = format!(
            r#"
            SELECT {ORDER_COLUMNS} FROM orders
            WHERE id IN (SELECT order_id FROM order_items WHERE seller_id = $1)
            ORDER BY created_at DESC
            "#
        );
        let orders = sqlx::query_as::<_, Order>(&sql)
            .bind(seller_id)
            .fetch_all(pool)
            .await?;

        Self::with_items(pool, orders).await
    }

    /// Set one item's status. Siblings are untouched.
    pub async fn update_item_status(
        pool: &PgPool,
        order_id: Uuid,
        item_id: Uuid,
        status: ItemStatus,
    ) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE order_items SET status = $3 WHERE order_id = $1 AND id = $2")
                .bind(order_id)
                .bind(item_id)
                .bind(status)
                .execute(pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    pub async fn count_by_status(pool: &PgPool, status: OrderStatus) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE status = $1")
            .bind(status)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Sum of `total_amount` over completed orders.
    pub async fn revenue(pool: &PgPool) -> Result<Decimal, AppError> {
        let revenue = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(total_amount), 0) FROM orders WHERE status = $1",
        )
        .bind(OrderStatus::Completed)
        .fetch_one(pool)
        .await?;

        Ok(revenue)
    }

    async fn with_item(pool: &PgPool, order: Option<Order>) -> Result<Option<Self>, AppError> {
        match order {
            Some(order) => Ok(Self::with_items(pool, vec![order]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn with_items(pool: &PgPool, mut orders: Vec<Order>) -> Result<Vec<Self>, AppError> {
        if orders.is_empty() {
            return Ok(orders);
        }

        let ids: Vec<Uuid> = orders.iter().map(|order| order.id).collect();
        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = ANY($1) ORDER BY position"
        );
        let items = sqlx::query_as::<_, OrderItem>(&sql)
            .bind(&ids)
            .fetch_all(pool)
            .await?;

        let mut by_order: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
        for item in items {
            by_order.entry(item.order_id).or_default().push(item);
        }
        for order in &mut orders {
            order.items = by_order.remove(&order.id).unwrap_or_default();
        }

        Ok(orders)
    }

    pub fn to_response(&self) -> OrderResponse {
        OrderResponse {
            id: self.id,
            order_number: self.order_number.clone(),
            customer_name: self.customer_name.clone(),
            email: self.email.clone(),
            shipping_address: self.shipping_address(),
            payment_method: self.payment_method,
            total_amount: self.total_amount,
            status: self.status,
            fulfillment_status: self.fulfillment_status(),
            gateway_order_id: self.gateway_order_id.clone(),
            gateway_payment_id: self.gateway_payment_id.clone(),
            items: self.items.iter().map(OrderItem::to_response).collect(),
            created_at: self.created_at,
            estimated_delivery: self.estimated_delivery,
        }
    }
}

impl OrderItem {
    pub fn to_response(&self) -> OrderItemResponse {
        OrderItemResponse {
            id: self.id,
            product_id: self.product_id,
            seller_id: self.seller_id,
            name: self.name.clone(),
            quantity: self.quantity,
            price: self.price,
            status: self.status,
        }
    }
}
