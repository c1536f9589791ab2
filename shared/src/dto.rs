use crate::types::*;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

fn rejection(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

// Account DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 128))]
    pub password: String,

    #[validate(length(max = 20))]
    pub phone: Option<String>,

    #[validate(length(max = 500))]
    pub address: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(max = 20))]
    pub phone: Option<String>,

    #[validate(length(max = 500))]
    pub address: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserAuthResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSellerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 128))]
    pub password: String,

    #[validate(length(min = 1, max = 150))]
    pub store_name: String,

    #[validate(length(max = 20))]
    pub phone: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

/// Compact seller view returned by login.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub store_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub store_name: String,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub is_approved: bool,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SellerAuthResponse {
    pub token: String,
    pub seller: SellerResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminAuthResponse {
    pub token: String,
}

// Product DTOs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub url: String,
    #[serde(default)]
    pub is_main: bool,
}

fn at_most_one_main(images: &[ProductImage]) -> Result<(), ValidationError> {
    if images.iter().filter(|image| image.is_main).count() > 1 {
        return Err(rejection("images", "Only one image can be marked as main"));
    }
    Ok(())
}

/// Money is stored with two decimal places; finer amounts are rejected
/// rather than rounded.
fn is_whole_cents(amount: Decimal) -> bool {
    amount.normalize().scale() <= 2
}

/// Checks `discount_price < price` for a price pair.
pub fn check_discount(price: Decimal, discount_price: Option<Decimal>) -> Result<(), ValidationError> {
    if price <= Decimal::ZERO {
        return Err(rejection("price", "Price must be greater than zero"));
    }
    if !is_whole_cents(price) {
        return Err(rejection("price", "Price can have at most two decimal places"));
    }
    if let Some(discount) = discount_price {
        if !is_whole_cents(discount) {
            return Err(rejection(
                "discount_price",
                "Discount price can have at most two decimal places",
            ));
        }
        if discount < Decimal::ZERO {
            return Err(rejection("discount_price", "Discount price cannot be negative"));
        }
        if discount >= price {
            return Err(rejection(
                "discount_price",
                "Discount price must be less than the regular price",
            ));
        }
    }
    Ok(())
}

fn validate_new_product(request: &CreateProductRequest) -> Result<(), ValidationError> {
    check_discount(request.price, request.discount_price)?;
    at_most_one_main(&request.images)
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_new_product", skip_on_field_errors = false))]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(max = 5000))]
    #[serde(default)]
    pub description: String,

    pub price: Decimal,
    pub discount_price: Option<Decimal>,

    #[validate(length(min = 1, max = 100))]
    pub category: String,

    #[validate(range(min = 0))]
    #[serde(default)]
    pub stock: i32,

    #[validate(length(max = 100))]
    #[serde(default)]
    pub brand: String,

    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,

    pub in_stock: Option<bool>,
    pub featured: Option<bool>,

    #[serde(default)]
    pub images: Vec<ProductImage>,
}

fn validate_product_update(request: &UpdateProductRequest) -> Result<(), ValidationError> {
    match &request.images {
        Some(images) => at_most_one_main(images),
        None => Ok(()),
    }
}

/// Partial product update. The discount rule is re-checked by the handler
/// against the effective price because either side may be absent here.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_product_update", skip_on_field_errors = false))]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    pub price: Option<Decimal>,
    pub discount_price: Option<Decimal>,

    #[serde(default)]
    pub clear_discount: bool,

    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,

    #[validate(range(min = 0))]
    pub stock: Option<i32>,

    #[validate(length(max = 100))]
    pub brand: Option<String>,

    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,

    pub in_stock: Option<bool>,
    pub featured: Option<bool>,
    pub images: Option<Vec<ProductImage>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub category: String,
    pub stock: i32,
    pub brand: String,
    pub rating: f64,
    pub in_stock: bool,
    pub featured: bool,
    pub images: Vec<ProductImage>,
    pub wishlist: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistToggleResponse {
    pub product_id: Uuid,
    pub in_wishlist: bool,
}

// Order DTOs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: Uuid,
    pub seller_id: Uuid,
    pub name: String,
    pub quantity: i32,
    pub price: Decimal,
}

fn validate_new_order(request: &CreateOrderRequest) -> Result<(), ValidationError> {
    if request.items.is_empty() {
        return Err(rejection("items", "An order needs at least one item"));
    }
    for item in &request.items {
        if item.name.trim().is_empty() {
            return Err(rejection("items", "Every item needs a name"));
        }
        if item.quantity < 1 {
            return Err(rejection("items", "Item quantity must be at least 1"));
        }
        if item.price < Decimal::ZERO {
            return Err(rejection("items", "Item price cannot be negative"));
        }
        if !is_whole_cents(item.price) {
            return Err(rejection("items", "Item price can have at most two decimal places"));
        }
    }
    if request.total_amount <= Decimal::ZERO {
        return Err(rejection("total_amount", "Total amount must be greater than zero"));
    }
    if !is_whole_cents(request.total_amount) {
        return Err(rejection(
            "total_amount",
            "Total amount can have at most two decimal places",
        ));
    }
    let address = &request.shipping_address;
    if [&address.street, &address.city, &address.state, &address.zip_code]
        .iter()
        .any(|field| field.trim().is_empty())
    {
        return Err(rejection("shipping_address", "Shipping address is incomplete"));
    }
    Ok(())
}

/// Checkout payload. Item prices are taken as sent by the client.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_new_order", skip_on_field_errors = false))]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, max = 100))]
    pub customer_name: String,

    #[validate(email)]
    pub email: String,

    pub items: Vec<OrderItemRequest>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub total_amount: Decimal,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    /// Gateway order id, handed to the client-side payment widget.
    pub order_id: String,
    /// Amount in minor currency units.
    pub amount: i64,
    pub currency: String,
    pub order_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyPaymentRequest {
    #[validate(length(min = 1))]
    pub razorpay_order_id: String,

    #[validate(length(min = 1))]
    pub razorpay_payment_id: String,

    #[validate(length(min = 1))]
    pub razorpay_signature: String,

    #[serde(default, rename = "orderNumber")]
    pub order_number: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub seller_id: Uuid,
    pub name: String,
    pub quantity: i32,
    pub price: Decimal,
    pub status: ItemStatus,
}

/// `status` follows payment, `fulfillment_status` is derived from the items.
/// The two are never reconciled.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: Uuid,
    pub order_number: String,
    pub customer_name: String,
    pub email: String,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub fulfillment_status: ItemStatus,
    pub gateway_order_id: Option<String>,
    pub gateway_payment_id: Option<String>,
    pub items: Vec<OrderItemResponse>,
    pub created_at: DateTime<Utc>,
    pub estimated_delivery: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateItemStatusRequest {
    pub status: ItemStatus,
}

// Review DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewRequest {
    pub product_id: Uuid,

    #[validate(range(min = 1, max = 5))]
    pub rating: i32,

    #[validate(length(max = 2000))]
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

// Admin DTOs
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub total_users: i64,
    pub total_sellers: i64,
    pub pending_sellers: i64,
    pub total_products: i64,
    pub total_orders: i64,
    pub completed_orders: i64,
    pub total_revenue: Decimal,
}

// Common pagination
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}
