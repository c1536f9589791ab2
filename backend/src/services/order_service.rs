use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;
use voicecart_shared::{
    CreateOrderRequest, CreateOrderResponse, ItemStatus, OrderResponse, OrderStatus,
    VerifyPaymentRequest, VerifyPaymentResponse, ERROR_NOT_ITEM_OWNER, ERROR_ORDER_NOT_FOUND,
    ERROR_PAYMENT_VERIFICATION_FAILED, SUCCESS_PAYMENT_VERIFIED,
};

use crate::error::AppError;
use crate::middleware::Principal;
use crate::models::{normalize_email, Order, PaymentUpdate};
use crate::repositories::OrderRepository;
use crate::services::email_service::EmailService;
use crate::services::payment_gateway::{to_minor_units, PaymentGateway};
use crate::utils::{order_number, payment_signature};


/// Checkout, payment verification and fulfilment tracking.
#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    gateway: Arc<dyn PaymentGateway>,
    email: EmailService,
    gateway_secret: String,
    currency: String,
}

fn order_not_found() -> AppError {
    AppError::NotFound(ERROR_ORDER_NOT_FOUND.to_string())
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        gateway: Arc<dyn PaymentGateway>,
        email: EmailService,
        gateway_secret: String,
        currency: String,
    ) -> Self {
        Self {
            orders,
            gateway,
            email,
            gateway_secret,
            currency,
        }
    }

    /// Two writes: the pending order first, then the gateway order id once
    /// the gateway has answered. A failure in between leaves the pending
    /// order in place without a gateway id.
    pub async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<CreateOrderResponse, AppError> {
        request.validate()?;
        let amount = to_minor_units(request.total_amount)?;

        let order = Order::from_request(order_number::generate(), request);
        self.orders.create(&order).await?;
        info!("Order {} created as pending", order.order_number);

        let remote = match self
            .gateway
            .create_order(amount, &self.currency, &order.order_number)
            .await
        {
            Ok(remote) => remote,
            Err(e) => {
                warn!(
                    "Gateway order creation failed; order {} stays pending: {}",
                    order.order_number, e
                );
                return Err(e);
            }
        };

        if !self.orders.set_gateway_order_id(order.id, &remote.id).await? {
            return Err(AppError::Internal(format!(
                "Order {} disappeared before the gateway id was saved",
                order.order_number
            )));
        }

        Ok(CreateOrderResponse {
            order_id: remote.id,
            amount,
            currency: remote.currency,
            order_number: order.order_number,
        })
    }

    /// Not idempotent: a repeated call rewrites the payment fields and, on a
    /// valid signature, sends the confirmation again.
    pub async fn verify_payment(
        &self,
        request: VerifyPaymentRequest,
    ) -> Result<VerifyPaymentResponse, AppError> {
        request.validate()?;

        let order = self
            .orders
            .find_by_gateway_order_id(&request.razorpay_order_id)
            .await?
            .ok_or_else(order_not_found)?;

        let valid = payment_signature::verify(
            &self.gateway_secret,
            &request.razorpay_order_id,
            &request.razorpay_payment_id,
            &request.razorpay_signature,
        )?;

        let update = PaymentUpdate {
            status: if valid {
                OrderStatus::Completed
            } else {
                OrderStatus::Failed
            },
            payment_id: request.razorpay_payment_id,
            signature: request.razorpay_signature,
        };
        let order = self
            .orders
            .record_payment(order.id, &update)
            .await?
            .ok_or_else(order_not_found)?;

        if !valid {
            warn!("Signature mismatch for order {}", order.order_number);
            return Ok(VerifyPaymentResponse {
                success: false,
                order_id: None,
                message: ERROR_PAYMENT_VERIFICATION_FAILED.to_string(),
            });
        }

        info!("Payment verified for order {}", order.order_number);
        self.email.send_order_confirmation(&order).await;

        Ok(VerifyPaymentResponse {
            success: true,
            order_id: Some(order.order_number),
            message: SUCCESS_PAYMENT_VERIFIED.to_string(),
        })
    }

    pub async fn find_by_number(&self, order_number: &str) -> Result<OrderResponse, AppError> {
        let order = self
            .orders
            .find_by_order_number(order_number)
            .await?
            .ok_or_else(order_not_found)?;
        Ok(order.to_response())
    }

    pub async fn orders_for_email(&self, email: &str) -> Result<Vec<OrderResponse>, AppError> {
        let orders = self.orders.find_by_email(&normalize_email(email)).await?;
        Ok(orders.iter().map(Order::to_response).collect())
    }

    /// Each order trimmed to the seller's own items; the aggregate status is
    /// computed over those items only.
    pub async fn seller_orders(&self, seller_id: Uuid) -> Result<Vec<OrderResponse>, AppError> {
        let orders = self.orders.find_by_seller(seller_id).await?;
        Ok(orders
            .into_iter()
            .map(|order| order.restricted_to_seller(seller_id).to_response())
            .collect())
    }

    /// Any status may follow any other. Only the item's seller (or an admin)
    /// may change it.
    pub async fn update_item_status(
        &self,
        caller: &Principal,
        order_id: Uuid,
        item_id: Uuid,
        status: ItemStatus,
    ) -> Result<OrderResponse, AppError> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(order_not_found)?;

        let item = order
            .items
            .iter()
            .find(|item| item.id == item_id)
            .ok_or_else(|| AppError::NotFound("Order item not found".to_string()))?;

        if !caller.is_admin() && item.seller_id != caller.id {
            return Err(AppError::Authorization(ERROR_NOT_ITEM_OWNER.to_string()));
        }

        if !self.orders.update_item_status(order_id, item_id, status).await? {
            return Err(AppError::NotFound("Order item not found".to_string()));
        }
        info!(
            "Item {} of order {} set to {} by {}",
            item_id, order.order_number, status, caller.id
        );

        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(order_not_found)?;
        let view = if caller.is_admin() {
            order
        } else {
            order.restricted_to_seller(caller.id)
        };
        Ok(view.to_response())
    }
}
