use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;
use voicecart_shared::{ItemStatus, OrderStatus, UpdateProfileRequest, ERROR_EMAIL_ALREADY_EXISTS};

use crate::error::AppError;
use crate::models::{Order, Pagination, PaymentUpdate, Product, Review, Seller, User};
use crate::repositories::{
    OrderRepository, PaginatedResult, ProductRepository, ReviewRepository, SellerRepository,
    UserRepository,
};

/// Process-local storage. Records are kept in insertion order and listed
/// newest first, like the Postgres queries.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    sellers: RwLock<Vec<Seller>>,
    products: RwLock<Vec<Product>>,
    orders: RwLock<Vec<Order>>,
    reviews: RwLock<Vec<Review>>,
}

fn newest_first<T: Clone>(records: &[T], keep: impl Fn(&T) -> bool) -> Vec<T> {
    records.iter().rev().filter(|r| keep(*r)).cloned().collect()
}

fn page_of<T: Clone>(records: &[T], pagination: Pagination) -> PaginatedResult<T> {
    let data = records
        .iter()
        .rev()
        .skip(usize::try_from(pagination.offset()).unwrap_or(usize::MAX))
        .take(pagination.limit as usize)
        .cloned()
        .collect();
    PaginatedResult::new(data, records.len() as i64, pagination)
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: &User) -> Result<(), AppError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Duplicate(ERROR_EMAIL_ALREADY_EXISTS.to_string()));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.iter().find(|u| u.email == email).cloned())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: &UpdateProfileRequest,
    ) -> Result<Option<User>, AppError> {
        let mut users = self.users.write().await;
        Ok(users.iter_mut().find(|u| u.id == id).map(|user| {
            user.apply_profile(changes);
            user.clone()
        }))
    }

    async fn list(&self, pagination: Pagination) -> Result<PaginatedResult<User>, AppError> {
        Ok(page_of(&self.users.read().await, pagination))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.users.read().await.len() as i64)
    }
}

#[async_trait]
impl SellerRepository for MemoryStore {
    async fn create(&self, seller: &Seller) -> Result<(), AppError> {
        let mut sellers = self.sellers.write().await;
        if sellers.iter().any(|s| s.email == seller.email) {
            return Err(AppError::Duplicate(ERROR_EMAIL_ALREADY_EXISTS.to_string()));
        }
        sellers.push(seller.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Seller>, AppError> {
        Ok(self.sellers.read().await.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Seller>, AppError> {
        Ok(self.sellers.read().await.iter().find(|s| s.email == email).cloned())
    }

    async fn approve(
        &self,
        id: Uuid,
        approved_at: DateTime<Utc>,
    ) -> Result<Option<Seller>, AppError> {
        let mut sellers = self.sellers.write().await;
        Ok(sellers.iter_mut().find(|s| s.id == id).map(|seller| {
            seller.is_approved = true;
            seller.approved_at = Some(approved_at);
            seller.updated_at = Utc::now();
            seller.clone()
        }))
    }

    async fn list(&self, pagination: Pagination) -> Result<PaginatedResult<Seller>, AppError> {
        Ok(page_of(&self.sellers.read().await, pagination))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.sellers.read().await.len() as i64)
    }

    async fn count_pending(&self) -> Result<i64, AppError> {
        let sellers = self.sellers.read().await;
        Ok(sellers.iter().filter(|s| !s.is_approved).count() as i64)
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn create(&self, product: &Product) -> Result<(), AppError> {
        self.products.write().await.push(product.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        Ok(self.products.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Product>, AppError> {
        Ok(newest_first(&self.products.read().await, |_| true))
    }

    async fn list(&self, pagination: Pagination) -> Result<PaginatedResult<Product>, AppError> {
        Ok(page_of(&self.products.read().await, pagination))
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>, AppError> {
        let category = category.to_lowercase();
        Ok(newest_first(&self.products.read().await, |p| {
            p.category.to_lowercase() == category
        }))
    }

    async fn search(&self, needle: &str) -> Result<Vec<Product>, AppError> {
        Ok(newest_first(&self.products.read().await, |p| p.matches_search(needle)))
    }

    async fn find_by_seller(&self, seller_id: Uuid) -> Result<Vec<Product>, AppError> {
        Ok(newest_first(&self.products.read().await, |p| p.seller_id == seller_id))
    }

    async fn find_featured(&self) -> Result<Vec<Product>, AppError> {
        Ok(newest_first(&self.products.read().await, |p| p.featured))
    }

    async fn save(&self, product: &Product) -> Result<Option<Product>, AppError> {
        let mut products = self.products.write().await;
        Ok(products.iter_mut().find(|p| p.id == product.id).map(|stored| {
            let wishlist = std::mem::take(&mut stored.wishlist);
            *stored = Product {
                wishlist,
                ..product.clone()
            };
            stored.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != id);
        let removed = products.len() < before;
        drop(products);

        if removed {
            self.reviews.write().await.retain(|r| r.product_id != id);
        }
        Ok(removed)
    }

    async fn toggle_wishlist(&self, id: Uuid, user_id: Uuid) -> Result<Option<bool>, AppError> {
        let mut products = self.products.write().await;
        Ok(products.iter_mut().find(|p| p.id == id).map(|product| {
            let member = if let Some(pos) = product.wishlist.iter().position(|u| *u == user_id) {
                product.wishlist.remove(pos);
                false
            } else {
                product.wishlist.push(user_id);
                true
            };
            product.updated_at = Utc::now();
            member
        }))
    }

    async fn find_wishlisted_by(&self, user_id: Uuid) -> Result<Vec<Product>, AppError> {
        Ok(newest_first(&self.products.read().await, |p| p.wishlist.contains(&user_id)))
    }

    async fn set_rating(&self, id: Uuid, rating: f64) -> Result<(), AppError> {
        let mut products = self.products.write().await;
        if let Some(product) = products.iter_mut().find(|p| p.id == id) {
            product.rating = rating;
            product.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.products.read().await.len() as i64)
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn create(&self, order: &Order) -> Result<(), AppError> {
        let mut orders = self.orders.write().await;
        if orders.iter().any(|o| o.order_number == order.order_number) {
            return Err(AppError::Duplicate("Order number already exists".to_string()));
        }
        orders.push(order.clone());
        Ok(())
    }

    async fn set_gateway_order_id(
        &self,
        id: Uuid,
        gateway_order_id: &str,
    ) -> Result<bool, AppError> {
        let mut orders = self.orders.write().await;
        match orders.iter_mut().find(|o| o.id == id) {
            Some(order) => {
                order.gateway_order_id = Some(gateway_order_id.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, AppError> {
        Ok(self.orders.read().await.iter().find(|o| o.id == id).cloned())
    }

    async fn find_by_gateway_order_id(
        &self,
        gateway_order_id: &str,
    ) -> Result<Option<Order>, AppError> {
        let orders = self.orders.read().await;
        Ok(orders
            .iter()
            .find(|o| o.gateway_order_id.as_deref() == Some(gateway_order_id))
            .cloned())
    }

    async fn find_by_order_number(&self, order_number: &str) -> Result<Option<Order>, AppError> {
        let orders = self.orders.read().await;
        Ok(orders.iter().find(|o| o.order_number == order_number).cloned())
    }

    async fn record_payment(
        &self,
        id: Uuid,
        update: &PaymentUpdate,
    ) -> Result<Option<Order>, AppError> {
        let mut orders = self.orders.write().await;
        Ok(orders.iter_mut().find(|o| o.id == id).map(|order| {
            order.apply_payment(update);
            order.clone()
        }))
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Order>, AppError> {
        Ok(newest_first(&self.orders.read().await, |o| o.email == email))
    }

    async fn find_by_seller(&self, seller_id: Uuid) -> Result<Vec<Order>, AppError> {
        Ok(newest_first(&self.orders.read().await, |o| o.has_seller(seller_id)))
    }

    async fn update_item_status(
        &self,
        order_id: Uuid,
        item_id: Uuid,
        status: ItemStatus,
    ) -> Result<bool, AppError> {
        let mut orders = self.orders.write().await;
        let item = orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .and_then(|order| order.items.iter_mut().find(|i| i.id == item_id));
        match item {
            Some(item) => {
                item.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.orders.read().await.len() as i64)
    }

    async fn count_by_status(&self, status: OrderStatus) -> Result<i64, AppError> {
        let orders = self.orders.read().await;
        Ok(orders.iter().filter(|o| o.status == status).count() as i64)
    }

    async fn revenue(&self) -> Result<Decimal, AppError> {
        let orders = self.orders.read().await;
        Ok(orders
            .iter()
            .filter(|o| o.status == OrderStatus::Completed)
            .map(|o| o.total_amount)
            .sum())
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn create(&self, review: &Review) -> Result<(), AppError> {
        self.reviews.write().await.push(review.clone());
        Ok(())
    }

    async fn exists(&self, product_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let reviews = self.reviews.read().await;
        Ok(reviews
            .iter()
            .any(|r| r.product_id == product_id && r.user_id == user_id))
    }

    async fn find_by_product(&self, product_id: Uuid) -> Result<Vec<Review>, AppError> {
        Ok(newest_first(&self.reviews.read().await, |r| r.product_id == product_id))
    }

    async fn average_rating(&self, product_id: Uuid) -> Result<Option<f64>, AppError> {
        let reviews = self.reviews.read().await;
        let ratings: Vec<f64> = reviews
            .iter()
            .filter(|r| r.product_id == product_id)
            .map(|r| f64::from(r.rating))
            .collect();
        if ratings.is_empty() {
            return Ok(None);
        }
        Ok(Some(ratings.iter().sum::<f64>() / ratings.len() as f64))
    }
}
