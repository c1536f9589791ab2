use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;
use voicecart_shared::{
    check_discount, CreateProductRequest, ProductResponse, UpdateProductRequest,
    WishlistToggleResponse, ERROR_NOT_PRODUCT_OWNER, ERROR_PRODUCT_NOT_FOUND,
};

use crate::error::AppError;
use crate::middleware::Principal;
use crate::models::Product;
use crate::repositories::ProductRepository;

/// Catalogue reads, seller-owned product writes and wishlists.
#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
}

fn responses(products: Vec<Product>) -> Vec<ProductResponse> {
    products.iter().map(Product::to_response).collect()
}

fn not_found() -> AppError {
    AppError::NotFound(ERROR_PRODUCT_NOT_FOUND.to_string())
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub async fn create(
        &self,
        seller_id: Uuid,
        request: CreateProductRequest,
    ) -> Result<ProductResponse, AppError> {
        request.validate()?;

        let product = Product::from_request(seller_id, request);
        self.products.create(&product).await?;
        info!("Seller {} listed product {}", seller_id, product.id);

        Ok(product.to_response())
    }

    pub async fn get(&self, id: Uuid) -> Result<ProductResponse, AppError> {
        let product = self.products.find_by_id(id).await?.ok_or_else(not_found)?;
        Ok(product.to_response())
    }

    pub async fn list_all(&self) -> Result<Vec<ProductResponse>, AppError> {
        Ok(responses(self.products.list_all().await?))
    }

    pub async fn featured(&self) -> Result<Vec<ProductResponse>, AppError> {
        Ok(responses(self.products.find_featured().await?))
    }

    pub async fn by_category(&self, category: &str) -> Result<Vec<ProductResponse>, AppError> {
        Ok(responses(self.products.find_by_category(category.trim()).await?))
    }

    pub async fn search(&self, query: &str) -> Result<Vec<ProductResponse>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::Validation("Search query is required".to_string()));
        }
        Ok(responses(self.products.search(query).await?))
    }

    pub async fn by_seller(&self, seller_id: Uuid) -> Result<Vec<ProductResponse>, AppError> {
        Ok(responses(self.products.find_by_seller(seller_id).await?))
    }

    /// Only the owning seller (or an admin) may edit. The discount rule is
    /// re-checked against the resulting price.
    pub async fn update(
        &self,
        caller: &Principal,
        id: Uuid,
        update: UpdateProductRequest,
    ) -> Result<ProductResponse, AppError> {
        update.validate()?;

        let mut product = self.owned_product(caller, id).await?;
        product.apply_update(update);
        check_discount(product.price, product.discount_price)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let saved = self.products.save(&product).await?.ok_or_else(not_found)?;
        Ok(saved.to_response())
    }

    pub async fn delete(&self, caller: &Principal, id: Uuid) -> Result<(), AppError> {
        self.owned_product(caller, id).await?;
        if !self.products.delete(id).await? {
            return Err(not_found());
        }
        info!("Product {} deleted by {}", id, caller.id);
        Ok(())
    }

    pub async fn toggle_wishlist(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> Result<WishlistToggleResponse, AppError> {
        let in_wishlist = self
            .products
            .toggle_wishlist(product_id, user_id)
            .await?
            .ok_or_else(not_found)?;

        Ok(WishlistToggleResponse {
            product_id,
            in_wishlist,
        })
    }

    pub async fn wishlist(&self, user_id: Uuid) -> Result<Vec<ProductResponse>, AppError> {
        Ok(responses(self.products.find_wishlisted_by(user_id).await?))
    }

    async fn owned_product(&self, caller: &Principal, id: Uuid) -> Result<Product, AppError> {
        let product = self.products.find_by_id(id).await?.ok_or_else(not_found)?;
        if !caller.is_admin() && !product.is_owned_by(caller.id) {
            return Err(AppError::Authorization(ERROR_NOT_PRODUCT_OWNER.to_string()));
        }
        Ok(product)
    }
}
