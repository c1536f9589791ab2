//! Database models for the VoiceCart storefront
//!
//! Each model maps to a table and carries its own Postgres queries. The
//! in-memory store reuses the constructors and conversions defined here so
//! both backends build records the same way.

pub mod order;
pub mod product;
pub mod review;
pub mod seller;
pub mod user;

pub use order::{Order, OrderItem, PaymentUpdate};
pub use product::Product;
pub use review::Review;
pub use seller::Seller;
pub use user::User;

use voicecart_shared::{PageQuery, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Emails are stored and looked up trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Pagination helper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    pub fn page(page: i64, per_page: i64) -> Self {
        Self {
            page: page.max(1),
            limit: per_page.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn from_query(query: &PageQuery) -> Self {
        Self::page(query.page.unwrap_or(1), query.limit.unwrap_or(DEFAULT_PAGE_SIZE))
    }

    /// Saturates for absurd page numbers; such pages are simply empty.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}
