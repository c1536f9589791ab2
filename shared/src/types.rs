use serde::{Deserialize, Serialize};
use std::fmt;

// Principal kinds carried in access tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalKind {
    User,
    Seller,
    Admin,
}

impl PrincipalKind {
    /// Admins pass every check; other kinds must match exactly.
    pub fn permits(self, required: PrincipalKind) -> bool {
        self == PrincipalKind::Admin || self == required
    }
}

impl fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrincipalKind::User => write!(f, "user"),
            PrincipalKind::Seller => write!(f, "seller"),
            PrincipalKind::Admin => write!(f, "admin"),
        }
    }
}

/// Order-level status. Follows the payment lifecycle only:
/// `pending -> completed | failed`. The fulfilment variants exist in the
/// schema but no payment code path produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Failed,
    Shipped,
    Delivered,
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Completed => write!(f, "completed"),
            OrderStatus::Failed => write!(f, "failed"),
            OrderStatus::Shipped => write!(f, "shipped"),
            OrderStatus::Delivered => write!(f, "delivered"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Per line item fulfilment status, set by the owning seller. Any value may
/// follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "item_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

impl ItemStatus {
    /// Summarise a set of item statuses, most blocking first. Never
    /// persisted; independent of the order-level payment status.
    pub fn aggregate(statuses: &[ItemStatus]) -> ItemStatus {
        let Some(first) = statuses.first() else {
            return ItemStatus::Pending;
        };

        let any = |s: ItemStatus| statuses.contains(&s);
        let all = |s: ItemStatus| statuses.iter().all(|x| *x == s);

        if any(ItemStatus::Pending) {
            ItemStatus::Pending
        } else if any(ItemStatus::Shipped) {
            ItemStatus::Shipped
        } else if all(ItemStatus::Delivered) {
            ItemStatus::Delivered
        } else if all(ItemStatus::Cancelled) {
            ItemStatus::Cancelled
        } else if any(ItemStatus::Delivered) {
            ItemStatus::Delivered
        } else {
            *first
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemStatus::Pending => write!(f, "pending"),
            ItemStatus::Shipped => write!(f, "shipped"),
            ItemStatus::Delivered => write!(f, "delivered"),
            ItemStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Upi,
    Cod,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Card => write!(f, "card"),
            PaymentMethod::Upi => write!(f, "upi"),
            PaymentMethod::Cod => write!(f, "cod"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ItemStatus::*;

    #[test]
    fn aggregate_follows_blocking_precedence() {
        assert_eq!(ItemStatus::aggregate(&[Pending]), Pending);
        assert_eq!(ItemStatus::aggregate(&[Shipped, Delivered]), Shipped);
        assert_eq!(ItemStatus::aggregate(&[Delivered, Delivered]), Delivered);
        assert_eq!(ItemStatus::aggregate(&[Cancelled, Cancelled]), Cancelled);
        assert_eq!(ItemStatus::aggregate(&[]), Pending);
    }

    #[test]
    fn aggregate_mixed_terminal_states() {
        assert_eq!(ItemStatus::aggregate(&[Cancelled, Delivered]), Delivered);
        assert_eq!(ItemStatus::aggregate(&[Delivered, Pending, Shipped]), Pending);
        assert_eq!(ItemStatus::aggregate(&[Cancelled, Shipped]), Shipped);
    }

    #[test]
    fn admin_permits_every_kind() {
        assert!(PrincipalKind::Admin.permits(PrincipalKind::Seller));
        assert!(PrincipalKind::Admin.permits(PrincipalKind::User));
        assert!(PrincipalKind::Seller.permits(PrincipalKind::Seller));
        assert!(!PrincipalKind::User.permits(PrincipalKind::Seller));
        assert!(!PrincipalKind::Seller.permits(PrincipalKind::Admin));
    }

    #[test]
    fn wire_names_are_lowercase() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Cod).ok().as_deref(), Some("\"cod\""));
        assert_eq!(OrderStatus::default().to_string(), "pending");
    }
}
