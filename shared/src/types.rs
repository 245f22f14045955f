use serde::{Deserialize, Serialize};
use std::fmt;

// User-related enums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::User => write!(f, "user"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

// Order lifecycle. Fulfilment advances one step at a time; cancellation is
// reachable from any non-terminal state. Delivered and Cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
pub enum OrderStatus {
    Processing,
    Confirmed,
    Shipped,
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// The next state on the normal fulfilment path, if any.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Processing => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Shipped),
            OrderStatus::Shipped => Some(OrderStatus::OutForDelivery),
            OrderStatus::OutForDelivery => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Single forward step or cancellation. Terminal states accept nothing.
    pub fn can_transition_to(self, target: OrderStatus) -> bool {
        if self.is_terminal() || target == self {
            return false;
        }
        if target == OrderStatus::Cancelled {
            return true;
        }
        self.next() == Some(target)
    }

    /// Customers may only cancel before the order leaves the warehouse.
    pub fn is_customer_cancellable(self) -> bool {
        matches!(self, OrderStatus::Processing | OrderStatus::Confirmed)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Processing => write!(f, "processing"),
            OrderStatus::Confirmed => write!(f, "confirmed"),
            OrderStatus::Shipped => write!(f, "shipped"),
            OrderStatus::OutForDelivery => write!(f, "out for delivery"),
            OrderStatus::Delivered => write!(f, "delivered"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

// Payment-related enums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "payment_method", rename_all = "lowercase")]
pub enum PaymentMethod {
    Cod,
    Card,
    Upi,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cod => write!(f, "cod"),
            PaymentMethod::Card => write!(f, "card"),
            PaymentMethod::Upi => write!(f, "upi"),
        }
    }
}

// Coupon-related enums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "discount_type", rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountType::Percentage => write!(f, "percentage"),
            DiscountType::Fixed => write!(f, "fixed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_path_is_single_step() {
        assert!(OrderStatus::Processing.can_transition_to(OrderStatus::Confirmed));
        assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Shipped));
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::OutForDelivery));
        assert!(OrderStatus::OutForDelivery.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn skipping_states_is_rejected() {
        assert!(!OrderStatus::Processing.can_transition_to(OrderStatus::Shipped));
        assert!(!OrderStatus::Processing.can_transition_to(OrderStatus::Delivered));
        assert!(!OrderStatus::Confirmed.can_transition_to(OrderStatus::OutForDelivery));
    }

    #[test]
    fn backward_moves_are_rejected() {
        assert!(!OrderStatus::Shipped.can_transition_to(OrderStatus::Confirmed));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::OutForDelivery));
    }

    #[test]
    fn cancellation_reachable_from_any_non_terminal_state() {
        for status in [
            OrderStatus::Processing,
            OrderStatus::Confirmed,
            OrderStatus::Shipped,
            OrderStatus::OutForDelivery,
        ] {
            assert!(status.can_transition_to(OrderStatus::Cancelled), "{status}");
        }
    }

    #[test]
    fn terminal_states_accept_nothing() {
        for target in [
            OrderStatus::Processing,
            OrderStatus::Confirmed,
            OrderStatus::Shipped,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert!(!OrderStatus::Delivered.can_transition_to(target));
            assert!(!OrderStatus::Cancelled.can_transition_to(target));
        }
    }

    #[test]
    fn self_transition_is_rejected() {
        assert!(!OrderStatus::Processing.can_transition_to(OrderStatus::Processing));
    }

    #[test]
    fn customer_cancellation_window_closes_at_shipment() {
        assert!(OrderStatus::Processing.is_customer_cancellable());
        assert!(OrderStatus::Confirmed.is_customer_cancellable());
        assert!(!OrderStatus::Shipped.is_customer_cancellable());
        assert!(!OrderStatus::OutForDelivery.is_customer_cancellable());
        assert!(!OrderStatus::Delivered.is_customer_cancellable());
        assert!(!OrderStatus::Cancelled.is_customer_cancellable());
    }

    #[test]
    fn out_for_delivery_keeps_its_wire_label() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"Out for Delivery\"");
        let back: OrderStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OrderStatus::OutForDelivery);
    }
}
