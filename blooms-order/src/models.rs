use chrono::NaiveDateTime;
use std::fmt;
use blooms_catalog::{Addon, DeliveryRequest, Product};
use blooms_shared::Money;

/// Order status in the lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Open,
    Preparing,
    Ready,
    Closed,
    Cancelled,
    DeliverToday,
}

/// An operator action offered for an order in a given status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusAction {
    pub label: &'static str,
    pub target: OrderStatus,
}

const OPEN_ACTIONS: &[StatusAction] = &[
    StatusAction { label: "Cancel order", target: OrderStatus::Cancelled },
    StatusAction { label: "Change to Preparing", target: OrderStatus::Preparing },
];
const CANCELLED_ACTIONS: &[StatusAction] = &[
    StatusAction { label: "Set back to Open", target: OrderStatus::Open },
];
const PREPARING_ACTIONS: &[StatusAction] = &[
    StatusAction { label: "Change to Ready", target: OrderStatus::Ready },
];
const READY_ACTIONS: &[StatusAction] = &[
    StatusAction { label: "Change to Preparing", target: OrderStatus::Preparing },
    StatusAction { label: "Change to Closed", target: OrderStatus::Closed },
];

impl OrderStatus {
    /// Filter menu order.
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Open,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Closed,
        OrderStatus::Cancelled,
        OrderStatus::DeliverToday,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Open => "Open",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Closed => "Closed",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::DeliverToday => "Deliver Today",
        }
    }

    /// Transition table. Closed and Deliver Today offer nothing.
    pub fn actions(&self) -> &'static [StatusAction] {
        match self {
            OrderStatus::Open => OPEN_ACTIONS,
            OrderStatus::Cancelled => CANCELLED_ACTIONS,
            OrderStatus::Preparing => PREPARING_ACTIONS,
            OrderStatus::Ready => READY_ACTIONS,
            OrderStatus::Closed | OrderStatus::DeliverToday => &[],
        }
    }

    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        self.actions().iter().any(|action| action.target == target)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Catalog record as it was when the order was placed
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub code: String,
    pub name: String,
    pub price: Money,
}

impl From<&Product> for OrderItem {
    fn from(product: &Product) -> Self {
        Self {
            code: product.code.clone(),
            name: product.name.clone(),
            price: product.price,
        }
    }
}

impl From<&Addon> for OrderItem {
    fn from(addon: &Addon) -> Self {
        Self {
            code: addon.code.clone(),
            name: addon.name.clone(),
            price: addon.price,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fulfilment {
    Pickup,
    Delivery {
        address: String,
        /// As entered; may not parse as a date.
        date: String,
        same_day: bool,
    },
}

impl Fulfilment {
    pub fn is_delivery(&self) -> bool {
        matches!(self, Fulfilment::Delivery { .. })
    }

    pub fn delivery_request(&self) -> Option<DeliveryRequest<'_>> {
        match self {
            Fulfilment::Pickup => None,
            Fulfilment::Delivery { date, same_day, .. } => Some(DeliveryRequest {
                date,
                same_day: *same_day,
            }),
        }
    }
}

/// Everything collected at checkout before an ID is assigned
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub product: OrderItem,
    pub addon: Option<OrderItem>,
    pub customer_name: String,
    pub recipient_name: String,
    pub message: String,
    pub fulfilment: Fulfilment,
}

/// A customer's bouquet order
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub product: OrderItem,
    pub addon: Option<OrderItem>,
    pub customer_name: String,
    pub recipient_name: String,
    pub message: String,
    pub fulfilment: Fulfilment,
    pub status: OrderStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Order {
    pub fn from_draft(id: String, draft: OrderDraft, now: NaiveDateTime) -> Self {
        Self {
            id,
            product: draft.product,
            addon: draft.addon,
            customer_name: draft.customer_name,
            recipient_name: draft.recipient_name,
            message: draft.message,
            fulfilment: draft.fulfilment,
            status: OrderStatus::Open,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_delivery(&self) -> bool {
        self.fulfilment.is_delivery()
    }

    /// Product and add-on prices
    pub fn item_prices(&self) -> impl Iterator<Item = Money> + '_ {
        std::iter::once(self.product.price).chain(self.addon.iter().map(|addon| addon.price))
    }

    pub fn update_status(&mut self, new_status: OrderStatus, now: NaiveDateTime) {
        self.status = new_status;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table() {
        use OrderStatus::*;

        assert!(Open.can_transition_to(Cancelled));
        assert!(Open.can_transition_to(Preparing));
        assert!(!Open.can_transition_to(Ready));
        assert!(Cancelled.can_transition_to(Open));
        assert!(Preparing.can_transition_to(Ready));
        assert!(!Preparing.can_transition_to(Open));
        assert!(Ready.can_transition_to(Preparing));
        assert!(Ready.can_transition_to(Closed));

        for target in OrderStatus::ALL {
            assert!(!Closed.can_transition_to(target));
        }
        assert!(DeliverToday.actions().is_empty());
    }

    #[test]
    fn test_action_labels() {
        let labels: Vec<&str> = OrderStatus::Ready.actions().iter().map(|action| action.label).collect();
        assert_eq!(labels, vec!["Change to Preparing", "Change to Closed"]);
        assert_eq!(OrderStatus::DeliverToday.to_string(), "Deliver Today");
    }

    #[test]
    fn test_pickup_has_no_delivery_request() {
        assert!(Fulfilment::Pickup.delivery_request().is_none());

        let delivery = Fulfilment::Delivery {
            address: "1 Petal Lane".to_string(),
            date: "15/03/2025".to_string(),
            same_day: true,
        };
        let request = delivery.delivery_request().unwrap();
        assert_eq!(request.date, "15/03/2025");
        assert!(request.same_day);
    }
}
