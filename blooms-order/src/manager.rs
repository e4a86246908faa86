use crate::models::{Order, OrderDraft, OrderStatus};
use blooms_catalog::{PriceBreakdown, PricingEngine};
use blooms_shared::{Masked, Money};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct OrderSettings {
    /// Leading part of order IDs, e.g. `BBO` in `BBO-25-0001`
    pub id_prefix: String,
    /// Longest gift message kept, in characters
    pub message_limit: usize,
}

impl Default for OrderSettings {
    fn default() -> Self {
        Self {
            id_prefix: "BBO".to_string(),
            message_limit: 300,
        }
    }
}

/// Sequential `<prefix>-<YY>-<NNNN>` order IDs, restarting at 1 each run
#[derive(Debug, Clone)]
pub struct OrderIdGenerator {
    prefix: String,
    next: u32,
}

impl OrderIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }

    /// The ID the next order created on `date` will get.
    pub fn peek(&self, date: NaiveDate) -> String {
        format!("{}-{:02}-{:04}", self.prefix, date.year() % 100, self.next)
    }

    pub fn next(&mut self, date: NaiveDate) -> String {
        let id = self.peek(date);
        self.next += 1;
        id
    }
}

/// Manages order lifecycle and state transitions
pub struct OrderManager {
    orders: BTreeMap<String, Order>,
    ids: OrderIdGenerator,
    message_limit: usize,
    pricing: PricingEngine,
}

impl OrderManager {
    pub fn new(settings: OrderSettings, pricing: PricingEngine) -> Self {
        Self {
            orders: BTreeMap::new(),
            ids: OrderIdGenerator::new(settings.id_prefix),
            message_limit: settings.message_limit,
            pricing,
        }
    }

    /// Longest gift message kept, in characters.
    pub fn message_limit(&self) -> usize {
        self.message_limit
    }

    /// Build the order as it would be placed now, without consuming an ID.
    pub fn preview(&self, draft: OrderDraft, now: NaiveDateTime) -> Order {
        let id = self.ids.peek(now.date());
        Order::from_draft(id, self.clip_message(draft), now)
    }

    /// Place an order from checkout details
    pub fn create_order(&mut self, draft: OrderDraft, now: NaiveDateTime) -> &Order {
        let id = self.ids.next(now.date());
        let order = Order::from_draft(id.clone(), self.clip_message(draft), now);

        info!(
            order_id = %order.id,
            product = %order.product.code,
            customer = %Masked(&order.customer_name),
            delivery = order.is_delivery(),
            "Order created"
        );
        self.orders.entry(id).or_insert(order)
    }

    pub fn get_order(&self, order_id: &str) -> Option<&Order> {
        self.orders.get(order_id)
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// All orders in ID order
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    pub fn orders_with_status(&self, status: OrderStatus) -> Vec<&Order> {
        self.orders().filter(|order| order.status == status).collect()
    }

    pub fn quote(&self, order: &Order) -> PriceBreakdown {
        self.pricing.quote(order.item_prices(), order.fulfilment.delivery_request())
    }

    pub fn total(&self, order: &Order) -> Money {
        self.quote(order).total
    }

    /// Move an order along the transition table.
    pub fn transition(&mut self, order_id: &str, target: OrderStatus, now: NaiveDateTime) -> Result<&Order, OrderError> {
        let order = self.get_order_mut(order_id)?;

        if !order.status.can_transition_to(target) {
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to: target,
            });
        }

        let from = order.status;
        order.update_status(target, now);
        info!(order_id, %from, to = %target, "Order status changed");
        Ok(order)
    }

    /// A delivery due on `today` that is not yet Ready may be flagged Deliver Today.
    pub fn deliver_today_eligible(&self, order: &Order, today: NaiveDate) -> bool {
        let Some(request) = order.fulfilment.delivery_request() else {
            return false;
        };
        order.status != OrderStatus::Ready
            && order.status != OrderStatus::DeliverToday
            && self.pricing.parse_date(request.date) == Some(today)
    }

    /// Side transition outside the table.
    pub fn mark_deliver_today(&mut self, order_id: &str, now: NaiveDateTime) -> Result<&Order, OrderError> {
        let order = self
            .get_order(order_id)
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;
        if !self.deliver_today_eligible(order, now.date()) {
            return Err(OrderError::NotDueToday(order_id.to_string()));
        }

        let order = self.get_order_mut(order_id)?;
        order.update_status(OrderStatus::DeliverToday, now);
        info!(order_id, "Order flagged for delivery today");
        Ok(order)
    }

    fn clip_message(&self, mut draft: OrderDraft) -> OrderDraft {
        if let Some((cut, _)) = draft.message.char_indices().nth(self.message_limit) {
            draft.message.truncate(cut);
        }
        draft
    }

    fn get_order_mut(&mut self, order_id: &str) -> Result<&mut Order, OrderError> {
        self.orders
            .get_mut(order_id)
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))
    }
}

impl Default for OrderManager {
    fn default() -> Self {
        Self::new(OrderSettings::default(), PricingEngine::default())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderError {
    #[error("Order '{0}' not found")]
    NotFound(String),

    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error("Order '{0}' is not a delivery due today")]
    NotDueToday(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Fulfilment, OrderItem};

    fn at(day: u32, month: u32, year: i32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    fn draft(fulfilment: Fulfilment) -> OrderDraft {
        OrderDraft {
            product: OrderItem {
                code: "R001".to_string(),
                name: "Red Roses".to_string(),
                price: Money::from_dollars(50),
            },
            addon: None,
            customer_name: "Alice".to_string(),
            recipient_name: "Bob".to_string(),
            message: "Happy days".to_string(),
            fulfilment,
        }
    }

    fn delivery_on(date: &str, same_day: bool) -> Fulfilment {
        Fulfilment::Delivery {
            address: "1 Petal Lane".to_string(),
            date: date.to_string(),
            same_day,
        }
    }

    #[test]
    fn test_order_lifecycle() {
        let mut manager = OrderManager::default();
        let now = at(1, 3, 2025);
        let order_id = manager.create_order(draft(Fulfilment::Pickup), now).id.clone();
        assert_eq!(order_id, "BBO-25-0001");
        assert_eq!(manager.get_order(&order_id).unwrap().status, OrderStatus::Open);

        // Open → Preparing → Ready → Closed
        manager.transition(&order_id, OrderStatus::Preparing, now).unwrap();
        manager.transition(&order_id, OrderStatus::Ready, now).unwrap();
        manager.transition(&order_id, OrderStatus::Closed, now).unwrap();
        assert_eq!(manager.get_order(&order_id).unwrap().status, OrderStatus::Closed);

        // Closed is terminal
        for target in OrderStatus::ALL {
            assert!(manager.transition(&order_id, target, now).is_err());
        }
    }

    #[test]
    fn test_invalid_transition() {
        let mut manager = OrderManager::default();
        let now = at(1, 3, 2025);
        let order_id = manager.create_order(draft(Fulfilment::Pickup), now).id.clone();

        let result = manager.transition(&order_id, OrderStatus::Closed, now);
        assert_eq!(
            result.unwrap_err(),
            OrderError::InvalidTransition { from: OrderStatus::Open, to: OrderStatus::Closed }
        );

        manager.transition(&order_id, OrderStatus::Cancelled, now).unwrap();
        manager.transition(&order_id, OrderStatus::Open, now).unwrap();
        assert_eq!(
            manager.transition("BBO-25-9999", OrderStatus::Preparing, now).unwrap_err(),
            OrderError::NotFound("BBO-25-9999".to_string())
        );
    }

    #[test]
    fn test_ids_are_sequential_and_preview_does_not_consume() {
        let mut manager = OrderManager::new(
            OrderSettings { id_prefix: "BB".to_string(), message_limit: 300 },
            PricingEngine::default(),
        );
        let now = at(5, 1, 2026);

        let preview = manager.preview(draft(Fulfilment::Pickup), now);
        assert_eq!(preview.id, "BB-26-0001");
        assert_eq!(manager.create_order(draft(Fulfilment::Pickup), now).id, "BB-26-0001");
        assert_eq!(manager.create_order(draft(Fulfilment::Pickup), now).id, "BB-26-0002");
        assert_eq!(manager.orders().count(), 2);
    }

    #[test]
    fn test_message_is_truncated() {
        let mut manager = OrderManager::new(
            OrderSettings { id_prefix: "BBO".to_string(), message_limit: 5 },
            PricingEngine::default(),
        );
        let mut long = draft(Fulfilment::Pickup);
        long.message = "Héllo there".to_string();

        assert_eq!(manager.message_limit(), 5);
        let order = manager.create_order(long, at(1, 3, 2025));
        assert_eq!(order.message, "Héllo");
    }

    #[test]
    fn test_totals_use_pricing_engine() {
        let mut manager = OrderManager::default();
        let now = at(1, 3, 2025);
        let weekday = manager.create_order(draft(delivery_on("12/03/2025", false)), now).id.clone();
        let same_day = manager.create_order(draft(delivery_on("12/03/2025", true)), now).id.clone();
        let saturday = manager.create_order(draft(delivery_on("15/03/2025", true)), now).id.clone();
        let pickup = manager.create_order(draft(Fulfilment::Pickup), now).id.clone();

        let total = |id: &str| manager.total(manager.get_order(id).unwrap());
        assert_eq!(total(&weekday), Money::from_dollars(85));
        assert_eq!(total(&same_day), Money::from_dollars(120));
        assert_eq!(total(&saturday), Money::from_dollars(130));
        assert_eq!(total(&pickup), Money::from_dollars(50));
    }

    #[test]
    fn test_deliver_today_side_transition() {
        let mut manager = OrderManager::default();
        let today = at(12, 3, 2025);
        let due = manager.create_order(draft(delivery_on("12/03/2025", false)), today).id.clone();
        let later = manager.create_order(draft(delivery_on("13/03/2025", false)), today).id.clone();
        let pickup = manager.create_order(draft(Fulfilment::Pickup), today).id.clone();

        let eligible = |manager: &OrderManager, id: &str| {
            manager.deliver_today_eligible(manager.get_order(id).unwrap(), today.date())
        };
        assert!(eligible(&manager, &due));
        assert!(!eligible(&manager, &later));
        assert!(!eligible(&manager, &pickup));

        manager.transition(&due, OrderStatus::Preparing, today).unwrap();
        manager.transition(&due, OrderStatus::Ready, today).unwrap();
        assert!(!eligible(&manager, &due));
        assert_eq!(
            manager.mark_deliver_today(&due, today).unwrap_err(),
            OrderError::NotDueToday(due.clone())
        );

        manager.transition(&due, OrderStatus::Preparing, today).unwrap();
        let order = manager.mark_deliver_today(&due, today).unwrap();
        assert_eq!(order.status, OrderStatus::DeliverToday);
        assert_eq!(manager.orders_with_status(OrderStatus::DeliverToday).len(), 1);
    }
}
