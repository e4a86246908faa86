pub mod models;
pub mod manager;
pub mod summary;

pub use models::{Fulfilment, Order, OrderDraft, OrderItem, OrderStatus, StatusAction};
pub use manager::{OrderError, OrderIdGenerator, OrderManager, OrderSettings};
pub use summary::{listing_entry, render_summary};
