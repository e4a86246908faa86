use std::path::PathBuf;
use blooms_order::{Fulfilment, Order};
use crate::flat_file::{FlatFile, LineEncoder};

/// Pipe-delimited order log line:
/// `id|product|addon or NONE|customer|recipient|message|address|date|same_day|is_delivery|status`
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderLogCodec;

/// Orders are written out on every change but never read back.
pub type OrderLog = FlatFile<OrderLogCodec>;

impl OrderLog {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        FlatFile::new(path, OrderLogCodec)
    }
}

fn flag(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

impl LineEncoder for OrderLogCodec {
    type Record = Order;

    fn encode(&self, order: &Order) -> String {
        let addon_code = order.addon.as_ref().map_or("NONE", |addon| addon.code.as_str());
        let (address, date, same_day) = match &order.fulfilment {
            Fulfilment::Pickup => ("", "", false),
            Fulfilment::Delivery { address, date, same_day } => (address.as_str(), date.as_str(), *same_day),
        };

        [
            order.id.as_str(),
            order.product.code.as_str(),
            addon_code,
            order.customer_name.as_str(),
            order.recipient_name.as_str(),
            order.message.as_str(),
            address,
            date,
            flag(same_day),
            flag(order.is_delivery()),
            order.status.label(),
        ]
        .join("|")
    }
}
