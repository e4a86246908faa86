//! Text renderings of orders for the console.

use std::fmt;
use blooms_catalog::PriceBreakdown;
use blooms_shared::Money;
use crate::models::{Fulfilment, Order};

const WIDTH: usize = 60;

/// Full checkout summary, as shown before confirmation.
pub fn render_summary(order: &Order, breakdown: &PriceBreakdown) -> String {
    Summary { order, breakdown }.to_string()
}

/// Short block used in the order list.
pub fn listing_entry(order: &Order, total: Money) -> String {
    Listing { order, total }.to_string()
}

struct Summary<'a> {
    order: &'a Order,
    breakdown: &'a PriceBreakdown,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (order, breakdown) = (self.order, self.breakdown);
        let heavy = "=".repeat(WIDTH);
        let light = "-".repeat(WIDTH);

        writeln!(f, "{heavy}")?;
        writeln!(f, "{:^WIDTH$}", "ORDER SUMMARY")?;
        writeln!(f, "{heavy}")?;
        writeln!(f, "Order ID: {}", order.id)?;
        writeln!(f, "Status: {}", order.status)?;
        writeln!(f, "{light}")?;
        writeln!(f, "Item: {} ({}) ${}", order.product.name, order.product.code, order.product.price)?;
        if let Some(addon) = &order.addon {
            writeln!(f, "Add-on: {} ({}) ${}", addon.name, addon.code, addon.price)?;
        }
        writeln!(f, "{light}")?;

        match (&order.fulfilment, breakdown.delivery) {
            (Fulfilment::Delivery { date, same_day, .. }, Some(charge)) => {
                writeln!(f, "Delivery Date: {date}")?;
                if let Some(surcharge) = charge.weekend_surcharge {
                    writeln!(f, "Weekend Delivery: +${surcharge}")?;
                }
                writeln!(
                    f,
                    "Same Day Delivery: {} ${}",
                    if *same_day { "Yes" } else { "No" },
                    charge.same_day_fee.unwrap_or(Money::ZERO)
                )?;
                writeln!(f, "Delivery Charges: ${}", charge.fee)?;
            }
            _ => writeln!(f, "Pickup: Store Pickup (No Delivery Charge)")?,
        }

        writeln!(f, "{light}")?;
        writeln!(f, "Total: ${}", breakdown.total)?;
        writeln!(f, "{heavy}")?;
        writeln!(f, "Customer Name: {}", order.customer_name)?;
        writeln!(f, "Recipient Name: {}", order.recipient_name)?;
        writeln!(f, "Message: {}", order.message)?;
        if let Fulfilment::Delivery { address, .. } = &order.fulfilment {
            writeln!(f, "Delivery Address: {address}")?;
        }
        writeln!(f, "{heavy}")
    }
}

struct Listing<'a> {
    order: &'a Order,
    total: Money,
}

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = self.order;
        writeln!(f, "Order ID: {}", order.id)?;
        writeln!(f, "Customer: {} | Recipient: {}", order.customer_name, order.recipient_name)?;
        writeln!(f, "Product: {} | Total: ${}", order.product.name, self.total)?;
        writeln!(f, "Status: {}", order.status)?;
        if let Fulfilment::Delivery { address, date, .. } = &order.fulfilment {
            writeln!(f, "Delivery: {date} to {address}")?;
        }
        Ok(())
    }
}
