//! Sales menus: checkout and order status management.

use std::io::{BufRead, Write};
use tracing::{info, warn};
use blooms_catalog::{CatalogError, CatalogItem, Category, ProductQuery, ProductSort};
use blooms_order::{listing_entry, render_summary, Fulfilment, OrderDraft, OrderItem, OrderStatus};
use crate::console::{Console, WIDTH};
use crate::error::ConsoleResult;
use crate::inventory::PRODUCT_COLUMNS;
use crate::state::Shop;

const LIST_WIDTH: usize = 80;

pub fn sales_menu<R: BufRead, W: Write>(shop: &mut Shop, console: &mut Console<R, W>) -> ConsoleResult<()> {
    loop {
        console.menu(
            "@@@@ SALES MANAGEMENT @@@@",
            &[("1", "Create Order"), ("2", "View Orders"), ("3", "Back to Main Menu")],
        )?;

        match console.choose("Enter option: ", &["1", "2", "3"])?.as_str() {
            "1" => create_order(shop, console)?,
            "2" => view_orders(shop, console)?,
            _ => return Ok(()),
        }
    }
}

/// What the operator chose on the summary screen
enum Checkout {
    Done,
    Restart,
}

fn create_order<R: BufRead, W: Write>(shop: &mut Shop, console: &mut Console<R, W>) -> ConsoleResult<()> {
    loop {
        match checkout(shop, console)? {
            Checkout::Restart => continue,
            Checkout::Done => return Ok(()),
        }
    }
}

fn checkout<R: BufRead, W: Write>(shop: &mut Shop, console: &mut Console<R, W>) -> ConsoleResult<Checkout> {
    console.header("CREATE ORDER")?;

    let Some(product) = pick_product(shop, console)? else {
        return Ok(Checkout::Done);
    };
    let addon = pick_addon(shop, console)?;

    console.say(format!("\n{}", "=".repeat(WIDTH)))?;
    let customer_name = console.prompt("Customer name: ")?;
    let recipient_name = console.prompt("Recipient's name: ")?;
    let message = console.prompt(&format!(
        "Message for recipient (max {} characters): ",
        shop.orders.message_limit()
    ))?;

    let choice = console.prompt_upper("\nStore pickup or Delivery? (Enter 'P' for pickup, 'D' for delivery): ")?;
    let fulfilment = if choice == "D" {
        let address = console.prompt("Delivery address: ")?;
        let date = console.prompt("Delivery date (DD/MM/YYYY): ")?;
        let same_day = console.prompt_upper("Same day delivery? (Y/N): ")? == "Y";
        Fulfilment::Delivery { address, date, same_day }
    } else {
        Fulfilment::Pickup
    };

    let draft = OrderDraft {
        product,
        addon,
        customer_name,
        recipient_name,
        message,
        fulfilment,
    };

    let now = shop.now();
    let preview = shop.orders.preview(draft.clone(), now);
    console.say(format!("\n{}", render_summary(&preview, &shop.orders.quote(&preview))))?;

    match console.prompt("Enter 1 to confirm, 2 to edit info, 0 to cancel: ")?.as_str() {
        "1" => {
            let order = shop.orders.create_order(draft, now);
            let (order_id, product_code) = (order.id.clone(), order.product.code.clone());
            if let Err(e) = shop.save_orders() {
                warn!(error = %e, "Saving orders failed");
                console.say(format!("⚠ Error saving orders: {e}"))?;
            }
            console.say(format!("\n✓ Order {order_id} created successfully!"))?;
            offer_rating(shop, console, &product_code)?;
        }
        "2" => return Ok(Checkout::Restart),
        _ => {
            info!("Checkout cancelled");
            console.say("\n⚠ Order cancelled")?;
        }
    }

    console.pause()?;
    Ok(Checkout::Done)
}

/// Browse the catalog until the operator picks an orderable product.
fn pick_product<R: BufRead, W: Write>(shop: &Shop, console: &mut Console<R, W>) -> ConsoleResult<Option<OrderItem>> {
    loop {
        if !show_products(shop, console, &ProductQuery::default())? {
            console.pause()?;
            return Ok(None);
        }

        console.say(format!("\n{}", "-".repeat(WIDTH)))?;
        console.say("1. Filter products by category")?;
        console.say("2. Sort products by price")?;
        console.say("3. Sort products by rating")?;
        console.say("4. Order item")?;
        console.say("0. Back to main menu")?;

        match console.choose("\nEnter option: ", &["0", "1", "2", "3", "4"])?.as_str() {
            "0" => return Ok(None),
            "1" => {
                console.say("\nSelect category:")?;
                for (index, category) in Category::ALL.iter().enumerate() {
                    console.say(format!("{}. {}", index + 1, category))?;
                }
                console.say("0. Go back")?;

                let choice = console.choose_number("Select filter category: ", Category::ALL.len(), true)?;
                if choice == 0 {
                    continue;
                }
                let query = ProductQuery {
                    category: Some(Category::ALL[choice - 1]),
                    sort: ProductSort::Code,
                };
                show_products(shop, console, &query)?;

                console.say("\n1. Order item")?;
                console.say("2. Back to filter category")?;
                console.say("3. Back to main menu")?;
                match console.choose("\nEnter option: ", &["1", "2", "3"])?.as_str() {
                    "1" => {}
                    "3" => return Ok(None),
                    _ => continue,
                }
            }
            sort @ ("2" | "3") => {
                let sort = if sort == "2" { ProductSort::PriceAscending } else { ProductSort::RatingDescending };
                show_products(shop, console, &ProductQuery { category: None, sort })?;

                console.say("\n1. Order item")?;
                console.say("2. Back to main menu")?;
                if console.choose("\nEnter option: ", &["1", "2"])? != "1" {
                    return Ok(None);
                }
            }
            _ => {}
        }

        let code = console.prompt_upper("\nPlease enter item code: ")?;
        match shop.products.get_available(&code) {
            Ok(product) => return Ok(Some(OrderItem::from(product))),
            Err(CatalogError::NotAvailable(_)) => console.say(format!("⚠ Item '{code}' is not available"))?,
            Err(_) => console.say(format!("⚠ Invalid item code '{code}'"))?,
        }
        console.pause()?;
    }
}

/// Print the products matching `query`; `false` when there is nothing to show.
fn show_products<R: BufRead, W: Write>(shop: &Shop, console: &mut Console<R, W>, query: &ProductQuery) -> ConsoleResult<bool> {
    let products = shop.products.browse(query);
    if products.is_empty() {
        console.say("\n⚠ No products available")?;
        return Ok(false);
    }

    console.say(format!("\n{PRODUCT_COLUMNS}"))?;
    console.rule(LIST_WIDTH)?;
    for product in products {
        console.say(product)?;
    }
    Ok(true)
}

fn pick_addon<R: BufRead, W: Write>(shop: &Shop, console: &mut Console<R, W>) -> ConsoleResult<Option<OrderItem>> {
    console.say("\nAvailable add-ons:")?;
    console.say(format!("{:<10} {:<30} {}", "Code", "Name", "Price"))?;
    console.rule(50)?;
    for addon in shop.addons.available() {
        console.say(format!("{:<10} {:<30} ${}", addon.code(), addon.name(), addon.price()))?;
    }

    let code = console.prompt_upper("\nEnter item code for addon (or 0 to skip): ")?;
    if code == "0" {
        return Ok(None);
    }
    match shop.addons.get_available(&code) {
        Ok(addon) => Ok(Some(OrderItem::from(addon))),
        Err(_) => {
            console.say("⚠ Invalid addon code. Proceeding without addon.")?;
            Ok(None)
        }
    }
}

fn offer_rating<R: BufRead, W: Write>(shop: &mut Shop, console: &mut Console<R, W>, product_code: &str) -> ConsoleResult<()> {
    if console.prompt_upper("\nWould you like to rate this product? (Y/N): ")? != "Y" {
        return Ok(());
    }

    let rated = console
        .prompt("Enter rating (1-5): ")?
        .parse::<f64>()
        .map_err(|_| ())
        .and_then(|rating| shop.products.rate(product_code, rating).map(|_| ()).map_err(|_| ()));

    match rated {
        Ok(()) => {
            if let Err(e) = shop.save_products() {
                warn!(error = %e, "Saving products failed");
                console.say(format!("⚠ Error saving products: {e}"))?;
            }
            console.say("✓ Thank you for your rating!")
        }
        Err(()) => console.say("⚠ Invalid rating"),
    }
}

fn view_orders<R: BufRead, W: Write>(shop: &mut Shop, console: &mut Console<R, W>) -> ConsoleResult<()> {
    console.header("VIEW ORDERS")?;
    if shop.orders.is_empty() {
        console.say("⚠ No orders found")?;
        return console.pause();
    }

    let mut filter = OrderStatus::Open;
    loop {
        list_orders(shop, console, filter)?;

        console.say("\n1. Edit/Cancel order")?;
        console.say("2. Filter order by status")?;
        console.say("3. Back to main menu")?;

        match console.choose("\nEnter option: ", &["1", "2", "3"])?.as_str() {
            "1" => edit_order(shop, console)?,
            "2" => {
                console.say("\nFilter by status:")?;
                for (index, status) in OrderStatus::ALL.iter().enumerate() {
                    console.say(format!("{}. {}", index + 1, status))?;
                }
                let choice = console.choose_number("Select status: ", OrderStatus::ALL.len(), false)?;
                filter = OrderStatus::ALL[choice - 1];
            }
            _ => return Ok(()),
        }
    }
}

fn list_orders<R: BufRead, W: Write>(shop: &Shop, console: &mut Console<R, W>, filter: OrderStatus) -> ConsoleResult<()> {
    let orders = shop.orders.orders_with_status(filter);
    if orders.is_empty() {
        return console.say(format!("\n⚠ No orders with status '{filter}'"));
    }

    console.say(format!("\nOrders with status: {filter}"))?;
    console.rule(LIST_WIDTH)?;
    for order in orders {
        console.say(listing_entry(order, shop.orders.total(order)).trim_end())?;
        console.rule(LIST_WIDTH)?;
    }
    Ok(())
}

fn edit_order<R: BufRead, W: Write>(shop: &mut Shop, console: &mut Console<R, W>) -> ConsoleResult<()> {
    let order_id = console.prompt_upper("\nEnter order ID: ")?;
    let Some(order) = shop.orders.get_order(&order_id) else {
        console.say(format!("⚠ Order '{order_id}' not found!"))?;
        return console.pause();
    };

    let status = order.status;
    console.say(format!("\nOrder ID: {}", order.id))?;
    console.say(format!("Current Status: {status}"))?;

    let actions = status.actions();
    if actions.is_empty() {
        console.say(format!("\n⚠ No status change options available for {status} orders"))?;
        return console.pause();
    }

    console.say("\nAvailable actions:")?;
    for (index, action) in actions.iter().enumerate() {
        console.say(format!("{}. {}", index + 1, action.label))?;
    }
    console.say("0. Go back")?;

    let choice = console.choose_number("\nSelect action: ", actions.len(), true)?;
    if choice == 0 {
        return Ok(());
    }

    let target = actions[choice - 1].target;
    let now = shop.now();
    match shop.orders.transition(&order_id, target, now) {
        Ok(_) if target == OrderStatus::Cancelled => console.say("✓ Order cancelled")?,
        Ok(_) => console.say(format!("✓ Order status changed to {target}"))?,
        Err(e) => console.say(format!("⚠ {e}"))?,
    }

    let today = shop.today();
    let due_today = shop
        .orders
        .get_order(&order_id)
        .is_some_and(|order| shop.orders.deliver_today_eligible(order, today));
    if due_today {
        console.say("⚠ ALERT: This order is scheduled for delivery TODAY!")?;
        if console.prompt_upper("Change status to 'Deliver Today'? (Y/N): ")? == "Y" {
            match shop.orders.mark_deliver_today(&order_id, now) {
                Ok(_) => console.say("✓ Status updated to 'Deliver Today'")?,
                Err(e) => console.say(format!("⚠ {e}"))?,
            }
        }
    }

    if let Err(e) = shop.save_orders() {
        warn!(error = %e, "Saving orders failed");
        console.say(format!("⚠ Error saving orders: {e}"))?;
    }
    console.pause()
}
