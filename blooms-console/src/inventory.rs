//! Inventory management menus: viewing, updating and adding blooms and add-ons.

use std::fmt::Display;
use std::io::{BufRead, Write};
use tracing::warn;
use blooms_catalog::catalog::{validate_name, validate_price};
use blooms_catalog::{Availability, Catalog, CatalogItem, Category, CodeChoice, NewAddon, NewProduct};
use blooms_core::CoreResult;
use blooms_shared::Money;
use crate::console::{Console, WIDTH};
use crate::error::ConsoleResult;
use crate::state::Shop;

pub const PRODUCT_COLUMNS: &str = "Code       Name                      Category        Price      Status";
pub const ADDON_COLUMNS: &str = "Code       Name                           Price      Status";

pub fn inventory_menu<R: BufRead, W: Write>(shop: &mut Shop, console: &mut Console<R, W>) -> ConsoleResult<()> {
    loop {
        console.menu(
            "@@@@ INVENTORY MANAGEMENT @@@@",
            &[
                ("1", "View / Update Blooms"),
                ("2", "Add New Bloom"),
                ("3", "View / Update Add-ons"),
                ("4", "Add New Add-on"),
                ("5", "Back to Main Menu"),
            ],
        )?;

        match console.choose("Enter option: ", &["1", "2", "3", "4", "5"])?.as_str() {
            "1" => view_update_blooms(shop, console)?,
            "2" => add_new_bloom(shop, console)?,
            "3" => view_update_addons(shop, console)?,
            "4" => add_new_addon(shop, console)?,
            _ => return Ok(()),
        }
    }
}

fn view_update_blooms<R: BufRead, W: Write>(shop: &mut Shop, console: &mut Console<R, W>) -> ConsoleResult<()> {
    console.header("VIEW / UPDATE BLOOMS")?;
    if shop.products.is_empty() {
        console.say("⚠ No products available")?;
        return console.pause();
    }

    if update_item(console, &mut shop.products, "Product", PRODUCT_COLUMNS, 80)? {
        report_save(console, shop.save_products())?;
    }
    console.pause()
}

fn view_update_addons<R: BufRead, W: Write>(shop: &mut Shop, console: &mut Console<R, W>) -> ConsoleResult<()> {
    console.header("VIEW / UPDATE ADD-ONS")?;
    if shop.addons.is_empty() {
        console.say("⚠ No add-ons available")?;
        return console.pause();
    }

    if update_item(console, &mut shop.addons, "Add-on", ADDON_COLUMNS, WIDTH)? {
        report_save(console, shop.save_addons())?;
    }
    console.pause()
}

/// List the catalog and let the operator edit one record's price and status.
/// Returns `true` when a record was opened for editing and should be saved.
fn update_item<R, W, T>(
    console: &mut Console<R, W>,
    catalog: &mut Catalog<T>,
    kind: &str,
    columns: &str,
    rule: usize,
) -> ConsoleResult<bool>
where
    R: BufRead,
    W: Write,
    T: CatalogItem + Display,
{
    console.say(format!("\n{columns}"))?;
    console.rule(rule)?;
    for item in catalog.iter() {
        console.say(item)?;
    }

    console.say(format!("\n{}", "-".repeat(WIDTH)))?;
    let code = console.prompt_upper("To update an item, enter the item code (or 0 to go back): ")?;
    if code == "0" {
        return Ok(false);
    }

    let Some(item) = catalog.get(&code) else {
        console.say(format!("⚠ {kind} code '{code}' not found!"))?;
        return Ok(false);
    };
    let (price, status) = (item.price(), item.status());
    console.say(format!("\nCurrent details for {}:", item.name()))?;
    console.say(format!("Price: ${price}"))?;
    console.say(format!("Status: {status}"))?;

    let new_price = console.prompt(&format!("\nEnter new price (or press Enter to keep ${price}): "))?;
    if !new_price.is_empty() {
        match Money::parse(&new_price) {
            Ok(amount) => match catalog.update_price(&code, amount) {
                Ok(_) => console.say(format!("✓ Price updated to ${amount}"))?,
                Err(e) => console.say(format!("⚠ {e}"))?,
            },
            Err(_) => console.say("⚠ Invalid price format")?,
        }
    }

    console.say("\nStatus options: Available, Unavailable")?;
    let new_status = console.prompt(&format!("Enter new status (or press Enter to keep '{status}'): "))?;
    if !new_status.is_empty() {
        match new_status.parse::<Availability>() {
            Ok(status) => match catalog.update_status(&code, status) {
                Ok(_) => console.say(format!("✓ Status updated to '{status}'"))?,
                Err(e) => console.say(format!("⚠ {e}"))?,
            },
            Err(e) => console.say(format!("⚠ {e}"))?,
        }
    }

    Ok(true)
}

fn add_new_bloom<R: BufRead, W: Write>(shop: &mut Shop, console: &mut Console<R, W>) -> ConsoleResult<()> {
    console.header("ADD NEW BLOOM")?;

    let Some(name) = read_name(console, "Enter product name: ")? else {
        return console.pause();
    };
    let Some(code) = read_code_choice(console, &shop.products, "Enter product code: ")? else {
        return console.pause();
    };
    let Some(price) = read_price(console)? else {
        return console.pause();
    };

    console.say("\nSelect category:")?;
    for (index, category) in Category::ALL.iter().enumerate() {
        console.say(format!("{}. {}", index + 1, category))?;
    }
    let choice = console.choose_number("Enter choice (1-5): ", Category::ALL.len(), false)?;
    let category = Category::ALL[choice - 1];

    let auto = code == CodeChoice::Auto;
    let added = shop
        .products
        .add_product(NewProduct { name, category, price, code })
        .map(|product| (product.code.clone(), product.name.clone()));

    match added {
        Ok((code, name)) => {
            if auto {
                console.say(format!("\n✓ Generated code: {code}"))?;
            }
            match shop.save_products() {
                Ok(()) => console.say(format!("\n✓ Product '{name}' ({code}) added successfully!"))?,
                Err(e) => {
                    warn!(error = %e, "Saving products failed");
                    console.say(format!("\n⚠ Failed to save product: {e}"))?;
                }
            }
        }
        Err(e) => console.say(format!("⚠ {e}"))?,
    }
    console.pause()
}

fn add_new_addon<R: BufRead, W: Write>(shop: &mut Shop, console: &mut Console<R, W>) -> ConsoleResult<()> {
    console.header("ADD NEW ADD-ON")?;

    let Some(name) = read_name(console, "Enter add-on name: ")? else {
        return console.pause();
    };
    let Some(code) = read_code_choice(console, &shop.addons, "Enter add-on code: ")? else {
        return console.pause();
    };
    let Some(price) = read_price(console)? else {
        return console.pause();
    };

    let auto = code == CodeChoice::Auto;
    let added = shop
        .addons
        .add_addon(NewAddon { name, price, code })
        .map(|addon| (addon.code.clone(), addon.name.clone()));

    match added {
        Ok((code, name)) => {
            if auto {
                console.say(format!("\n✓ Generated code: {code}"))?;
            }
            match shop.save_addons() {
                Ok(()) => console.say(format!("\n✓ Add-on '{name}' ({code}) added successfully!"))?,
                Err(e) => {
                    warn!(error = %e, "Saving add-ons failed");
                    console.say(format!("\n⚠ Failed to save add-on: {e}"))?;
                }
            }
        }
        Err(e) => console.say(format!("⚠ {e}"))?,
    }
    console.pause()
}

fn read_name<R: BufRead, W: Write>(console: &mut Console<R, W>, label: &str) -> ConsoleResult<Option<String>> {
    let raw = console.prompt(label)?;
    match validate_name(&raw) {
        Ok(name) => Ok(Some(name)),
        Err(e) => {
            console.say(format!("⚠ {e}"))?;
            Ok(None)
        }
    }
}

/// Ask auto vs. manual; a manual code is checked for uniqueness straight away.
fn read_code_choice<R, W, T>(
    console: &mut Console<R, W>,
    catalog: &Catalog<T>,
    label: &str,
) -> ConsoleResult<Option<CodeChoice>>
where
    R: BufRead,
    W: Write,
    T: CatalogItem,
{
    console.say("\n1. Auto-generate code")?;
    console.say("2. Manually enter code")?;
    if console.choose("Choose option: ", &["1", "2"])? == "1" {
        return Ok(Some(CodeChoice::Auto));
    }

    let choice = CodeChoice::Manual(console.prompt(label)?);
    match catalog.resolve_code(&choice, "") {
        Ok(_) => Ok(Some(choice)),
        Err(e) => {
            console.say(format!("⚠ {e}"))?;
            Ok(None)
        }
    }
}

fn read_price<R: BufRead, W: Write>(console: &mut Console<R, W>) -> ConsoleResult<Option<Money>> {
    let Ok(price) = Money::parse(&console.prompt("Enter price: $")?) else {
        console.say("⚠ Invalid price format")?;
        return Ok(None);
    };
    if validate_price(price).is_err() {
        console.say("⚠ Price must be positive")?;
        return Ok(None);
    }
    Ok(Some(price))
}

pub(crate) fn report_save<R: BufRead, W: Write>(console: &mut Console<R, W>, result: CoreResult<()>) -> ConsoleResult<()> {
    match result {
        Ok(()) => console.say("\n✓ Changes saved successfully!"),
        Err(e) => {
            warn!(error = %e, "Saving changes failed");
            console.say(format!("\n⚠ Failed to save changes: {e}"))
        }
    }
}
