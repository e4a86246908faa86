pub mod cli;
pub mod console;
pub mod error;
pub mod inventory;
pub mod sales;
pub mod state;
pub mod telemetry;

use std::io::{BufRead, Write};
use tracing::info;

pub use console::Console;
pub use error::{ConsoleError, ConsoleResult};
pub use state::Shop;

/// Run the interactive session until the operator exits or input runs out.
pub fn run<R: BufRead, W: Write>(shop: &mut Shop, console: &mut Console<R, W>, notices: &[String]) -> ConsoleResult<()> {
    match session(shop, console, notices) {
        Err(ConsoleError::EndOfInput) => {
            info!("Input closed, leaving");
            Ok(())
        }
        other => other,
    }
}

fn session<R: BufRead, W: Write>(shop: &mut Shop, console: &mut Console<R, W>, notices: &[String]) -> ConsoleResult<()> {
    console.header("BEAUTIFUL BLOOMS MANAGEMENT SYSTEM")?;
    for notice in notices {
        console.say(notice)?;
    }
    console.say("\n✓ System initialized successfully!")?;
    console.prompt("Press Enter to continue to main menu...")?;

    loop {
        console.menu(
            "@@@@ BEAUTIFUL BLOOMS @@@@",
            &[("1", "Inventory Management"), ("2", "Sales Management"), ("3", "Exit")],
        )?;

        match console.choose("Enter option: ", &["1", "2", "3"])?.as_str() {
            "1" => inventory::inventory_menu(shop, console)?,
            "2" => sales::sales_menu(shop, console)?,
            _ => {
                console.header("Thank you for using Beautiful Blooms!")?;
                info!("Session ended");
                return Ok(());
            }
        }
    }
}
