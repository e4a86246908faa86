use std::fmt;
use blooms_shared::Money;
use crate::catalog::{CatalogItem, CodeChoice};
use crate::product::Availability;

/// Code prefix for auto-generated add-on codes
pub const ADDON_CODE_PREFIX: &str = "ADD";

/// Extra item that can be attached to a bouquet order (chocolates, cards, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct Addon {
    pub code: String,
    pub name: String,
    pub price: Money,
    pub status: Availability,
}

impl Addon {
    pub fn new(code: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            price,
            status: Availability::Available,
        }
    }

    pub fn with_status(mut self, status: Availability) -> Self {
        self.status = status;
        self
    }

    /// Add-ons seeded when no add-on file exists yet.
    pub fn defaults() -> Vec<Addon> {
        vec![
            Addon::new("ADD001", "Chocolates", Money::from_dollars(8)),
            Addon::new("ADD002", "Customized Handwritten card", Money::from_dollars(12)),
            Addon::new("ADD003", "Soft Toy", Money::from_dollars(16)),
        ]
    }
}

impl CatalogItem for Addon {
    fn code(&self) -> &str { &self.code }
    fn name(&self) -> &str { &self.name }
    fn price(&self) -> Money { self.price }
    fn status(&self) -> Availability { self.status }
    fn set_price(&mut self, price: Money) { self.price = price; }
    fn set_status(&mut self, status: Availability) { self.status = status; }
}

impl fmt::Display for Addon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<10} {:<30} ${:<8} {}",
            self.code,
            self.name,
            self.price.to_string(),
            self.status
        )
    }
}

#[derive(Debug, Clone)]
pub struct NewAddon {
    pub name: String,
    pub price: Money,
    pub code: CodeChoice,
}
