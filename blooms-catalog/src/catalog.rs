use std::collections::BTreeMap;
use tracing::{debug, info};
use blooms_shared::Money;
use crate::addon::{Addon, NewAddon, ADDON_CODE_PREFIX};
use crate::product::{Availability, Category, NewProduct, Product};

/// Characters that would break the comma-delimited record files.
const FORBIDDEN_CHARS: [char; 3] = [',', '\n', '\r'];

/// Common surface of catalog records
pub trait CatalogItem {
    fn code(&self) -> &str;
    fn name(&self) -> &str;
    fn price(&self) -> Money;
    fn status(&self) -> Availability;
    fn set_price(&mut self, price: Money);
    fn set_status(&mut self, status: Availability);

    fn is_available(&self) -> bool {
        self.status() == Availability::Available
    }
}

/// How a new record gets its code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeChoice {
    /// Category prefix plus the first free zero-padded counter
    Auto,
    /// Operator-supplied code, trimmed and upper-cased
    Manual(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    #[default]
    Code,
    PriceAscending,
    RatingDescending,
}

/// Filter/sort options for the product listing shown at checkout
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductQuery {
    pub category: Option<Category>,
    pub sort: ProductSort,
}

/// In-memory catalog keyed by code
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    items: BTreeMap<String, T>,
}

impl<T: CatalogItem> Catalog<T> {
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }

    /// Build from loaded records. A later record replaces an earlier one with the same code.
    pub fn from_records(records: impl IntoIterator<Item = T>) -> Self {
        let items = records
            .into_iter()
            .map(|item| (item.code().to_string(), item))
            .collect();
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.items.contains_key(code)
    }

    pub fn get(&self, code: &str) -> Option<&T> {
        self.items.get(code)
    }

    /// Records in code order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    pub fn available(&self) -> impl Iterator<Item = &T> {
        self.items.values().filter(|item| item.is_available())
    }

    /// Available record by code, for checkout.
    pub fn get_available(&self, code: &str) -> Result<&T, CatalogError> {
        let item = self
            .get(code)
            .ok_or_else(|| CatalogError::NotFound(code.to_string()))?;
        if !item.is_available() {
            return Err(CatalogError::NotAvailable(code.to_string()));
        }
        Ok(item)
    }

    /// First `{prefix}{NNN}` code not yet taken, counting from 1.
    pub fn next_code(&self, prefix: &str) -> String {
        (1u32..)
            .map(|counter| format!("{}{:03}", prefix, counter))
            .find(|code| !self.contains(code))
            .unwrap_or_else(|| prefix.to_string())
    }

    /// Turn a code choice into a free code.
    pub fn resolve_code(&self, choice: &CodeChoice, prefix: &str) -> Result<String, CatalogError> {
        match choice {
            CodeChoice::Auto => Ok(self.next_code(prefix)),
            CodeChoice::Manual(raw) => {
                let code = normalize_code(raw);
                if code.is_empty() || code.contains(FORBIDDEN_CHARS) {
                    return Err(CatalogError::InvalidCode(raw.clone()));
                }
                if self.contains(&code) {
                    return Err(CatalogError::DuplicateCode(code));
                }
                Ok(code)
            }
        }
    }

    /// Insert a fully-formed record after validation.
    pub fn insert(&mut self, item: T) -> Result<&T, CatalogError> {
        validate_name(item.name())?;
        validate_price(item.price())?;
        let code = item.code().to_string();
        if code.is_empty() || code.contains(FORBIDDEN_CHARS) {
            return Err(CatalogError::InvalidCode(code));
        }
        if self.contains(&code) {
            return Err(CatalogError::DuplicateCode(code));
        }

        debug!(code = %code, "Catalog item inserted");
        Ok(self.items.entry(code).or_insert(item))
    }

    pub fn update_price(&mut self, code: &str, price: Money) -> Result<&T, CatalogError> {
        validate_price(price)?;
        let item = self.get_mut(code)?;
        item.set_price(price);
        info!(code, price = %price, "Price updated");
        Ok(item)
    }

    pub fn update_status(&mut self, code: &str, status: Availability) -> Result<&T, CatalogError> {
        let item = self.get_mut(code)?;
        item.set_status(status);
        info!(code, status = %status, "Status updated");
        Ok(item)
    }

    fn get_mut(&mut self, code: &str) -> Result<&mut T, CatalogError> {
        self.items
            .get_mut(code)
            .ok_or_else(|| CatalogError::NotFound(code.to_string()))
    }
}

impl Catalog<Product> {
    pub fn add_product(&mut self, new: NewProduct) -> Result<&Product, CatalogError> {
        let name = validate_name(&new.name)?;
        validate_price(new.price)?;
        let code = self.resolve_code(&new.code, new.category.code_prefix())?;

        info!(code = %code, category = %new.category, "Adding product");
        self.insert(Product::new(code, name, new.category, new.price))
    }

    /// Available products, filtered and sorted for display.
    pub fn browse(&self, query: &ProductQuery) -> Vec<&Product> {
        let mut products: Vec<&Product> = self
            .available()
            .filter(|product| query.category.map_or(true, |category| product.category == category))
            .collect();

        match query.sort {
            ProductSort::Code => {}
            ProductSort::PriceAscending => products.sort_by_key(|product| product.price),
            ProductSort::RatingDescending => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        }
        products
    }

    pub fn rate(&mut self, code: &str, rating: f64) -> Result<&Product, CatalogError> {
        let product = self.get_mut(code)?;
        product.add_rating(rating)?;
        info!(code, rating, average = product.rating, "Product rated");
        Ok(product)
    }
}

impl Catalog<Addon> {
    pub fn add_addon(&mut self, new: NewAddon) -> Result<&Addon, CatalogError> {
        let name = validate_name(&new.name)?;
        validate_price(new.price)?;
        let code = self.resolve_code(&new.code, ADDON_CODE_PREFIX)?;

        info!(code = %code, "Adding add-on");
        self.insert(Addon::new(code, name, new.price))
    }
}

impl<T: CatalogItem> Default for Catalog<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Trimmed, upper-cased code as typed by the operator
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Returns the trimmed name if it is usable as a record name.
pub fn validate_name(name: &str) -> Result<String, CatalogError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CatalogError::EmptyName);
    }
    if name.contains(FORBIDDEN_CHARS) {
        return Err(CatalogError::InvalidName(name.to_string()));
    }
    Ok(name.to_string())
}

pub fn validate_price(price: Money) -> Result<(), CatalogError> {
    if !price.is_positive() {
        return Err(CatalogError::NonPositivePrice(price));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Code '{0}' not found")]
    NotFound(String),

    #[error("Item '{0}' is not available")]
    NotAvailable(String),

    #[error("Code '{0}' already exists")]
    DuplicateCode(String),

    #[error("Invalid code: '{0}'")]
    InvalidCode(String),

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name may not contain commas or line breaks: '{0}'")]
    InvalidName(String),

    #[error("Price must be positive (got ${0})")]
    NonPositivePrice(Money),

    #[error("Invalid status '{0}' (expected Available or Unavailable)")]
    InvalidStatus(String),

    #[error("Unknown category '{0}'")]
    InvalidCategory(String),

    #[error("Rating must be between 1 and 5 (got {0})")]
    InvalidRating(f64),
}
