pub mod product;
pub mod addon;
pub mod catalog;
pub mod pricing;

pub use product::{Availability, Category, NewProduct, Product};
pub use addon::{Addon, NewAddon};
pub use catalog::{Catalog, CatalogError, CatalogItem, CodeChoice, ProductQuery, ProductSort};
pub use pricing::{DeliveryCharge, DeliveryRequest, PriceBreakdown, PricingConfig, PricingEngine};
