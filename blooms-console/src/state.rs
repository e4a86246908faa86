use chrono::{NaiveDate, NaiveDateTime};
use std::path::Path;
use tracing::{info, warn};
use blooms_catalog::{Addon, Catalog, PricingEngine, Product};
use blooms_core::{Clock, CoreResult, LoadReport, RecordSink, RecordSource};
use blooms_order::{Order, OrderManager};
use blooms_store::{AddonFile, Config, OrderLog, ProductFile};

/// Everything the menus operate on: the catalogs, the session's orders and where
/// each of them is written back to.
pub struct Shop {
    pub products: Catalog<Product>,
    pub addons: Catalog<Addon>,
    pub orders: OrderManager,
    product_sink: Box<dyn RecordSink<Product>>,
    addon_sink: Box<dyn RecordSink<Addon>>,
    order_sink: Box<dyn RecordSink<Order>>,
    clock: Box<dyn Clock>,
}

impl Shop {
    pub fn new(
        products: Catalog<Product>,
        addons: Catalog<Addon>,
        orders: OrderManager,
        product_sink: Box<dyn RecordSink<Product>>,
        addon_sink: Box<dyn RecordSink<Addon>>,
        order_sink: Box<dyn RecordSink<Order>>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            products,
            addons,
            orders,
            product_sink,
            addon_sink,
            order_sink,
            clock,
        }
    }

    /// Load catalogs from the configured data directory. Never fails: problems are
    /// returned as operator notices and the affected catalog starts empty.
    pub fn open(config: &Config, clock: Box<dyn Clock>) -> (Self, Vec<String>) {
        let mut notices = Vec::new();

        let product_file = ProductFile::open(config.storage.products_path());
        let products = load_catalog(product_file.load(), product_file.path(), "products", &mut notices);

        let addon_file = AddonFile::open(config.storage.addons_path());
        let (addon_result, seed_error) = match addon_file.load_or_seed() {
            Ok((report, seed_error)) => (Ok(report), seed_error),
            Err(e) => (Err(e), None),
        };
        let addons = load_catalog(addon_result, addon_file.path(), "add-ons", &mut notices);
        if let Some(e) = seed_error {
            notices.push(format!("⚠ Error saving add-ons: {e}"));
        }

        let orders = OrderManager::new(
            config.orders.clone(),
            PricingEngine::new(config.pricing.clone()),
        );
        let order_log = OrderLog::open(config.storage.orders_path());

        let shop = Self::new(
            products,
            addons,
            orders,
            Box::new(product_file),
            Box::new(addon_file),
            Box::new(order_log),
            clock,
        );
        (shop, notices)
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn save_products(&self) -> CoreResult<()> {
        let products: Vec<&Product> = self.products.iter().collect();
        self.product_sink.save(&products)
    }

    pub fn save_addons(&self) -> CoreResult<()> {
        let addons: Vec<&Addon> = self.addons.iter().collect();
        self.addon_sink.save(&addons)
    }

    pub fn save_orders(&self) -> CoreResult<()> {
        let orders: Vec<&Order> = self.orders.orders().collect();
        self.order_sink.save(&orders)
    }
}

fn load_catalog<T>(
    result: CoreResult<LoadReport<T>>,
    path: &Path,
    kind: &str,
    notices: &mut Vec<String>,
) -> Catalog<T>
where
    T: blooms_catalog::CatalogItem,
{
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            warn!(error = %e, kind, "Failed to load catalog");
            notices.push(format!("⚠ Error loading {kind}: {e}"));
            return Catalog::new();
        }
    };

    if report.missing && report.records.is_empty() {
        notices.push(format!("⚠ {file_name} not found. Starting with empty {kind}."));
    } else if report.missing {
        notices.push(format!("⚠ {file_name} not found. Created default {kind}."));
    }
    if report.skipped > 0 {
        notices.push(format!("⚠ Skipped {} malformed line(s) in {file_name}", report.skipped));
    }

    let catalog = Catalog::from_records(report.records);
    if !report.missing || !catalog.is_empty() {
        notices.push(format!("✓ Loaded {} {kind} successfully", catalog.len()));
    }
    info!(kind, loaded = catalog.len(), skipped = report.skipped, "Catalog loaded");
    catalog
}
