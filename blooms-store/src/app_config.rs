use serde::Deserialize;
use std::path::{Path, PathBuf};
use blooms_catalog::PricingConfig;
use blooms_order::OrderSettings;

/// Config file looked up in the working directory when none is given explicitly.
const DEFAULT_CONFIG_FILE: &str = "blooms";
const ENV_PREFIX: &str = "BLOOMS";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub storage: StorageConfig,
    pub pricing: PricingConfig,
    pub orders: OrderSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub products_file: String,
    pub addons_file: String,
    pub orders_file: String,
}

impl StorageConfig {
    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join(&self.products_file)
    }

    pub fn addons_path(&self) -> PathBuf {
        self.data_dir.join(&self.addons_file)
    }

    pub fn orders_path(&self) -> PathBuf {
        self.data_dir.join(&self.orders_file)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log directory, relative to the data directory unless absolute
    pub directory: PathBuf,
    pub file_name: String,
    /// `EnvFilter` directives used when `RUST_LOG` is unset
    pub filter: String,
}

impl Config {
    /// Layered load: built-in defaults, then `blooms.toml` (or the given file, which
    /// must exist), then `BLOOMS__SECTION__KEY` environment variables.
    pub fn load(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        let pricing = PricingConfig::default();
        let orders = OrderSettings::default();

        let file_source = match file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let s = config::Config::builder()
            .set_default("storage.data_dir", ".")?
            .set_default("storage.products_file", "Products.txt")?
            .set_default("storage.addons_file", "Addons.txt")?
            .set_default("storage.orders_file", "Orders.txt")?
            .set_default("pricing.delivery_base_fee", pricing.delivery_base_fee.to_string())?
            .set_default("pricing.weekend_surcharge", pricing.weekend_surcharge.to_string())?
            .set_default("pricing.same_day_fee", pricing.same_day_fee.to_string())?
            .set_default("pricing.date_format", pricing.date_format)?
            .set_default("orders.id_prefix", orders.id_prefix)?
            .set_default("orders.message_limit", orders.message_limit as u64)?
            .set_default("logging.directory", "logs")?
            .set_default("logging.file_name", "blooms.log")?
            .set_default("logging.filter", "info")?
            .add_source(file_source)
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Replace the data directory, e.g. from the command line.
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.storage.data_dir = data_dir.into();
        self
    }

    pub fn log_dir(&self) -> PathBuf {
        self.storage.data_dir.join(&self.logging.directory)
    }
}
