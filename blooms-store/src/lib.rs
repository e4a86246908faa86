pub mod app_config;
pub mod flat_file;
pub mod product_repo;
pub mod addon_repo;
pub mod order_repo;

pub use app_config::Config;
pub use flat_file::{FlatFile, LineDecoder, LineEncoder};
pub use product_repo::{ProductCodec, ProductFile};
pub use addon_repo::{AddonCodec, AddonFile};
pub use order_repo::{OrderLog, OrderLogCodec};
