//! Infrastructure layer: persistence, configuration, and the application
//! service that ties the domain crates to storage.

pub mod config;
pub mod shop_service;
pub mod store;

pub use config::{ServerConfig, StoreConfig};
pub use shop_service::{ServiceError, ServiceResult, ShopService};
