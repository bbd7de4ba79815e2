pub mod audit;
pub mod catalog;
pub mod config;
pub mod error;
pub mod types;

pub use catalog::Catalog;
pub use error::{CatalogError, CatalogResult};
