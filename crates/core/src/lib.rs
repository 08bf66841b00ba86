pub mod catalog;
pub mod config;
pub mod docid;
pub mod error;
pub mod logging;
pub mod store;
pub mod symbols;

pub use catalog::{CatalogOptions, document_table};
pub use config::{LoggingConfig, StoreConfig};
pub use error::{DocIdError, MemberdocError, Result, StoreError};
pub use store::DocumentationStore;
pub use symbols::JsonSymbolTable;
