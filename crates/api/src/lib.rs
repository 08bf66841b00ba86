pub mod models;
pub mod table;

// Re-export commonly used types
pub use models::*;
pub use table::SymbolTable;
