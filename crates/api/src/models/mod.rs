pub mod descriptor;
pub mod member;
pub mod symbol;

pub use descriptor::*;
pub use member::*;
pub use symbol::*;
