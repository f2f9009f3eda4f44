pub mod date;
pub mod fuzzy;

pub use date::*;
pub use fuzzy::*;
