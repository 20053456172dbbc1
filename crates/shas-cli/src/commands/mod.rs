//! Command implementations.

mod extract;
mod rules;
mod summary;

pub use self::extract::execute_extract;
pub use self::rules::execute_rules;
pub use self::summary::execute_summary;
