//! CLI command implementations.

mod add;
mod check;
mod search;

pub use add::{add, default_alias};
pub use check::check;
pub use search::search;
