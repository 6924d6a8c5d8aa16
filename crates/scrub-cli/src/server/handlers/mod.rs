//! API request handlers.

mod charts;
mod clean;
mod data;

pub use charts::*;
pub use clean::*;
pub use data::*;
