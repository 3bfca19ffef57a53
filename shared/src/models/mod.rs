//! Domain models for the Price Tracker platform

mod category;
mod import;
mod location;
mod price_mapping;
mod sku;
mod vendor;

pub use category::*;
pub use import::*;
pub use location::*;
pub use price_mapping::*;
pub use sku::*;
pub use vendor::*;
