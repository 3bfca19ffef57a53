//! HTTP handlers for the Price Tracker API

mod category;
mod external;
mod health;
mod import;
mod location;
mod price_mapping;
mod sku;
mod vendor;

pub use category::*;
pub use external::*;
pub use health::*;
pub use import::*;
pub use location::*;
pub use price_mapping::*;
pub use sku::*;
pub use vendor::*;
