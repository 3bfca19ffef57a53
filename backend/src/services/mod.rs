//! Business logic services for the Price Tracker platform

pub mod category;
pub mod import;
pub mod location;
pub mod location_resolver;
pub mod price_mapping;
pub mod pricing;
pub mod sku;
pub mod vendor;

pub use category::CategoryService;
pub use import::ImportService;
pub use location::LocationService;
pub use location_resolver::{LocationResolver, LocationResolverChain, UNKNOWN_LOCATION};
pub use price_mapping::PriceMappingService;
pub use pricing::{PriceDraft, PricingService};
pub use sku::SkuService;
pub use vendor::VendorService;
