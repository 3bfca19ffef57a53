//! Display-name resolution for price mapping locations
//!
//! A mapping's `location_id` normally points at a price location. Older
//! rows point at a full location instead. Resolvers are tried in a fixed
//! order and the first name wins; lookups never fail the caller.

use async_trait::async_trait;
use uuid::Uuid;

use crate::store::LocationDirectory;

/// Label used when no resolver knows the location
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// One way of turning a location id into a display name
#[async_trait]
pub trait LocationResolver: Send + Sync {
    /// Short name used in logs
    fn source(&self) -> &'static str;

    /// Display name for `id`, or `None` when this source has nothing.
    /// Store errors are swallowed and reported as `None`.
    async fn resolve_name(&self, id: Uuid) -> Option<String>;
}

/// Looks the id up in the price location collection
pub struct PriceLocationResolver<D> {
    directory: D,
}

impl<D> PriceLocationResolver<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl<D: LocationDirectory> LocationResolver for PriceLocationResolver<D> {
    fn source(&self) -> &'static str {
        "price_location"
    }

    async fn resolve_name(&self, id: Uuid) -> Option<String> {
        match self.directory.price_location_name(id).await {
            Ok(name) => name.filter(|n| !n.trim().is_empty()),
            Err(e) => {
                tracing::warn!(location_id = %id, error = %e, "Price location lookup failed");
                None
            }
        }
    }
}

/// Looks the id up in the full location collection and builds a label
/// from whatever fields the record has
pub struct LegacyLocationResolver<D> {
    directory: D,
}

impl<D> LegacyLocationResolver<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl<D: LocationDirectory> LocationResolver for LegacyLocationResolver<D> {
    fn source(&self) -> &'static str {
        "legacy_location"
    }

    async fn resolve_name(&self, id: Uuid) -> Option<String> {
        match self.directory.find_location(id).await {
            Ok(location) => location.and_then(|l| l.display_name()),
            Err(e) => {
                tracing::warn!(location_id = %id, error = %e, "Legacy location lookup failed");
                None
            }
        }
    }
}

/// Ordered list of resolvers with a fixed default label
pub struct LocationResolverChain {
    resolvers: Vec<Box<dyn LocationResolver>>,
}

impl LocationResolverChain {
    pub fn new(resolvers: Vec<Box<dyn LocationResolver>>) -> Self {
        Self { resolvers }
    }

    /// Price locations first, then legacy full locations
    pub fn standard<D>(directory: D) -> Self
    where
        D: LocationDirectory + Clone + 'static,
    {
        Self::new(vec![
            Box::new(PriceLocationResolver::new(directory.clone())),
            Box::new(LegacyLocationResolver::new(directory)),
        ])
    }

    /// Resolve a display name, falling back to [`UNKNOWN_LOCATION`]
    pub async fn resolve(&self, id: Uuid) -> String {
        for (position, resolver) in self.resolvers.iter().enumerate() {
            if let Some(name) = resolver.resolve_name(id).await {
                if position > 0 {
                    tracing::debug!(location_id = %id, source = resolver.source(), "Resolved location via fallback");
                }
                return name;
            }
        }

        tracing::debug!(location_id = %id, "Location could not be resolved");
        UNKNOWN_LOCATION.to_string()
    }
}
