//! Location name resolution tests
//!
//! The chain prefers price locations, falls back to legacy full locations
//! and ends at "Unknown Location". Store errors never reach the caller.

mod common;

use async_trait::async_trait;
use common::MemoryStore;
use price_tracker::services::location_resolver::{
    LegacyLocationResolver, PriceLocationResolver,
};
use price_tracker::services::{LocationResolver, LocationResolverChain, UNKNOWN_LOCATION};
use uuid::Uuid;

#[tokio::test]
async fn test_price_location_name_wins() {
    let store = MemoryStore::new();
    let id = store.add_price_location("Central Market");

    let chain = LocationResolverChain::standard(store);
    assert_eq!(chain.resolve(id).await, "Central Market");
}

#[tokio::test]
async fn test_falls_back_to_legacy_location_name() {
    let store = MemoryStore::new();
    let id = store.add_location(Some("Old Town Branch"), Some("Ribeira"), Some("Porto"), None);

    let chain = LocationResolverChain::standard(store);
    assert_eq!(chain.resolve(id).await, "Old Town Branch");
}

#[tokio::test]
async fn test_legacy_location_without_name_joins_fields() {
    let store = MemoryStore::new();
    let id = store.add_location(None, Some("Ribeira"), Some("Porto"), Some("Norte"));

    let chain = LocationResolverChain::standard(store);
    assert_eq!(chain.resolve(id).await, "Ribeira, Porto, Norte");
}

#[tokio::test]
async fn test_legacy_location_with_nothing_is_unknown() {
    let store = MemoryStore::new();
    let id = store.add_location(None, None, None, None);

    let chain = LocationResolverChain::standard(store);
    assert_eq!(chain.resolve(id).await, UNKNOWN_LOCATION);
}

#[tokio::test]
async fn test_unknown_id() {
    let chain = LocationResolverChain::standard(MemoryStore::new());
    assert_eq!(chain.resolve(Uuid::new_v4()).await, "Unknown Location");
}

#[tokio::test]
async fn test_store_errors_are_swallowed() {
    let store = MemoryStore::new();
    let id = store.add_price_location("Central Market");
    store.set_failing(true);

    assert_eq!(PriceLocationResolver::new(store.clone()).resolve_name(id).await, None);
    assert_eq!(LegacyLocationResolver::new(store.clone()).resolve_name(id).await, None);

    let chain = LocationResolverChain::standard(store);
    assert_eq!(chain.resolve(id).await, UNKNOWN_LOCATION);
}

/// Resolver returning a fixed name for any id
struct Fixed(&'static str);

#[async_trait]
impl LocationResolver for Fixed {
    fn source(&self) -> &'static str {
        "fixed"
    }

    async fn resolve_name(&self, _id: Uuid) -> Option<String> {
        Some(self.0.to_string())
    }
}

/// Resolver that never knows anything
struct Empty;

#[async_trait]
impl LocationResolver for Empty {
    fn source(&self) -> &'static str {
        "empty"
    }

    async fn resolve_name(&self, _id: Uuid) -> Option<String> {
        None
    }
}

#[tokio::test]
async fn test_chain_order_is_respected() {
    let chain = LocationResolverChain::new(vec![
        Box::new(Empty),
        Box::new(Fixed("second")),
        Box::new(Fixed("third")),
    ]);
    assert_eq!(chain.resolve(Uuid::new_v4()).await, "second");
}

#[tokio::test]
async fn test_empty_chain_is_unknown() {
    let chain = LocationResolverChain::new(Vec::new());
    assert_eq!(chain.resolve(Uuid::new_v4()).await, UNKNOWN_LOCATION);
}
