//! Storage seams used by the pricing core
//!
//! The upsert engine, the bulk importer and the location resolvers only see
//! these traits. [`PgStore`] backs them with PostgreSQL; the catalog CRUD
//! services talk to the pool directly.

use async_trait::async_trait;
use shared::{Location, PriceMappingWrite, Sku, UpsertOutcome};
use uuid::Uuid;

use crate::error::AppResult;

mod postgres;

pub use postgres::PgStore;

/// Lookups the pricing core needs from the catalog
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn find_sku(&self, id: Uuid) -> AppResult<Option<Sku>>;

    async fn vendor_exists(&self, id: Uuid) -> AppResult<bool>;

    async fn price_location_exists(&self, id: Uuid) -> AppResult<bool>;
}

/// Writes to the price mapping collection
#[async_trait]
pub trait PriceMappingRepository: Send + Sync {
    /// Insert the mapping or overwrite the one holding the same key, as a
    /// single atomic operation
    async fn upsert_price_mapping(&self, write: &PriceMappingWrite) -> AppResult<UpsertOutcome>;
}

/// Both location collections, as seen by the read path
#[async_trait]
pub trait LocationDirectory: Send + Sync {
    async fn price_location_name(&self, id: Uuid) -> AppResult<Option<String>>;

    async fn find_location(&self, id: Uuid) -> AppResult<Option<Location>>;
}
