//! In-memory store and fixtures shared by the integration tests

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use price_tracker::error::{AppError, AppResult};
use price_tracker::import::{CellValue, SheetRow};
use price_tracker::store::{CatalogRepository, LocationDirectory, PriceMappingRepository};
use rust_decimal::Decimal;
use shared::{
    Location, PriceKey, PriceMappingWrite, Sku, UnitKind, UpsertAction, UpsertOutcome,
};
use uuid::Uuid;

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// A stored mapping with its id
#[derive(Debug, Clone, PartialEq)]
pub struct StoredMapping {
    pub id: Uuid,
    pub write: PriceMappingWrite,
}

#[derive(Default)]
struct MemoryState {
    skus: HashMap<Uuid, Sku>,
    vendors: HashSet<Uuid>,
    price_locations: HashMap<Uuid, String>,
    locations: HashMap<Uuid, Location>,
    mappings: HashMap<PriceKey, StoredMapping>,
    writes: usize,
    failing: bool,
}

/// Store that keeps everything in a map; the upsert runs under one lock so
/// it is atomic per key like the SQL statement
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap()
    }

    pub fn add_sku(&self, unit_value: &str) -> Uuid {
        let sku = Sku {
            id: Uuid::new_v4(),
            name: format!("SKU {}", unit_value),
            brand: None,
            unit: UnitKind::Gram,
            unit_value: unit_value.to_string(),
            category_id: None,
            buying_price: dec("10"),
            buying_vat: Decimal::ZERO,
            buying_price_without_vat: dec("10"),
            selling_price: dec("12"),
            kvi_label: None,
            image_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let id = sku.id;
        self.state().skus.insert(id, sku);
        id
    }

    pub fn add_vendor(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.state().vendors.insert(id);
        id
    }

    pub fn add_price_location(&self, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.state().price_locations.insert(id, name.to_string());
        id
    }

    pub fn add_location(
        &self,
        name: Option<&str>,
        district: Option<&str>,
        city: Option<&str>,
        region: Option<&str>,
    ) -> Uuid {
        let location = Location {
            id: Uuid::new_v4(),
            name: name.map(String::from),
            region: region.map(String::from),
            city: city.map(String::from),
            district: district.map(String::from),
            population_tier: None,
            income_band: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let id = location.id;
        self.state().locations.insert(id, location);
        id
    }

    /// Make every subsequent store call fail
    pub fn set_failing(&self, failing: bool) {
        self.state().failing = failing;
    }

    pub fn mapping(&self, key: &PriceKey) -> Option<StoredMapping> {
        self.state().mappings.get(key).cloned()
    }

    pub fn mapping_count(&self) -> usize {
        self.state().mappings.len()
    }

    pub fn write_count(&self) -> usize {
        self.state().writes
    }

    fn check(&self) -> AppResult<()> {
        if self.state().failing {
            Err(AppError::Internal("store unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CatalogRepository for MemoryStore {
    async fn find_sku(&self, id: Uuid) -> AppResult<Option<Sku>> {
        self.check()?;
        Ok(self.state().skus.get(&id).cloned())
    }

    async fn vendor_exists(&self, id: Uuid) -> AppResult<bool> {
        self.check()?;
        Ok(self.state().vendors.contains(&id))
    }

    async fn price_location_exists(&self, id: Uuid) -> AppResult<bool> {
        self.check()?;
        Ok(self.state().price_locations.contains_key(&id))
    }
}

#[async_trait]
impl PriceMappingRepository for MemoryStore {
    async fn upsert_price_mapping(&self, write: &PriceMappingWrite) -> AppResult<UpsertOutcome> {
        self.check()?;
        let mut state = self.state();
        state.writes += 1;

        let outcome = match state.mappings.get_mut(&write.key) {
            Some(existing) => {
                existing.write = write.clone();
                UpsertOutcome {
                    id: existing.id,
                    action: UpsertAction::Updated,
                }
            }
            None => {
                let id = Uuid::new_v4();
                state.mappings.insert(
                    write.key,
                    StoredMapping {
                        id,
                        write: write.clone(),
                    },
                );
                UpsertOutcome {
                    id,
                    action: UpsertAction::Created,
                }
            }
        };

        Ok(outcome)
    }
}

#[async_trait]
impl LocationDirectory for MemoryStore {
    async fn price_location_name(&self, id: Uuid) -> AppResult<Option<String>> {
        self.check()?;
        Ok(self.state().price_locations.get(&id).cloned())
    }

    async fn find_location(&self, id: Uuid) -> AppResult<Option<Location>> {
        self.check()?;
        Ok(self.state().locations.get(&id).cloned())
    }
}

/// Catalog with one SKU ("500 g"), one vendor and one price location
pub struct Fixture {
    pub store: MemoryStore,
    pub sku_id: Uuid,
    pub vendor_id: Uuid,
    pub location_id: Uuid,
}

impl Fixture {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let sku_id = store.add_sku("500 g");
        let vendor_id = store.add_vendor();
        let location_id = store.add_price_location("Central Market");
        Self {
            store,
            sku_id,
            vendor_id,
            location_id,
        }
    }

    pub fn key(&self) -> PriceKey {
        PriceKey {
            sku_id: self.sku_id,
            vendor_id: self.vendor_id,
            location_id: self.location_id,
        }
    }
}

/// Text cell
pub fn text(value: impl ToString) -> CellValue {
    CellValue::Text(value.to_string())
}

/// Build a sheet row from (column, cell) pairs
pub fn sheet_row(number: usize, cells: Vec<(&str, CellValue)>) -> SheetRow {
    SheetRow::new(
        number,
        cells.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
    )
}

/// A complete row for the fixture's triple
pub fn price_row(fixture: &Fixture, number: usize, price: &str) -> SheetRow {
    sheet_row(
        number,
        vec![
            ("sku_id", text(fixture.sku_id)),
            ("vendor_id", text(fixture.vendor_id)),
            ("location_id", text(fixture.location_id)),
            ("price", text(price)),
        ],
    )
}
