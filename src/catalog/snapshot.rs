use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use utoipa::ToSchema;

use crate::orbit::OrbitalState;

/// Immutable set of element sets keyed by NORAD catalog number.
#[derive(Debug)]
pub struct Catalog {
    satellites: BTreeMap<u64, Arc<OrbitalState>>,
    loaded_at: DateTime<Utc>,
    source: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SatelliteSummary {
    pub id: String,
    pub name: String,
    pub catalog_number: u64,
}

impl Catalog {
    pub fn new(source: impl Into<String>, states: impl IntoIterator<Item = OrbitalState>) -> Self {
        let mut satellites = BTreeMap::new();
        for state in states {
            if let Some(previous) = satellites.insert(state.catalog_id(), Arc::new(state)) {
                log::debug!(
                    "Duplicate element set for NORAD {}, keeping the later one",
                    previous.catalog_id()
                );
            }
        }
        Self {
            satellites,
            loaded_at: Utc::now(),
            source: source.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new("empty", std::iter::empty())
    }

    pub fn len(&self) -> usize {
        self.satellites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.satellites.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn get(&self, catalog_id: u64) -> Option<&Arc<OrbitalState>> {
        self.satellites.get(&catalog_id)
    }

    /// Case-insensitive display name lookup. Names are not unique; the
    /// lowest catalog number wins.
    pub fn find_by_name(&self, name: &str) -> Option<&Arc<OrbitalState>> {
        let wanted = name.trim();
        self.satellites
            .values()
            .find(|s| s.name().eq_ignore_ascii_case(wanted))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<OrbitalState>> {
        self.satellites.values()
    }

    pub fn summaries(&self, limit: usize) -> Vec<SatelliteSummary> {
        self.iter()
            .take(limit)
            .map(|s| SatelliteSummary {
                id: s.catalog_id().to_string(),
                name: s.name().to_string(),
                catalog_number: s.catalog_id(),
            })
            .collect()
    }
}

/// Publishes catalog snapshots. Readers get a whole [`Catalog`] and keep it
/// for as long as they need; a refresh swaps in a new one without touching
/// snapshots already handed out.
#[derive(Debug)]
pub struct CatalogStore {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    pub fn snapshot(&self) -> Arc<Catalog> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn publish(&self, catalog: Catalog) {
        let catalog = Arc::new(catalog);
        match self.current.write() {
            Ok(mut guard) => *guard = catalog,
            Err(poisoned) => *poisoned.into_inner() = catalog,
        }
    }
}
