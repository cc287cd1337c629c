//! Cart storage and persistence.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use crate::cart::types::PackageItem;
use crate::observability::metrics;

/// Thread-safe cart collection, keyed by builder session.
///
/// Optionally persisted to a JSON file so committed packages survive a
/// restart. Persistence failures are logged and never fail the checkout.
#[derive(Clone, Default)]
pub struct CartStore {
    inner: Arc<DashMap<Uuid, Vec<PackageItem>>>,
    persistence_path: Option<String>,
}

impl CartStore {
    /// Create a new empty store.
    pub fn new(persistence_path: Option<String>) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            persistence_path,
        }
    }

    /// Load from the persistence file if it exists.
    pub fn load_from_file(path: &str) -> std::io::Result<Self> {
        let store = Self::new(Some(path.to_string()));
        if Path::new(path).exists() {
            let file = File::open(path)?;
            let reader = BufReader::new(file);
            let map: HashMap<Uuid, Vec<PackageItem>> = serde_json::from_reader(reader)?;

            for (k, v) in map {
                store.inner.insert(k, v);
            }
            tracing::info!(
                carts = store.inner.len(),
                "Loaded carts from persistence file"
            );
        }
        Ok(store)
    }

    fn save(&self) {
        let Some(path) = &self.persistence_path else {
            return;
        };
        let snapshot: HashMap<Uuid, Vec<PackageItem>> = self
            .inner
            .iter()
            .map(|r| (*r.key(), r.value().clone()))
            .collect();

        let result = (|| -> std::io::Result<()> {
            let file = File::create(path)?;
            serde_json::to_writer(BufWriter::new(file), &snapshot)?;
            Ok(())
        })();
        if let Err(e) = result {
            tracing::error!(path = %path, error = %e, "Failed to persist carts");
        }
    }

    /// Append a committed package to a session's cart.
    pub fn add(&self, session_id: Uuid, item: PackageItem) {
        metrics::record_checkout(item.price);
        self.inner.entry(session_id).or_default().push(item);
        self.save();
    }

    /// Contents of one session's cart.
    pub fn items(&self, session_id: Uuid) -> Vec<PackageItem> {
        self.inner
            .get(&session_id)
            .map(|r| r.value().clone())
            .unwrap_or_default()
    }

    /// Total packages committed and revenue across all carts.
    pub fn summary(&self) -> (usize, f64) {
        let mut packages = 0;
        let mut revenue = 0.0;
        for entry in self.inner.iter() {
            packages += entry.value().len();
            revenue += entry.value().iter().map(|i| i.price).sum::<f64>();
        }
        (packages, revenue)
    }
}
