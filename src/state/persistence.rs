use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, seed};
use crate::error::Result;
use crate::models::{Order, Product, UserProfile};

/// Device storage key for the weekly plan. Bumping the version suffix
/// orphans older stored shapes.
pub const PLAN_KEY: &str = "mart_weekly_plan_v5";

/// Device storage key for the weekly routine on/off flag.
pub const ROUTINE_KEY: &str = "mart_weekly_routine";

/// Device storage key for the cart.
pub const CART_KEY: &str = "mart_cart_items_v2";

/// The mock document database: users, products, and orders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MartDatabase {
    #[serde(default)]
    pub users: Vec<UserProfile>,

    #[serde(default)]
    pub products: Vec<Product>,

    #[serde(default)]
    pub orders: Vec<Order>,
}

/// Load the database from a JSON file.
///
/// Products with a repeated id collapse to the last occurrence. Products
/// with negative prices or nutrients are dropped.
pub fn load_database<P: AsRef<Path>>(path: P) -> Result<MartDatabase> {
    let content = fs::read_to_string(path.as_ref())?;
    let mut db: MartDatabase = serde_json::from_str(&content)?;

    let before = db.products.len();
    db.products.retain(|p| {
        let ok = p.is_valid();
        if !ok {
            warn!("dropping invalid product {}", p.debug_string());
        }
        ok
    });
    db.products = Catalog::new(db.products).into_products();

    debug!(
        "loaded {} users, {} of {} products, {} orders from {}",
        db.users.len(),
        db.products.len(),
        before,
        db.orders.len(),
        path.as_ref().display()
    );
    Ok(db)
}

/// Load the database, or the built-in seed when the file does not exist yet.
pub fn load_or_seed<P: AsRef<Path>>(path: P) -> Result<MartDatabase> {
    if path.as_ref().exists() {
        load_database(path)
    } else {
        info!(
            "{} not found, using built-in seed data",
            path.as_ref().display()
        );
        Ok(seed::default_database())
    }
}

/// Save the database as pretty JSON.
pub fn save_database<P: AsRef<Path>>(path: P, db: &MartDatabase) -> Result<()> {
    let json = serde_json::to_string_pretty(db)?;
    fs::write(path.as_ref(), json)?;
    debug!("saved database to {}", path.as_ref().display());
    Ok(())
}

/// String key-value store persisted as one JSON object, standing in for
/// browser local storage.
#[derive(Debug, Clone, Default)]
pub struct KvStore {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl KvStore {
    /// A store that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a store file. A missing or unreadable-as-JSON file starts empty.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("{} is not a valid store ({}), starting empty", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: Some(path),
            entries,
        })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(key.to_string(), value.into());
    }

    /// Write the store back to its file. No-op for in-memory stores.
    pub fn flush(&self) -> Result<()> {
        if let Some(path) = &self.path {
            let json = serde_json::to_string_pretty(&self.entries)?;
            fs::write(path, json)?;
            debug!("flushed {} keys to {}", self.entries.len(), path.display());
        }
        Ok(())
    }
}

/// Read the weekly routine flag. Anything but `"true"` is off.
pub fn load_routine(store: &KvStore) -> bool {
    store.get(ROUTINE_KEY) == Some("true")
}

pub fn save_routine(store: &mut KvStore, enabled: bool) {
    store.set(ROUTINE_KEY, enabled.to_string());
}
