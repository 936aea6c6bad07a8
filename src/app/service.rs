//! In-memory item store, every method instrumented as a service call.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};

use crate::interceptor::{arg, CallSite, RequestLogger};

const FIND: CallSite = CallSite::service("find");
const CREATE: CallSite = CallSite::service("create");
const DELETE: CallSite = CallSite::service("delete");
const LIST: CallSite = CallSite::service("list").timed();

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
}

crate::observed_value!(Item);

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemError {
    #[error("item {0} not found")]
    NotFound(u64),

    #[error("item name must not be empty")]
    EmptyName,
}

pub struct ItemService {
    items: RwLock<BTreeMap<u64, Item>>,
    next_id: AtomicU64,
    logger: Arc<ArcSwap<RequestLogger>>,
}

impl ItemService {
    pub fn new(logger: Arc<ArcSwap<RequestLogger>>) -> Self {
        Self {
            items: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
            logger,
        }
    }

    pub fn find(&self, id: u64) -> Result<Option<Item>, Infallible> {
        self.logger.load().intercept_blocking(&FIND, &[arg(&id)], || {
            let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
            Ok(items.get(&id).cloned())
        })
    }

    pub fn create(&self, new_item: &NewItem) -> Result<Item, ItemError> {
        self.logger.load().intercept_blocking(&CREATE, &[arg(new_item)], || {
            if new_item.name.trim().is_empty() {
                return Err(ItemError::EmptyName);
            }
            let item = Item {
                id: self.next_id.fetch_add(1, Ordering::Relaxed),
                name: new_item.name.clone(),
            };
            self.items
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(item.id, item.clone());
            Ok(item)
        })
    }

    pub fn delete(&self, id: u64) -> Result<(), ItemError> {
        self.logger.load().intercept_blocking(&DELETE, &[arg(&id)], || {
            self.items
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&id)
                .map(|_| ())
                .ok_or(ItemError::NotFound(id))
        })
    }

    pub fn list(&self) -> Result<Vec<Item>, Infallible> {
        self.logger.load().intercept_blocking(&LIST, &[], || {
            let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
            Ok(items.values().cloned().collect())
        })
    }
}
