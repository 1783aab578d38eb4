//! In-memory item CRUD, the request-handling half of a small demo API.
//!
//! Storage sits behind [`ItemStore`] (get, list, put, delete by id) so the
//! handlers in [`ItemService`] never touch a concrete map. [`InMemoryItemStore`]
//! is the only implementation; a persistent one can replace it without
//! changing the service.
//!
//! | Route | Method | Errors |
//! |---|---|---|
//! | `GET /` | [`ItemService::root`] | |
//! | `GET /items` | [`ItemService::list_items`] | |
//! | `GET /items/{id}` | [`ItemService::read_item`] | 404 `Item not found` |
//! | `POST /items` | [`ItemService::create_item`] | 400 `Item already exists` |
//! | `PUT /items/{id}` | [`ItemService::update_item`] | 400 `ID mismatch`, 404 |
//! | `DELETE /items/{id}` | [`ItemService::delete_item`] | 404 |
//!
//! No server is bundled; the service returns plain values and [`ItemError`]s
//! carrying the HTTP status a server would answer with.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// `{"message": "..."}` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    #[error("Item not found")]
    NotFound,
    #[error("Item already exists")]
    AlreadyExists,
    #[error("ID mismatch")]
    IdMismatch,
}

/// `{"detail": "..."}` error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ItemError {
    pub fn status_code(&self) -> u16 {
        match self {
            ItemError::NotFound => 404,
            ItemError::AlreadyExists | ItemError::IdMismatch => 400,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            detail: self.to_string(),
        }
    }
}

/// Keyed item storage.
pub trait ItemStore {
    fn get(&self, id: i64) -> Option<Item>;
    fn list(&self) -> Vec<Item>;
    /// Insert or replace; returns the previous item with that id.
    fn put(&mut self, item: Item) -> Option<Item>;
    fn delete(&mut self, id: i64) -> Option<Item>;
}

/// Process-local store. Lists in ascending id order.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    items: BTreeMap<i64, Item>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ItemStore for InMemoryItemStore {
    fn get(&self, id: i64) -> Option<Item> {
        self.items.get(&id).cloned()
    }

    fn list(&self) -> Vec<Item> {
        self.items.values().cloned().collect()
    }

    fn put(&mut self, item: Item) -> Option<Item> {
        self.items.insert(item.id, item)
    }

    fn delete(&mut self, id: i64) -> Option<Item> {
        self.items.remove(&id)
    }
}

pub struct ItemService<S: ItemStore = InMemoryItemStore> {
    store: S,
}

impl ItemService<InMemoryItemStore> {
    pub fn new() -> Self {
        Self::with_store(InMemoryItemStore::new())
    }
}

impl Default for ItemService<InMemoryItemStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ItemStore> ItemService<S> {
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    pub fn root(&self) -> Message {
        Message {
            message: "Hello, world!".to_string(),
        }
    }

    pub fn list_items(&self) -> Vec<Item> {
        self.store.list()
    }

    pub fn read_item(&self, id: i64) -> Result<Item, ItemError> {
        self.store.get(id).ok_or(ItemError::NotFound)
    }

    pub fn create_item(&mut self, item: Item) -> Result<Item, ItemError> {
        if self.store.get(item.id).is_some() {
            return Err(ItemError::AlreadyExists);
        }
        self.store.put(item.clone());
        tracing::debug!(id = item.id, "item created");
        Ok(item)
    }

    /// Replace the item at `id`. The body's id must match the path id.
    pub fn update_item(&mut self, id: i64, item: Item) -> Result<Item, ItemError> {
        if item.id != id {
            return Err(ItemError::IdMismatch);
        }
        if self.store.get(id).is_none() {
            return Err(ItemError::NotFound);
        }
        self.store.put(item.clone());
        Ok(item)
    }

    pub fn delete_item(&mut self, id: i64) -> Result<Message, ItemError> {
        self.store.delete(id).ok_or(ItemError::NotFound)?;
        tracing::debug!(id, "item deleted");
        Ok(Message {
            message: format!("Item {id} deleted"),
        })
    }
}
