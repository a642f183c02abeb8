//! List state behind each resource hook.
//!
//! DESIGN
//! ======
//! Mutations patch the list locally instead of refetching: append on
//! create, replace-by-id on update, filter-by-id on delete. Failed calls
//! never touch `items`. Concurrent calls are not sequenced, so whichever
//! completes last wins.

#[cfg(test)]
#[path = "resource_test.rs"]
mod resource_test;

use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq)]
pub struct ResourceList<T> {
    pub items: Vec<T>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ResourceList<T> {
    fn default() -> Self {
        Self { items: Vec::new(), is_loading: false, error: None }
    }
}

impl<T> ResourceList<T> {
    pub fn begin(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.is_loading = false;
    }

    pub fn apply_created(&mut self, item: T) {
        self.items.push(item);
        self.is_loading = false;
    }

    pub fn apply_updated(&mut self, item: T, id_of: impl Fn(&T) -> i64) {
        let id = id_of(&item);
        if let Some(slot) = self.items.iter_mut().find(|existing| id_of(existing) == id) {
            *slot = item;
        }
        self.is_loading = false;
    }

    pub fn apply_deleted(&mut self, id: i64, id_of: impl Fn(&T) -> i64) {
        self.items.retain(|existing| id_of(existing) != id);
        self.is_loading = false;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.is_loading = false;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn get(&self, id: i64, id_of: impl Fn(&T) -> i64) -> Option<&T> {
        self.items.iter().find(|item| id_of(item) == id)
    }
}

/// Pull the item array out of a list payload.
///
/// Accepts a bare array or an object wrapping one under `results`, `data`,
/// or `slots`. Anything else yields an empty list.
pub fn coerce_items(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(items) => items,
        Value::Object(mut object) => ["results", "data", "slots"]
            .iter()
            .find_map(|key| match object.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Decode list items, skipping the ones that do not match `T`.
pub fn decode_items<T: DeserializeOwned>(payload: Value, label: &str) -> Vec<T> {
    coerce_items(payload)
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                log::warn!("skipping malformed {label} item: {err}");
                None
            }
        })
        .collect()
}
