//! Shared key/value store threaded through the steps of a suite.
//!
//! Values are addressed with dot-separated paths (`user.session.token`), and a single
//! reader/writer lock guards the whole tree so a reader never observes a half-written
//! nested structure. Construction and [`Context::get_all`] hand out deep copies.

use log::trace;
use parking_lot::RwLock;
use serde_json::{Map, Value};

use crate::checks::errors::Error;
use crate::checks::Result;

#[derive(Debug, Default)]
pub struct Context {
    values: RwLock<Map<String, Value>>,
}

impl Context {
    pub fn new(initial: &Map<String, Value>) -> Self {
        Context {
            values: RwLock::new(initial.clone()),
        }
    }

    /// Walks `path` one segment at a time. Fails as soon as a segment is missing or a
    /// non-map value would have to be indexed further.
    pub fn get(&self, path: &str) -> Result<Value> {
        let values = self.values.read();
        let mut parts = path.split('.');
        let first = parts.next().unwrap_or_default();
        let mut current = values
            .get(first)
            .ok_or_else(|| Error::PathNotFound(path.to_string()))?;
        for part in parts {
            current = match current {
                Value::Object(map) => map
                    .get(part)
                    .ok_or_else(|| Error::PathNotFound(path.to_string()))?,
                _ => return Err(Error::PathNotFound(path.to_string())),
            };
        }
        Ok(current.clone())
    }

    /// Creates intermediate maps as needed. A non-map value found on the way is replaced
    /// by an empty map, which discards whatever scalar was stored there.
    pub fn set(&self, path: &str, value: Value) -> Result<()> {
        if path.is_empty() {
            return Err(Error::EmptyPath);
        }
        trace!("Setting context path '{}' to {}", path, value);
        let mut values = self.values.write();
        let parts = path.split('.').collect::<Vec<&str>>();
        let (last, parents) = match parts.split_last() {
            Some(split) => split,
            None => return Err(Error::EmptyPath),
        };
        let mut current: &mut Map<String, Value> = &mut *values;
        for part in parents {
            let entry = current
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            current = entry
                .as_object_mut()
                .ok_or_else(|| Error::PathNotFound(path.to_string()))?;
        }
        current.insert(last.to_string(), value);
        Ok(())
    }

    pub fn get_all(&self) -> Map<String, Value> {
        self.values.read().clone()
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod context_tests;
