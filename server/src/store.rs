//! The in-memory todo list.
//!
//! # Design
//! `TodoStore` owns an ordered `Vec` of entries and addresses them by
//! position, exactly as the HTTP surface does. Deleting an entry shifts every
//! later entry one position earlier. Each entry also carries a UUID assigned
//! at insertion; it never appears on the wire but is attached to mutation log
//! events so an item can be followed across index shifts.
//!
//! The store itself is not synchronized. The router wraps it in a
//! `tokio::sync::RwLock` (see [`crate::SharedStore`]).

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A single todo item as it appears on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub title: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub completed: bool,
}

impl Todo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: false,
        }
    }
}

/// Accepts JSON booleans, `0`/`1`, and the strings `true`/`false`,
/// `yes`/`no`, `on`/`off`, `1`/`0` (any case). Anything else is an error.
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientBool;

    impl Visitor<'_> for LenientBool {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean, 0 or 1, or a boolean-like string")
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<bool, E> {
            Ok(value)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<bool, E> {
            match value {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(E::invalid_value(de::Unexpected::Unsigned(value), &self)),
            }
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<bool, E> {
            match value {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(E::invalid_value(de::Unexpected::Signed(value), &self)),
            }
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<bool, E> {
            match value.to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(true),
                "false" | "no" | "off" | "0" => Ok(false),
                _ => Err(E::invalid_value(de::Unexpected::Str(value), &self)),
            }
        }
    }

    deserializer.deserialize_any(LenientBool)
}

/// Outcome of [`TodoStore::complete`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// The item was pending and is now complete.
    Marked,
    /// The item was already complete; nothing changed.
    AlreadyComplete,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("index {index} is out of range for {len} todos")]
    OutOfRange { index: i64, len: usize },
}

#[derive(Debug)]
struct Entry {
    id: Uuid,
    todo: Todo,
}

#[derive(Debug, Default)]
pub struct TodoStore {
    entries: Vec<Entry>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All todos in insertion order.
    pub fn list(&self) -> impl ExactSizeIterator<Item = &Todo> + '_ {
        self.entries.iter().map(|entry| &entry.todo)
    }

    pub fn get(&self, index: i64) -> Result<&Todo, StoreError> {
        let slot = self.slot(index)?;
        Ok(&self.entries[slot].todo)
    }

    /// Append `todo` and return the stable id assigned to it.
    pub fn add(&mut self, todo: Todo) -> Uuid {
        let id = Uuid::new_v4();
        tracing::info!(
            index = self.entries.len(),
            todo_id = %id,
            completed = todo.completed,
            "todo added"
        );
        self.entries.push(Entry { id, todo });
        id
    }

    /// Remove the todo at `index`, shifting later todos one position earlier.
    pub fn delete(&mut self, index: i64) -> Result<Todo, StoreError> {
        let slot = self.slot(index)?;
        let entry = self.entries.remove(slot);
        tracing::info!(index = slot, todo_id = %entry.id, "todo deleted");
        Ok(entry.todo)
    }

    pub fn complete(&mut self, index: i64) -> Result<Completion, StoreError> {
        let slot = self.slot(index)?;
        let entry = &mut self.entries[slot];
        if entry.todo.completed {
            tracing::debug!(index = slot, todo_id = %entry.id, "todo already complete");
            return Ok(Completion::AlreadyComplete);
        }
        entry.todo.completed = true;
        tracing::info!(index = slot, todo_id = %entry.id, "todo marked complete");
        Ok(Completion::Marked)
    }

    /// Current position of the entry that was assigned `id`, if it still exists.
    pub fn position_of(&self, id: Uuid) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    fn slot(&self, index: i64) -> Result<usize, StoreError> {
        usize::try_from(index)
            .ok()
            .filter(|&slot| slot < self.entries.len())
            .ok_or(StoreError::OutOfRange {
                index,
                len: self.entries.len(),
            })
    }
}
