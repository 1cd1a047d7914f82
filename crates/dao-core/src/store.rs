//! Persistence: a key-value blob store holding the serialized aggregate, and
//! the decode path that back-fills older or partial snapshots.

use crate::clock::Moment;
use crate::error::Result;
use crate::model::AppData;
use crate::paths;
use crate::progress::reset_daily_capacity;
use chrono::{Local, TimeZone};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// BlobStore
// ---------------------------------------------------------------------------

pub trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn put(&self, key: &str, value: &str) -> Result<()>;
    /// Returns true if a blob was removed.
    fn remove(&self, key: &str) -> Result<bool>;
}

impl<T: BlobStore + ?Sized> BlobStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        (**self).put(key, value)
    }

    fn remove(&self, key: &str) -> Result<bool> {
        (**self).remove(key)
    }
}

/// One JSON file per key under `<root>/store/`, written atomically.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        crate::io::read_optional(&paths::blob_path(&self.root, key))
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        crate::io::atomic_write(&paths::blob_path(&self.root, key), value.as_bytes())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        crate::io::remove_if_exists(&paths::blob_path(&self.root, key))
    }
}

/// In-process store, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.blobs.borrow_mut().remove(key).is_some())
    }
}

// ---------------------------------------------------------------------------
// Decode / load / save
// ---------------------------------------------------------------------------

/// How a snapshot came to be in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// Nothing stored under the key: first run.
    Fresh,
    /// A stored snapshot was decoded.
    Stored,
    /// Some or all of a stored snapshot could not be decoded; those parts use
    /// defaults and the original blob was kept under [`corrupt_key`].
    Recovered,
}

/// A decoded snapshot together with the parts that had to be left out.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub data: AppData,
    /// JSON pointers of values that did not decode and fell back to defaults.
    pub dropped: Vec<String>,
}

/// Parse a serialized aggregate, back-filling missing or unreadable parts
/// from defaults. Fails only when the blob is not a JSON object.
pub fn decode(blob: &str) -> Result<AppData> {
    let decoded = decode_salvaging(blob)?;
    if !decoded.dropped.is_empty() {
        tracing::warn!(parts = ?decoded.dropped, "snapshot parts unreadable, defaults used");
    }
    Ok(decoded.data)
}

/// Like [`decode`], but reports which parts were dropped.
///
/// Explicit `null`s are treated as missing. Older snapshots kept a single
/// rival object under `nemesis` and an epoch-millisecond `lastCompletedDate`;
/// both are converted. When the whole document does not decode, each field
/// is tried on its own, descending into objects and list elements, so one bad
/// value costs only itself.
pub fn decode_salvaging(blob: &str) -> Result<Decoded> {
    let mut value: Value = serde_json::from_str(blob)?;
    strip_nulls(&mut value);
    upgrade_legacy(&mut value);

    let stored = match value {
        Value::Object(fields) => fields,
        other => {
            let data = serde_json::from_value(other)?;
            return Ok(Decoded {
                data,
                dropped: Vec::new(),
            });
        }
    };
    if let Ok(data) = AppData::deserialize(&Value::Object(stored.clone())) {
        return Ok(Decoded {
            data,
            dropped: Vec::new(),
        });
    }

    let mut root = serde_json::to_value(AppData::default())?;
    let mut dropped = Vec::new();
    for (key, part) in stored {
        salvage(&mut root, "", &key, part, &mut dropped);
    }
    Ok(Decoded {
        data: serde_json::from_value(root)?,
        dropped,
    })
}

fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(obj) => {
            obj.retain(|_, v| !v.is_null());
            obj.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}

fn upgrade_legacy(value: &mut Value) {
    let Some(obj) = value.as_object_mut() else {
        return;
    };
    if let Some(single) = obj.remove("nemesis") {
        let list = match single {
            Value::Object(_) => Value::Array(vec![single]),
            other => other,
        };
        obj.insert("nemesis".to_string(), list);
    }
    if let Some(stats) = obj.get_mut("stats").and_then(Value::as_object_mut) {
        for field in ["lastCompletedDate", "lastDateForEssence"] {
            let date = stats
                .get(field)
                .and_then(Value::as_i64)
                .and_then(|ms| Local.timestamp_millis_opt(ms).single())
                .map(|at| at.date_naive().format("%Y-%m-%d").to_string());
            if let Some(date) = date {
                stats.insert(field.to_string(), Value::String(date));
            }
        }
    }
}

fn fits(root: &Value) -> bool {
    AppData::deserialize(root).is_ok()
}

fn pointer(parent: &str, key: &str) -> String {
    format!("{parent}/{}", key.replace('~', "~0").replace('/', "~1"))
}

/// Set (or with `None`, remove) `key` in the object at `parent`, returning
/// what was there.
fn put(root: &mut Value, parent: &str, key: &str, value: Option<Value>) -> Option<Value> {
    let obj = root.pointer_mut(parent)?.as_object_mut()?;
    match value {
        Some(v) => obj.insert(key.to_string(), v),
        None => obj.remove(key),
    }
}

fn list_at<'a>(root: &'a mut Value, at: &str) -> Option<&'a mut Vec<Value>> {
    root.pointer_mut(at).and_then(Value::as_array_mut)
}

/// Place `stored` at `parent/key` if the aggregate still decodes; otherwise
/// keep what was there and retry the pieces of `stored`.
fn salvage(root: &mut Value, parent: &str, key: &str, stored: Value, dropped: &mut Vec<String>) {
    let here = pointer(parent, key);
    let previous = put(root, parent, key, Some(stored.clone()));
    if fits(root) {
        return;
    }
    match stored {
        Value::Object(fields) => {
            let base = match &previous {
                Some(v @ Value::Object(_)) => v.clone(),
                _ => Value::Object(Map::new()),
            };
            put(root, parent, key, Some(base));
            if !fits(root) {
                put(root, parent, key, previous);
                dropped.push(here);
                return;
            }
            for (field, part) in fields {
                salvage(root, &here, &field, part, dropped);
            }
        }
        Value::Array(items) => {
            put(root, parent, key, Some(Value::Array(Vec::new())));
            if !fits(root) {
                put(root, parent, key, previous);
                dropped.push(here);
                return;
            }
            for (i, item) in items.into_iter().enumerate() {
                salvage_element(root, &here, i, item, dropped);
            }
        }
        _ => {
            put(root, parent, key, previous);
            dropped.push(here);
        }
    }
}

/// Append `item` to the list at `at`, or failing that, as much of it as
/// decodes.
fn salvage_element(root: &mut Value, at: &str, index: usize, item: Value, dropped: &mut Vec<String>) {
    let Some(list) = list_at(root, at) else {
        return;
    };
    list.push(item.clone());
    let slot = list.len() - 1;
    if fits(root) {
        return;
    }
    let fields = match item {
        Value::Object(fields) => fields,
        _ => Map::new(),
    };
    if let Some(list) = list_at(root, at) {
        list[slot] = Value::Object(Map::new());
    }
    if fields.is_empty() || !fits(root) {
        if let Some(list) = list_at(root, at) {
            list.pop();
        }
        dropped.push(format!("{at}/{index}"));
        return;
    }
    let element = format!("{at}/{slot}");
    for (field, part) in fields {
        salvage(root, &element, &field, part, dropped);
    }
}

pub fn encode(data: &AppData) -> Result<String> {
    Ok(serde_json::to_string(data)?)
}

/// Where the raw blob is kept when loading it lost data.
pub fn corrupt_key(key: &str) -> String {
    format!("{key}.corrupt")
}

/// Load the aggregate stored under `key`.
///
/// Never fails on bad content: unreadable parts are logged and replaced by
/// defaults, and the raw blob is copied to [`corrupt_key`] before anything
/// can overwrite it. Storage I/O errors still propagate. The daily aperture
/// is rolled over as part of every load.
pub fn load(
    store: &dyn BlobStore,
    key: &str,
    capacity: i64,
    moment: &Moment,
) -> Result<(AppData, LoadOrigin)> {
    let (mut data, origin) = match store.get(key)? {
        None => (AppData::with_capacity(capacity), LoadOrigin::Fresh),
        Some(blob) => match decode_salvaging(&blob) {
            Ok(decoded) if decoded.dropped.is_empty() => (decoded.data, LoadOrigin::Stored),
            Ok(decoded) => {
                tracing::warn!(key, parts = ?decoded.dropped, "stored snapshot partly unreadable, defaults used for those parts");
                store.put(&corrupt_key(key), &blob)?;
                (decoded.data, LoadOrigin::Recovered)
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "stored snapshot unreadable, starting from defaults");
                store.put(&corrupt_key(key), &blob)?;
                (AppData::with_capacity(capacity), LoadOrigin::Recovered)
            }
        },
    };
    if reset_daily_capacity(&mut data, moment) {
        tracing::debug!(key, date = %moment.today_iso(), "daily aperture reset");
    }
    Ok((data, origin))
}

pub fn save(store: &dyn BlobStore, key: &str, data: &AppData) -> Result<()> {
    store.put(key, &encode(data)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
