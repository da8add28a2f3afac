use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::view::filter::{is_valid_price_input, parse_price_threshold, Segment};

pub const PRICE_GREATER_THAN_FILTER_KEY: &str = "@priceGreaterThanFilter";
pub const SELECTED_SEGMENT_INDEX_KEY: &str = "@selectedSegmentIndex";

/// Opaque string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Store kept in a single JSON object file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(values)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        Ok(self.read_all()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)?;
        debug!("Stored {} in {}", key, self.path.display());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Persisted list filters: the min-price input text and the selected segment.
///
/// Both values are read once in [`Preferences::load`] and written through on
/// every change.
pub struct Preferences<S: KeyValueStore> {
    store: S,
    min_price_input: String,
    segment: Segment,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn load(store: S) -> Result<Self> {
        let min_price_input = store
            .get(PRICE_GREATER_THAN_FILTER_KEY)?
            .filter(|value| is_valid_price_input(value))
            .unwrap_or_default();
        let segment = store
            .get(SELECTED_SEGMENT_INDEX_KEY)?
            .map(|value| Segment::from_stored(&value))
            .unwrap_or_default();

        info!(
            "Loaded preferences: price greater than {:?}, segment {}",
            min_price_input, segment
        );
        Ok(Self {
            store,
            min_price_input,
            segment,
        })
    }

    pub fn min_price_input(&self) -> &str {
        &self.min_price_input
    }

    pub fn min_price(&self) -> f64 {
        parse_price_threshold(&self.min_price_input)
    }

    pub fn segment(&self) -> Segment {
        self.segment
    }

    /// Rejects anything that is not non-negative number-like text.
    pub fn set_min_price_input(&mut self, input: &str) -> Result<()> {
        if !is_valid_price_input(input) {
            return Err(Error::InvalidInput(format!(
                "{:?} is not a non-negative number",
                input
            )));
        }
        self.store.set(PRICE_GREATER_THAN_FILTER_KEY, input)?;
        self.min_price_input = input.to_string();
        Ok(())
    }

    pub fn set_segment(&mut self, segment: Segment) -> Result<()> {
        self.store
            .set(SELECTED_SEGMENT_INDEX_KEY, &segment.index().to_string())?;
        self.segment = segment;
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
