//! Best-time persistence
//!
//! One value survives between sessions: the fastest completion in whole
//! seconds. Stored as a small JSON record in LocalStorage on web and in a
//! file on native. A missing or unreadable record simply means no best time
//! yet.

use serde::{Deserialize, Serialize};

/// Storage collaborator for the best time
pub trait BestTimeStore {
    fn read_best_time(&self) -> Option<u64>;
    fn write_best_time(&mut self, secs: u64);
}

/// Serialized form of the best time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestTimeRecord {
    pub best_time_secs: u64,
}

impl BestTimeRecord {
    fn decode(json: &str) -> Option<u64> {
        match serde_json::from_str::<BestTimeRecord>(json) {
            Ok(record) => Some(record.best_time_secs),
            Err(err) => {
                log::warn!("Ignoring malformed best-time record: {err}");
                None
            }
        }
    }

    fn encode(secs: u64) -> Option<String> {
        serde_json::to_string(&BestTimeRecord {
            best_time_secs: secs,
        })
        .ok()
    }
}

/// In-memory store (tests, and hosts without persistence)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: Option<u64>,
    /// Every value written, oldest first
    pub writes: Vec<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(secs: u64) -> Self {
        Self {
            best: Some(secs),
            writes: Vec::new(),
        }
    }
}

impl BestTimeStore for MemoryStore {
    fn read_best_time(&self) -> Option<u64> {
        self.best
    }

    fn write_best_time(&mut self, secs: u64) {
        self.best = Some(secs);
        self.writes.push(secs);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::JsonFileStore;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::path::{Path, PathBuf};

    use super::{BestTimeRecord, BestTimeStore};

    /// Best time kept in a JSON file
    #[derive(Debug, Clone)]
    pub struct JsonFileStore {
        path: PathBuf,
    }

    impl JsonFileStore {
        /// Default file name, relative to the working directory
        pub const DEFAULT_PATH: &'static str = "marble_maze_best_time.json";

        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl BestTimeStore for JsonFileStore {
        fn read_best_time(&self) -> Option<u64> {
            let json = fs::read_to_string(&self.path).ok()?;
            let best = BestTimeRecord::decode(&json)?;
            log::info!("Loaded best time {best}s from {}", self.path.display());
            Some(best)
        }

        fn write_best_time(&mut self, secs: u64) {
            let Some(json) = BestTimeRecord::encode(secs) else {
                return;
            };
            match fs::write(&self.path, json) {
                Ok(()) => log::info!("Best time {secs}s saved to {}", self.path.display()),
                Err(err) => log::warn!("Could not save best time to {}: {err}", self.path.display()),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStore;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{BestTimeRecord, BestTimeStore};

    /// Best time kept in browser LocalStorage
    #[derive(Debug, Clone, Default)]
    pub struct LocalStore;

    impl LocalStore {
        const STORAGE_KEY: &'static str = "marble_maze_best_time";

        fn storage() -> Option<web_sys::Storage> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
        }
    }

    impl BestTimeStore for LocalStore {
        fn read_best_time(&self) -> Option<u64> {
            let json = Self::storage()?.get_item(Self::STORAGE_KEY).ok()??;
            let best = BestTimeRecord::decode(&json)?;
            log::info!("Loaded best time {best}s");
            Some(best)
        }

        fn write_best_time(&mut self, secs: u64) {
            if let (Some(storage), Some(json)) = (Self::storage(), BestTimeRecord::encode(secs)) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Best time {secs}s saved");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.read_best_time(), None);
        store.write_best_time(42);
        assert_eq!(store.read_best_time(), Some(42));
        assert_eq!(store.writes, vec![42]);
        assert_eq!(MemoryStore::with_best(7).read_best_time(), Some(7));
    }

    #[test]
    fn test_record_format() {
        assert_eq!(
            BestTimeRecord::encode(35).as_deref(),
            Some(r#"{"best_time_secs":35}"#)
        );
        assert_eq!(BestTimeRecord::decode(r#"{"best_time_secs":12}"#), Some(12));
        assert_eq!(BestTimeRecord::decode("not json"), None);
        assert_eq!(BestTimeRecord::decode(r#"{"best_time_secs":-4}"#), None);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_json_file_store() {
        let path = std::env::temp_dir().join(format!(
            "marble_maze_best_time_test_{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.read_best_time(), None);

        store.write_best_time(40);
        assert_eq!(JsonFileStore::new(&path).read_best_time(), Some(40));

        std::fs::write(&path, "garbage").unwrap();
        assert_eq!(store.read_best_time(), None);

        let _ = std::fs::remove_file(&path);
    }
}
