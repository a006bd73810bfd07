//! Game settings and preferences
//!
//! Persisted separately from the best time in LocalStorage.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;
use crate::maze::Dimensions;

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Cells across; rows follow as 3/5 of this
    pub grid_size: u32,
    /// Fixed maze seed (None = fresh maze every game)
    #[serde(default)]
    pub seed: Option<u64>,
    /// Arena size in render units
    pub arena_width: f32,
    pub arena_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            seed: None,
            arena_width: DEFAULT_ARENA_WIDTH,
            arena_height: DEFAULT_ARENA_HEIGHT,
        }
    }
}

impl Settings {
    /// Maze dimensions for the configured grid size
    pub fn dimensions(&self) -> Result<Dimensions> {
        Dimensions::from_grid_size(self.grid_size)
    }

    pub fn arena(&self) -> Vec2 {
        Vec2::new(self.arena_width, self.arena_height)
    }

    /// Seed to generate with: the fixed one, or a fresh draw
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| rand::rng().random())
    }

    /// Maze RNG for the resolved seed
    pub fn rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.resolve_seed())
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "marble_maze_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MazeError;
    use rand::RngCore;

    #[test]
    fn test_default_dimensions() {
        let settings = Settings::default();
        let dims = settings.dimensions().unwrap();
        assert_eq!((dims.rows(), dims.cols()), (6, 10));
        assert_eq!(settings.arena(), Vec2::new(800.0, 600.0));
    }

    #[test]
    fn test_zero_grid_size_rejected() {
        let settings = Settings {
            grid_size: 0,
            ..Default::default()
        };
        assert_eq!(
            settings.dimensions(),
            Err(MazeError::InvalidDimensions { rows: 0, cols: 0 })
        );
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let settings = Settings {
            seed: Some(77),
            ..Default::default()
        };
        assert_eq!(settings.resolve_seed(), 77);
        assert_eq!(settings.rng().next_u64(), settings.rng().next_u64());
    }

    #[test]
    fn test_seed_defaults_when_missing() {
        let json = r#"{"grid_size":14,"arena_width":700.0,"arena_height":420.0}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.grid_size, 14);
        assert_eq!(settings.seed, None);
    }
}
