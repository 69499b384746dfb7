//! Content factory for loading data from a data directory.

use std::path::{Path, PathBuf};

use game_core::{GameConfig, Level};

use crate::loaders::{ConfigLoader, LevelLoader, LoadResult};

/// Content factory that loads game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── levels/
///     └── dungeon.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`, falling back to defaults
    /// when the file does not exist.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load a level from `levels/{name}.ron`.
    pub fn load_level(&self, name: &str) -> LoadResult<Level> {
        let path = self.level_path(name);
        LevelLoader::load(&path)
    }

    pub fn level_path(&self, name: &str) -> PathBuf {
        self.data_dir.join("levels").join(format!("{}.ron", name))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
        assert_eq!(
            factory.level_path("dungeon"),
            Path::new("/tmp/data/levels/dungeon.ron")
        );
    }

    #[test]
    fn missing_config_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn shipped_data_loads() {
        let factory = ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../../../data"));
        let config = factory.load_config().unwrap();
        let level = factory.load_level("dungeon").unwrap();
        assert!(!level.spawns.is_empty());
        assert!(config.validate().is_ok());
    }
}
