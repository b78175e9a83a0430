use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::state::Position;

/// Largest grid side that still fits a terminal
pub const MAX_BLOCKS: usize = 200;

/// Configuration for the game
///
/// Passed by value to the engine at construction and never mutated afterwards.
/// Missing fields in a JSON config file fall back to [`GameConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of cells along each side of the square grid
    pub blocks: usize,
    /// Side of one cell, in pixel units
    pub block_size: i32,
    /// Ticks per second
    pub fps: u32,
    /// Length of the snake at spawn and after every reset
    pub initial_snake_length: usize,

    /// Resample food until it lands on a cell the snake does not occupy
    pub food_avoids_snake: bool,
    /// Fixed RNG seed for reproducible food placement
    pub seed: Option<u64>,

    // Sounds
    /// Directory holding the sound cues
    pub sounds_dir: PathBuf,
    /// Cue played when a round resets
    pub hit_sound: String,
    /// Cue played when food is eaten
    pub food_sound: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            blocks: 25,
            block_size: 20,
            fps: 8,
            initial_snake_length: 3,
            food_avoids_snake: false,
            seed: None,
            sounds_dir: PathBuf::from("Sounds"),
            hit_sound: "hit.mp3".to_string(),
            food_sound: "food.mp3".to_string(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid
    pub fn new(blocks: usize, block_size: i32) -> Self {
        Self {
            blocks,
            block_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 20)
    }

    /// Load a configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// Reject configurations the game cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.blocks < 5 {
            bail!("grid needs at least 5 blocks per side, got {}", self.blocks);
        }
        if self.blocks > MAX_BLOCKS {
            bail!(
                "grid can have at most {} blocks per side, got {}",
                MAX_BLOCKS,
                self.blocks
            );
        }
        if self.block_size < 1 {
            bail!("block size must be positive, got {}", self.block_size);
        }
        // Screen coordinates are i32; one cell past the edge must still fit
        if (self.blocks as i32 + 1).checked_mul(self.block_size).is_none() {
            bail!(
                "{} blocks of {} pixel units overflow the playing field",
                self.blocks,
                self.block_size
            );
        }
        if self.fps == 0 {
            bail!("fps must be at least 1");
        }
        // The body extends leftward from the spawn head and must stay on the grid
        let max_length = self.blocks / 5 + 1;
        if self.initial_snake_length == 0 || self.initial_snake_length > max_length {
            bail!(
                "initial snake length must be between 1 and {}, got {}",
                max_length,
                self.initial_snake_length
            );
        }
        Ok(())
    }

    pub fn screen_width(&self) -> i32 {
        self.blocks as i32 * self.block_size
    }

    pub fn screen_height(&self) -> i32 {
        self.blocks as i32 * self.block_size
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    /// Head position of a freshly spawned snake
    pub fn spawn_head(&self) -> Position {
        let column = (self.blocks / 5) as i32;
        let row = (self.blocks / 2) as i32;
        Position::new(column * self.block_size, row * self.block_size)
    }

    /// Whether a position lies on the playing field
    pub fn contains(&self, pos: Position) -> bool {
        (0..self.screen_width()).contains(&pos.x) && (0..self.screen_height()).contains(&pos.y)
    }

    pub fn hit_sound_path(&self) -> PathBuf {
        self.sounds_dir.join(&self.hit_sound)
    }

    pub fn food_sound_path(&self) -> PathBuf {
        self.sounds_dir.join(&self.food_sound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.blocks, 25);
        assert_eq!(config.block_size, 20);
        assert_eq!(config.fps, 8);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.screen_width(), 500);
        assert_eq!(config.screen_height(), 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_spawn_head() {
        let config = GameConfig::default();
        // cell (5, 12)
        assert_eq!(config.spawn_head(), Position::new(100, 240));
    }

    #[test]
    fn test_tick_interval() {
        let config = GameConfig::default();
        assert_eq!(config.tick_interval(), Duration::from_millis(125));
    }

    #[test]
    fn test_contains() {
        let config = GameConfig::default();
        assert!(config.contains(Position::new(0, 0)));
        assert!(config.contains(Position::new(480, 480)));
        assert!(!config.contains(Position::new(-20, 0)));
        assert!(!config.contains(Position::new(500, 0)));
        assert!(!config.contains(Position::new(0, 500)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(GameConfig::new(4, 20).validate().is_err());
        assert!(GameConfig::new(25, 0).validate().is_err());

        let config = GameConfig {
            fps: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            initial_snake_length: 7,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            initial_snake_length: 6,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_oversized_grid() {
        assert!(GameConfig::new(MAX_BLOCKS, 20).validate().is_ok());
        assert!(GameConfig::new(MAX_BLOCKS + 1, 1).validate().is_err());
        assert!(GameConfig::new(33_000, 1).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_overflowing_block_size() {
        assert!(GameConfig::new(25, i32::MAX / 4).validate().is_err());
        assert!(GameConfig::new(5, i32::MAX).validate().is_err());

        // The largest accepted size still yields in-range coordinates
        let block_size = i32::MAX / 26;
        let config = GameConfig::new(25, block_size);
        assert!(config.validate().is_ok());
        assert_eq!(config.screen_width(), 25 * block_size);
        let head = config.spawn_head();
        assert!(config.contains(head));
        assert!(head.x.checked_add(block_size).is_some());
    }

    #[test]
    fn test_load_partial_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "blocks": 30, "fps": 12, "seed": 7 }}"#).unwrap();

        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(config.blocks, 30);
        assert_eq!(config.fps, 12);
        assert_eq!(config.seed, Some(7));
        // Unspecified fields keep their defaults
        assert_eq!(config.block_size, 20);
        assert_eq!(config.hit_sound, "hit.mp3");
    }

    #[test]
    fn test_load_invalid_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(GameConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = GameConfig::from_file(&dir.path().join("absent.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_sound_paths() {
        let config = GameConfig::default();
        assert_eq!(config.hit_sound_path(), PathBuf::from("Sounds/hit.mp3"));
        assert_eq!(config.food_sound_path(), PathBuf::from("Sounds/food.mp3"));
    }
}
