/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Missing file or missing keys gracefully fall back to defaults;
/// `validate()` then fails fast on values the generator cannot handle.

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

use crate::domain::maze::MazeParams;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Logical screen size in pixels; grid dimensions derive from these.
    pub screen_width: usize,
    pub screen_height: usize,
    pub cell_size: usize,

    pub finish_count: usize,
    pub coin_draws: usize,
    pub coin_value: u32,
    pub finish_value: u32,
    pub level_count: usize,

    /// Tick cap in Hz.
    pub frame_rate: u64,
    pub high_score_path: PathBuf,
}

impl GameConfig {
    pub fn cols(&self) -> usize {
        self.screen_width / self.cell_size.max(1)
    }

    pub fn rows(&self) -> usize {
        self.screen_height / self.cell_size.max(1)
    }

    pub fn maze_params(&self) -> MazeParams {
        MazeParams {
            cols: self.cols(),
            rows: self.rows(),
            finish_count: self.finish_count,
            coin_draws: self.coin_draws,
        }
    }

    /// Startup validation. Everything here is fatal: a grid the carver
    /// cannot run on, or a game that can never tick or complete.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        let (cols, rows) = (self.cols(), self.rows());
        if cols < 3 || rows < 3 {
            return Err(ConfigError::GridTooSmall { cols, rows });
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        if self.level_count == 0 {
            return Err(ConfigError::NoLevels);
        }
        if self.finish_count == 0 {
            return Err(ConfigError::NoFinishes);
        }
        Ok(())
    }
}

// ── Validation errors ──

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    ZeroCellSize,
    GridTooSmall { cols: usize, rows: usize },
    ZeroFrameRate,
    NoLevels,
    NoFinishes,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroCellSize => write!(f, "cell_size must be at least 1"),
            ConfigError::GridTooSmall { cols, rows } => write!(
                f,
                "grid must be at least 3x3 cells, got {cols}x{rows} \
                 (screen size divided by cell_size)"
            ),
            ConfigError::ZeroFrameRate => write!(f, "frame_rate must be at least 1 Hz"),
            ConfigError::NoLevels => write!(f, "level_count must be at least 1"),
            ConfigError::NoFinishes => write!(f, "finish_count must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    screen: TomlScreen,
    #[serde(default)]
    game: TomlGame,
    #[serde(default)]
    storage: TomlStorage,
}

#[derive(Deserialize, Debug)]
struct TomlScreen {
    #[serde(default = "default_screen_width")]
    width: usize,
    #[serde(default = "default_screen_height")]
    height: usize,
    #[serde(default = "default_cell_size")]
    cell_size: usize,
}

#[derive(Deserialize, Debug)]
struct TomlGame {
    #[serde(default = "default_finish_count")]
    finish_count: usize,
    #[serde(default = "default_coin_draws")]
    coin_draws: usize,
    #[serde(default = "default_coin_value")]
    coin_value: u32,
    #[serde(default = "default_finish_value")]
    finish_value: u32,
    #[serde(default = "default_level_count")]
    level_count: usize,
    #[serde(default = "default_frame_rate")]
    frame_rate: u64,
}

#[derive(Deserialize, Debug)]
struct TomlStorage {
    #[serde(default = "default_high_score_path")]
    high_score_path: String,
}

// ── Defaults ──

fn default_screen_width() -> usize { 800 }
fn default_screen_height() -> usize { 600 }
fn default_cell_size() -> usize { 20 }
fn default_finish_count() -> usize { 2 }
fn default_coin_draws() -> usize { 10 }
fn default_coin_value() -> u32 { 50 }
fn default_finish_value() -> u32 { 100 }
fn default_level_count() -> usize { 2 }
fn default_frame_rate() -> u64 { 30 }
fn default_high_score_path() -> String { "data/high_score.txt".into() }

impl Default for TomlScreen {
    fn default() -> Self {
        TomlScreen {
            width: default_screen_width(),
            height: default_screen_height(),
            cell_size: default_cell_size(),
        }
    }
}

impl Default for TomlGame {
    fn default() -> Self {
        TomlGame {
            finish_count: default_finish_count(),
            coin_draws: default_coin_draws(),
            coin_value: default_coin_value(),
            finish_value: default_finish_value(),
            level_count: default_level_count(),
            frame_rate: default_frame_rate(),
        }
    }
}

impl Default for TomlStorage {
    fn default() -> Self {
        TomlStorage {
            high_score_path: default_high_score_path(),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        Self::from_toml(load_toml(&candidate_dirs()))
    }

    fn from_toml(cfg: TomlConfig) -> Self {
        GameConfig {
            screen_width: cfg.screen.width,
            screen_height: cfg.screen.height,
            cell_size: cfg.screen.cell_size,
            finish_count: cfg.game.finish_count,
            coin_draws: cfg.game.coin_draws,
            coin_value: cfg.game.coin_value,
            finish_value: cfg.game.finish_value,
            level_count: cfg.game.level_count,
            frame_rate: cfg.game.frame_rate,
            high_score_path: PathBuf::from(cfg.storage.high_score_path),
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from_str(text: &str) -> GameConfig {
        GameConfig::from_toml(toml::from_str::<TomlConfig>(text).unwrap())
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg = config_from_str("");
        assert_eq!(cfg.cols(), 40);
        assert_eq!(cfg.rows(), 30);
        assert_eq!(cfg.finish_count, 2);
        assert_eq!(cfg.coin_draws, 10);
        assert_eq!(cfg.coin_value, 50);
        assert_eq!(cfg.finish_value, 100);
        assert_eq!(cfg.frame_rate, 30);
        assert_eq!(cfg.high_score_path, PathBuf::from("data/high_score.txt"));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let cfg = config_from_str("[game]\ncoin_draws = 4\n");
        assert_eq!(cfg.coin_draws, 4);
        assert_eq!(cfg.finish_count, 2);
    }

    #[test]
    fn too_small_grid_is_rejected() {
        let cfg = config_from_str("[screen]\nwidth = 40\nheight = 600\n");
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::GridTooSmall { cols: 2, rows: 30 })
        );
    }

    #[test]
    fn zero_cell_size_is_rejected() {
        let cfg = config_from_str("[screen]\ncell_size = 0\n");
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroCellSize));
    }

    #[test]
    fn zero_frame_rate_is_rejected() {
        let cfg = config_from_str("[game]\nframe_rate = 0\n");
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroFrameRate));
    }

    #[test]
    fn finishless_game_is_rejected() {
        let cfg = config_from_str("[game]\nfinish_count = 0\n");
        assert_eq!(cfg.validate(), Err(ConfigError::NoFinishes));
    }
}
