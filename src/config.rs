//! Runtime configuration loaded from ~/.snake/config.json.
//!
//! Every field is optional in the file; missing fields fall back to the
//! compile-time defaults in [`crate::core::constants`].

use crate::core::constants::*;
use crate::core::grid::Grid;
use crate::core::types::DifficultyMode;
use crate::error::Result;
use crate::utils::persistence;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field_width_px: u32,
    pub field_height_px: u32,
    pub block_size_px: u32,
    pub scoreboard_height_px: u32,
    /// Difficulty selected at startup, by name.
    pub difficulty: String,
    /// Record file name inside the data directory.
    pub records_file: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width_px: FIELD_WIDTH_PX,
            field_height_px: FIELD_HEIGHT_PX,
            block_size_px: BLOCK_SIZE_PX,
            scoreboard_height_px: SCOREBOARD_HEIGHT_PX,
            difficulty: DifficultyMode::Balanced.name().to_string(),
            records_file: RECORDS_FILENAME.to_string(),
        }
    }
}

impl GameConfig {
    /// Load ~/.snake/config.json, or defaults when it is missing or malformed.
    pub fn load() -> Self {
        match persistence::save_path(CONFIG_FILENAME) {
            Ok(path) => persistence::load_json_or_default(&path),
            Err(e) => {
                tracing::warn!(error = %e, "no data directory, using default config");
                Self::default()
            }
        }
    }

    /// Play field geometry for this configuration.
    pub fn grid(&self) -> Result<Grid> {
        Grid::new(
            self.field_width_px,
            self.field_height_px,
            self.block_size_px,
            self.scoreboard_height_px,
        )
    }

    /// Startup difficulty; unknown names fall back to Balanced.
    pub fn difficulty(&self) -> DifficultyMode {
        DifficultyMode::from_name(&self.difficulty).unwrap_or_else(|| {
            tracing::warn!(difficulty = %self.difficulty, "unknown difficulty, using Balanced");
            DifficultyMode::Balanced
        })
    }
}
