//! Builder configuration.

use crate::tree::MAX_GRID_COLUMNS;
use serde::{Deserialize, Serialize};

/// Tunables of the drag-and-drop builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuilderConfig {
    /// Refuse drops that put a Grid right next to another Grid inside a
    /// non-root container. When false the check is skipped.
    pub reject_adjacent_grids: bool,
    /// Largest column count offered for a Grid.
    pub max_grid_columns: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            reject_adjacent_grids: true,
            max_grid_columns: MAX_GRID_COLUMNS,
        }
    }
}

impl BuilderConfig {
    /// Column counts the property panel offers for a Grid.
    pub fn column_choices(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.max_grid_columns.clamp(1, MAX_GRID_COLUMNS)
    }
}
