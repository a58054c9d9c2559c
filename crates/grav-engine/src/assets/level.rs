//! Level definitions: the JSON file format and the built-in fallback
//! levels used when no files are shipped.

use serde::{Deserialize, Serialize};

use crate::components::tilemap::TileGrid;

/// A level as stored on disk: ASCII rows plus optional declared
/// dimensions (the map itself is authoritative for size).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelData {
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    /// ASCII rows: `#` solid, `S` spawn, `E` exit, `^` hazard,
    /// anything else empty.
    pub map: Vec<String>,
}

impl LevelData {
    /// Parse a level from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Build the runtime tile grid for this level.
    pub fn build(&self) -> TileGrid {
        let rows: Vec<&str> = self.map.iter().map(String::as_str).collect();
        TileGrid::from_ascii(&rows)
    }
}

/// An ordered collection of levels. Requests past the end answer with
/// the last level, so progression never runs off a cliff.
#[derive(Debug, Clone)]
pub struct LevelSet {
    levels: Vec<LevelData>,
}

impl LevelSet {
    pub fn new(levels: Vec<LevelData>) -> Self {
        debug_assert!(!levels.is_empty(), "a level set needs at least one level");
        Self { levels }
    }

    /// Parse a set from a JSON array of levels.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let levels: Vec<LevelData> = serde_json::from_str(json)?;
        Ok(Self::new(levels))
    }

    /// The default levels compiled into the engine.
    pub fn builtin() -> Self {
        let ascii = |rows: &[&str]| LevelData {
            width: None,
            height: None,
            map: rows.iter().map(|r| r.to_string()).collect(),
        };
        Self::new(vec![
            ascii(&[
                "############",
                "#..........#",
                "#..S.......#",
                "#..........#",
                "#......^...#",
                "#.........E#",
                "############",
            ]),
            ascii(&[
                "##############",
                "#S...........#",
                "#.....####...#",
                "#..^.........#",
                "#...........E#",
                "##############",
            ]),
        ])
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Level by 1-based number, clamped to the last available level.
    pub fn get(&self, number: u32) -> &LevelData {
        let idx = (number.max(1) as usize - 1).min(self.levels.len() - 1);
        &self.levels[idx]
    }
}

impl Default for LevelSet {
    fn default() -> Self {
        Self::builtin()
    }
}
