//! Level encoding
//!
//! A level is a stack of equally sized character grids stored as RON. Every
//! cell is one digit naming what occupies that tile; grids share one code
//! table so decorations and geometry can be layered freely.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::game::ConfigError;

#[derive(Debug)]
pub enum LevelError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    ValidationError(String),
    UnknownTile { at: GridPos, code: char },
    MissingPlayerSpawn,
    DuplicatePlayerSpawn { first: GridPos, second: GridPos },
    Config(ConfigError),
}

impl From<std::io::Error> for LevelError {
    fn from(e: std::io::Error) -> Self {
        LevelError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for LevelError {
    fn from(e: ron::error::SpannedError) -> Self {
        LevelError::ParseError(e)
    }
}

impl From<ConfigError> for LevelError {
    fn from(e: ConfigError) -> Self {
        LevelError::Config(e)
    }
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::IoError(e) => write!(f, "IO error: {}", e),
            LevelError::ParseError(e) => write!(f, "Parse error: {}", e),
            LevelError::ValidationError(e) => write!(f, "Validation error: {}", e),
            LevelError::UnknownTile { at, code } => {
                write!(f, "unknown tile code '{}' at {}", code, at)
            }
            LevelError::MissingPlayerSpawn => write!(f, "level has no player spawn"),
            LevelError::DuplicatePlayerSpawn { first, second } => {
                write!(f, "second player spawn at {} (first at {})", second, first)
            }
            LevelError::Config(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for LevelError {}

/// Cell address: grid index, row from the top, column from the left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPos {
    pub grid: usize,
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "grid {} row {} col {}", self.grid, self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileCode {
    Empty,
    Ground,
    Panel,
    PlayerSpawn,
    /// Foreground decoration
    Grass,
    /// Background decoration
    Brick,
}

impl TileCode {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(TileCode::Empty),
            '1' => Some(TileCode::Ground),
            '2' => Some(TileCode::Panel),
            '4' => Some(TileCode::PlayerSpawn),
            '5' => Some(TileCode::Grass),
            '6' => Some(TileCode::Brick),
            _ => None,
        }
    }
}

/// On-disk level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub tile_size: f32,
    /// Grids, each a list of rows, each row one character per cell
    pub grids: Vec<Vec<String>>,
}

const REFERENCE_COLLISION: [&str; 5] = [
    "40000000000000000000000000000000000000000000000000",
    "00000000000000000000000000000000000000000000000000",
    "00200000000000000000000000000000000000000000000000",
    "02200000000000000000000000000000000000000000000000",
    "11111111000000000000000000000000000000000000000000",
];

const REFERENCE_FOREGROUND: [&str; 5] = [
    "00000000000000000000000000000000000000000000000000",
    "00000000000000000000000000000000000000000000000000",
    "00000000000000000000000000000000000000000000000000",
    "00005550000000000000000000000000000000000000000000",
    "00000000000000000000000000000000000000000000000000",
];

const REFERENCE_BACKGROUND: [&str; 5] = [
    "00000000000000000000000000000000000000000000000000",
    "00000000006666000000000000000000000000000000000000",
    "00000000006666000000000000000000000000000000000000",
    "00000000006666000000000000000000000000000000000000",
    "00000000000000000000000000000000000000000000000000",
];

impl LevelData {
    /// Built-in level: collision grid, foreground grid, background grid.
    pub fn reference() -> Self {
        Self {
            tile_size: 32.0,
            grids: vec![
                owned_rows(&REFERENCE_COLLISION),
                owned_rows(&REFERENCE_FOREGROUND),
                owned_rows(&REFERENCE_BACKGROUND),
            ],
        }
    }

    pub fn parse(contents: &str) -> Result<Self, LevelError> {
        Ok(ron::from_str(contents)?)
    }

    /// Load a level from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LevelError> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::parse(&contents)
    }

    /// Check shape, codes and spawn, and decode every cell.
    pub fn validate(&self) -> Result<TileMap, LevelError> {
        if !(self.tile_size > 0.0) || !self.tile_size.is_finite() {
            return Err(LevelError::ValidationError(format!(
                "tile size must be positive, got {}",
                self.tile_size
            )));
        }
        let first = self
            .grids
            .first()
            .ok_or_else(|| LevelError::ValidationError("level has no grids".to_string()))?;
        let rows = first.len();
        let cols = first.first().map_or(0, |r| r.chars().count());
        if rows == 0 || cols == 0 {
            return Err(LevelError::ValidationError("grid 0 is empty".to_string()));
        }

        let mut cells = Vec::new();
        let mut spawn: Option<GridPos> = None;

        for (grid, lines) in self.grids.iter().enumerate() {
            if lines.len() != rows {
                return Err(LevelError::ValidationError(format!(
                    "grid {} has {} rows, expected {}",
                    grid,
                    lines.len(),
                    rows
                )));
            }
            for (row, line) in lines.iter().enumerate() {
                let width = line.chars().count();
                if width != cols {
                    return Err(LevelError::ValidationError(format!(
                        "grid {} row {} has {} cells, expected {}",
                        grid, row, width, cols
                    )));
                }
                for (col, ch) in line.chars().enumerate() {
                    let at = GridPos { grid, row, col };
                    let code = TileCode::from_char(ch)
                        .ok_or(LevelError::UnknownTile { at, code: ch })?;
                    match code {
                        TileCode::Empty => continue,
                        TileCode::PlayerSpawn => {
                            if let Some(first) = spawn {
                                return Err(LevelError::DuplicatePlayerSpawn { first, second: at });
                            }
                            spawn = Some(at);
                        }
                        _ => {}
                    }
                    cells.push(TileCell { at, code });
                }
            }
        }

        if spawn.is_none() {
            return Err(LevelError::MissingPlayerSpawn);
        }

        Ok(TileMap {
            tile_size: self.tile_size,
            rows,
            cols,
            cells,
        })
    }
}

fn owned_rows(rows: &[&str]) -> Vec<String> {
    rows.iter().map(|r| r.to_string()).collect()
}

/// One occupied cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCell {
    pub at: GridPos,
    pub code: TileCode,
}

/// A validated level: grid dimensions plus every non-empty cell in scan
/// order (grid, then row-major).
#[derive(Debug, Clone, PartialEq)]
pub struct TileMap {
    pub tile_size: f32,
    pub rows: usize,
    pub cols: usize,
    cells: Vec<TileCell>,
}

impl TileMap {
    pub fn cells(&self) -> &[TileCell] {
        &self.cells
    }

    #[cfg(test)]
    pub fn count(&self, code: TileCode) -> usize {
        self.cells.iter().filter(|c| c.code == code).count()
    }
}
