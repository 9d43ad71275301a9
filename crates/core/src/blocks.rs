//! Block definitions - the read-only set of piece types
//!
//! A block set is loaded once (from JSON or the built-in tetrominoes) and never
//! mutated by the game. Each definition carries its pre-rotated shapes and one
//! display color.

use thiserror::Error;

use crate::types::{BlockDefinition, Rgb, Shape};

/// Name, color, spawn-state matrix and number of distinct rotation states.
const STANDARD: [(&str, Rgb, &[&[u8]], usize); 7] = [
    ("I", Rgb::new(0, 255, 255), &[&[1, 1, 1, 1]], 2),
    ("O", Rgb::new(255, 255, 0), &[&[1, 1], &[1, 1]], 1),
    ("T", Rgb::new(128, 0, 128), &[&[0, 1, 0], &[1, 1, 1]], 4),
    ("S", Rgb::new(0, 255, 0), &[&[0, 1, 1], &[1, 1, 0]], 2),
    ("Z", Rgb::new(255, 0, 0), &[&[1, 1, 0], &[0, 1, 1]], 2),
    ("J", Rgb::new(0, 0, 255), &[&[1, 0, 0], &[1, 1, 1]], 4),
    ("L", Rgb::new(255, 165, 0), &[&[0, 0, 1], &[1, 1, 1]], 4),
];

#[derive(Debug, Error)]
pub enum BlockSetError {
    #[error("block definitions are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("block {name:?} has no rotation states")]
    NoRotations { name: String },
    #[error("block {name:?} has a rotation state with no occupied cell")]
    EmptyRotation { name: String },
    #[error("duplicate block name {name:?}")]
    DuplicateName { name: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockSet {
    definitions: Vec<BlockDefinition>,
}

impl BlockSet {
    /// Validate and wrap a list of definitions.
    pub fn new(definitions: Vec<BlockDefinition>) -> Result<Self, BlockSetError> {
        for (i, def) in definitions.iter().enumerate() {
            if def.rotations.is_empty() {
                return Err(BlockSetError::NoRotations {
                    name: def.name.clone(),
                });
            }
            if def.rotations.iter().any(|shape| shape.cells().next().is_none()) {
                return Err(BlockSetError::EmptyRotation {
                    name: def.name.clone(),
                });
            }
            if definitions[..i].iter().any(|d| d.name == def.name) {
                return Err(BlockSetError::DuplicateName {
                    name: def.name.clone(),
                });
            }
        }
        Ok(Self { definitions })
    }

    /// Parse a JSON array of `{name, color, rotations}` records.
    pub fn from_json_str(json: &str) -> Result<Self, BlockSetError> {
        let definitions: Vec<BlockDefinition> = serde_json::from_str(json)?;
        Self::new(definitions)
    }

    /// The seven standard tetrominoes, rotations generated clockwise.
    pub fn standard() -> Self {
        let definitions = STANDARD
            .iter()
            .map(|(name, color, rows, states)| {
                let base = Shape::from_rows(
                    rows.iter()
                        .map(|r| r.iter().map(|&c| c != 0).collect())
                        .collect(),
                )
                .unwrap_or_else(|e| unreachable!("built-in shape {name}: {e}"));
                let mut rotations = vec![base];
                while rotations.len() < *states {
                    let next = rotations[rotations.len() - 1].rotated_cw();
                    rotations.push(next);
                }
                BlockDefinition {
                    name: name.to_string(),
                    color: *color,
                    rotations,
                }
            })
            .collect();

        Self { definitions }
    }

    pub fn get(&self, index: usize) -> Option<&BlockDefinition> {
        self.definitions.get(index)
    }

    pub fn find(&self, name: &str) -> Option<(usize, &BlockDefinition)> {
        self.definitions
            .iter()
            .enumerate()
            .find(|(_, d)| d.name == name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockDefinition> {
        self.definitions.iter()
    }
}
