//! Hex board: terrain storage and line-of-sight queries.

use serde::{Deserialize, Serialize};

use crate::enums::BoardEdge;
use crate::types::HexCoord;

/// Intervening woods at or above this total block line of sight.
pub const LOS_WOODS_BLOCK_THRESHOLD: u32 = 3;

/// One hex of terrain.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Hex {
    /// Terrain elevation level.
    pub level: i8,
    /// Woods/jungle density (0 = clear, 1 = light, 2 = heavy).
    pub woods: u8,
    /// Water depth (0 = dry).
    pub water_depth: u8,
    /// Whether a building occupies the hex.
    pub building: bool,
}

/// Rectangular hex board. Axial coordinates are stored odd-q offset so the
/// playable area is a simple width x height rectangle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    width: i32,
    height: i32,
    hexes: Vec<Hex>,
}

impl Board {
    /// A clear board of the given dimensions.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            hexes: vec![Hex::default(); (width * height).max(0) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn offset(&self, coord: &HexCoord) -> Option<(i32, i32)> {
        let col = coord.q;
        let row = coord.r + (coord.q - (coord.q & 1)) / 2;
        if col < 0 || col >= self.width || row < 0 || row >= self.height {
            None
        } else {
            Some((col, row))
        }
    }

    pub fn contains(&self, coord: &HexCoord) -> bool {
        self.offset(coord).is_some()
    }

    pub fn hex(&self, coord: &HexCoord) -> Option<&Hex> {
        let (col, row) = self.offset(coord)?;
        self.hexes.get((row * self.width + col) as usize)
    }

    /// Replace the terrain of one hex. Construction-time API; the decision
    /// crates only read the board.
    pub fn set_hex(&mut self, coord: HexCoord, hex: Hex) {
        if let Some((col, row)) = self.offset(&coord) {
            self.hexes[(row * self.width + col) as usize] = hex;
        }
    }

    /// The hex nearest the center of the board.
    pub fn center(&self) -> HexCoord {
        let q = self.width / 2;
        let row = self.height / 2;
        HexCoord::new(q, row - (q - (q & 1)) / 2)
    }

    /// Distance in hexes from a coordinate to a board edge.
    pub fn distance_to_edge(&self, coord: &HexCoord, edge: BoardEdge) -> u32 {
        let Some((col, row)) = self.offset(coord) else {
            return 0;
        };
        let d = match edge {
            BoardEdge::North => row,
            BoardEdge::South => self.height - 1 - row,
            BoardEdge::West => col,
            BoardEdge::East => self.width - 1 - col,
        };
        d.max(0) as u32
    }

    /// Sum of woods levels in the hexes strictly between two coordinates.
    pub fn intervening_woods(&self, from: &HexCoord, to: &HexCoord) -> u32 {
        from.hexes_between(to)
            .iter()
            .filter_map(|c| self.hex(c))
            .map(|h| h.woods as u32)
            .sum()
    }

    /// Line of sight between two hexes. Blocked by an intervening building
    /// or by accumulated woods at the threshold.
    pub fn has_line_of_sight(&self, from: &HexCoord, to: &HexCoord) -> bool {
        let mut woods = 0u32;
        for c in from.hexes_between(to) {
            if let Some(hex) = self.hex(&c) {
                if hex.building {
                    return false;
                }
                woods += hex.woods as u32;
                if woods >= LOS_WOODS_BLOCK_THRESHOLD {
                    return false;
                }
            }
        }
        true
    }
}
