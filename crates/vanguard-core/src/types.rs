//! Fundamental hex-grid geometry types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Axial hex coordinate (flat-top orientation).
/// q grows eastward, r grows southward; the implied cube coordinate
/// s = -q - r keeps distances honest.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Third cube coordinate.
    pub fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Hex distance to another coordinate.
    pub fn distance(&self, other: &HexCoord) -> u32 {
        let dq = (other.q - self.q).abs();
        let dr = (other.r - self.r).abs();
        let ds = (other.s() - self.s()).abs();
        ((dq + dr + ds) / 2) as u32
    }

    /// The adjacent hex in the given facing direction.
    pub fn neighbor(&self, facing: Facing) -> HexCoord {
        let (dq, dr) = match facing.value() {
            0 => (0, -1), // N
            1 => (1, -1), // NE
            2 => (1, 0),  // SE
            3 => (0, 1),  // S
            4 => (-1, 1), // SW
            _ => (-1, 0), // NW
        };
        HexCoord::new(self.q + dq, self.r + dr)
    }

    /// Cartesian center of this hex. Scaled so adjacent hex centers are
    /// exactly 1.0 apart; x = East, y = North (matching bearings).
    pub fn to_cartesian(&self) -> DVec2 {
        let x = SQRT_3 / 2.0 * self.q as f64;
        let y = -(self.r as f64 + self.q as f64 / 2.0);
        DVec2::new(x, y)
    }

    /// Bearing to another hex in radians (0 = North, clockwise).
    pub fn bearing_to(&self, other: &HexCoord) -> f64 {
        let d = other.to_cartesian() - self.to_cartesian();
        d.x.atan2(d.y).rem_euclid(std::f64::consts::TAU)
    }

    /// The hexside direction that points most nearly at `other`.
    /// Returns facing 0 when the hexes are identical.
    pub fn direction_to(&self, other: &HexCoord) -> Facing {
        if self == other {
            return Facing::new(0);
        }
        let sixth = std::f64::consts::TAU / 6.0;
        let bearing = self.bearing_to(other);
        Facing::new((bearing / sixth).round() as u8 % 6)
    }

    /// All hexes strictly between this hex and `other`, by cube-lerp
    /// sampling. Empty for adjacent or identical hexes.
    pub fn hexes_between(&self, other: &HexCoord) -> Vec<HexCoord> {
        let n = self.distance(other);
        if n <= 1 {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(n as usize - 1);
        for i in 1..n {
            let t = i as f64 / n as f64;
            let q = self.q as f64 + (other.q - self.q) as f64 * t;
            let r = self.r as f64 + (other.r - self.r) as f64 * t;
            out.push(cube_round(q, r));
        }
        out
    }
}

/// Round fractional axial coordinates to the containing hex.
fn cube_round(q: f64, r: f64) -> HexCoord {
    let s = -q - r;
    let mut rq = q.round();
    let mut rr = r.round();
    let rs = s.round();
    let dq = (rq - q).abs();
    let dr = (rr - r).abs();
    let ds = (rs - s).abs();
    if dq > dr && dq > ds {
        rq = -rr - rs;
    } else if dr > ds {
        rr = -rq - rs;
    }
    HexCoord::new(rq as i32, rr as i32)
}

/// One of the six hexside directions (0 = North, clockwise).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Facing(u8);

impl Facing {
    pub const ALL: [Facing; 6] = [
        Facing(0),
        Facing(1),
        Facing(2),
        Facing(3),
        Facing(4),
        Facing(5),
    ];

    pub fn new(value: u8) -> Self {
        Self(value % 6)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn turn_left(self) -> Self {
        Self((self.0 + 5) % 6)
    }

    pub fn turn_right(self) -> Self {
        Self((self.0 + 1) % 6)
    }

    pub fn opposite(self) -> Self {
        Self((self.0 + 3) % 6)
    }

    /// Facing after a torso twist: -1 = left, +1 = right, 0 = unchanged.
    pub fn twisted(self, twist: i8) -> Self {
        match twist {
            t if t < 0 => self.turn_left(),
            t if t > 0 => self.turn_right(),
            _ => self,
        }
    }

    /// Number of hexside turns between two facings (0..=3).
    pub fn rotation_distance(self, other: Facing) -> u8 {
        let d = (6 + self.0 - other.0) % 6;
        d.min(6 - d)
    }
}

/// Stable unit identifier assigned by the game.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct UnitId(pub u32);

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
