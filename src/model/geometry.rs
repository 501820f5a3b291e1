use std::fmt;
use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Axial neighbor offsets, counter-clockwise starting east.
pub const AXIAL_DIRECTIONS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

// ---------------------------------------------------------------------------
// WorldPoint
// ---------------------------------------------------------------------------

/// A point on the ground plane in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

impl WorldPoint {
    pub const ORIGIN: WorldPoint = WorldPoint { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: WorldPoint) -> f64 {
        (self - other).length()
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction, or zero for a zero-length vector.
    pub fn normalized(self) -> WorldPoint {
        let len = self.length();
        if len == 0.0 {
            WorldPoint::ORIGIN
        } else {
            WorldPoint::new(self.x / len, self.y / len)
        }
    }
}

impl Add for WorldPoint {
    type Output = WorldPoint;

    fn add(self, rhs: WorldPoint) -> WorldPoint {
        WorldPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for WorldPoint {
    type Output = WorldPoint;

    fn sub(self, rhs: WorldPoint) -> WorldPoint {
        WorldPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for WorldPoint {
    type Output = WorldPoint;

    fn mul(self, rhs: f64) -> WorldPoint {
        WorldPoint::new(self.x * rhs, self.y * rhs)
    }
}

// ---------------------------------------------------------------------------
// HexCoord
// ---------------------------------------------------------------------------

/// Axial hex coordinate (pointy-top layout).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub const ORIGIN: HexCoord = HexCoord { q: 0, r: 0 };

    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Implicit third cube coordinate.
    pub fn s(self) -> i32 {
        -self.q - self.r
    }

    pub fn offset(self, dq: i32, dr: i32) -> HexCoord {
        HexCoord::new(self.q + dq, self.r + dr)
    }

    pub fn neighbors(self) -> [HexCoord; 6] {
        AXIAL_DIRECTIONS.map(|(dq, dr)| self.offset(dq, dr))
    }

    /// Hex-grid step distance.
    pub fn distance(self, other: HexCoord) -> u32 {
        let dq = (self.q - other.q).unsigned_abs();
        let dr = (self.r - other.r).unsigned_abs();
        let ds = (self.s() - other.s()).unsigned_abs();
        dq.max(dr).max(ds)
    }

    /// World-space center for a hex of the given circumradius.
    pub fn to_world(self, hex_size: f64) -> WorldPoint {
        let q = f64::from(self.q);
        let r = f64::from(self.r);
        WorldPoint::new(hex_size * SQRT_3 * (q + r / 2.0), hex_size * 1.5 * r)
    }

    /// Nearest hex to a world point (cube rounding).
    pub fn from_world(point: WorldPoint, hex_size: f64) -> HexCoord {
        let q = (SQRT_3 / 3.0 * point.x - point.y / 3.0) / hex_size;
        let r = (2.0 / 3.0 * point.y) / hex_size;
        cube_round(q, r, -q - r)
    }

    /// All coordinates within `radius` steps, ring by ring from the center.
    pub fn spiral(self, radius: u32) -> Vec<HexCoord> {
        let radius = radius as i32;
        let mut coords = Vec::new();
        for q in -radius..=radius {
            let r_min = (-radius).max(-q - radius);
            let r_max = radius.min(-q + radius);
            for r in r_min..=r_max {
                coords.push(self.offset(q, r));
            }
        }
        coords.sort_by_key(|c| (self.distance(*c), c.q, c.r));
        coords
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

fn cube_round(q: f64, r: f64, s: f64) -> HexCoord {
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
