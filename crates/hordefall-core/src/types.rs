//! Fundamental geometric and simulation types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// 3D position in arena space (meters, Cartesian).
/// The ground plane is XZ; y is up. Enemies live at y = 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// 3D velocity in arena space (m/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Simulation time tracking. Advanced by a caller-supplied delta each
/// frame — the simulation is frame-driven, not fixed-rate.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current frame number (increments by 1 each update).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Distance to another position in meters (3D).
    pub fn range_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Horizontal distance on the ground plane (ignoring height).
    pub fn horizontal_range_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }

    pub fn to_vec(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    pub fn from_vec(v: DVec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Speed magnitude (m/s).
    pub fn speed(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Horizontal speed (ignoring vertical component).
    pub fn horizontal_speed(&self) -> f64 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    pub fn to_vec(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    pub fn from_vec(v: DVec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl SimTime {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Static axis-aligned obstacle volume, queried read-only each frame for
/// projectile collision. Extends from the ground up to `height`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Barrier {
    /// Center of the footprint on the ground plane.
    pub position: Position,
    pub half_width: f64,
    pub half_depth: f64,
    pub height: f64,
}

impl Barrier {
    /// Whether a sphere at `center` with `radius` overlaps this volume.
    pub fn intersects_sphere(&self, center: &Position, radius: f64) -> bool {
        let dx = (center.x - self.position.x).abs();
        let dz = (center.z - self.position.z).abs();
        dx <= self.half_width + radius
            && dz <= self.half_depth + radius
            && center.y >= 0.0
            && center.y <= self.height
    }
}
