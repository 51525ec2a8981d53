//! Table geometry: cushion rectangle and the six pockets
//!
//! Built once, validated, then only ever borrowed by the physics.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Number of pockets on a table
pub const POCKET_COUNT: usize = 6;

/// Cushion rectangle of the standard table
pub const TABLE_MIN: Vec2 = Vec2::new(100.0, 50.0);
pub const TABLE_MAX: Vec2 = Vec2::new(1000.0, 523.0);

/// Capture radius of the standard pockets
pub const POCKET_CAPTURE_RADIUS: f32 = 20.0;

/// Fraction of speed kept on a cushion bounce
pub const CUSHION_RESTITUTION: f32 = 0.9;

/// A pocket: anything whose center enters the capture circle drops in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pocket {
    pub center: Vec2,
    pub capture_radius: f32,
}

impl Pocket {
    pub const fn new(center: Vec2, capture_radius: f32) -> Self {
        Self {
            center,
            capture_radius,
        }
    }

    /// Does a ball centered at `pos` drop into this pocket?
    #[inline]
    pub fn captures(&self, pos: Vec2) -> bool {
        pos.distance(self.center) <= self.capture_radius
    }
}

/// Axis-aligned cushion rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl TableBounds {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Is a ball of `radius` at `pos` fully inside the cushions?
    pub fn contains_ball(&self, pos: Vec2, radius: f32) -> bool {
        pos.x - radius >= self.min.x
            && pos.x + radius <= self.max.x
            && pos.y - radius >= self.min.y
            && pos.y + radius <= self.max.y
    }

    /// Nearest position where a ball of `radius` sits fully inside
    pub fn clamp_ball(&self, pos: Vec2, radius: f32) -> Vec2 {
        let min = self.min + Vec2::splat(radius);
        let max = self.max - Vec2::splat(radius);
        pos.max(min).min(max)
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// The playing surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub bounds: TableBounds,
    pub pockets: Vec<Pocket>,
    pub cushion_restitution: f32,
}

impl Table {
    /// Build a table, rejecting geometry the simulation cannot use
    pub fn new(
        bounds: TableBounds,
        pockets: Vec<Pocket>,
        cushion_restitution: f32,
    ) -> Result<Self, ConfigError> {
        let table = Self {
            bounds,
            pockets,
            cushion_restitution,
        };
        table.validate()?;
        Ok(table)
    }

    /// Check the geometry; fields are public, so this runs again at game setup
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounds = &self.bounds;
        if !(bounds.min.x < bounds.max.x && bounds.min.y < bounds.max.y) {
            return Err(ConfigError::EmptyBounds);
        }
        if self.pockets.len() != POCKET_COUNT {
            return Err(ConfigError::PocketCount(self.pockets.len()));
        }
        if let Some((index, pocket)) = self
            .pockets
            .iter()
            .enumerate()
            .find(|(_, p)| !(p.capture_radius > 0.0))
        {
            return Err(ConfigError::PocketRadius {
                index,
                radius: pocket.capture_radius,
            });
        }
        if !(self.cushion_restitution > 0.0 && self.cushion_restitution <= 1.0) {
            return Err(ConfigError::Restitution(self.cushion_restitution));
        }
        Ok(())
    }

    /// Standard table: four corner pockets and two middle pockets
    pub fn standard() -> Self {
        let (min, max) = (TABLE_MIN, TABLE_MAX);
        let mid_x = (min.x + max.x) / 2.0;
        let r = POCKET_CAPTURE_RADIUS;

        Self {
            bounds: TableBounds::new(min, max),
            pockets: vec![
                Pocket::new(Vec2::new(min.x + 8.0, min.y + 8.0), r),
                Pocket::new(Vec2::new(min.x + 8.0, max.y - 8.0), r),
                Pocket::new(Vec2::new(max.x - 8.0, max.y - 8.0), r),
                Pocket::new(Vec2::new(max.x - 8.0, min.y + 8.0), r),
                Pocket::new(Vec2::new(mid_x, max.y - 2.0), r),
                Pocket::new(Vec2::new(mid_x, min.y + 2.0), r),
            ],
            cushion_restitution: CUSHION_RESTITUTION,
        }
    }

    /// Index of the pocket that captures a ball at `pos`, if any
    pub fn pocket_at(&self, pos: Vec2) -> Option<usize> {
        self.pockets.iter().position(|p| p.captures(pos))
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::standard()
    }
}
