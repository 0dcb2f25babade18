use crate::Vec2;
use serde::{Deserialize, Serialize};

/// Rectangular world the agents move in. Boundaries are toroidal: leaving
/// one edge re-enters from the opposite edge, per axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Snap an out-of-range position to the opposite edge. Matches the
    /// reference wrap exactly: an agent past an edge reappears *at* the far
    /// edge, not at the modular remainder.
    pub fn wrap(&self, p: Vec2) -> Vec2 {
        let mut out = p;
        if out.x < 0.0 {
            out.x = self.width;
        } else if out.x > self.width {
            out.x = 0.0;
        }
        if out.y < 0.0 {
            out.y = self.height;
        } else if out.y > self.height {
            out.y = 0.0;
        }
        out
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

/// Axis-aligned rectangular obstacle, immutable after construction.
/// `position` is the top-left corner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle {
    position: Vec2,
    size: Vec2,
}

impl Obstacle {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    pub fn min_bound(&self) -> Vec2 {
        self.position
    }

    pub fn max_bound(&self) -> Vec2 {
        self.position + self.size
    }

    pub fn contains(&self, p: Vec2) -> bool {
        let min = self.min_bound();
        let max = self.max_bound();
        p.x > min.x && p.x < max.x && p.y > min.y && p.y < max.y
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }
}
