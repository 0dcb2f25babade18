use crate::Vec2;

/// Below this length a vector is treated as zero when rescaling, to keep the
/// division from blowing up.
pub const TRUNCATE_EPSILON: f32 = 1.0e-5;

pub fn magnitude(v: Vec2) -> f32 {
    v.norm()
}

/// Unit vector in the direction of `v`, or the zero vector when `v` has zero
/// length. Zero-length input is a defined, silent case.
pub fn normalised(v: Vec2) -> Vec2 {
    let length = v.norm();
    if length > 0.0 {
        v / length
    } else {
        Vec2::zeros()
    }
}

/// Rescale `v` to length `max` if it is longer; shorter vectors pass through
/// unchanged.
pub fn truncate(v: Vec2, max: f32) -> Vec2 {
    let length = v.norm();
    if length > max && length > TRUNCATE_EPSILON {
        normalised(v) * max
    } else {
        v
    }
}

pub fn dot(a: Vec2, b: Vec2) -> f32 {
    a.dot(&b)
}

/// Result of a segment vs. AABB slab test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    /// Entry parameter along the segment, clamped to [0, 1].
    pub t: f32,
    /// Unit normal of the face the segment enters through.
    pub normal: Vec2,
}

/// Slab-method intersection of the segment `p1 -> p2` against the box
/// `[min, max]`. Returns the clamped entry parameter and the entry-face
/// normal, or `None` when the segment misses the box.
///
/// A zero direction component divides to an infinite inverse, so an
/// axis-parallel segment never rejects on that axis alone. When both slabs
/// are entered at exactly the same time (corner hit) the Y-axis normal wins;
/// that tie-break is an accepted policy, kept deliberately.
pub fn segment_aabb(p1: Vec2, p2: Vec2, min: Vec2, max: Vec2) -> Option<SegmentHit> {
    let dir = p2 - p1;
    let inv_x = 1.0 / dir.x;
    let inv_y = 1.0 / dir.y;

    let (tx1, tx2) = ((min.x - p1.x) * inv_x, (max.x - p1.x) * inv_x);
    let (ty1, ty2) = ((min.y - p1.y) * inv_y, (max.y - p1.y) * inv_y);

    let tx_enter = tx1.min(tx2);
    let tx_exit = tx1.max(tx2);
    let ty_enter = ty1.min(ty2);
    let ty_exit = ty1.max(ty2);

    let t_enter = tx_enter.max(ty_enter);
    let t_exit = tx_exit.min(ty_exit);

    if t_enter > t_exit || t_exit < 0.0 {
        return None;
    }

    let t = t_enter.max(0.0);
    if t > 1.0 {
        return None;
    }

    let normal = if tx_enter > ty_enter {
        if dir.x > 0.0 {
            Vec2::new(-1.0, 0.0)
        } else {
            Vec2::new(1.0, 0.0)
        }
    } else if dir.y > 0.0 {
        Vec2::new(0.0, -1.0)
    } else {
        Vec2::new(0.0, 1.0)
    };

    Some(SegmentHit { t, normal })
}

/// Shortest displacement from `from` to `to` on a torus of size `world`.
/// Offsets longer than half the world on an axis are folded through the
/// nearer edge.
pub fn wrapped_offset(from: Vec2, to: Vec2, world: Vec2) -> Vec2 {
    let mut dx = to.x - from.x;
    let mut dy = to.y - from.y;

    if dx.abs() > world.x * 0.5 {
        if dx > 0.0 {
            dx -= world.x;
        } else {
            dx += world.x;
        }
    }
    if dy.abs() > world.y * 0.5 {
        if dy > 0.0 {
            dy -= world.y;
        } else {
            dy += world.y;
        }
    }

    Vec2::new(dx, dy)
}
