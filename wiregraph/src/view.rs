//! Pan/zoom view transform between screen space and world space.

use serde::{Deserialize, Serialize};

use crate::geometry::tolerance::clamp;
use crate::model::Vec2;

pub const ZOOM_MIN: f32 = 0.2;
pub const ZOOM_MAX: f32 = 4.0;

/// Zoom factor applied per unit of wheel delta. `0.995^deltaY` gives a
/// continuous exponential zoom rather than discrete steps.
pub const ZOOM_STEP: f32 = 0.995;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ViewTransform {
    pub x: f32,
    pub y: f32,
    pub k: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        ViewTransform { x: 0.0, y: 0.0, k: 1.0 }
    }
}

impl ViewTransform {
    pub fn screen_to_world(&self, sx: f32, sy: f32) -> Vec2 {
        Vec2 {
            x: (sx - self.x) / self.k,
            y: (sy - self.y) / self.k,
        }
    }

    pub fn world_to_screen(&self, p: Vec2) -> (f32, f32) {
        (p.x * self.k + self.x, p.y * self.k + self.y)
    }

    /// Wheel zoom about a cursor point. Rescales `k` by `ZOOM_STEP^delta_y`
    /// (clamped) and recomputes the pan offset so that the world point under
    /// the cursor stays fixed on screen.
    pub fn zoom_about(&mut self, delta_y: f32, sx: f32, sy: f32) {
        let new_k = clamp(self.k * ZOOM_STEP.powf(delta_y), ZOOM_MIN, ZOOM_MAX);
        let ratio = new_k / self.k;
        self.x = sx - (sx - self.x) * ratio;
        self.y = sy - (sy - self.y) * ratio;
        self.k = new_k;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let t = ViewTransform { x: 40.0, y: -12.0, k: 1.7 };
        let w = t.screen_to_world(100.0, 200.0);
        let (sx, sy) = t.world_to_screen(w);
        assert!((sx - 100.0).abs() < 1e-3);
        assert!((sy - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_keeps_cursor_point_fixed() {
        let mut t = ViewTransform::default();
        let before = t.screen_to_world(320.0, 240.0);
        t.zoom_about(-100.0, 320.0, 240.0);
        let after = t.screen_to_world(320.0, 240.0);
        assert!((before.x - after.x).abs() < 1e-3);
        assert!((before.y - after.y).abs() < 1e-3);
        // 0.995^-100 ≈ 1.6508
        assert!((t.k - 1.6508).abs() < 1e-3, "k = {}", t.k);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut t = ViewTransform::default();
        t.zoom_about(10_000.0, 0.0, 0.0);
        assert_eq!(t.k, ZOOM_MIN);
        t.zoom_about(-100_000.0, 0.0, 0.0);
        assert_eq!(t.k, ZOOM_MAX);
    }
}
