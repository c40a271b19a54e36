//! Cubic Bézier curve utilities for connector routing.
//!
//! Connector paths are single cubic segments; arrowheads are placed along
//! them by arc length, so alongside plain evaluation this module provides a
//! sampled arc-length table and its inverse.

use crate::geometry::tolerance::safe_div;
use crate::model::Vec2;

/// Number of uniform parameter samples used when tabulating arc length.
pub const ARC_SAMPLES: usize = 100;

/// Control points of a cubic Bézier curve.
#[derive(Clone, Copy, Debug)]
pub struct CubicBezier {
    pub p0: Vec2, // Start point
    pub p1: Vec2, // First control point
    pub p2: Vec2, // Second control point
    pub p3: Vec2, // End point
}

impl CubicBezier {
    pub fn new(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Evaluate the curve at parameter t ∈ [0, 1].
    pub fn eval(&self, t: f32) -> Vec2 {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        Vec2 {
            x: mt3 * self.p0.x + 3.0 * mt2 * t * self.p1.x + 3.0 * mt * t2 * self.p2.x + t3 * self.p3.x,
            y: mt3 * self.p0.y + 3.0 * mt2 * t * self.p1.y + 3.0 * mt * t2 * self.p2.y + t3 * self.p3.y,
        }
    }

    /// Evaluate the tangent (derivative) at parameter t.
    pub fn tangent(&self, t: f32) -> Vec2 {
        let t2 = t * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;

        Vec2 {
            x: 3.0 * mt2 * (self.p1.x - self.p0.x)
                + 6.0 * mt * t * (self.p2.x - self.p1.x)
                + 3.0 * t2 * (self.p3.x - self.p2.x),
            y: 3.0 * mt2 * (self.p1.y - self.p0.y)
                + 6.0 * mt * t * (self.p2.y - self.p1.y)
                + 3.0 * t2 * (self.p3.y - self.p2.y),
        }
    }

    /// Position plus tangent angle in degrees at parameter t.
    ///
    /// The angle orients arrowheads along the flow direction of the curve.
    pub fn point_and_angle(&self, t: f32) -> (Vec2, f32) {
        let p = self.eval(t);
        let d = self.tangent(t);
        (p, d.y.atan2(d.x).to_degrees())
    }
}

/// Monotone lookup table of cumulative chord-length approximations.
#[derive(Clone, Debug)]
pub struct ArcLengthTable {
    pub lengths: Vec<f32>,
    pub total: f32,
}

impl ArcLengthTable {
    /// Tabulate cumulative arc length at `samples` uniform parameter steps.
    pub fn build(curve: &CubicBezier, samples: usize) -> Self {
        let samples = samples.max(1);
        let mut lengths = Vec::with_capacity(samples + 1);
        lengths.push(0.0);
        let mut prev = curve.p0;
        let mut total = 0.0;
        for i in 1..=samples {
            let t = i as f32 / samples as f32;
            let p = curve.eval(t);
            total += (p.dist_sq(prev)).sqrt();
            lengths.push(total);
            prev = p;
        }
        ArcLengthTable { lengths, total }
    }

    /// Invert the table: find the parameter t whose arc length is closest
    /// to `target`. Exactly 0 for non-positive targets and exactly 1 for
    /// targets at or beyond the total length.
    pub fn t_for_length(&self, target: f32) -> f32 {
        if target <= 0.0 {
            return 0.0;
        }
        if target >= self.total {
            return 1.0;
        }
        let steps = (self.lengths.len() - 1) as f32;
        for i in 1..self.lengths.len() {
            if self.lengths[i] >= target {
                let lo = self.lengths[i - 1];
                let hi = self.lengths[i];
                let frac = safe_div(target - lo, hi - lo, 0.0);
                return ((i - 1) as f32 + frac) / steps;
            }
        }
        1.0
    }
}
