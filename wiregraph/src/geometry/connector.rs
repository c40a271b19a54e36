//! Connector path construction and arrowhead placement.
//!
//! A connector leaves its source socket along that side's outward normal,
//! arrives at the target socket the same way, and carries two arrowheads
//! placed by arc length so the flow markers stay evenly spaced even on
//! asymmetric curves.

use serde::Serialize;

use crate::geometry::bezier::{ArcLengthTable, CubicBezier, ARC_SAMPLES};
use crate::model::{Side, Vec2};
use crate::view::ViewTransform;

/// Distance in world units from an anchor to its Bézier control point.
pub const CONTROL_DIST: f32 = 60.0;

/// Arrowheads sit at these fractions of total arc length. Parametric
/// midpoints would bunch up visually on asymmetric curves.
pub const ARROW_FRACTIONS: [f32; 2] = [0.33, 0.66];

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Arrowhead {
    pub x: f32,
    pub y: f32,
    /// Tangent angle in degrees.
    pub angle: f32,
}

#[derive(Clone, Debug, Serialize)]
pub struct ConnectionGeometry {
    /// SVG cubic path, `M .. C ..`, in world coordinates.
    pub path: String,
    pub arrows: [Arrowhead; 2],
}

/// A socket anchor rectangle as measured by the shell, in screen space.
#[derive(Clone, Copy, Debug)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Convert a screen-space anchor rectangle to a world-space anchor point.
pub fn world_anchor(rect: ScreenRect, transform: &ViewTransform) -> Vec2 {
    transform.screen_to_world(rect.x + rect.w * 0.5, rect.y + rect.h * 0.5)
}

/// Build the cubic through two world anchors given their assigned sides.
pub fn connector_curve(source: Vec2, source_side: Side, target: Vec2, target_side: Side) -> CubicBezier {
    let sn = source_side.outward_normal();
    let tn = target_side.outward_normal();
    CubicBezier::new(
        source,
        Vec2::new(source.x + sn.x * CONTROL_DIST, source.y + sn.y * CONTROL_DIST),
        Vec2::new(target.x + tn.x * CONTROL_DIST, target.y + tn.y * CONTROL_DIST),
        target,
    )
}

/// Path string plus arrowheads for a connection between two solved sockets.
pub fn connection_geometry(
    source: Vec2,
    source_side: Side,
    target: Vec2,
    target_side: Side,
) -> ConnectionGeometry {
    let curve = connector_curve(source, source_side, target, target_side);
    let path = format!(
        "M {} {} C {} {}, {} {}, {} {}",
        curve.p0.x, curve.p0.y, curve.p1.x, curve.p1.y, curve.p2.x, curve.p2.y, curve.p3.x, curve.p3.y
    );

    let table = ArcLengthTable::build(&curve, ARC_SAMPLES);
    let arrows = ARROW_FRACTIONS.map(|f| {
        let t = table.t_for_length(table.total * f);
        let (p, angle) = curve.point_and_angle(t);
        Arrowhead { x: p.x, y: p.y, angle }
    });

    ConnectionGeometry { path, arrows }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_leaves_along_normals() {
        let curve = connector_curve(
            Vec2::new(0.0, 0.0),
            Side::Right,
            Vec2::new(200.0, 0.0),
            Side::Left,
        );
        assert!((curve.p1.x - CONTROL_DIST).abs() < 1e-6);
        assert!((curve.p1.y - 0.0).abs() < 1e-6);
        assert!((curve.p2.x - (200.0 - CONTROL_DIST)).abs() < 1e-6);
    }

    #[test]
    fn test_arrowheads_between_endpoints() {
        let geo = connection_geometry(
            Vec2::new(0.0, 0.0),
            Side::Right,
            Vec2::new(100.0, 50.0),
            Side::Top,
        );
        for a in geo.arrows {
            assert!(a.x > 0.0 && a.x < 110.0, "arrow x out of band: {}", a.x);
        }
        // First arrow strictly before second along the curve
        assert!(geo.arrows[0].x != geo.arrows[1].x || geo.arrows[0].y != geo.arrows[1].y);
    }

    #[test]
    fn test_path_string_shape() {
        let geo = connection_geometry(
            Vec2::new(1.0, 2.0),
            Side::Right,
            Vec2::new(3.0, 4.0),
            Side::Left,
        );
        assert!(geo.path.starts_with("M 1 2 C "));
        assert!(geo.path.contains(','));
    }

    #[test]
    fn test_world_anchor_uses_transform() {
        let t = ViewTransform { x: 10.0, y: 10.0, k: 2.0 };
        let a = world_anchor(ScreenRect { x: 10.0, y: 10.0, w: 20.0, h: 20.0 }, &t);
        assert!((a.x - 10.0).abs() < 1e-6);
        assert!((a.y - 10.0).abs() < 1e-6);
    }
}
