//! Overlap tests and axis-separated sweep-and-clamp motion.
//!
//! Movement is resolved one axis at a time, X then Y. Each sweep moves the
//! rect naively, then pulls it back to the nearest near edge of any static
//! obstacle it ended up overlapping, leaving an `epsilon` gap so a resting
//! contact does not register as an overlap on the next tick's other-axis
//! sweep. There is no corner handling beyond that fixed order.

use ledge_core::{Axis, EntityIndex, Rect, SideFlags, Vec2};

/// A static rectangle the sweep can clamp against.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Obstacle {
    /// Slot of the Static entity.
    pub index: EntityIndex,
    /// Its rectangle.
    pub rect: Rect,
}

/// Outcome of a single-axis sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SweepResult {
    /// The mover after clamping.
    pub rect: Rect,
    /// The leading side, if an obstacle constrained the move.
    pub touched: SideFlags,
    /// The obstacle that constrained the move.
    pub other: Option<EntityIndex>,
}

/// Sides touched by a two-axis move and which obstacle stopped each axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CollisionInfo {
    /// Union of touched sides over both sweeps.
    pub sides: SideFlags,
    /// Obstacle that constrained the X sweep.
    pub x_other: Option<EntityIndex>,
    /// Obstacle that constrained the Y sweep.
    pub y_other: Option<EntityIndex>,
}

impl CollisionInfo {
    /// Whether the Y sweep ended on top of something.
    #[inline]
    pub fn landed(&self) -> bool {
        self.sides.contains(SideFlags::DOWN)
    }
}

/// Half-overlap of two intervals given as center and half extent.
#[inline]
fn half_overlap(ca: f32, ra: f32, cb: f32, rb: f32) -> f32 {
    ((ra + rb) - (ca - cb).abs()) / 2.0
}

/// Intersection of `a` and `b`, or `None` if they do not overlap.
///
/// The result's radius on each axis is the half-overlap
/// `((ra + rb) - |ca - cb|) / 2`. Its center is the midpoint of the
/// clipped intersection interval, so `overlap(a, b) == overlap(b, a)`.
/// Touching edges do not count.
pub fn overlap(a: &Rect, b: &Rect) -> Option<Rect> {
    let hx = half_overlap(a.pos.x, a.radius.x, b.pos.x, b.radius.x);
    let hy = half_overlap(a.pos.y, a.radius.y, b.pos.y, b.radius.y);
    if hx <= 0.0 || hy <= 0.0 {
        return None;
    }
    let cx = (a.left().max(b.left()) + a.right().min(b.right())) / 2.0;
    let cy = (a.bottom().max(b.bottom()) + a.top().min(b.top())) / 2.0;
    Some(Rect::new(cx, cy, hx, hy))
}

/// Whether `a` and `b` overlap, without building the intersection.
#[inline]
pub fn collided(a: &Rect, b: &Rect) -> bool {
    half_overlap(a.pos.x, a.radius.x, b.pos.x, b.radius.x) > 0.0
        && half_overlap(a.pos.y, a.radius.y, b.pos.y, b.radius.y) > 0.0
}

/// Move `rect` by `delta` along `axis` and clamp against `obstacles`.
///
/// Every obstacle still overlapping the moved rect offers its near edge;
/// the most restrictive edge wins, first seen on exact ties. When one
/// wins, the mover is placed `epsilon` short of it and the leading side
/// is reported. A zero delta is a no-op.
pub fn sweep_axis(
    rect: Rect,
    delta: f32,
    axis: Axis,
    obstacles: &[Obstacle],
    epsilon: f32,
) -> SweepResult {
    if delta == 0.0 {
        return SweepResult {
            rect,
            ..SweepResult::default()
        };
    }
    let sign = delta.signum();
    let moved = rect.translated(Vec2::along(axis, delta));
    let radius = moved.radius.get(axis);

    let mut extreme = moved.pos.get(axis) + radius * sign;
    let mut other = None;
    for obstacle in obstacles {
        if !collided(&moved, &obstacle.rect) {
            continue;
        }
        let edge = obstacle.rect.pos.get(axis) - obstacle.rect.radius.get(axis) * sign;
        if edge * sign < extreme * sign {
            extreme = edge;
            other = Some(obstacle.index);
        }
    }

    let mut result = SweepResult {
        rect: moved,
        touched: SideFlags::empty(),
        other,
    };
    if other.is_some() {
        *result.rect.pos.get_mut(axis) = extreme - (radius + epsilon) * sign;
        result.touched = SideFlags::leading(axis, sign > 0.0);
    }
    result
}

/// Sweep X then Y and merge the results.
pub fn resolve_motion(
    rect: Rect,
    delta: Vec2,
    obstacles: &[Obstacle],
    epsilon: f32,
) -> (Rect, CollisionInfo) {
    let x = sweep_axis(rect, delta.x, Axis::X, obstacles, epsilon);
    let y = sweep_axis(x.rect, delta.y, Axis::Y, obstacles, epsilon);
    let info = CollisionInfo {
        sides: x.touched | y.touched,
        x_other: x.other,
        y_other: y.other,
    };
    (y.rect, info)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 0.001;

    fn ground() -> Obstacle {
        Obstacle {
            index: EntityIndex(0),
            rect: Rect::new(0.0, 0.0, 1.0, 1.0),
        }
    }

    #[test]
    fn overlap_reports_half_overlap_radius() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(1.5, 0.0, 1.0, 1.0);
        let o = overlap(&a, &b).unwrap();
        assert_eq!(o.radius, Vec2::new(0.25, 1.0));
        assert_eq!(o.pos, Vec2::new(0.75, 0.0));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(2.0, 0.0, 1.0, 1.0);
        assert!(overlap(&a, &b).is_none());
        assert!(!collided(&a, &b));
    }

    #[test]
    fn falling_onto_ground_clamps_with_epsilon() {
        let mover = Rect::new(0.0, 1.6, 0.5, 0.5);
        let r = sweep_axis(mover, -0.2, Axis::Y, &[ground()], EPS);
        assert_eq!(r.rect.pos.y, 1.0 + (0.5 + EPS));
        assert_eq!(r.touched, SideFlags::DOWN);
        assert_eq!(r.other, Some(EntityIndex(0)));
    }

    #[test]
    fn free_move_has_no_epsilon() {
        let mover = Rect::new(5.0, 5.0, 0.5, 0.5);
        let r = sweep_axis(mover, 0.25, Axis::X, &[ground()], EPS);
        assert_eq!(r.rect.pos.x, 5.25);
        assert!(r.touched.is_empty());
        assert_eq!(r.other, None);
    }

    #[test]
    fn resting_body_does_not_drift() {
        let resting = Rect::new(0.0, 1.0 + (0.5 + EPS), 0.5, 0.5);
        let (rect, info) = resolve_motion(resting, Vec2::ZERO, &[ground()], EPS);
        assert_eq!(rect, resting);
        assert!(info.sides.is_empty());
        // Gravity pulls it in every tick; the clamp puts it back exactly.
        let (rect, info) = resolve_motion(resting, Vec2::new(0.0, -0.005), &[ground()], EPS);
        assert_eq!(rect, resting);
        assert!(info.landed());
    }

    #[test]
    fn most_restrictive_edge_wins() {
        let low = Obstacle {
            index: EntityIndex(1),
            rect: Rect::new(0.0, 0.0, 2.0, 1.0),
        };
        let high = Obstacle {
            index: EntityIndex(2),
            rect: Rect::new(0.0, 0.5, 2.0, 1.0),
        };
        let mover = Rect::new(0.0, 2.0, 0.5, 0.5);
        let r = sweep_axis(mover, -1.0, Axis::Y, &[low, high], EPS);
        assert_eq!(r.other, Some(EntityIndex(2)));
        assert_eq!(r.rect.pos.y, 1.5 + (0.5 + EPS));
    }

    #[test]
    fn exact_tie_keeps_first_seen() {
        let a = Obstacle {
            index: EntityIndex(4),
            rect: Rect::new(-0.5, 0.0, 1.0, 1.0),
        };
        let b = Obstacle {
            index: EntityIndex(7),
            rect: Rect::new(0.5, 0.0, 1.0, 1.0),
        };
        let mover = Rect::new(0.0, 1.7, 0.5, 0.5);
        let r = sweep_axis(mover, -0.5, Axis::Y, &[a, b], EPS);
        assert_eq!(r.other, Some(EntityIndex(4)));
    }

    #[test]
    fn x_is_resolved_before_y() {
        // Wall to the right; moving diagonally into it stops X but not Y.
        let wall = Obstacle {
            index: EntityIndex(3),
            rect: Rect::new(2.0, 0.0, 0.5, 5.0),
        };
        let mover = Rect::new(0.0, 0.0, 0.5, 0.5);
        let (rect, info) = resolve_motion(mover, Vec2::new(1.5, 0.3), &[wall], EPS);
        assert_eq!(rect.pos.x, 1.5 - (0.5 + EPS));
        assert_eq!(rect.pos.y, 0.3);
        assert_eq!(info.sides, SideFlags::RIGHT);
        assert_eq!(info.x_other, Some(EntityIndex(3)));
        assert_eq!(info.y_other, None);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn rect() -> impl Strategy<Value = Rect> {
            (-10.0f32..10.0, -10.0f32..10.0, 0.01f32..5.0, 0.01f32..5.0)
                .prop_map(|(x, y, rx, ry)| Rect::new(x, y, rx, ry))
        }

        proptest! {
            #[test]
            fn overlap_is_symmetric(a in rect(), b in rect()) {
                let ab = overlap(&a, &b);
                let ba = overlap(&b, &a);
                prop_assert_eq!(ab.is_some(), ba.is_some());
                prop_assert_eq!(ab.is_some(), collided(&a, &b));
                if let (Some(ab), Some(ba)) = (ab, ba) {
                    prop_assert_eq!(ab.radius, ba.radius);
                    prop_assert_eq!(ab.pos, ba.pos);
                }
            }

            #[test]
            fn zero_delta_never_moves(a in rect(), o in rect()) {
                let obstacles = [Obstacle { index: EntityIndex(0), rect: o }];
                let (moved, info) = resolve_motion(a, Vec2::ZERO, &obstacles, EPS);
                prop_assert_eq!(moved, a);
                prop_assert!(info.sides.is_empty());
            }
        }
    }
}
