//! Collision detection for axis-aligned rectangles
//!
//! Boundary tests are inclusive (`>=` / `<=`): a ball sitting exactly on a
//! boundary bounces. Rectangle overlap is strict, so shared edges never collide.

use super::state::Rect;
use crate::settings::{Playfield, Settings};

/// Which playfield edges a ball's top-left corner has reached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

/// True when the two rectangles share interior area
#[inline]
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    let (a_min, a_max) = (a.pos, a.max());
    let (b_min, b_max) = (b.pos, b.max());
    let separate = a_min.x >= b_max.x
        || a_max.x <= b_min.x
        || a_min.y >= b_max.y
        || a_max.y <= b_min.y;
    !separate
}

/// Check a ball against every playfield boundary
///
/// Each edge is tested independently; a tiny playfield can report both `left`
/// and `right` in the same frame.
pub fn wall_contact(ball: &Rect, playfield: Playfield, settings: &Settings) -> WallContact {
    let x = ball.pos.x;
    let y = ball.pos.y;
    WallContact {
        right: x >= playfield.width() - settings.border - settings.ball_size,
        left: x <= settings.border,
        bottom: y >= playfield.height() - settings.border - settings.ball_size,
        top: y <= settings.menu_bar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Color;

    fn rect(x: i32, y: i32, w: i32, h: i32) -> Rect {
        Rect::new(x, y, w, h, Color::WHITE)
    }

    #[test]
    fn test_overlap() {
        let a = rect(0, 0, 10, 10);
        assert!(aabb_overlap(&a, &rect(5, 5, 10, 10)));
        assert!(aabb_overlap(&a, &rect(2, 2, 2, 2)));
        assert!(aabb_overlap(&rect(2, 2, 2, 2), &a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = rect(0, 0, 10, 10);
        assert!(!aabb_overlap(&a, &rect(10, 0, 10, 10)));
        assert!(!aabb_overlap(&a, &rect(0, 10, 10, 10)));
        assert!(!aabb_overlap(&a, &rect(-10, 0, 10, 10)));
    }

    #[test]
    fn test_disjoint() {
        assert!(!aabb_overlap(&rect(0, 0, 10, 10), &rect(50, 50, 5, 5)));
    }

    #[test]
    fn test_wall_contact_boundaries_inclusive() {
        let settings = Settings::default();
        let field = Playfield::new(600, 800).unwrap();

        // 600 - 6 - 15
        let right = wall_contact(&rect(579, 300, 15, 15), field, &settings);
        assert!(right.right && !right.left);
        let short = wall_contact(&rect(578, 300, 15, 15), field, &settings);
        assert!(!short.right);

        let left = wall_contact(&rect(6, 300, 15, 15), field, &settings);
        assert!(left.left);
        assert!(!wall_contact(&rect(7, 300, 15, 15), field, &settings).left);

        // 800 - 6 - 15
        assert!(wall_contact(&rect(300, 779, 15, 15), field, &settings).bottom);
        assert!(!wall_contact(&rect(300, 778, 15, 15), field, &settings).bottom);

        assert!(wall_contact(&rect(300, 40, 15, 15), field, &settings).top);
        assert!(!wall_contact(&rect(300, 41, 15, 15), field, &settings).top);
    }

    #[test]
    fn test_narrow_field_reports_both_sides() {
        let settings = Settings::default();
        let field = Playfield::new(20, 800).unwrap();
        let contact = wall_contact(&rect(5, 300, 15, 15), field, &settings);
        assert!(contact.left && contact.right);
    }
}
