use gridpath_core::Point;

use crate::neighbors::Movement;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> f64 {
    f64::from((a.x - b.x).abs() + (a.y - b.y).abs())
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> f64 {
    f64::from((a.x - b.x).abs().max((a.y - b.y).abs()))
}

/// Straight-line (L2) distance between two points.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    let dx = f64::from(a.x - b.x);
    let dy = f64::from(a.y - b.y);
    dx.hypot(dy)
}

/// Octile distance: the cheapest 8-directional route on an open grid, with
/// orthogonal steps costing 1 and diagonal steps √2.
#[inline]
pub fn octile(a: Point, b: Point) -> f64 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    f64::from(dx.max(dy)) + (std::f64::consts::SQRT_2 - 1.0) * f64::from(dx.min(dy))
}

/// A remaining-cost estimator for heuristic searches.
///
/// The estimate must never exceed the true remaining cost under the movement
/// policy in use, otherwise the returned path may not be optimal. This is a
/// caller precondition and is not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    /// Always 0. Turns A* into Dijkstra.
    Zero,
    Manhattan,
    Euclidean,
    #[default]
    Octile,
}

impl Heuristic {
    /// The tightest admissible estimator for `movement`.
    pub fn for_movement(movement: Movement) -> Self {
        match movement {
            Movement::Cardinal => Self::Manhattan,
            Movement::Diagonal => Self::Octile,
        }
    }

    /// Estimated cost from `from` to `to`.
    #[inline]
    pub fn estimate(self, from: Point, to: Point) -> f64 {
        match self {
            Self::Zero => 0.0,
            Self::Manhattan => manhattan(from, to),
            Self::Euclidean => euclidean(from, to),
            Self::Octile => octile(from, to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::SQRT_2;

    const EPS: f64 = 1e-9;

    #[test]
    fn known_values() {
        let a = Point::new(0, 0);
        let b = Point::new(3, 4);
        assert_eq!(manhattan(a, b), 7.0);
        assert_eq!(chebyshev(a, b), 4.0);
        assert!((euclidean(a, b) - 5.0).abs() < EPS);
        assert!((octile(a, b) - (1.0 + 3.0 * SQRT_2)).abs() < EPS);
    }

    #[test]
    fn pure_diagonal_octile() {
        let d = octile(Point::new(1, 1), Point::new(5, 5));
        assert!((d - 4.0 * SQRT_2).abs() < EPS);
    }

    #[test]
    fn heuristic_per_movement() {
        assert_eq!(Heuristic::for_movement(Movement::Cardinal), Heuristic::Manhattan);
        assert_eq!(Heuristic::for_movement(Movement::Diagonal), Heuristic::Octile);
        assert_eq!(Heuristic::Zero.estimate(Point::new(0, 0), Point::new(9, 9)), 0.0);
    }

    proptest! {
        #[test]
        fn estimators_are_ordered(
            ax in -50i32..50, ay in -50i32..50,
            bx in -50i32..50, by in -50i32..50,
        ) {
            let a = Point::new(ax, ay);
            let b = Point::new(bx, by);
            // L∞ ≤ L2 ≤ octile ≤ L1
            prop_assert!(chebyshev(a, b) <= euclidean(a, b) + EPS);
            prop_assert!(euclidean(a, b) <= octile(a, b) + EPS);
            prop_assert!(octile(a, b) <= manhattan(a, b) + EPS);
        }

        #[test]
        fn octile_obeys_triangle_inequality(
            ax in -20i32..20, ay in -20i32..20,
            bx in -20i32..20, by in -20i32..20,
            cx in -20i32..20, cy in -20i32..20,
        ) {
            let a = Point::new(ax, ay);
            let b = Point::new(bx, by);
            let c = Point::new(cx, cy);
            prop_assert!((octile(a, a)).abs() < EPS);
            prop_assert!((octile(a, b) - octile(b, a)).abs() < EPS);
            prop_assert!(octile(a, c) <= octile(a, b) + octile(b, c) + EPS);
        }
    }
}
