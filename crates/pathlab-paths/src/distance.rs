use pathlab_core::Point;

/// Manhattan (L1) distance between two points.
///
/// Admissible and consistent for 4-directional unit-cost moves, which is
/// what makes the first pop of the goal in [`AstarSearch`](crate::AstarSearch)
/// a shortest path.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
