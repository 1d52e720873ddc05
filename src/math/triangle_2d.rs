use crate::math::Point2;

/// Signed area of triangle `(a, b, c)`; positive for counter-clockwise winding.
#[must_use]
pub fn signed_area(a: Point2, b: Point2, c: Point2) -> f64 {
    0.5 * ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y))
}

/// Unsigned area of triangle `(a, b, c)`.
#[must_use]
pub fn area(a: Point2, b: Point2, c: Point2) -> f64 {
    signed_area(a, b, c).abs()
}

/// Tests whether `p` lies inside (or on the boundary of) triangle `(a, b, c)`.
///
/// Works for either winding by comparing the signs of the three sub-areas.
#[must_use]
pub fn contains_point(a: Point2, b: Point2, c: Point2, p: Point2) -> bool {
    let d1 = signed_area(p, a, b);
    let d2 = signed_area(p, b, c);
    let d3 = signed_area(p, c, a);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn signed_area_is_positive_for_ccw() {
        let a = signed_area(p(0.0, 0.0), p(2.0, 0.0), p(0.0, 2.0));
        assert!((a - 2.0).abs() < 1e-12, "area = {a}");

        let a = signed_area(p(0.0, 0.0), p(0.0, 2.0), p(2.0, 0.0));
        assert!((a + 2.0).abs() < 1e-12, "area = {a}");
    }

    #[test]
    fn area_is_winding_independent() {
        let ccw = area(p(0.0, 0.0), p(3.0, 0.0), p(0.0, 4.0));
        let cw = area(p(0.0, 0.0), p(0.0, 4.0), p(3.0, 0.0));
        assert!((ccw - 6.0).abs() < 1e-12);
        assert!((cw - 6.0).abs() < 1e-12);
    }

    #[test]
    fn contains_interior_and_rejects_exterior() {
        let (a, b, c) = (p(0.0, 0.0), p(4.0, 0.0), p(0.0, 4.0));
        assert!(contains_point(a, b, c, p(1.0, 1.0)));
        assert!(contains_point(a, b, c, p(2.0, 0.0))); // on an edge
        assert!(!contains_point(a, b, c, p(3.0, 3.0)));
        assert!(!contains_point(a, b, c, p(-0.1, 0.5)));
    }

    #[test]
    fn contains_works_for_clockwise_winding() {
        let (a, b, c) = (p(0.0, 0.0), p(0.0, 4.0), p(4.0, 0.0));
        assert!(contains_point(a, b, c, p(1.0, 1.0)));
        assert!(!contains_point(a, b, c, p(5.0, 5.0)));
    }
}
