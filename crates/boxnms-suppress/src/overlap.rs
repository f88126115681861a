//! Intersection-over-Union between axis-aligned boxes

use boxnms_core::Detection;

/// Area shared by two boxes, never negative
pub fn intersection_area(a: &Detection, b: &Detection) -> f32 {
    let ix1 = a.x1.max(b.x1);
    let iy1 = a.y1.max(b.y1);
    let ix2 = a.x2.min(b.x2);
    let iy2 = a.y2.min(b.y2);

    (ix2 - ix1).max(0.0) * (iy2 - iy1).max(0.0)
}

/// Intersection over union of two boxes, in `[0, 1]`
///
/// Returns 0 when the union is empty, so zero-area boxes never divide by
/// zero. Symmetric in its arguments.
pub fn iou(a: &Detection, b: &Detection) -> f32 {
    let intersection = intersection_area(a, b);
    let union = a.area() + b.area() - intersection;

    if union > 0.0 {
        (intersection / union).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Overlap queries as methods on [`Detection`]
pub trait Overlap {
    fn iou(&self, other: &Detection) -> f32;

    /// Whether the overlap is strictly above `threshold`
    fn overlaps(&self, other: &Detection, threshold: f32) -> bool {
        self.iou(other) > threshold
    }
}

impl Overlap for Detection {
    fn iou(&self, other: &Detection) -> f32 {
        iou(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn det(x1: f32, y1: f32, x2: f32, y2: f32) -> Detection {
        Detection::new(x1, y1, x2, y2, 0.5)
    }

    #[test]
    fn test_iou_partial_overlap() {
        let a = det(0.0, 0.0, 10.0, 10.0);
        let b = det(5.0, 5.0, 15.0, 15.0);

        assert_relative_eq!(intersection_area(&a, &b), 25.0);
        assert_relative_eq!(iou(&a, &b), 25.0 / 175.0);
        assert_relative_eq!(iou(&a, &b), iou(&b, &a));
    }

    #[test]
    fn test_iou_identical_and_contained() {
        let a = det(150.0, 150.0, 250.0, 250.0);
        assert_relative_eq!(iou(&a, &a), 1.0);

        let inner = det(175.0, 175.0, 225.0, 225.0);
        assert_relative_eq!(iou(&a, &inner), 0.25);
    }

    #[test]
    fn test_iou_disjoint_and_touching() {
        let a = det(0.0, 0.0, 10.0, 10.0);
        assert_eq!(iou(&a, &det(20.0, 20.0, 30.0, 30.0)), 0.0);
        assert_eq!(iou(&a, &det(10.0, 0.0, 20.0, 10.0)), 0.0);
    }

    #[test]
    fn test_iou_degenerate_boxes() {
        let point = det(5.0, 5.0, 5.0, 5.0);
        assert_eq!(iou(&point, &point), 0.0);

        let inverted = det(10.0, 10.0, 0.0, 0.0);
        assert_eq!(iou(&inverted, &det(0.0, 0.0, 10.0, 10.0)), 0.0);
    }

    #[test]
    fn test_reference_overlaps() {
        let a = det(150.0, 150.0, 250.0, 250.0);
        let b = det(155.0, 148.0, 255.0, 248.0);
        let c = det(145.0, 152.0, 245.0, 252.0);

        assert_relative_eq!(a.iou(&b), 9310.0 / 10690.0, epsilon = 1e-6);
        assert!(a.overlaps(&b, 0.45));
        assert!(a.overlaps(&c, 0.45));
        assert!(!a.overlaps(&a, 1.0));
    }
}
