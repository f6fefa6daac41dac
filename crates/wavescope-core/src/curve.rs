//! Centripetal Catmull-Rom smoothing for polylines.

use glam::Vec3;

/// Sample `divisions + 1` points along a centripetal Catmull-Rom spline
/// through `points`, at evenly spaced curve parameters.
///
/// The curve passes through every control point. Open ends use phantom
/// points reflected from the neighbouring segment.
pub fn catmull_rom(points: &[Vec3], divisions: usize) -> Vec<Vec3> {
    if points.len() < 2 {
        return points.to_vec();
    }
    if divisions == 0 {
        return vec![points[0]];
    }
    (0..=divisions)
        .map(|d| point_at(points, d as f32 / divisions as f32))
        .collect()
}

fn point_at(points: &[Vec3], t: f32) -> Vec3 {
    let l = points.len();
    let p = (l - 1) as f32 * t;
    let mut seg = p.floor() as usize;
    let mut weight = p - seg as f32;
    if seg >= l - 1 {
        seg = l - 2;
        weight = 1.0;
    }

    let p1 = points[seg];
    let p2 = points[seg + 1];
    let p0 = if seg > 0 {
        points[seg - 1]
    } else {
        2.0 * points[0] - points[1]
    };
    let p3 = if seg + 2 < l {
        points[seg + 2]
    } else {
        2.0 * points[l - 1] - points[l - 2]
    };

    // Centripetal parameterisation: knot spacing is sqrt of chord length.
    let mut dt0 = p0.distance_squared(p1).powf(0.25);
    let mut dt1 = p1.distance_squared(p2).powf(0.25);
    let mut dt2 = p2.distance_squared(p3).powf(0.25);
    if dt1 < 1e-4 {
        dt1 = 1.0;
    }
    if dt0 < 1e-4 {
        dt0 = dt1;
    }
    if dt2 < 1e-4 {
        dt2 = dt1;
    }

    let axis = |x0: f32, x1: f32, x2: f32, x3: f32| {
        let t1 = ((x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1) * dt1;
        let t2 = ((x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2) * dt1;
        hermite(x1, x2, t1, t2, weight)
    };
    Vec3::new(
        axis(p0.x, p1.x, p2.x, p3.x),
        axis(p0.y, p1.y, p2.y, p3.y),
        axis(p0.z, p1.z, p2.z, p3.z),
    )
}

#[inline]
fn hermite(x0: f32, x1: f32, t0: f32, t1: f32, s: f32) -> f32 {
    let c2 = -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1;
    let c3 = 2.0 * x0 - 2.0 * x1 + t0 + t1;
    x0 + t0 * s + c2 * s * s + c3 * s * s * s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_requested_point_count() {
        let pts = [Vec3::ZERO, Vec3::X, Vec3::new(2.0, 1.0, 0.0)];
        assert_eq!(catmull_rom(&pts, 12).len(), 13);
    }

    #[test]
    fn passes_through_control_points() {
        let pts: Vec<Vec3> = (0..5)
            .map(|i| Vec3::new(i as f32, ((i * 7) % 3) as f32, 0.5))
            .collect();
        let out = catmull_rom(&pts, 16);
        // 16 divisions over 4 segments: every 4th sample is a knot.
        for (k, p) in pts.iter().enumerate() {
            assert!(out[k * 4].distance(*p) < 1e-4, "knot {k}");
        }
    }

    #[test]
    fn straight_input_stays_straight() {
        let pts: Vec<Vec3> = (0..4).map(|i| Vec3::new(i as f32, 0.0, -1.0)).collect();
        for p in catmull_rom(&pts, 20) {
            assert!(p.y.abs() < 1e-5);
            assert!((p.z + 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn degenerate_inputs() {
        assert!(catmull_rom(&[], 8).is_empty());
        assert_eq!(catmull_rom(&[Vec3::ONE], 8), vec![Vec3::ONE]);
        assert_eq!(catmull_rom(&[Vec3::ZERO, Vec3::ONE], 0), vec![Vec3::ZERO]);
    }
}
