use nalgebra::{Point3, Vector3};

/// Below this length a vector has no usable direction.
pub const DIRECTION_EPSILON: f64 = 1e-12;

pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}

pub fn unit_direction(vector: &Vector3<f64>) -> Option<Vector3<f64>> {
    vector.try_normalize(DIRECTION_EPSILON)
}

/// Unit direction of `vector`, or `fallback` when the vector is (near) zero.
pub fn unit_direction_or(vector: &Vector3<f64>, fallback: Vector3<f64>) -> Vector3<f64> {
    unit_direction(vector).unwrap_or(fallback)
}

pub fn radius_of_gyration(points: &[Point3<f64>]) -> Option<f64> {
    let center = centroid(points)?;
    let mean_sq = points
        .iter()
        .map(|p| (p - center).norm_squared())
        .sum::<f64>()
        / points.len() as f64;
    Some(mean_sq.sqrt())
}

pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (a - b).norm()
}
