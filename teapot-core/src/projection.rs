/// Clip-space projection of model vertices to normalized device coordinates
use crate::geometry::{Mat4, Ndc, Vec4};
use crate::transform::Transform;

/// Perspective frustum parameters. `fov_y` is in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub fov_y: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Frustum {
    pub fn new(fov_y: f64, aspect: f64, near: f64, far: f64) -> Self {
        Self {
            fov_y,
            aspect,
            near,
            far,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Transform::projection_matrix(self.fov_y, self.aspect, self.near, self.far)
    }
}

impl Default for Frustum {
    fn default() -> Self {
        Self::new(45f64.to_radians(), 1.0, 0.1, 100.0)
    }
}

/// Divide a clip-space point by `w` and keep it only if it lands inside the
/// canonical view volume `[-1, 1]^3`, bounds included.
///
/// `w == 0` produces infinities or NaN, which fail the range test.
pub fn clip_to_ndc(clip: &Vec4) -> Option<Ndc> {
    let x = clip.x / clip.w;
    let y = clip.y / clip.w;
    let z = clip.z / clip.w;

    let inside = |c: f64| (-1.0..=1.0).contains(&c);
    if inside(x) && inside(y) && inside(z) {
        Some(Ndc::new(x, y))
    } else {
        None
    }
}

/// Map an NDC point onto a `width` x `height` grid of cells.
///
/// `(-1, -1)` is cell `(0, 0)` and `(1, 1)` is `(width - 1, height - 1)`.
/// Rounding the closed upper edge gives exactly `width` (or `height`), which
/// is folded onto the last cell; anything further out is dropped.
pub fn ndc_to_cell(point: &Ndc, width: usize, height: usize) -> Option<(usize, usize)> {
    Some((
        axis_to_cell(point.x, width)?,
        axis_to_cell(point.y, height)?,
    ))
}

fn axis_to_cell(value: f64, extent: usize) -> Option<usize> {
    if extent == 0 {
        return None;
    }
    let cell = (extent as f64 * (value + 1.0) / 2.0).round();
    if !(0.0..=extent as f64).contains(&cell) {
        return None;
    }
    Some((cell as usize).min(extent - 1))
}

/// Projects vertex lists with a fixed view and projection.
///
/// `projection * view` is multiplied once; each frame only the model matrix
/// is folded in.
#[derive(Debug, Clone)]
pub struct Projector {
    view_projection: Mat4,
}

impl Projector {
    pub fn new(view: &Mat4, projection: &Mat4) -> Self {
        Self {
            view_projection: projection * view,
        }
    }

    pub fn from_frustum(frustum: &Frustum) -> Self {
        Self::new(&Transform::view_matrix(), &frustum.projection_matrix())
    }

    /// Full model-view-projection matrix for one frame
    pub fn mvp(&self, model: &Mat4) -> Mat4 {
        self.view_projection * model
    }

    /// Project every vertex, keeping survivors in input order
    pub fn project(&self, model: &Mat4, vertices: &[Vec4]) -> Vec<Ndc> {
        let mvp = self.mvp(model);
        vertices
            .iter()
            .filter_map(|v| clip_to_ndc(&(mvp * v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{point, Vec3};

    #[test]
    fn test_origin_survives() {
        let ndc = clip_to_ndc(&Vec4::new(0.0, 0.0, 0.0, 1.0)).unwrap();
        assert_eq!(ndc, Ndc::new(0.0, 0.0));
    }

    #[test]
    fn test_zero_w_is_dropped() {
        assert!(clip_to_ndc(&Vec4::new(0.0, 0.0, 0.0, 0.0)).is_none());
        assert!(clip_to_ndc(&Vec4::new(0.5, 0.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_boundary_is_inclusive() {
        assert!(clip_to_ndc(&Vec4::new(1.0, -1.0, 1.0, 1.0)).is_some());
        assert!(clip_to_ndc(&Vec4::new(1.0000001, 0.0, 0.0, 1.0)).is_none());
        assert!(clip_to_ndc(&Vec4::new(0.0, 0.0, -1.0000001, 1.0)).is_none());
    }

    #[test]
    fn test_divides_by_w() {
        let ndc = clip_to_ndc(&Vec4::new(1.0, -0.5, 0.2, 2.0)).unwrap();
        assert_eq!(ndc, Ndc::new(0.5, -0.25));
        // Negative w flips signs before the range test.
        assert!(clip_to_ndc(&Vec4::new(3.0, 0.0, 0.0, -2.0)).is_none());
    }

    #[test]
    fn test_nan_is_dropped() {
        assert!(clip_to_ndc(&Vec4::new(f64::NAN, 0.0, 0.0, 1.0)).is_none());
    }

    #[test]
    fn test_cell_corners() {
        let (w, h) = (640, 480);
        assert_eq!(ndc_to_cell(&Ndc::new(-1.0, -1.0), w, h), Some((0, 0)));
        assert_eq!(ndc_to_cell(&Ndc::new(1.0, 1.0), w, h), Some((w - 1, h - 1)));
        assert_eq!(ndc_to_cell(&Ndc::new(0.0, 0.0), w, h), Some((320, 240)));
    }

    #[test]
    fn test_cell_out_of_range_dropped() {
        assert_eq!(ndc_to_cell(&Ndc::new(1.5, 0.0), 120, 40), None);
        assert_eq!(ndc_to_cell(&Ndc::new(0.0, -1.2), 120, 40), None);
        assert_eq!(ndc_to_cell(&Ndc::new(f64::NAN, 0.0), 120, 40), None);
        assert_eq!(ndc_to_cell(&Ndc::new(0.0, 0.0), 0, 40), None);
    }

    #[test]
    fn test_project_keeps_order_and_drops_outside() {
        let projector = Projector::from_frustum(&Frustum::default());
        let model = Transform::model_matrix(&Vec3::new(0.0, 0.0, -5.0), 0.0);
        let vertices = [
            point(0.5, 0.0, 0.0),
            point(100.0, 0.0, 0.0),
            point(0.0, 0.0, 10.0),
            point(-0.5, 0.0, 0.0),
        ];
        let ndc = projector.project(&model, &vertices);
        assert_eq!(ndc.len(), 2);
        assert!(ndc[0].x > 0.0);
        assert!(ndc[1].x < 0.0);
    }

    #[test]
    fn test_cached_product_matches_full_chain() {
        let frustum = Frustum::default();
        let projector = Projector::from_frustum(&frustum);
        let model = Transform::model_matrix(&Vec3::new(0.3, -2.0, -8.0), 1.1);
        let full = Transform::mvp_matrix(
            &model,
            &Transform::view_matrix(),
            &frustum.projection_matrix(),
        );
        assert!((projector.mvp(&model) - full).norm() < 1e-12);
    }
}
