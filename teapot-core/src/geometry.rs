/// Geometry primitives and the model vertex list
use std::fs;
use std::path::Path;

use nalgebra::{Matrix4, Point2, Vector3, Vector4};

use crate::error::{Error, Result};
use crate::{stl, teapot, vertex_file};

pub type Vec3 = Vector3<f64>;
/// Homogeneous point. Model vertices always carry `w = 1`.
pub type Vec4 = Vector4<f64>;
/// Column-major 4x4 matrix. nalgebra indexes it as `m[(row, col)]`.
pub type Mat4 = Matrix4<f64>;
/// Normalized device coordinate of a point that survived clipping.
pub type Ndc = Point2<f64>;

/// Lift a model-space position to a homogeneous point
pub fn point(x: f64, y: f64, z: f64) -> Vec4 {
    Vec4::new(x, y, z, 1.0)
}

/// A point-cloud model: the ordered list of model-space vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub vertices: Vec<Vec4>,
}

impl Model {
    pub fn new(vertices: Vec<Vec4>) -> Self {
        Self { vertices }
    }

    /// Wrap a constant list of `(x, y, z)` triples
    pub fn from_points(points: &[[f64; 3]]) -> Self {
        Self::new(points.iter().map(|&[x, y, z]| point(x, y, z)).collect())
    }

    /// The built-in teapot
    pub fn teapot() -> Self {
        Self::new(teapot::vertices())
    }

    /// Load a model from disk.
    ///
    /// `.stl` files go through the STL reader; anything else is read as a
    /// line-oriented vertex list.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| Error::ModelLoad {
            path: path.to_path_buf(),
            source,
        })?;

        let is_stl = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("stl"));

        let model = if is_stl {
            Self::new(stl::parse_stl(&data)?)
        } else {
            let text = String::from_utf8_lossy(&data);
            Self::new(vertex_file::parse_vertices(&text))
        };

        log::info!("loaded {} vertices from {}", model.len(), path.display());
        if let Some((min, max)) = model.bounds() {
            log::debug!(
                "model bounds ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
                min.x, min.y, min.z, max.x, max.y, max.z
            );
        }
        Ok(model)
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Axis-aligned bounding box as `(min, max)`, or `None` for an empty model
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = self.vertices.first()?.xyz();
        Some(self.vertices.iter().fold((first, first), |(min, max), v| {
            let p = v.xyz();
            (min.inf(&p), max.sup(&p))
        }))
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::teapot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_sets_w() {
        let model = Model::from_points(&[[1.0, 2.0, 3.0], [-1.0, 0.0, 0.5]]);
        assert_eq!(model.len(), 2);
        assert!(model.vertices.iter().all(|v| v.w == 1.0));
        assert_eq!(model.vertices[1], Vec4::new(-1.0, 0.0, 0.5, 1.0));
    }

    #[test]
    fn test_bounds() {
        let model = Model::from_points(&[[1.0, -2.0, 3.0], [-1.0, 4.0, 0.5], [0.0, 0.0, -6.0]]);
        let (min, max) = model.bounds().unwrap();
        assert_eq!(min, Vec3::new(-1.0, -2.0, -6.0));
        assert_eq!(max, Vec3::new(1.0, 4.0, 3.0));
        assert!(Model::new(Vec::new()).bounds().is_none());
    }
}
