//! Application configuration
//!
//! Configuration is layered with the following priority (lowest to highest):
//! 1. Built-in defaults
//! 2. An optional TOML file passed on the command line
//! 3. Environment variables (`TEAPOT_SECTION__KEY`)

use std::f64::consts::TAU;
use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::animation::{FrameLoop, Pacing};
use crate::error::{Error, Result};
use crate::geometry::{Model, Vec3};
use crate::projection::{Frustum, Projector};
use crate::transform::SceneState;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scene: SceneConfig,
    pub projection: ProjectionConfig,
    pub window: WindowConfig,
    pub terminal: TerminalConfig,
    pub model: ModelConfig,
}

impl AppConfig {
    /// Load configuration, optionally merging a TOML file over the defaults
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let config: Self = Self::figment(file)?.extract()?;
        config.validate()?;
        Ok(config)
    }

    fn figment(file: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        if let Some(path) = file {
            if !path.exists() {
                return Err(Error::ConfigNotFound(path.to_path_buf()));
            }
            figment = figment.merge(Toml::file(path));
        }

        // TEAPOT_SCENE__FPS=60 -> scene.fps = 60
        Ok(figment.merge(Env::prefixed("TEAPOT_").split("__")))
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(Error::InvalidConfig(msg.to_string()));

        if self.scene.fps == 0 {
            return invalid("scene.fps must be at least 1");
        }
        let p = &self.projection;
        if !(p.near > 0.0 && p.far > p.near) {
            return invalid("projection planes must satisfy 0 < near < far");
        }
        if !(p.aspect > 0.0) {
            return invalid("projection.aspect must be positive");
        }
        let fov = p.fov_y_radians();
        if !(fov > 0.0 && fov.is_finite()) {
            return invalid("projection.fov_y must be positive and finite");
        }
        if self.window.width == 0 || self.window.height == 0 {
            return invalid("window size must be non-zero");
        }
        if self.terminal.columns == 0 || self.terminal.rows == 0 {
            return invalid("terminal grid must be non-zero");
        }
        Ok(())
    }

    /// One-line description of the resolved settings, for the startup log
    pub fn summary(&self) -> String {
        let [x, y, z] = self.scene.translation;
        format!(
            "{} fps, {:?} pacing, fov_y {} {:?} ({:.4} rad), translation ({}, {}, {})",
            self.scene.fps,
            self.scene.pacing,
            self.projection.fov_y,
            self.projection.fov_unit,
            self.projection.fov_y_radians(),
            x,
            y,
            z
        )
    }

    /// Pick the model: an explicit path wins over `model.path`, and with
    /// neither the built-in teapot is used.
    pub fn load_model(&self, path: Option<&Path>) -> Result<Model> {
        match path.or(self.model.path.as_deref()) {
            Some(path) => Model::load(path),
            None => {
                let model = Model::teapot();
                log::info!("using built-in teapot ({} vertices)", model.len());
                Ok(model)
            }
        }
    }

    /// Assemble the frame loop for `model` from these settings
    pub fn frame_loop(&self, model: Model) -> FrameLoop {
        let projector = Projector::from_frustum(&self.projection.frustum());
        FrameLoop::new(model, projector, SceneState::new(self.scene.translation()))
            .with_angle_delta(self.scene.angle_delta())
            .with_frame_interval(self.scene.frame_interval())
            .with_pacing(self.scene.pacing)
    }
}

/// Placement and spin of the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Model translation `[x, y, z]`
    pub translation: [f64; 3],
    /// Target frames per second
    pub fps: u32,
    /// Full turns per second at the target frame rate
    pub revs_per_second: f64,
    pub pacing: Pacing,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            translation: [0.0, -2.0, -8.0],
            fps: 30,
            revs_per_second: 1.0,
            pacing: Pacing::Fixed,
        }
    }
}

impl SceneConfig {
    pub fn translation(&self) -> Vec3 {
        Vec3::from(self.translation)
    }

    /// `1000 / fps` whole milliseconds
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps.max(1)))
    }

    /// Radians per frame
    pub fn angle_delta(&self) -> f64 {
        (TAU / f64::from(self.fps.max(1))) * self.revs_per_second
    }
}

/// Unit of `projection.fov_y`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FovUnit {
    #[default]
    Degrees,
    /// Hand the number to `tan` unconverted.
    Radians,
}

/// Perspective frustum settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Vertical field of view
    pub fov_y: f64,
    pub fov_unit: FovUnit,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_y: 45.0,
            fov_unit: FovUnit::Degrees,
            aspect: 1.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl ProjectionConfig {
    pub fn fov_y_radians(&self) -> f64 {
        match self.fov_unit {
            FovUnit::Degrees => self.fov_y.to_radians(),
            FovUnit::Radians => self.fov_y,
        }
    }

    pub fn frustum(&self) -> Frustum {
        Frustum::new(self.fov_y_radians(), self.aspect, self.near, self.far)
    }
}

/// Pixel window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: usize,
    pub height: usize,
    /// Point color `[r, g, b]`
    pub color: [u8; 3],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Teapot".to_string(),
            width: 640,
            height: 480,
            color: [0, 255, 0],
        }
    }
}

impl WindowConfig {
    /// Color packed as `0x00RRGGBB`
    pub fn packed_color(&self) -> u32 {
        let [r, g, b] = self.color;
        (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
    }
}

/// Character grid settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    pub columns: usize,
    pub rows: usize,
    /// Character drawn for a lit cell
    pub glyph: char,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            columns: 120,
            rows: 40,
            glyph: '*',
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Vertex or STL file; the built-in teapot when unset
    pub path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.scene.translation, [0.0, -2.0, -8.0]);
        assert_eq!(config.scene.frame_interval(), Duration::from_millis(33));
        assert!((config.scene.angle_delta() - TAU / 30.0).abs() < 1e-12);
        assert_eq!(config.window.packed_color(), 0x00FF00);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fov_units() {
        let mut projection = ProjectionConfig::default();
        assert!((projection.fov_y_radians() - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
        projection.fov_unit = FovUnit::Radians;
        assert_eq!(projection.fov_y_radians(), 45.0);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[scene]\nfps = 60\npacing = \"compensated\"\n\n[projection]\nfov_unit = \"radians\"\n\n[terminal]\nglyph = \"@\""
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.scene.fps, 60);
        assert_eq!(config.scene.pacing, Pacing::Compensated);
        assert_eq!(config.projection.fov_unit, FovUnit::Radians);
        assert_eq!(config.terminal.glyph, '@');
        // Untouched keys keep their defaults.
        assert_eq!(config.scene.translation, [0.0, -2.0, -8.0]);
        assert_eq!(config.window.width, 640);
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/teapot.toml"))).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.projection.near = 0.0;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let mut config = AppConfig::default();
        config.scene.fps = 0;
        assert!(config.validate().is_err());

        for fov_y in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let mut config = AppConfig::default();
            config.projection.fov_y = fov_y;
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfig(_))),
                "fov_y {fov_y} accepted"
            );
        }
    }

    #[test]
    fn test_summary() {
        let summary = AppConfig::default().summary();
        assert!(summary.contains("30 fps"));
        assert!(summary.contains("Fixed pacing"));
        assert!(summary.contains("fov_y 45 Degrees (0.7854 rad)"));
    }

    #[test]
    fn test_frame_loop_from_config() {
        let config = AppConfig::default();
        let frame_loop = config.frame_loop(Model::from_points(&[[0.0, 0.0, 0.0]]));
        assert_eq!(frame_loop.scene().translation, Vec3::new(0.0, -2.0, -8.0));
        assert_eq!(frame_loop.project().len(), 1);
    }
}
