/// Teapot Core Library - transform pipeline shared by the terminal and window frontends
///
/// This library provides matrix builders, clip-space projection of point
/// clouds, model loading, the fixed-step animation loop and configuration.

pub mod animation;
pub mod config;
pub mod error;
pub mod geometry;
pub mod projection;
pub mod stl;
pub mod teapot;
pub mod transform;
pub mod vertex_file;

// Re-export commonly used types
pub use animation::{DisplaySink, FrameLoop, LoopState, Pacing};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use geometry::{Mat4, Model, Ndc, Vec3, Vec4};
pub use projection::{clip_to_ndc, ndc_to_cell, Frustum, Projector};
pub use transform::{SceneState, Transform};
