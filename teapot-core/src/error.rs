/// Error types shared by the core pipeline and both frontends
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The platform window could not be created.
    #[error("failed to create window: {0}")]
    WindowInit(String),

    /// The model file could not be opened or read.
    #[error("failed to load model from {}", .path.display())]
    ModelLoad {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The model file was read but its contents are not a valid model.
    #[error("failed to parse model: {0}")]
    ModelParse(String),

    #[error("invalid configuration")]
    Config(#[from] figment::Error),

    #[error("config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Display output failed mid-loop.
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_model_load_names_path() {
        let err = Error::ModelLoad {
            path: PathBuf::from("models/teapot.obj"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        let msg = err.to_string();
        assert!(msg.contains("models/teapot.obj"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_window_init_display() {
        let err = Error::WindowInit("no display".to_string());
        assert_eq!(err.to_string(), "failed to create window: no display");
    }

    #[test]
    fn test_from_io_error() {
        let err: Error = io::Error::new(io::ErrorKind::BrokenPipe, "closed").into();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
    }
}
