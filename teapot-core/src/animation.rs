/// Fixed-step animation loop driving the projection pipeline
use std::thread;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{Model, Ndc};
use crate::projection::Projector;
use crate::transform::SceneState;

/// Whether the frame loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Environment-specific consumer of projected points
pub trait DisplaySink {
    /// Drain pending input or window events.
    fn pump(&mut self) -> Result<LoopState>;

    /// Show one frame worth of points, each in `[-1, 1]^2`.
    fn present(&mut self, points: &[Ndc]) -> Result<()>;
}

/// How the loop waits between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pacing {
    /// Sleep the whole frame interval regardless of how long the frame took.
    #[default]
    Fixed,
    /// Sleep only what is left of the interval after projecting and presenting.
    Compensated,
}

/// Owns the scene and steps it one frame at a time
pub struct FrameLoop {
    model: Model,
    projector: Projector,
    scene: SceneState,
    angle_delta: f64,
    frame_interval: Duration,
    pacing: Pacing,
}

impl FrameLoop {
    pub fn new(model: Model, projector: Projector, scene: SceneState) -> Self {
        Self {
            model,
            projector,
            scene,
            angle_delta: 0.0,
            frame_interval: Duration::ZERO,
            pacing: Pacing::Fixed,
        }
    }

    /// Radians added to the rotation after every presented frame
    pub fn with_angle_delta(mut self, delta: f64) -> Self {
        self.angle_delta = delta;
        self
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Points for the current scene state
    pub fn project(&self) -> Vec<Ndc> {
        self.projector
            .project(&self.scene.model_matrix(), &self.model.vertices)
    }

    /// Run one frame: pump, project, present, wait, then advance the angle.
    ///
    /// Returns `Stopped` without drawing when the sink asks to stop.
    pub fn tick<S: DisplaySink + ?Sized>(&mut self, sink: &mut S) -> Result<LoopState> {
        let frame_start = Instant::now();

        if sink.pump()? == LoopState::Stopped {
            return Ok(LoopState::Stopped);
        }

        let points = self.project();
        log::debug!(
            "frame {}: {} of {} vertices visible",
            self.scene.ticks,
            points.len(),
            self.model.len()
        );
        sink.present(&points)?;

        self.wait(frame_start.elapsed());
        self.scene.advance(self.angle_delta);
        Ok(LoopState::Running)
    }

    /// Tick until the sink stops; returns the number of frames presented.
    pub fn run<S: DisplaySink + ?Sized>(&mut self, sink: &mut S) -> Result<u64> {
        let mut frames = 0;
        while self.tick(sink)? == LoopState::Running {
            frames += 1;
        }
        Ok(frames)
    }

    fn wait(&self, elapsed: Duration) {
        let remaining = match self.pacing {
            Pacing::Fixed => self.frame_interval,
            Pacing::Compensated => self.frame_interval.saturating_sub(elapsed),
        };
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
    }
}
