//! Turtle state and parameters for planar interpretation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Parameters of the plotting turtle.
///
/// `step` and `delta` may be changed between steps without reloading the program.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleConfig {
    /// Step length `d` used by forward moves.
    pub step: f32,
    /// Turn increment in degrees.
    pub delta: f32,
    /// Heading (degrees) the turtle starts with after every load.
    pub initial_heading: f32,
    /// Position the turtle starts at after every load.
    pub initial_position: Vec2,
    /// Pushes beyond this many saved states fail with
    /// [`StackOverflow`](crate::PlotterError::StackOverflow).
    pub max_stack_depth: usize,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            step: 5.0,
            delta: 25.7,
            initial_heading: 270.0, // Straight up in screen space (y grows downward)
            initial_position: Vec2::new(750.0, 750.0),
            max_stack_depth: 1024,
        }
    }
}

/// The state of the plotting turtle.
///
/// The position is unbounded: it keeps growing as the turtle walks and is only wrapped
/// when a segment reaches the canvas. Saved copies on the stack are independent values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    pub position: Vec2,
    /// Heading in degrees. Not normalized.
    pub heading: f32,
}

impl TurtleState {
    pub fn new(position: Vec2, heading: f32) -> Self {
        Self { position, heading }
    }

    /// Unit vector `(cos, sin)` of the heading.
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.heading.to_radians())
    }

    /// Position one step of length `step` ahead.
    pub fn advanced(&self, step: f32) -> Vec2 {
        self.position + self.direction() * step
    }

    /// Rotates the heading by `degrees` (positive is a left turn).
    pub fn turn(&mut self, degrees: f32) {
        self.heading += degrees;
    }

    /// Heading folded into `[0, 360)`.
    pub fn normalized_heading(&self) -> f32 {
        self.heading.rem_euclid(360.0)
    }
}

impl From<&TurtleConfig> for TurtleState {
    fn from(config: &TurtleConfig) -> Self {
        Self::new(config.initial_position, config.initial_heading)
    }
}
