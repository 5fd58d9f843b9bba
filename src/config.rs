//! Plotter-wide configuration.

use crate::grammar::GrammarEngine;
use crate::turtle::TurtleConfig;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Configuration for a plotting [`Session`](crate::Session).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotterConfig {
    /// Width `W` of the toroidal canvas in pixels.
    pub canvas_width: usize,
    /// Height `H` of the toroidal canvas in pixels.
    pub canvas_height: usize,
    /// Step length `d` for forward moves.
    pub step: f32,
    /// Heading in degrees the turtle is reset to on every load.
    pub initial_heading: f32,
    /// Start position on every load. `None` means the canvas centre.
    pub initial_position: Option<Vec2>,
    /// Maximum number of symbols a single generation may expand to.
    pub max_symbols: usize,
    /// Maximum generation count a program may request.
    pub max_generations: u32,
    /// Maximum number of saved turtle states on the push/pop stack.
    pub max_stack_depth: usize,
    /// Restart replay at the first command once the last one has run.
    pub looping: bool,
}

impl Default for PlotterConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1500,
            canvas_height: 1500,
            step: 5.0,
            initial_heading: 270.0,
            initial_position: None,
            max_symbols: GrammarEngine::default().max_symbols,
            max_generations: GrammarEngine::default().max_generations,
            max_stack_depth: TurtleConfig::default().max_stack_depth,
            looping: true,
        }
    }
}

impl PlotterConfig {
    pub fn origin(&self) -> Vec2 {
        self.initial_position.unwrap_or(Vec2::new(
            self.canvas_width as f32 / 2.0,
            self.canvas_height as f32 / 2.0,
        ))
    }

    /// Interpreter parameters for a program turning by `delta` degrees.
    pub fn turtle(&self, delta: f32) -> TurtleConfig {
        TurtleConfig {
            step: self.step,
            delta,
            initial_heading: self.initial_heading,
            initial_position: self.origin(),
            max_stack_depth: self.max_stack_depth,
        }
    }

    pub fn grammar(&self) -> GrammarEngine {
        GrammarEngine::new(self.max_symbols).with_max_generations(self.max_generations)
    }
}
