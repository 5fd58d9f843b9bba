//! # lsystem-plotter
//!
//! Grows branching fractal figures from L-System grammars and plots them onto a
//! toroidally wrapped raster.
//!
//! A [`Program`] (axiom, [`RuleTable`], generation count, turn increment) is expanded by
//! the grammar engine into a flat command sequence. The [`TurtleInterpreter`] replays that
//! sequence one command at a time, sending segments to a [`ToroidalCanvas`] and recording
//! visited points in a [`PointRecorder`] for a separate rendering pass. [`Session`] owns all
//! of it and handles atomic program reloads.

pub mod canvas;
pub mod config;
pub mod error;
pub mod grammar;
pub mod interpreter;
pub mod program;
pub mod recorder;
pub mod session;
pub mod turtle;

pub use canvas::*;
pub use config::*;
pub use error::*;
pub use grammar::*;
pub use interpreter::*;
pub use program::*;
pub use recorder::*;
pub use session::*;
pub use turtle::*;
