//! Single-owner driver tying program, interpreter, canvas and recorded points together.

use crate::canvas::ToroidalCanvas;
use crate::config::PlotterConfig;
use crate::error::Result;
use crate::grammar::check_balance;
use crate::interpreter::{Step, TurtleInterpreter};
use crate::program::{Program, read_program_file};
use crate::recorder::PointRecorder;
use std::path::Path;
use tracing::{info, warn};

/// A loaded program being replayed onto a toroidal canvas.
///
/// Loads are atomic: the new program is parsed, validated and fully expanded before
/// anything is swapped in. On failure the previous program, its replay position and the
/// canvas are left untouched.
pub struct Session {
    config: PlotterConfig,
    program: Program,
    canvas: ToroidalCanvas,
    interpreter: TurtleInterpreter,
}

impl Session {
    /// Creates a session with [`Program::default`] loaded.
    pub fn new(config: PlotterConfig) -> Result<Self> {
        let canvas = ToroidalCanvas::new(config.canvas_width, config.canvas_height)?;
        let program = Program::default();
        let interpreter =
            TurtleInterpreter::new(config.turtle(program.delta)).with_looping(config.looping);
        let mut session = Self {
            config,
            program: program.clone(),
            canvas,
            interpreter,
        };
        session.load_program(program)?;
        Ok(session)
    }

    /// Expands `program` and, on success, makes it the active program.
    ///
    /// Resets turtle state, stack, recorded points and canvas.
    pub fn load_program(&mut self, program: Program) -> Result<()> {
        program.validate()?;
        let commands = program.expand(&self.config.grammar())?;

        match check_balance(&commands, &program.rules) {
            Ok(0) => {}
            Ok(open) => warn!(open, "program leaves pushes unclosed"),
            Err(e) => warn!(error = %e, "program is unbalanced, replay will halt"),
        }

        info!(
            generations = program.generations,
            axiom = program.axiom.len(),
            rules = program.rules.len(),
            commands = commands.len(),
            "program loaded"
        );

        self.interpreter.set_delta(program.delta);
        self.interpreter
            .set_origin(self.config.origin(), self.config.initial_heading);
        self.interpreter.load(commands, program.rules.clone());
        self.canvas.clear();
        self.program = program;
        Ok(())
    }

    /// Applies program text on top of the active program and loads the result.
    pub fn load_str(&mut self, text: &str) -> Result<()> {
        let program = self.program.apply(text).inspect_err(|e| {
            warn!(error = %e, "program rejected, keeping active program");
        })?;
        self.load_program(program)
    }

    /// Loads a program file. A missing file is reported as
    /// [`PlotterError::NotFound`](crate::PlotterError::NotFound) and changes nothing.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = read_program_file(path).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "cannot read program file");
        })?;
        self.load_str(&text)
    }

    /// Executes one command. Intended to be called once per external tick.
    pub fn tick(&mut self) -> Result<Step> {
        self.interpreter.advance(&mut self.canvas)
    }

    /// Executes the rest of the current pass in one call.
    pub fn run_pass(&mut self) -> Result<usize> {
        self.interpreter.run_pass(&mut self.canvas)
    }

    /// Changes the step length without reloading.
    pub fn set_step(&mut self, step: f32) {
        self.config.step = step;
        self.interpreter.set_step(step);
    }

    /// Changes the turn increment without reloading.
    pub fn set_delta(&mut self, delta: f32) {
        self.program.delta = delta;
        self.interpreter.set_delta(delta);
    }

    pub fn config(&self) -> &PlotterConfig {
        &self.config
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn canvas(&self) -> &ToroidalCanvas {
        &self.canvas
    }

    pub fn interpreter(&self) -> &TurtleInterpreter {
        &self.interpreter
    }

    pub fn points(&self) -> &PointRecorder {
        self.interpreter.points()
    }
}
