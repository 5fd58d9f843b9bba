//! Interpreter that replays an expanded symbol sequence as turtle moves.
//!
//! The entry point is [`TurtleInterpreter`]. Configure it with a [`TurtleConfig`], hand it
//! a command sequence and the [`RuleTable`] that gives each symbol its [`Effect`] via
//! [`TurtleInterpreter::load`], then drive it with [`TurtleInterpreter::advance`] (one
//! command per external tick) or [`TurtleInterpreter::run_pass`]. Both produce the same
//! state and the same draw requests; pacing is the caller's business.

use crate::canvas::SegmentSink;
use crate::error::{PlotterError, Result};
use crate::grammar::{Effect, RuleTable, Symbol};
use crate::recorder::PointRecorder;
use crate::turtle::{TurtleConfig, TurtleState};
use glam::Vec2;

/// Outcome of a single [`TurtleInterpreter::advance`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// The command at `index` was executed.
    Executed {
        index: usize,
        symbol: Symbol,
        effect: Effect,
    },
    /// Nothing left to execute.
    Finished,
}

/// Replays commands against a [`TurtleState`] and a LIFO stack of saved states.
pub struct TurtleInterpreter {
    config: TurtleConfig,
    looping: bool,
    state: TurtleState,
    stack: Vec<TurtleState>,
    commands: Vec<Symbol>,
    rules: RuleTable,
    cursor: usize,
    pass: usize,
    recorder: PointRecorder,
}

impl TurtleInterpreter {
    /// Creates an interpreter with an empty program.
    pub fn new(config: TurtleConfig) -> Self {
        Self {
            state: TurtleState::from(&config),
            config,
            looping: false,
            stack: Vec::new(),
            commands: Vec::new(),
            rules: RuleTable::new(),
            cursor: 0,
            pass: 0,
            recorder: PointRecorder::new(),
        }
    }

    /// When enabled, replay starts over at the first command after the last one, keeping
    /// the current position and heading (builder pattern).
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Installs a new command sequence and resets state, stack, cursor and recorded points.
    pub fn load(&mut self, commands: Vec<Symbol>, rules: RuleTable) {
        self.commands = commands;
        self.rules = rules;
        self.reset();
    }

    /// Returns the turtle to its initial state without touching the loaded program.
    pub fn reset(&mut self) {
        self.state = TurtleState::from(&self.config);
        self.stack.clear();
        self.cursor = 0;
        self.pass = 0;
        self.recorder.clear();
    }

    /// Sets the step length used by subsequent forward moves.
    pub fn set_step(&mut self, step: f32) {
        self.config.step = step;
    }

    /// Sets the turn increment used by subsequent turns.
    pub fn set_delta(&mut self, delta: f32) {
        self.config.delta = delta;
    }

    /// Sets the start state used by the next [`load`](Self::load) or [`reset`](Self::reset).
    pub fn set_origin(&mut self, position: Vec2, heading: f32) {
        self.config.initial_position = position;
        self.config.initial_heading = heading;
    }

    /// Executes the next command.
    ///
    /// A failing command leaves the interpreter exactly as it was before the call, so the
    /// same error repeats until the program is reloaded.
    ///
    /// # Recording
    ///
    /// During the first pass the position after each executed command is appended to the
    /// point recorder. Later passes (with looping enabled) do not record.
    pub fn advance(&mut self, sink: &mut impl SegmentSink) -> Result<Step> {
        let (index, pass) = if self.cursor < self.commands.len() {
            (self.cursor, self.pass)
        } else if self.looping && !self.commands.is_empty() {
            (0, self.pass + 1)
        } else {
            return Ok(Step::Finished);
        };

        let symbol = self.commands[index];
        let effect = self
            .rules
            .effect_of(symbol)
            .ok_or(PlotterError::UnknownSymbol(symbol))?;

        match effect {
            Effect::Forward => {
                let from = self.state.position;
                let to = self.state.advanced(self.config.step);
                sink.draw_segment(from, to);
                self.state.position = to;
            }
            Effect::TurnLeft => self.state.turn(self.config.delta),
            Effect::TurnRight => self.state.turn(-self.config.delta),
            Effect::Push => {
                if self.stack.len() >= self.config.max_stack_depth {
                    return Err(PlotterError::StackOverflow {
                        index,
                        limit: self.config.max_stack_depth,
                    });
                }
                self.stack.push(self.state);
            }
            Effect::Pop => {
                self.state = self
                    .stack
                    .pop()
                    .ok_or(PlotterError::StackUnderflow { index })?;
            }
            Effect::NoOp => {}
        }

        if pass == 0 {
            self.recorder.record(self.state.position);
        }
        self.cursor = index + 1;
        self.pass = pass;

        Ok(Step::Executed {
            index,
            symbol,
            effect,
        })
    }

    /// Executes the remaining commands of the current pass and returns how many ran.
    ///
    /// Stops at the end of the sequence even when looping is enabled.
    pub fn run_pass(&mut self, sink: &mut impl SegmentSink) -> Result<usize> {
        let mut executed = 0;
        while self.cursor < self.commands.len() {
            self.advance(sink)?;
            executed += 1;
        }
        Ok(executed)
    }

    pub fn state(&self) -> &TurtleState {
        &self.state
    }

    pub fn config(&self) -> &TurtleConfig {
        &self.config
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Index of the next command to execute within the current pass.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of completed restarts since the last load.
    pub fn pass(&self) -> usize {
        self.pass
    }

    pub fn commands(&self) -> &[Symbol] {
        &self.commands
    }

    pub fn is_finished(&self) -> bool {
        !self.looping && self.cursor >= self.commands.len()
    }

    pub fn points(&self) -> &PointRecorder {
        &self.recorder
    }
}
