//! In-memory surface that records every command.
//!
//! Used by tests to assert on what a model drew, and by the CLI to serialize
//! a drawing as JSON.

use super::{DisplaySurface, RenderCommand};

/// Records the commands issued since the last `clear`.
#[derive(Debug, Clone)]
pub struct CommandRecorder {
    width: f64,
    height: f64,
    commands: Vec<RenderCommand>,
    clears: usize,
}

impl CommandRecorder {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            clears: 0,
        }
    }

    /// Commands recorded since the last clear.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Number of times the surface was cleared.
    #[must_use]
    pub const fn clears(&self) -> usize {
        self.clears
    }

    /// Text of every label drawn.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Count commands matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&RenderCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| predicate(c)).count()
    }
}

impl Default for CommandRecorder {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl DisplaySurface for CommandRecorder {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn execute(&mut self, command: RenderCommand) {
        if matches!(command, RenderCommand::Clear) {
            self.commands.clear();
            self.clears += 1;
        }
        self.commands.push(command);
    }
}
