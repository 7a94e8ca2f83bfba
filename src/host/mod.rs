//! Host Surface
//!
//! The host instance handed to every extension's setup hook. The command
//! dispatch framework and chat-platform relaying are external collaborators;
//! the host accumulates the command specifications extensions declare and
//! hands them to that framework.

use crate::extension::modes::RunMode;

/// A command surface declared by an extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: String,
    pub summary: String,
}

/// Shared host state extensions register into during startup.
#[derive(Debug)]
pub struct HostContext {
    active_mode: RunMode,
    commands: Vec<CommandSpec>,
}

impl HostContext {
    pub fn new(active_mode: RunMode) -> Self {
        Self {
            active_mode,
            commands: Vec::new(),
        }
    }

    /// The process-wide active mode, fixed at startup.
    pub fn active_mode(&self) -> RunMode {
        self.active_mode
    }

    /// Declare a command surface. The first declaration of a name wins;
    /// later duplicates are logged and dropped.
    pub fn register_command(&mut self, name: &str, summary: &str) {
        if self.commands.iter().any(|spec| spec.name == name) {
            log::warn!("command '{name}' is already declared; keeping the first declaration");
            return;
        }
        self.commands.push(CommandSpec {
            name: name.to_string(),
            summary: summary.to_string(),
        });
    }

    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }
}
