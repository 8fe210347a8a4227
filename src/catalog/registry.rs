use std::sync::{Arc, OnceLock};

use crate::error::ValidationError;

use super::BenchCommand;
use super::builtins;

#[derive(Clone)]
pub struct CommandRegistry {
    commands: Vec<Arc<dyn BenchCommand>>,
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.names())
            .finish()
    }
}

impl CommandRegistry {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for builtin in builtins::builtins() {
            if let Err(err) = registry.register(builtin) {
                tracing::warn!("Skipping duplicate builtin command: {}", err);
            }
        }
        registry
    }

    /// Registers a command strategy under its own name.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCommand` when a command with the same name is already
    /// registered.
    pub fn register<C>(&mut self, command: C) -> Result<(), ValidationError>
    where
        C: BenchCommand + 'static,
    {
        let name = command.name();
        if self.contains(name) {
            return Err(ValidationError::DuplicateCommand {
                name: name.to_owned(),
            });
        }
        self.commands.push(Arc::new(command));
        Ok(())
    }

    /// Looks a command up by name, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn BenchCommand>> {
        let name = name.trim();
        self.commands
            .iter()
            .find(|command| command.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Same as [`CommandRegistry::get`] but reports unknown names as a
    /// configuration error.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCommand` listing the supported names.
    pub fn lookup(&self, name: &str) -> Result<Arc<dyn BenchCommand>, ValidationError> {
        self.get(name)
            .ok_or_else(|| ValidationError::UnknownCommand {
                name: name.to_owned(),
                supported: self.names().join(", "),
            })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> =
            self.commands.iter().map(|command| command.name()).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

pub fn command_registry() -> &'static CommandRegistry {
    static REGISTRY: OnceLock<CommandRegistry> = OnceLock::new();
    REGISTRY.get_or_init(CommandRegistry::with_builtins)
}
