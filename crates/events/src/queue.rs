//! Command queue abstraction.
//!
//! The tracker never touches a page global directly. It appends to whatever
//! `CommandQueue` it was handed, which lets the core logic be tested without
//! a browser and lets several trackers share one queue.

use crate::command::Command;
use std::sync::{Arc, Mutex};

/// Append-only, ordered sequence of commands.
///
/// Implementations must preserve append order exactly: the vendor loader
/// replays commands in the order they were pushed.
pub trait CommandQueue: Send + Sync {
    /// Create the backing sequence if it does not exist yet.
    fn ensure_exists(&self) {}

    /// Append a command to the end of the queue.
    fn push(&self, command: Command);

    /// Number of commands currently in the queue.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Type alias for shared queue reference.
pub type CommandQueueRef = Arc<dyn CommandQueue>;

/// In-memory command queue.
///
/// Captures every pushed command for later inspection. Used by tests and by
/// headless runs where there is no page to drain the queue.
#[derive(Default)]
pub struct InMemoryQueue {
    commands: Mutex<Vec<Command>>,
}

impl InMemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// A queue that already holds entries, as if another script had
    /// initialized the page before us.
    pub fn with_commands(commands: Vec<Command>) -> Self {
        Self {
            commands: Mutex::new(commands),
        }
    }

    /// Snapshot of all queued commands, in order.
    pub fn commands(&self) -> Vec<Command> {
        self.commands
            .lock()
            .expect("command queue mutex poisoned")
            .clone()
    }

    /// Commands with the given name (`js`, `config`, `event`, ...).
    pub fn commands_named(&self, name: &str) -> Vec<Command> {
        self.commands
            .lock()
            .expect("command queue mutex poisoned")
            .iter()
            .filter(|c| c.name == name)
            .cloned()
            .collect()
    }

    /// `event` commands carrying the given event name.
    pub fn events_named(&self, event: &str) -> Vec<Command> {
        self.commands
            .lock()
            .expect("command queue mutex poisoned")
            .iter()
            .filter(|c| c.event_name() == Some(event))
            .cloned()
            .collect()
    }

    /// The most recently pushed command.
    pub fn last(&self) -> Option<Command> {
        self.commands
            .lock()
            .expect("command queue mutex poisoned")
            .last()
            .cloned()
    }
}

impl CommandQueue for InMemoryQueue {
    fn push(&self, command: Command) {
        self.commands
            .lock()
            .expect("command queue mutex poisoned")
            .push(command);
    }

    fn len(&self) -> usize {
        self.commands
            .lock()
            .expect("command queue mutex poisoned")
            .len()
    }
}

/// Queue that discards everything.
pub struct NullQueue;

impl CommandQueue for NullQueue {
    fn push(&self, _command: Command) {}

    fn len(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::EventParams;
    use chrono::Utc;

    #[test]
    fn test_in_memory_queue_preserves_order() {
        let queue = InMemoryQueue::new();
        assert!(queue.is_empty());

        queue.push(Command::js(Utc::now()));
        queue.push(Command::config("G-1", EventParams::new()));
        queue.push(Command::event("a", EventParams::new()));
        queue.push(Command::event("b", EventParams::new()));

        let names: Vec<_> = queue.commands().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["js", "config", "event", "event"]);
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.commands_named("event").len(), 2);
        assert_eq!(queue.events_named("b").len(), 1);
        assert_eq!(queue.last().unwrap().event_name(), Some("b"));
    }

    #[test]
    fn test_seeded_queue_is_not_empty() {
        let queue = InMemoryQueue::with_commands(vec![Command::new("set", vec![])]);
        assert!(!queue.is_empty());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_null_queue() {
        let queue = NullQueue;
        queue.ensure_exists();
        queue.push(Command::event("ignored", EventParams::new()));
        assert!(queue.is_empty());
    }
}
