//! Command contracts shared between the tracker and its queues.
//!
//! Defines the `Command` tuple pushed onto the vendor command queue and the
//! `CommandQueue` trait the tracker writes through.

mod command;
mod queue;

pub use command::{command_names, event_names, Command, EventParams};
pub use queue::{CommandQueue, CommandQueueRef, InMemoryQueue, NullQueue};
