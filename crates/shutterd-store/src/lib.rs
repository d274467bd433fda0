// ABOUTME: Persistence layer for shutterd, handling the durable event and operational logs.
// ABOUTME: Provides whole-document JSON event storage and line-oriented system logging.

pub mod events;
pub mod system;

pub use events::{EventLog, EventLogError};
pub use system::{SystemLog, SystemLogError};
