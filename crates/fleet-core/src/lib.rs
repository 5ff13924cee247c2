pub mod contacts;
pub mod log;
pub mod types;

#[cfg(test)]
mod tests;

pub use contacts::{ContactError, ContactRegistry, EmergencyContact};
pub use log::{LogBook, LogEntry};
pub use types::*;
