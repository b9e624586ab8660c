//! CLI command handlers.

mod sync;

pub use sync::run_sync;

#[cfg(test)]
pub(crate) use sync::event_line;
