//! Observability for Quotebook
//!
//! Logging uses `tracing`. The binary installs a subscriber at startup;
//! library code only emits events.

mod logging;

pub use logging::init_logging;
