//! # Quote Store
//!
//! In-memory collection of quotes mirrored to a JSON file.
//!
//! The store owns the authoritative sequence. Every mutation rewrites the
//! whole file before the new sequence becomes visible to readers.

pub mod errors;
pub mod file;
pub mod quote;
pub mod store;

pub use errors::{QuoteError, QuoteResult};
pub use file::QuoteFile;
pub use quote::{NewQuote, Quote, QuotePatch};
pub use store::QuoteStore;
