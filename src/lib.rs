//! quotebook - a small file-backed quote service
//!
//! The [`quotes`] module holds the store; [`http_server`] exposes it as a
//! JSON API and [`cli`] wires everything into the binary.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod quotes;
